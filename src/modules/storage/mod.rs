//! Object storage for candidate images.
//!
//! One S3/MinIO-compatible bucket, partitioned into `foto-profil/` and
//! `ktp/` folders. Objects are publicly readable by URL.

#[cfg(test)]
pub mod fake;
mod minio_client;
mod object_storage;

pub use minio_client::MinIOClient;
pub use object_storage::ObjectStorage;
