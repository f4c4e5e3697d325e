//! S3/MinIO-compatible client for the candidate image bucket.
//!
//! Uses rust-s3 for object writes. The anonymous-read bucket policy is not
//! covered by rust-s3, so that one request is signed by hand (AWS SigV4).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::{Client, Url};
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::core::config::StorageConfig;
use crate::core::error::AppError;
use crate::modules::storage::ObjectStorage;
use crate::shared::constants::{FOTO_PROFIL_FOLDER, KTP_FOLDER};

type HmacSha256 = Hmac<Sha256>;

/// Folders whose objects are readable without credentials
const PUBLIC_FOLDERS: &[&str] = &[FOTO_PROFIL_FOLDER, KTP_FOLDER];

pub struct MinIOClient {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    config: StorageConfig,
    http_client: Client,
}

impl MinIOClient {
    /// Connect to the bucket, creating it and its public-read policy if needed
    pub async fn new(config: StorageConfig) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Storage credentials rejected: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Internal(format!("Bucket '{}': {}", config.bucket, e)))?;
        // public_url assumes http://endpoint/bucket/key
        bucket.set_path_style();

        let http_client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("HTTP client: {}", e)))?;

        let client = Self {
            bucket,
            region,
            credentials,
            config,
            http_client,
        };

        client.create_bucket().await;
        client.open_image_folders().await;

        info!(
            endpoint = %client.config.endpoint,
            bucket = %client.config.bucket,
            "Object storage ready"
        );

        Ok(client)
    }

    async fn create_bucket(&self) {
        let created = Bucket::create_with_path_style(
            &self.config.bucket,
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )
        .await;

        match created {
            Ok(_) => info!(bucket = %self.config.bucket, "Bucket created"),
            Err(e) if is_already_exists(&e.to_string()) => {
                debug!(bucket = %self.config.bucket, "Bucket already present")
            }
            Err(e) => warn!(
                bucket = %self.config.bucket,
                error = %e,
                "Bucket creation failed, continuing with the existing one"
            ),
        }
    }

    /// Candidate photos and KTP scans are linked directly from the dashboard
    async fn open_image_folders(&self) {
        let policy = public_read_policy(&self.config.bucket, PUBLIC_FOLDERS);

        match self.put_bucket_policy(&policy).await {
            Ok(()) => info!(
                bucket = %self.config.bucket,
                folders = %PUBLIC_FOLDERS.join(","),
                "Anonymous read enabled"
            ),
            Err(e) => warn!(
                bucket = %self.config.bucket,
                error = %e,
                "Bucket policy not applied; run `mc anonymous set download <alias>/{}`",
                self.config.bucket
            ),
        }
    }

    async fn put_bucket_policy(&self, policy: &str) -> Result<(), AppError> {
        let url = Url::parse(&format!("{}/{}?policy", self.config.endpoint, self.config.bucket))
            .map_err(|e| AppError::Internal(format!("Storage endpoint is not a URL: {}", e)))?;
        let host = host_header(&url)?;

        let signer = SigV4 {
            access_key: &self.config.access_key,
            secret_key: &self.config.secret_key,
            region: &self.config.region,
        };
        let signed =
            signer.sign_put(&host, url.path(), "policy=", policy.as_bytes(), Utc::now())?;

        let response = self
            .http_client
            .put(url)
            .header("Host", host)
            .header("x-amz-date", &signed.amz_date)
            .header("x-amz-content-sha256", &signed.payload_hash)
            .header("Authorization", &signed.authorization)
            .header("Content-Type", "application/json")
            .body(policy.to_string())
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Bucket policy request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(AppError::Internal(format!(
            "Bucket policy rejected with {}: {}",
            status, body
        )))
    }
}

fn is_already_exists(message: &str) -> bool {
    ["BucketAlreadyOwnedByYou", "BucketAlreadyExists", "already own it"]
        .iter()
        .any(|marker| message.contains(marker))
}

fn host_header(url: &Url) -> Result<String, AppError> {
    let host = url
        .host_str()
        .ok_or_else(|| AppError::Internal("Storage endpoint has no host".to_string()))?;

    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Bucket policy granting anonymous `s3:GetObject` under each folder
fn public_read_policy(bucket: &str, folders: &[&str]) -> String {
    let resources: Vec<String> = folders
        .iter()
        .map(|folder| format!("arn:aws:s3:::{}/{}/*", bucket, folder))
        .collect();

    json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Effect": "Allow",
            "Principal": {"AWS": "*"},
            "Action": ["s3:GetObject"],
            "Resource": resources
        }]
    })
    .to_string()
}

struct SigV4<'a> {
    access_key: &'a str,
    secret_key: &'a str,
    region: &'a str,
}

struct SignedRequest {
    amz_date: String,
    payload_hash: String,
    authorization: String,
}

impl SigV4<'_> {
    const SIGNED_HEADERS: &'static str = "host;x-amz-content-sha256;x-amz-date";

    fn sign_put(
        &self,
        host: &str,
        path: &str,
        query: &str,
        payload: &[u8],
        at: DateTime<Utc>,
    ) -> Result<SignedRequest, AppError> {
        let date_stamp = at.format("%Y%m%d").to_string();
        let amz_date = at.format("%Y%m%dT%H%M%SZ").to_string();
        let payload_hash = hex::encode(Sha256::digest(payload));

        let canonical_request = format!(
            "PUT\n{}\n{}\nhost:{}\nx-amz-content-sha256:{}\nx-amz-date:{}\n\n{}\n{}",
            path,
            query,
            host,
            payload_hash,
            amz_date,
            Self::SIGNED_HEADERS,
            payload_hash
        );
        let scope = format!("{}/{}/s3/aws4_request", date_stamp, self.region);
        let string_to_sign = format!(
            "AWS4-HMAC-SHA256\n{}\n{}\n{}",
            amz_date,
            scope,
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );

        let mut key = hmac_sha256(
            format!("AWS4{}", self.secret_key).as_bytes(),
            date_stamp.as_bytes(),
        )?;
        for part in [self.region.as_bytes(), b"s3".as_slice(), b"aws4_request".as_slice()] {
            key = hmac_sha256(&key, part)?;
        }
        let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes())?);

        Ok(SignedRequest {
            authorization: format!(
                "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
                self.access_key,
                scope,
                Self::SIGNED_HEADERS,
                signature
            ),
            amz_date,
            payload_hash,
        })
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, AppError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| AppError::Internal(format!("HMAC key: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[async_trait]
impl ObjectStorage for MinIOClient {
    async fn upload(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        let response = self
            .bucket
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to upload file '{}': {}", key, e))
            })?;

        // Without rust-s3's fail-on-err feature, error statuses come back as Ok
        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(AppError::ExternalServiceError(format!(
                "Failed to upload file '{}': storage returned HTTP {}",
                key, status
            )));
        }

        debug!(
            "Uploaded '{}' ({} bytes) to bucket '{}'",
            key,
            data.len(),
            self.config.bucket
        );
        Ok(key.to_string())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.config.public_endpoint, self.config.bucket, key)
    }
}
