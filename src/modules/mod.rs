//! Modules layer - adapters for the external backend.
//!
//! `gateway` reaches the hosted database, `storage` the object bucket
//! holding candidate photos and KTP scans.

pub mod gateway;
pub mod storage;
