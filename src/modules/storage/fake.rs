use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::core::error::AppError;
use crate::modules::storage::ObjectStorage;

pub const FAKE_STORAGE_BASE_URL: &str = "https://storage.test/rukun-regensi-uploads";

/// Stored object as seen by the fake bucket
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub content_type: String,
    pub size: usize,
}

/// In-memory [`ObjectStorage`] that can be told to reject or hang uploads
pub struct FakeStorage {
    objects: Mutex<Vec<StoredObject>>,
    fail_uploads: AtomicBool,
    stall_uploads: AtomicBool,
}

impl FakeStorage {
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(Vec::new()),
            fail_uploads: AtomicBool::new(false),
            stall_uploads: AtomicBool::new(false),
        }
    }

    pub fn fake_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// Uploads never complete while set
    pub fn fake_stall_uploads(&self, stall: bool) {
        self.stall_uploads.store(stall, Ordering::SeqCst);
    }

    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn upload(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        if self.stall_uploads.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(AppError::ExternalServiceError(format!(
                "Failed to upload file '{}': bucket unreachable",
                key
            )));
        }
        self.objects.lock().unwrap().push(StoredObject {
            key: key.to_string(),
            content_type: content_type.to_string(),
            size: data.len(),
        });
        Ok(key.to_string())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", FAKE_STORAGE_BASE_URL, key)
    }
}
