use async_trait::async_trait;
use std::sync::Arc;

use crate::core::error::AppError;

/// Binary object store the candidate form uploads into
#[async_trait]
pub trait ObjectStorage: Send + Sync + 'static {
    /// Store `data` under `key`, returning the key
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str)
        -> Result<String, AppError>;

    /// Publicly resolvable URL for an uploaded key
    fn public_url(&self, key: &str) -> String;
}

#[async_trait]
impl<T: ObjectStorage + ?Sized> ObjectStorage for Arc<T> {
    async fn upload(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        (**self).upload(key, data, content_type).await
    }

    fn public_url(&self, key: &str) -> String {
        (**self).public_url(key)
    }
}
