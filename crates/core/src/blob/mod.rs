//! Blob storage for resource PDFs and author photos.

pub mod key;
pub mod memory;
pub mod s3;

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("blob {key} not found")]
    NotFound { key: String },

    #[error("blob {operation} failed for {key}: {message}")]
    Backend {
        operation: &'static str,
        key: String,
        message: String,
    },
}

/// An object to write, with the user metadata stored alongside it.
#[derive(Debug, Clone)]
pub struct PutObject {
    pub key: String,
    pub bytes: Bytes,
    pub content_type: String,
    pub metadata: Vec<(String, String)>,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, object: PutObject) -> Result<(), BlobError>;

    async fn delete(&self, key: &str) -> Result<(), BlobError>;

    /// Time-limited read URL for a private object.
    async fn signed_url(&self, key: &str, expires_in: Duration) -> Result<String, BlobError>;

    /// Permanent URL for an object served publicly.
    fn public_url(&self, key: &str) -> String;
}

/// Delete a blob whose failure must not fail the request. Leaves an orphan
/// and a warning behind.
pub async fn delete_best_effort(blobs: &dyn BlobStore, key: &str) {
    if let Err(err) = blobs.delete(key).await {
        tracing::warn!(key, error = %err, "could not delete blob, leaving it orphaned");
    }
}
