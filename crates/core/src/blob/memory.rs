use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{BlobError, BlobStore, PutObject};

const SCHEME: &str = "memory://";

#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub bytes: Bytes,
    pub content_type: String,
    pub metadata: Vec<(String, String)>,
}

/// Blob store held in process memory. URLs use a `memory://` scheme.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: RwLock<HashMap<String, StoredBlob>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<StoredBlob> {
        self.objects.read().await.get(key).cloned()
    }

    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, object: PutObject) -> Result<(), BlobError> {
        self.objects.write().await.insert(
            object.key,
            StoredBlob {
                bytes: object.bytes,
                content_type: object.content_type,
                metadata: object.metadata,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), BlobError> {
        // S3 deletes are idempotent; mirror that.
        self.objects.write().await.remove(key);
        Ok(())
    }

    async fn signed_url(&self, key: &str, expires_in: Duration) -> Result<String, BlobError> {
        if !self.objects.read().await.contains_key(key) {
            return Err(BlobError::NotFound {
                key: key.to_string(),
            });
        }
        let expires = Utc::now().timestamp() + expires_in.as_secs() as i64;
        Ok(format!("{SCHEME}{key}?expires={expires}"))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{SCHEME}{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_sign_delete() {
        let store = MemoryBlobStore::new();
        store
            .put(PutObject {
                key: "resources/patients/1-a.pdf".into(),
                bytes: Bytes::from_static(b"%PDF"),
                content_type: "application/pdf".into(),
                metadata: vec![],
            })
            .await
            .unwrap();

        let url = store
            .signed_url("resources/patients/1-a.pdf", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(url.starts_with("memory://resources/patients/1-a.pdf?expires="));

        store.delete("resources/patients/1-a.pdf").await.unwrap();
        assert!(store.keys().await.is_empty());
        assert!(matches!(
            store.signed_url("resources/patients/1-a.pdf", Duration::from_secs(60)).await,
            Err(BlobError::NotFound { .. })
        ));
    }
}
