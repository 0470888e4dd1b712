use std::sync::Arc;

use chrono::Utc;

use super::model::{HomeContent, HomeContentDocument, HomeContentPatch};
use crate::blob::key::{author_photo_key, key_timestamp_ms};
use crate::blob::{delete_best_effort, BlobStore, PutObject};
use crate::error::{ServiceError, ServiceResult};
use crate::file::{FileKind, FileUpload};
use crate::store::HomeContentStore;

/// Reads and upserts the singleton home content, including the author photo
/// side effect.
#[derive(Clone)]
pub struct HomeContentService {
    store: Arc<dyn HomeContentStore>,
    blobs: Arc<dyn BlobStore>,
}

impl HomeContentService {
    pub fn new(store: Arc<dyn HomeContentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { store, blobs }
    }

    pub async fn get(&self) -> ServiceResult<HomeContentDocument> {
        self.store
            .load()
            .await?
            .ok_or(ServiceError::NotFound("home content"))
    }

    /// Apply `patch` to the stored document (or an empty one) and upsert it.
    ///
    /// With a photo, the previous photo blob is deleted best-effort before the
    /// new one is stored under `authors/`.
    pub async fn update(
        &self,
        patch: HomeContentPatch,
        photo: Option<FileUpload>,
    ) -> ServiceResult<HomeContentDocument> {
        if let Some(photo) = &photo {
            FileKind::Image.check(photo)?;
        }

        let mut content = self
            .store
            .load()
            .await?
            .map(|doc| doc.content)
            .unwrap_or_default();
        let previous_key = content.about_author.photo_key.clone();
        patch.apply(&mut content);

        let mut stored_key = None;
        if let Some(photo) = photo {
            if let Some(old) = previous_key.as_deref() {
                delete_best_effort(self.blobs.as_ref(), old).await;
            }
            let key = self.store_photo(photo).await?;
            content.about_author.photo_url = Some(self.blobs.public_url(&key));
            content.about_author.photo_key = Some(key.clone());
            stored_key = Some(key);
        }

        match self.store.save(&content).await {
            Ok(doc) => Ok(doc),
            Err(err) => {
                if let Some(key) = stored_key {
                    delete_best_effort(self.blobs.as_ref(), &key).await;
                }
                Err(err.into())
            }
        }
    }

    /// Store `defaults` unless a document already exists. Returns whether it
    /// wrote anything.
    pub async fn seed(&self, defaults: &HomeContent) -> ServiceResult<bool> {
        if self.store.load().await?.is_some() {
            return Ok(false);
        }
        self.store.save(defaults).await?;
        Ok(true)
    }

    async fn store_photo(&self, photo: FileUpload) -> ServiceResult<String> {
        let now = Utc::now();
        let key = author_photo_key(key_timestamp_ms(now.timestamp_millis()), &photo.file_name);
        self.blobs
            .put(PutObject {
                key: key.clone(),
                bytes: photo.bytes,
                content_type: photo.content_type,
                metadata: vec![
                    ("original-name".into(), photo.file_name),
                    ("upload-date".into(), now.to_rfc3339()),
                    ("folder".into(), "authors".into()),
                    ("file-type".into(), "author-photo".into()),
                ],
            })
            .await?;
        tracing::info!(%key, "stored author photo");
        Ok(key)
    }
}
