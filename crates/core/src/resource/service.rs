use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use super::model::{
    Category, NewResource, PublicResource, Resource, ResourceFilter, ResourceUpdate,
};
use crate::blob::key::{key_timestamp_ms, resource_key};
use crate::blob::{delete_best_effort, BlobStore, PutObject};
use crate::error::{ServiceError, ServiceResult};
use crate::file::{FileKind, FileUpload};
use crate::store::ResourceStore;
use crate::validate::{non_blank, ValidationError};

/// Signed download links for public listings last an hour unless configured.
pub const DEFAULT_SIGNED_URL_TTL: Duration = Duration::from_secs(3600);

/// Fields of the admin upload form, before validation.
#[derive(Debug, Clone, Default)]
pub struct ResourceUpload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_published: Option<bool>,
    pub document: Option<FileUpload>,
}

#[derive(Clone)]
pub struct ResourceService {
    store: Arc<dyn ResourceStore>,
    blobs: Arc<dyn BlobStore>,
    signed_url_ttl: Duration,
}

impl ResourceService {
    pub fn new(
        store: Arc<dyn ResourceStore>,
        blobs: Arc<dyn BlobStore>,
        signed_url_ttl: Duration,
    ) -> Self {
        Self {
            store,
            blobs,
            signed_url_ttl,
        }
    }

    /// Validate the form, store the PDF, then persist metadata pointing at it.
    /// A failed metadata write removes the just-stored blob.
    pub async fn create(&self, upload: ResourceUpload) -> ServiceResult<Resource> {
        let document = upload.document.ok_or(ValidationError::MissingFile("PDF"))?;
        let (Some(title), Some(description), Some(category)) = (
            non_blank(upload.title.as_deref()),
            non_blank(upload.description.as_deref()),
            non_blank(upload.category.as_deref()),
        ) else {
            return Err(ValidationError::ResourceFieldsRequired.into());
        };
        let category: Category = category.parse()?;
        FileKind::Pdf.check(&document)?;

        let now = Utc::now();
        let key = resource_key(
            category,
            key_timestamp_ms(now.timestamp_millis()),
            &document.file_name,
        );
        let file_size = document.size() as i64;
        self.blobs
            .put(PutObject {
                key: key.clone(),
                bytes: document.bytes,
                content_type: document.content_type,
                metadata: vec![
                    ("original-name".into(), document.file_name),
                    ("upload-date".into(), now.to_rfc3339()),
                    ("category".into(), category.to_string()),
                ],
            })
            .await?;

        let new = NewResource {
            title,
            description,
            category,
            file_url: self.blobs.public_url(&key),
            file_key: key.clone(),
            file_size,
            is_published: upload.is_published.unwrap_or(true),
        };
        match self.store.insert(new).await {
            Ok(resource) => {
                tracing::info!(id = %resource.id, %key, "resource uploaded");
                Ok(resource)
            }
            Err(err) => {
                delete_best_effort(self.blobs.as_ref(), &key).await;
                Err(err.into())
            }
        }
    }

    /// Admin view: drafts included, newest first.
    pub async fn list(&self, filter: ResourceFilter) -> ServiceResult<Vec<Resource>> {
        Ok(self.store.list(filter).await?)
    }

    /// Published resources with freshly signed download URLs.
    pub async fn list_public(&self, category: Option<Category>) -> ServiceResult<Vec<PublicResource>> {
        let resources = self
            .store
            .list(ResourceFilter {
                category,
                is_published: Some(true),
            })
            .await?;

        let mut public = Vec::with_capacity(resources.len());
        for resource in resources {
            let url = self
                .blobs
                .signed_url(&resource.file_key, self.signed_url_ttl)
                .await?;
            public.push(PublicResource::from_resource(resource, url));
        }
        Ok(public)
    }

    /// Metadata-only update; the stored file never changes.
    pub async fn update(&self, id: Uuid, update: ResourceUpdate) -> ServiceResult<Resource> {
        let mut resource = self
            .store
            .find(id)
            .await?
            .ok_or(ServiceError::NotFound("resource"))?;
        update.apply(&mut resource)?;
        self.store
            .update(&resource)
            .await?
            .ok_or(ServiceError::NotFound("resource"))
    }

    /// Delete the blob, then the record.
    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let resource = self
            .store
            .find(id)
            .await?
            .ok_or(ServiceError::NotFound("resource"))?;
        self.blobs.delete(&resource.file_key).await?;
        if !self.store.delete(id).await? {
            return Err(ServiceError::NotFound("resource"));
        }
        tracing::info!(%id, key = %resource.file_key, "resource deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use bytes::Bytes;

    use super::*;
    use crate::blob::memory::MemoryBlobStore;
    use crate::file::MAX_PDF_BYTES;
    use crate::store::memory::MemoryStore;
    use crate::store::{StoreError, StoreResult};

    fn service() -> (ResourceService, Arc<MemoryBlobStore>) {
        let blobs = Arc::new(MemoryBlobStore::new());
        let service = ResourceService::new(
            Arc::new(MemoryStore::new()),
            blobs.clone(),
            DEFAULT_SIGNED_URL_TTL,
        );
        (service, blobs)
    }

    fn pdf(name: &str, size: usize) -> FileUpload {
        FileUpload::new(name, "application/pdf", Bytes::from(vec![b'%'; size]))
    }

    fn upload(category: &str, document: Option<FileUpload>) -> ResourceUpload {
        ResourceUpload {
            title: Some("Antibiotic checklist".into()),
            description: Some("Questions before you start".into()),
            category: Some(category.into()),
            is_published: None,
            document,
        }
    }

    #[tokio::test]
    async fn create_defaults_to_published() {
        let (service, blobs) = service();
        let resource = service
            .create(upload("patients", Some(pdf("check list.pdf", 128))))
            .await
            .unwrap();

        assert!(resource.is_published);
        assert_eq!(resource.category, Category::Patients);
        assert_eq!(resource.file_size, 128);
        assert_eq!(resource.file_type, "pdf");
        assert!(resource.file_key.starts_with("resources/patients/"));
        assert!(resource.file_key.ends_with("-check_list.pdf"));

        let stored = blobs.get(&resource.file_key).await.unwrap();
        assert_eq!(stored.content_type, "application/pdf");
        assert!(stored
            .metadata
            .contains(&("category".to_string(), "patients".to_string())));
    }

    #[tokio::test]
    async fn invalid_uploads_never_touch_the_blob_store() {
        let (service, blobs) = service();

        let cases = [
            upload("patients", None),
            upload("everyone", Some(pdf("a.pdf", 1))),
            upload(
                "patients",
                Some(FileUpload::new("a.png", "image/png", Bytes::from_static(b"png"))),
            ),
            upload("patients", Some(pdf("big.pdf", MAX_PDF_BYTES + 1))),
            ResourceUpload {
                title: Some(" ".into()),
                ..upload("patients", Some(pdf("a.pdf", 1)))
            },
        ];
        for case in cases {
            let err = service.create(case).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)), "{err:?}");
        }
        assert!(blobs.keys().await.is_empty());
        assert!(service.list(ResourceFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn public_listing_only_shows_published_with_signed_urls() {
        let (service, _) = service();
        service
            .create(upload("patients", Some(pdf("a.pdf", 1))))
            .await
            .unwrap();
        service
            .create(ResourceUpload {
                is_published: Some(false),
                ..upload("patients", Some(pdf("draft.pdf", 1)))
            })
            .await
            .unwrap();
        service
            .create(upload("clinicians", Some(pdf("c.pdf", 1))))
            .await
            .unwrap();

        let public = service.list_public(None).await.unwrap();
        assert_eq!(public.len(), 2);
        assert!(public.iter().all(|r| r.file_url.contains("?expires=")));

        let patients = service.list_public(Some(Category::Patients)).await.unwrap();
        assert_eq!(patients.len(), 1);
        assert_eq!(service.list(ResourceFilter::default()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn identically_named_uploads_get_their_own_blobs() {
        let (service, blobs) = service();
        let first = service
            .create(upload("patients", Some(pdf("guide.pdf", 1))))
            .await
            .unwrap();
        let second = service
            .create(upload("patients", Some(pdf("guide.pdf", 2))))
            .await
            .unwrap();
        assert_ne!(first.file_key, second.file_key);
        assert!(second.file_key.ends_with("-guide.pdf"));

        service.delete(first.id).await.unwrap();

        assert_eq!(blobs.keys().await, vec![second.file_key.clone()]);
        let public = service.list_public(None).await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].id, second.id);
        assert_eq!(public[0].file_size, 2);
    }

    #[tokio::test]
    async fn update_changes_metadata_only() {
        let (service, _) = service();
        let created = service
            .create(upload("patients", Some(pdf("a.pdf", 1))))
            .await
            .unwrap();

        let updated = service
            .update(
                created.id,
                ResourceUpdate {
                    is_published: Some(false),
                    category: Some("clinicians".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!updated.is_published);
        assert_eq!(updated.category, Category::Clinicians);
        assert_eq!(updated.file_key, created.file_key);

        assert!(matches!(
            service.update(Uuid::new_v4(), ResourceUpdate::default()).await,
            Err(ServiceError::NotFound("resource"))
        ));
    }

    #[tokio::test]
    async fn delete_removes_blob_and_record() {
        let (service, blobs) = service();
        let created = service
            .create(upload("patients", Some(pdf("a.pdf", 1))))
            .await
            .unwrap();

        service.delete(created.id).await.unwrap();

        assert!(blobs.keys().await.is_empty());
        assert!(service.list_public(None).await.unwrap().is_empty());
        assert!(service.list(ResourceFilter::default()).await.unwrap().is_empty());
        assert!(matches!(
            service.delete(created.id).await,
            Err(ServiceError::NotFound("resource"))
        ));
    }

    struct RejectingStore;

    #[async_trait]
    impl ResourceStore for RejectingStore {
        async fn insert(&self, _new: NewResource) -> StoreResult<Resource> {
            Err(StoreError::Corrupt("insert refused".into()))
        }
        async fn find(&self, _id: Uuid) -> StoreResult<Option<Resource>> {
            Ok(None)
        }
        async fn list(&self, _filter: ResourceFilter) -> StoreResult<Vec<Resource>> {
            Ok(Vec::new())
        }
        async fn update(&self, _resource: &Resource) -> StoreResult<Option<Resource>> {
            Ok(None)
        }
        async fn delete(&self, _id: Uuid) -> StoreResult<bool> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn failed_metadata_write_removes_stored_blob() {
        let blobs = Arc::new(MemoryBlobStore::new());
        let service =
            ResourceService::new(Arc::new(RejectingStore), blobs.clone(), DEFAULT_SIGNED_URL_TTL);

        let err = service
            .create(upload("patients", Some(pdf("a.pdf", 1))))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Store(_)));
        assert!(blobs.keys().await.is_empty());
    }
}
