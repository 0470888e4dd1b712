use std::sync::Arc;

use book_site_core::blob::BlobStore;
use book_site_core::content::service::HomeContentService;
use book_site_core::resource::service::ResourceService;
use book_site_core::store::{ContactStore, Store, SubscriberStore};

use crate::config::AppConfig;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    config: AppConfig,
    store: Arc<dyn Store>,
    home_content: HomeContentService,
    resources: ResourceService,
    contacts: Arc<dyn ContactStore>,
    subscribers: Arc<dyn SubscriberStore>,
}

impl AppState {
    pub fn new<S>(store: Arc<S>, blobs: Arc<dyn BlobStore>, config: AppConfig) -> Self
    where
        S: Store + 'static,
    {
        let home_content = HomeContentService::new(store.clone(), blobs.clone());
        let resources = ResourceService::new(store.clone(), blobs, config.signed_url_ttl);
        Self {
            inner: Arc::new(InnerState {
                home_content,
                resources,
                contacts: store.clone(),
                subscribers: store.clone(),
                store,
                config,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &dyn Store {
        self.inner.store.as_ref()
    }

    pub fn home_content(&self) -> &HomeContentService {
        &self.inner.home_content
    }

    pub fn resources(&self) -> &ResourceService {
        &self.inner.resources
    }

    pub fn contacts(&self) -> &dyn ContactStore {
        self.inner.contacts.as_ref()
    }

    pub fn subscribers(&self) -> &dyn SubscriberStore {
        self.inner.subscribers.as_ref()
    }
}
