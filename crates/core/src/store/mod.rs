//! Document persistence.
//!
//! Each entity gets its own trait so services depend only on what they use.
//! [`postgres::PgStore`] backs production; [`memory::MemoryStore`] backs tests
//! and local runs without a database.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::contact::model::{ContactMessage, ContactQuery, NewContactMessage};
use crate::content::model::{HomeContent, HomeContentDocument};
use crate::resource::model::{NewResource, Resource, ResourceFilter};
use crate::subscriber::model::{EmailSubscriber, NewSubscriber};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate value for unique field {0}")]
    Duplicate(&'static str),

    #[error("stored row is invalid: {0}")]
    Corrupt(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait HomeContentStore: Send + Sync {
    async fn load(&self) -> StoreResult<Option<HomeContentDocument>>;

    /// Upsert the singleton document. Last write wins.
    async fn save(&self, content: &HomeContent) -> StoreResult<HomeContentDocument>;
}

#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn insert(&self, new: NewResource) -> StoreResult<Resource>;

    async fn find(&self, id: Uuid) -> StoreResult<Option<Resource>>;

    /// Newest first.
    async fn list(&self, filter: ResourceFilter) -> StoreResult<Vec<Resource>>;

    /// Persist metadata changes. Returns `None` if the row is gone.
    async fn update(&self, resource: &Resource) -> StoreResult<Option<Resource>>;

    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn insert(&self, new: NewContactMessage) -> StoreResult<ContactMessage>;

    /// One page of messages, newest first, plus the filtered total.
    async fn list(&self, query: ContactQuery) -> StoreResult<(Vec<ContactMessage>, u64)>;

    async fn set_read(&self, id: Uuid, is_read: bool) -> StoreResult<Option<ContactMessage>>;

    async fn delete(&self, id: Uuid) -> StoreResult<bool>;

    async fn unread_count(&self) -> StoreResult<u64>;
}

#[async_trait]
pub trait SubscriberStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<EmailSubscriber>>;

    /// Fails with [`StoreError::Duplicate`] when the email already exists.
    async fn insert(&self, new: NewSubscriber) -> StoreResult<EmailSubscriber>;

    /// Newest first.
    async fn list(&self) -> StoreResult<Vec<EmailSubscriber>>;
}

/// A backend implementing every entity store.
#[async_trait]
pub trait Store: HomeContentStore + ResourceStore + ContactStore + SubscriberStore {
    /// Connectivity check used by the health route.
    async fn ping(&self) -> StoreResult<()>;
}
