use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    ContactStore, HomeContentStore, ResourceStore, Store, StoreError, StoreResult, SubscriberStore,
};
use crate::contact::model::{ContactMessage, ContactQuery, NewContactMessage};
use crate::content::model::{HomeContent, HomeContentDocument};
use crate::resource::model::{NewResource, Resource, ResourceFilter};
use crate::subscriber::model::{EmailSubscriber, NewSubscriber};

/// Process-local store. Rows are kept in insertion order so "newest first"
/// is a reverse scan.
#[derive(Debug, Default)]
pub struct MemoryStore {
    home_content: RwLock<Option<HomeContentDocument>>,
    resources: RwLock<Vec<Resource>>,
    messages: RwLock<Vec<ContactMessage>>,
    subscribers: RwLock<Vec<EmailSubscriber>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HomeContentStore for MemoryStore {
    async fn load(&self) -> StoreResult<Option<HomeContentDocument>> {
        Ok(self.home_content.read().await.clone())
    }

    async fn save(&self, content: &HomeContent) -> StoreResult<HomeContentDocument> {
        let doc = HomeContentDocument {
            content: content.clone(),
            updated_at: Utc::now(),
        };
        *self.home_content.write().await = Some(doc.clone());
        Ok(doc)
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn insert(&self, new: NewResource) -> StoreResult<Resource> {
        let now = Utc::now();
        let resource = Resource {
            id: Uuid::now_v7(),
            title: new.title,
            description: new.description,
            category: new.category,
            file_url: new.file_url,
            file_key: new.file_key,
            file_type: "pdf".to_string(),
            file_size: new.file_size,
            is_published: new.is_published,
            created_at: now,
            updated_at: now,
        };
        self.resources.write().await.push(resource.clone());
        Ok(resource)
    }

    async fn find(&self, id: Uuid) -> StoreResult<Option<Resource>> {
        Ok(self.resources.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self, filter: ResourceFilter) -> StoreResult<Vec<Resource>> {
        Ok(self
            .resources
            .read()
            .await
            .iter()
            .rev()
            .filter(|r| filter.category.is_none_or(|c| r.category == c))
            .filter(|r| filter.is_published.is_none_or(|p| r.is_published == p))
            .cloned()
            .collect())
    }

    async fn update(&self, resource: &Resource) -> StoreResult<Option<Resource>> {
        let mut resources = self.resources.write().await;
        let Some(stored) = resources.iter_mut().find(|r| r.id == resource.id) else {
            return Ok(None);
        };
        stored.title = resource.title.clone();
        stored.description = resource.description.clone();
        stored.category = resource.category;
        stored.is_published = resource.is_published;
        stored.updated_at = Utc::now();
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut resources = self.resources.write().await;
        let before = resources.len();
        resources.retain(|r| r.id != id);
        Ok(resources.len() != before)
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn insert(&self, new: NewContactMessage) -> StoreResult<ContactMessage> {
        let message = ContactMessage {
            id: Uuid::now_v7(),
            name: new.name,
            email: new.email,
            subject: new.subject,
            message: new.message,
            is_read: false,
            created_at: Utc::now(),
        };
        self.messages.write().await.push(message.clone());
        Ok(message)
    }

    async fn list(&self, query: ContactQuery) -> StoreResult<(Vec<ContactMessage>, u64)> {
        let messages = self.messages.read().await;
        let matching: Vec<&ContactMessage> = messages
            .iter()
            .rev()
            .filter(|m| query.is_read.is_none_or(|r| m.is_read == r))
            .collect();
        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(usize::try_from(query.offset()).unwrap_or(usize::MAX))
            .take(query.limit as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn set_read(&self, id: Uuid, is_read: bool) -> StoreResult<Option<ContactMessage>> {
        let mut messages = self.messages.write().await;
        Ok(messages.iter_mut().find(|m| m.id == id).map(|m| {
            m.is_read = is_read;
            m.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut messages = self.messages.write().await;
        let before = messages.len();
        messages.retain(|m| m.id != id);
        Ok(messages.len() != before)
    }

    async fn unread_count(&self) -> StoreResult<u64> {
        Ok(self.messages.read().await.iter().filter(|m| !m.is_read).count() as u64)
    }
}

#[async_trait]
impl SubscriberStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<EmailSubscriber>> {
        Ok(self
            .subscribers
            .read()
            .await
            .iter()
            .find(|s| s.email == email)
            .cloned())
    }

    async fn insert(&self, new: NewSubscriber) -> StoreResult<EmailSubscriber> {
        let mut subscribers = self.subscribers.write().await;
        if subscribers.iter().any(|s| s.email == new.email) {
            return Err(StoreError::Duplicate("email"));
        }
        let subscriber = EmailSubscriber {
            id: Uuid::now_v7(),
            email: new.email,
            source: new.source,
            created_at: Utc::now(),
        };
        subscribers.push(subscriber.clone());
        Ok(subscriber)
    }

    async fn list(&self) -> StoreResult<Vec<EmailSubscriber>> {
        Ok(self.subscribers.read().await.iter().rev().cloned().collect())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
