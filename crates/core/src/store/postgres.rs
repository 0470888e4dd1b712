use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    ContactStore, HomeContentStore, ResourceStore, Store, StoreError, StoreResult, SubscriberStore,
};
use crate::contact::model::{ContactMessage, ContactQuery, NewContactMessage};
use crate::content::model::{HomeContent, HomeContentDocument};
use crate::resource::model::{NewResource, Resource, ResourceFilter};
use crate::subscriber::model::{EmailSubscriber, NewSubscriber};

const RESOURCE_COLUMNS: &str = "id, title, description, category, file_url, file_key, \
     file_type, file_size, is_published, created_at, updated_at";

const CONTACT_COLUMNS: &str = "id, name, email, subject, message, is_read, created_at";

/// UUIDv7 ids break ties between rows written in the same instant.
const NEWEST_FIRST: &str = "ORDER BY created_at DESC, id DESC";

/// PostgreSQL-backed store. Tables come from `migrations/`.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct HomeContentRow {
    content: Json<HomeContent>,
    updated_at: DateTime<Utc>,
}

impl From<HomeContentRow> for HomeContentDocument {
    fn from(row: HomeContentRow) -> Self {
        HomeContentDocument {
            content: row.content.0,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ResourceRow {
    id: Uuid,
    title: String,
    description: String,
    category: String,
    file_url: String,
    file_key: String,
    file_type: String,
    file_size: i64,
    is_published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ResourceRow> for Resource {
    type Error = StoreError;

    fn try_from(row: ResourceRow) -> Result<Self, Self::Error> {
        let category = row
            .category
            .parse()
            .map_err(|_| StoreError::Corrupt(format!("resource {} has category {:?}", row.id, row.category)))?;
        Ok(Resource {
            id: row.id,
            title: row.title,
            description: row.description,
            category,
            file_url: row.file_url,
            file_key: row.file_key,
            file_type: row.file_type,
            file_size: row.file_size,
            is_published: row.is_published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: Uuid,
    name: String,
    email: String,
    subject: String,
    message: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl From<ContactRow> for ContactMessage {
    fn from(row: ContactRow) -> Self {
        ContactMessage {
            id: row.id,
            name: row.name,
            email: row.email,
            subject: row.subject,
            message: row.message,
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SubscriberRow {
    id: Uuid,
    email: String,
    source: String,
    created_at: DateTime<Utc>,
}

impl From<SubscriberRow> for EmailSubscriber {
    fn from(row: SubscriberRow) -> Self {
        EmailSubscriber {
            id: row.id,
            email: row.email,
            source: row.source,
            created_at: row.created_at,
        }
    }
}

fn count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or_default()
}

#[async_trait]
impl HomeContentStore for PgStore {
    async fn load(&self) -> StoreResult<Option<HomeContentDocument>> {
        let row = sqlx::query_as::<_, HomeContentRow>(
            "SELECT content, updated_at FROM home_content WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn save(&self, content: &HomeContent) -> StoreResult<HomeContentDocument> {
        let row = sqlx::query_as::<_, HomeContentRow>(
            "INSERT INTO home_content (id, content, updated_at) VALUES (1, $1, now()) \
             ON CONFLICT (id) DO UPDATE SET content = EXCLUDED.content, updated_at = EXCLUDED.updated_at \
             RETURNING content, updated_at",
        )
        .bind(Json(content))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }
}

#[async_trait]
impl ResourceStore for PgStore {
    async fn insert(&self, new: NewResource) -> StoreResult<Resource> {
        let row = sqlx::query_as::<_, ResourceRow>(&format!(
            "INSERT INTO resources (id, title, description, category, file_url, file_key, file_type, file_size, is_published) \
             VALUES ($1, $2, $3, $4, $5, $6, 'pdf', $7, $8) RETURNING {RESOURCE_COLUMNS}"
        ))
        .bind(Uuid::now_v7())
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.category.as_str())
        .bind(&new.file_url)
        .bind(&new.file_key)
        .bind(new.file_size)
        .bind(new.is_published)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn find(&self, id: Uuid) -> StoreResult<Option<Resource>> {
        sqlx::query_as::<_, ResourceRow>(&format!(
            "SELECT {RESOURCE_COLUMNS} FROM resources WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Resource::try_from)
        .transpose()
    }

    async fn list(&self, filter: ResourceFilter) -> StoreResult<Vec<Resource>> {
        let rows = sqlx::query_as::<_, ResourceRow>(&format!(
            "SELECT {RESOURCE_COLUMNS} FROM resources \
             WHERE ($1::text IS NULL OR category = $1) \
               AND ($2::boolean IS NULL OR is_published = $2) \
             {NEWEST_FIRST}"
        ))
        .bind(filter.category.map(|c| c.as_str()))
        .bind(filter.is_published)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Resource::try_from).collect()
    }

    async fn update(&self, resource: &Resource) -> StoreResult<Option<Resource>> {
        sqlx::query_as::<_, ResourceRow>(&format!(
            "UPDATE resources SET title = $2, description = $3, category = $4, is_published = $5, updated_at = now() \
             WHERE id = $1 RETURNING {RESOURCE_COLUMNS}"
        ))
        .bind(resource.id)
        .bind(&resource.title)
        .bind(&resource.description)
        .bind(resource.category.as_str())
        .bind(resource.is_published)
        .fetch_optional(&self.pool)
        .await?
        .map(Resource::try_from)
        .transpose()
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ContactStore for PgStore {
    async fn insert(&self, new: NewContactMessage) -> StoreResult<ContactMessage> {
        let row = sqlx::query_as::<_, ContactRow>(&format!(
            "INSERT INTO contact_messages (id, name, email, subject, message) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(Uuid::now_v7())
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.subject)
        .bind(&new.message)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn list(&self, query: ContactQuery) -> StoreResult<(Vec<ContactMessage>, u64)> {
        let rows = sqlx::query_as::<_, ContactRow>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contact_messages \
             WHERE ($1::boolean IS NULL OR is_read = $1) \
             {NEWEST_FIRST} LIMIT $2 OFFSET $3"
        ))
        .bind(query.is_read)
        .bind(i64::from(query.limit))
        .bind(i64::try_from(query.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM contact_messages WHERE ($1::boolean IS NULL OR is_read = $1)",
        )
        .bind(query.is_read)
        .fetch_one(&self.pool)
        .await?;

        Ok((rows.into_iter().map(Into::into).collect(), count(total)))
    }

    async fn set_read(&self, id: Uuid, is_read: bool) -> StoreResult<Option<ContactMessage>> {
        let row = sqlx::query_as::<_, ContactRow>(&format!(
            "UPDATE contact_messages SET is_read = $2 WHERE id = $1 RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(id)
        .bind(is_read)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn unread_count(&self) -> StoreResult<u64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages WHERE NOT is_read")
            .fetch_one(&self.pool)
            .await?;
        Ok(count(n))
    }
}

#[async_trait]
impl SubscriberStore for PgStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<EmailSubscriber>> {
        let row = sqlx::query_as::<_, SubscriberRow>(
            "SELECT id, email, source, created_at FROM email_subscribers WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn insert(&self, new: NewSubscriber) -> StoreResult<EmailSubscriber> {
        let row = sqlx::query_as::<_, SubscriberRow>(
            "INSERT INTO email_subscribers (id, email, source) VALUES ($1, $2, $3) \
             RETURNING id, email, source, created_at",
        )
        .bind(Uuid::now_v7())
        .bind(&new.email)
        .bind(&new.source)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if err
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                StoreError::Duplicate("email")
            } else {
                StoreError::Database(err)
            }
        })?;
        Ok(row.into())
    }

    async fn list(&self) -> StoreResult<Vec<EmailSubscriber>> {
        let rows = sqlx::query_as::<_, SubscriberRow>(&format!(
            "SELECT id, email, source, created_at FROM email_subscribers {NEWEST_FIRST}"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
