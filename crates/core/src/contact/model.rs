use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::{is_valid_email, non_blank, ValidationError};

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Raw contact form body as posted by the public site.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// A validated, normalized contact message ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn validate(self) -> Result<NewContactMessage, ValidationError> {
        let (Some(name), Some(email), Some(message)) = (
            non_blank(self.name.as_deref()),
            non_blank(self.email.as_deref()),
            non_blank(self.message.as_deref()),
        ) else {
            return Err(ValidationError::ContactFieldsRequired);
        };
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(NewContactMessage {
            name,
            email: email.to_lowercase(),
            subject: non_blank(self.subject.as_deref()).unwrap_or_default(),
            message,
        })
    }
}

/// Admin listing filter with clamped pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactQuery {
    pub is_read: Option<bool>,
    pub page: u32,
    pub limit: u32,
}

impl Default for ContactQuery {
    fn default() -> Self {
        Self {
            is_read: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ContactQuery {
    pub fn new(is_read: Option<bool>, page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            is_read,
            page: page.unwrap_or(1).clamp(1, i64::from(u32::MAX)) as u32,
            limit: limit
                .unwrap_or(i64::from(DEFAULT_PAGE_SIZE))
                .clamp(1, i64::from(MAX_PAGE_SIZE)) as u32,
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub pages: u64,
}

impl Pagination {
    pub fn new(total: u64, query: &ContactQuery) -> Self {
        Self {
            total,
            page: query.page,
            limit: query.limit,
            pages: total.div_ceil(u64::from(query.limit)),
        }
    }
}
