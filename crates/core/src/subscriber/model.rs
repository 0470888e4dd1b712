use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::{non_blank, normalize_email, ValidationError};

pub const DEFAULT_SOURCE: &str = "email-capture";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSubscriber {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscribeRequest {
    pub email: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscriber {
    pub email: String,
    pub source: String,
}

impl SubscribeRequest {
    pub fn validate(self) -> Result<NewSubscriber, ValidationError> {
        Ok(NewSubscriber {
            email: normalize_email(self.email.as_deref())?,
            source: non_blank(self.source.as_deref()).unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        })
    }
}
