use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::{non_blank, ValidationError};

/// Audience a downloadable resource is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Patients,
    Clinicians,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Patients => "patients",
            Category::Clinicians => "clinicians",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patients" => Ok(Category::Patients),
            "clinicians" => Ok(Category::Clinicians),
            other => Err(ValidationError::InvalidCategory(other.to_string())),
        }
    }
}

/// A PDF resource and the blob it references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub file_url: String,
    pub file_key: String,
    pub file_type: String,
    pub file_size: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Metadata for a resource whose blob has already been stored.
#[derive(Debug, Clone)]
pub struct NewResource {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub file_url: String,
    pub file_key: String,
    pub file_size: i64,
    pub is_published: bool,
}

/// Metadata-only update. Blank strings are treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_published: Option<bool>,
}

impl ResourceUpdate {
    pub fn apply(self, resource: &mut Resource) -> Result<(), ValidationError> {
        let category = non_blank(self.category.as_deref())
            .map(|raw| raw.parse::<Category>())
            .transpose()?;
        if let Some(title) = non_blank(self.title.as_deref()) {
            resource.title = title;
        }
        if let Some(description) = non_blank(self.description.as_deref()) {
            resource.description = description;
        }
        if let Some(category) = category {
            resource.category = category;
        }
        if let Some(is_published) = self.is_published {
            resource.is_published = is_published;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    pub category: Option<Category>,
    pub is_published: Option<bool>,
}

/// What the public site sees: display fields plus a signed download URL.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicResource {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub file_url: String,
    pub file_type: String,
    pub file_size: i64,
    pub created_at: DateTime<Utc>,
}

impl PublicResource {
    pub fn from_resource(resource: Resource, signed_url: String) -> Self {
        Self {
            id: resource.id,
            title: resource.title,
            description: resource.description,
            category: resource.category,
            file_url: signed_url,
            file_type: resource.file_type,
            file_size: resource.file_size,
            created_at: resource.created_at,
        }
    }
}
