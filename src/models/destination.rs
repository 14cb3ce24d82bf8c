//! Destination model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Destination record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: Uuid,
    /// Unique destination name
    pub name: String,
    pub description: String,
    /// Image URL
    pub image: String,
    pub highlights: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create destination request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateDestination {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Image is required"))]
    pub image: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// Update destination request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateDestination {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Image cannot be empty"))]
    pub image: Option<String>,
    pub highlights: Option<Vec<String>>,
}

impl Destination {
    /// Apply a patch, returning the image URL that was replaced (if any)
    pub fn apply(&mut self, patch: UpdateDestination) -> Option<String> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(highlights) = patch.highlights {
            self.highlights = highlights;
        }
        match patch.image {
            Some(image) if image != self.image => Some(std::mem::replace(&mut self.image, image)),
            _ => None,
        }
    }
}
