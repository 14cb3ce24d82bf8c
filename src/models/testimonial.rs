//! Testimonial model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

/// Customer testimonial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    /// Rating from 1 to 5
    pub rating: i16,
    pub message: String,
    pub image: Option<String>,
    /// Only approved testimonials are shown publicly
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create testimonial request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTestimonial {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[validate(range(min = MIN_RATING, max = MAX_RATING, message = "Rating must be between 1 and 5"))]
    pub rating: i16,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    pub image: Option<String>,
    pub is_approved: Option<bool>,
}

/// Update testimonial request. Approval changes go through the dedicated approval endpoint.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTestimonial {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Location cannot be empty"))]
    pub location: Option<String>,
    #[validate(range(min = MIN_RATING, max = MAX_RATING, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i16>,
    #[validate(length(min = 1, message = "Message cannot be empty"))]
    pub message: Option<String>,
    /// Absent keeps the current image, `null` removes it
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
}

/// Set approval request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetApproval {
    pub approved: bool,
}

impl Testimonial {
    /// Apply a patch, returning the image URL that was replaced or removed (if any)
    pub fn apply(&mut self, patch: UpdateTestimonial) -> Option<String> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(message) = patch.message {
            self.message = message;
        }
        match patch.image {
            Some(image) if image != self.image => std::mem::replace(&mut self.image, image),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const IMAGE: &str = "https://res.cloudinary.com/vista/image/upload/v1/testimonials/sarah.jpg";

    fn with_image() -> Testimonial {
        Testimonial {
            id: Uuid::new_v4(),
            name: "Sarah Johnson".into(),
            location: "London, UK".into(),
            rating: 5,
            message: "Unforgettable trip".into(),
            image: Some(IMAGE.into()),
            is_approved: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_image_patch_states() {
        let absent: UpdateTestimonial = serde_json::from_value(json!({ "rating": 4 })).unwrap();
        let mut t = with_image();
        assert_eq!(t.apply(absent), None);
        assert_eq!(t.image.as_deref(), Some(IMAGE));
        assert_eq!(t.rating, 4);

        let cleared: UpdateTestimonial = serde_json::from_value(json!({ "image": null })).unwrap();
        let mut t = with_image();
        assert_eq!(t.apply(cleared).as_deref(), Some(IMAGE));
        assert_eq!(t.image, None);

        let same: UpdateTestimonial = serde_json::from_value(json!({ "image": IMAGE })).unwrap();
        let mut t = with_image();
        assert_eq!(t.apply(same), None);
        assert_eq!(t.image.as_deref(), Some(IMAGE));
    }
}
