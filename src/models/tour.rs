//! Tour package model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_GROUP_SIZE: &str = "2-15 persons";
pub const DEFAULT_START_LOCATION: &str = "Colombo";

/// Tour category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum TourCategory {
    Wildlife,
    Cultural,
    Adventure,
    Beach,
    Family,
    Honeymoon,
    Heritage,
}

impl TourCategory {
    pub const ALL: [TourCategory; 7] = [
        TourCategory::Wildlife,
        TourCategory::Cultural,
        TourCategory::Adventure,
        TourCategory::Beach,
        TourCategory::Family,
        TourCategory::Honeymoon,
        TourCategory::Heritage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TourCategory::Wildlife => "Wildlife",
            TourCategory::Cultural => "Cultural",
            TourCategory::Adventure => "Adventure",
            TourCategory::Beach => "Beach",
            TourCategory::Family => "Family",
            TourCategory::Honeymoon => "Honeymoon",
            TourCategory::Heritage => "Heritage",
        }
    }
}

impl std::str::FromStr for TourCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TourCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Invalid tour category: {}", s))
    }
}

super::text_enum_sqlx!(TourCategory);

/// One day of a tour itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ItineraryDay {
    #[validate(range(min = 1, message = "Itinerary day must be at least 1"))]
    pub day: i32,
    #[validate(length(min = 1, message = "Itinerary title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Itinerary description is required"))]
    pub description: String,
}

/// Internal row structure (itinerary stored as JSONB)
#[derive(Debug, Clone, FromRow)]
pub struct TourRow {
    id: Uuid,
    title: String,
    slug: String,
    price: Decimal,
    duration: String,
    category: TourCategory,
    description: String,
    images: Vec<String>,
    itinerary: Json<Vec<ItineraryDay>>,
    inclusions: Vec<String>,
    exclusions: Vec<String>,
    group_size: String,
    start_location: String,
    is_featured: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TourRow> for Tour {
    fn from(row: TourRow) -> Self {
        Tour {
            id: row.id,
            title: row.title,
            slug: row.slug,
            price: row.price,
            duration: row.duration,
            category: row.category,
            description: row.description,
            images: row.images,
            itinerary: row.itinerary.0,
            inclusions: row.inclusions,
            exclusions: row.exclusions,
            group_size: row.group_size,
            start_location: row.start_location,
            is_featured: row.is_featured,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Tour package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: Uuid,
    pub title: String,
    /// URL identifier derived from the title
    pub slug: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub duration: String,
    pub category: TourCategory,
    pub description: String,
    /// Image URLs, the first one is the main image
    pub images: Vec<String>,
    pub itinerary: Vec<ItineraryDay>,
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
    pub group_size: String,
    pub start_location: String,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fully resolved tour ready to be inserted (slug computed, defaults applied)
#[derive(Debug, Clone, PartialEq)]
pub struct NewTour {
    pub title: String,
    pub slug: String,
    pub price: Decimal,
    pub duration: String,
    pub category: TourCategory,
    pub description: String,
    pub images: Vec<String>,
    pub itinerary: Vec<ItineraryDay>,
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
    pub group_size: String,
    pub start_location: String,
    pub is_featured: bool,
}

impl NewTour {
    /// Resolve a create request: attach the slug and fill in defaults
    pub fn from_request(data: CreateTour, slug: String) -> Self {
        NewTour {
            title: data.title,
            slug,
            price: data.price,
            duration: data.duration,
            category: data.category,
            description: data.description,
            images: data.images,
            itinerary: data.itinerary,
            inclusions: data.inclusions,
            exclusions: data.exclusions,
            group_size: non_blank_or(data.group_size, DEFAULT_GROUP_SIZE),
            start_location: non_blank_or(data.start_location, DEFAULT_START_LOCATION),
            is_featured: data.is_featured.unwrap_or(false),
        }
    }
}

/// `value` unless it is missing or blank
pub fn non_blank_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

/// Create tour request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTour {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[validate(length(min = 1, message = "Duration is required"))]
    pub duration: String,
    pub category: TourCategory,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "At least one image is required"))]
    pub images: Vec<String>,
    #[serde(default)]
    #[validate(nested)]
    pub itinerary: Vec<ItineraryDay>,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    pub group_size: Option<String>,
    pub start_location: Option<String>,
    pub is_featured: Option<bool>,
}

/// Update tour request: only the listed fields may change
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTour {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    #[validate(length(min = 1, message = "Duration cannot be empty"))]
    pub duration: Option<String>,
    pub category: Option<TourCategory>,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "At least one image is required"))]
    pub images: Option<Vec<String>>,
    #[validate(nested)]
    pub itinerary: Option<Vec<ItineraryDay>>,
    pub inclusions: Option<Vec<String>>,
    pub exclusions: Option<Vec<String>>,
    pub group_size: Option<String>,
    pub start_location: Option<String>,
    pub is_featured: Option<bool>,
}

/// Tour list filters
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TourQuery {
    pub category: Option<TourCategory>,
    pub featured: Option<bool>,
    /// Maximum number of tours to return
    pub limit: Option<i64>,
}
