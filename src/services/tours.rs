//! Tour package service: CRUD, slug assignment and image cleanup

use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::{
    assets::{delete_images_best_effort, AssetStore},
    revalidation::Revalidator,
};
use crate::{
    error::{AppError, AppResult},
    models::tour::{
        non_blank_or, CreateTour, NewTour, Tour, TourQuery, UpdateTour, DEFAULT_GROUP_SIZE,
        DEFAULT_START_LOCATION,
    },
    repository::TourStore,
    slug::slugify,
};

/// Number of tours shown in the home page "featured" strip
pub const FEATURED_LIMIT: i64 = 6;

#[derive(Clone)]
pub struct ToursService {
    store: Arc<dyn TourStore>,
    assets: Arc<dyn AssetStore>,
    revalidator: Revalidator,
}

impl ToursService {
    pub fn new(store: Arc<dyn TourStore>, assets: Arc<dyn AssetStore>, revalidator: Revalidator) -> Self {
        Self { store, assets, revalidator }
    }

    /// List tours, newest first
    pub async fn list(&self, query: &TourQuery) -> AppResult<Vec<Tour>> {
        self.store.find_many(query).await
    }

    /// Featured tours for the home page
    pub async fn featured(&self) -> AppResult<Vec<Tour>> {
        let query = TourQuery {
            category: None,
            featured: Some(true),
            limit: Some(FEATURED_LIMIT),
        };
        self.store.find_many(&query).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Tour> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tour {} not found", id)))
    }

    pub async fn get_by_slug(&self, slug: &str) -> AppResult<Tour> {
        self.store
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tour '{}' not found", slug)))
    }

    /// Create a tour; the slug is derived from the title
    pub async fn create(&self, data: CreateTour) -> AppResult<Tour> {
        data.validate()?;
        check_price(data.price)?;

        let slug = self.slug_for(&data.title, None).await?;
        let new_tour = NewTour::from_request(data, slug);

        let tour = self.store.insert(&new_tour).await?;
        tracing::info!(tour_id = %tour.id, slug = %tour.slug, "Tour created");
        self.revalidate(&tour.slug, None);
        Ok(tour)
    }

    /// Apply a patch. Removed images are deleted from the asset store once the
    /// record is saved; a changed title regenerates the slug.
    pub async fn update(&self, id: Uuid, patch: UpdateTour) -> AppResult<Tour> {
        patch.validate()?;
        if let Some(price) = patch.price {
            check_price(price)?;
        }

        let mut tour = self.get_by_id(id).await?;
        let previous_slug = tour.slug.clone();

        if let Some(title) = patch.title {
            if title != tour.title {
                tour.slug = self.slug_for(&title, Some(id)).await?;
                tour.title = title;
            }
        }

        let mut removed_images = Vec::new();
        if let Some(images) = patch.images {
            removed_images = tour
                .images
                .iter()
                .filter(|url| !images.contains(url))
                .cloned()
                .collect();
            tour.images = images;
        }

        if let Some(price) = patch.price {
            tour.price = price;
        }
        if let Some(duration) = patch.duration {
            tour.duration = duration;
        }
        if let Some(category) = patch.category {
            tour.category = category;
        }
        if let Some(description) = patch.description {
            tour.description = description;
        }
        if let Some(itinerary) = patch.itinerary {
            tour.itinerary = itinerary;
        }
        if let Some(inclusions) = patch.inclusions {
            tour.inclusions = inclusions;
        }
        if let Some(exclusions) = patch.exclusions {
            tour.exclusions = exclusions;
        }
        if let Some(group_size) = patch.group_size {
            tour.group_size = non_blank_or(Some(group_size), DEFAULT_GROUP_SIZE);
        }
        if let Some(start_location) = patch.start_location {
            tour.start_location = non_blank_or(Some(start_location), DEFAULT_START_LOCATION);
        }
        if let Some(is_featured) = patch.is_featured {
            tour.is_featured = is_featured;
        }

        let updated = self
            .store
            .update(&tour)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tour {} not found", id)))?;

        if !removed_images.is_empty() {
            delete_images_best_effort(self.assets.as_ref(), &removed_images).await;
        }

        tracing::info!(tour_id = %id, slug = %updated.slug, "Tour updated");
        let old_slug = (previous_slug != updated.slug).then_some(previous_slug.as_str());
        self.revalidate(&updated.slug, old_slug);
        Ok(updated)
    }

    /// Delete a tour and its hosted images. Image deletion is best-effort: the
    /// record is removed even if the asset store fails.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let tour = self.get_by_id(id).await?;

        let deleted = delete_images_best_effort(self.assets.as_ref(), &tour.images).await;

        if !self.store.delete_by_id(id).await? {
            return Err(AppError::NotFound(format!("Tour {} not found", id)));
        }

        tracing::info!(tour_id = %id, images_deleted = deleted, "Tour deleted");
        self.revalidate(&tour.slug, None);
        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.store.count().await
    }

    /// Derive a slug for `title` and make sure no other tour uses it
    async fn slug_for(&self, title: &str, exclude: Option<Uuid>) -> AppResult<String> {
        let slug = slugify(title);
        if slug.is_empty() {
            return Err(AppError::Validation(
                "title: must contain at least one letter or digit".to_string(),
            ));
        }
        if self.store.slug_exists(&slug, exclude).await? {
            return Err(AppError::Conflict(format!(
                "A tour with slug '{}' already exists",
                slug
            )));
        }
        Ok(slug)
    }

    fn revalidate(&self, slug: &str, old_slug: Option<&str>) {
        let mut paths = vec![
            "/admin/tours".to_string(),
            "/".to_string(),
            "/packages".to_string(),
            format!("/packages/{}", slug),
        ];
        if let Some(old) = old_slug {
            paths.push(format!("/packages/{}", old));
        }
        self.revalidator.publish(paths);
    }
}

/// Prices are stored as NUMERIC(12, 2)
const PRICE_SCALE: u32 = 2;
const PRICE_LIMIT: i64 = 10_000_000_000;

fn check_price(price: Decimal) -> AppResult<()> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(AppError::Validation("price: must not be negative".to_string()));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(AppError::Validation("price: at most 2 decimal places".to_string()));
    }
    if price >= Decimal::from(PRICE_LIMIT) {
        return Err(AppError::Validation("price: too large".to_string()));
    }
    Ok(())
}
