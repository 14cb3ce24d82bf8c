//! Destination service

use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::{
    assets::{delete_images_best_effort, AssetStore},
    revalidation::Revalidator,
};
use crate::{
    error::{AppError, AppResult},
    models::destination::{CreateDestination, Destination, UpdateDestination},
    repository::DestinationStore,
};

#[derive(Clone)]
pub struct DestinationsService {
    store: Arc<dyn DestinationStore>,
    assets: Arc<dyn AssetStore>,
    revalidator: Revalidator,
}

impl DestinationsService {
    pub fn new(
        store: Arc<dyn DestinationStore>,
        assets: Arc<dyn AssetStore>,
        revalidator: Revalidator,
    ) -> Self {
        Self { store, assets, revalidator }
    }

    pub async fn list(&self) -> AppResult<Vec<Destination>> {
        self.store.find_many().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Destination> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Destination {} not found", id)))
    }

    pub async fn create(&self, data: CreateDestination) -> AppResult<Destination> {
        data.validate()?;
        self.check_name(&data.name, None).await?;

        let destination = self.store.insert(&data).await?;
        tracing::info!(destination_id = %destination.id, name = %destination.name, "Destination created");
        self.revalidate();
        Ok(destination)
    }

    /// Apply a patch; a replaced image is removed from the asset store
    pub async fn update(&self, id: Uuid, patch: UpdateDestination) -> AppResult<Destination> {
        patch.validate()?;

        let mut destination = self.get_by_id(id).await?;
        if let Some(name) = patch.name.as_deref() {
            if name != destination.name {
                self.check_name(name, Some(id)).await?;
            }
        }

        let replaced_image = destination.apply(patch);
        let updated = self
            .store
            .update(&destination)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Destination {} not found", id)))?;

        if let Some(old) = replaced_image {
            delete_images_best_effort(self.assets.as_ref(), &[old]).await;
        }

        tracing::info!(destination_id = %id, "Destination updated");
        self.revalidate();
        Ok(updated)
    }

    /// Delete a destination and, best-effort, its hosted image
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let destination = self.get_by_id(id).await?;

        delete_images_best_effort(self.assets.as_ref(), &[destination.image]).await;

        if !self.store.delete_by_id(id).await? {
            return Err(AppError::NotFound(format!("Destination {} not found", id)));
        }

        tracing::info!(destination_id = %id, "Destination deleted");
        self.revalidate();
        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.store.count().await
    }

    async fn check_name(&self, name: &str, exclude: Option<Uuid>) -> AppResult<()> {
        if self.store.name_exists(name, exclude).await? {
            return Err(AppError::Conflict(format!(
                "A destination named '{}' already exists",
                name
            )));
        }
        Ok(())
    }

    fn revalidate(&self) {
        self.revalidator.publish(["/admin/destinations", "/", "/destinations"]);
    }
}
