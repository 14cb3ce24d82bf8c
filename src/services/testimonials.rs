//! Testimonial service and moderation

use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::{
    assets::{delete_images_best_effort, AssetStore},
    revalidation::Revalidator,
};
use crate::{
    error::{AppError, AppResult},
    models::testimonial::{CreateTestimonial, Testimonial, UpdateTestimonial},
    repository::TestimonialStore,
};

#[derive(Clone)]
pub struct TestimonialsService {
    store: Arc<dyn TestimonialStore>,
    assets: Arc<dyn AssetStore>,
    revalidator: Revalidator,
}

impl TestimonialsService {
    pub fn new(
        store: Arc<dyn TestimonialStore>,
        assets: Arc<dyn AssetStore>,
        revalidator: Revalidator,
    ) -> Self {
        Self { store, assets, revalidator }
    }

    /// Testimonials visible on the public site
    pub async fn list_approved(&self) -> AppResult<Vec<Testimonial>> {
        self.store.find_many(true).await
    }

    /// Every testimonial, for moderation
    pub async fn list_all(&self) -> AppResult<Vec<Testimonial>> {
        self.store.find_many(false).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Testimonial> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Testimonial {} not found", id)))
    }

    pub async fn create(&self, data: CreateTestimonial) -> AppResult<Testimonial> {
        data.validate()?;
        let testimonial = self.store.insert(&data).await?;
        tracing::info!(
            testimonial_id = %testimonial.id,
            approved = testimonial.is_approved,
            "Testimonial created"
        );
        self.revalidate();
        Ok(testimonial)
    }

    pub async fn update(&self, id: Uuid, patch: UpdateTestimonial) -> AppResult<Testimonial> {
        patch.validate()?;

        let mut testimonial = self.get_by_id(id).await?;
        let replaced_image = testimonial.apply(patch);
        let updated = self
            .store
            .update(&testimonial)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Testimonial {} not found", id)))?;

        if let Some(old) = replaced_image {
            delete_images_best_effort(self.assets.as_ref(), &[old]).await;
        }

        tracing::info!(testimonial_id = %id, "Testimonial updated");
        self.revalidate();
        Ok(updated)
    }

    /// Approve or hide a testimonial. Setting the current value again is a no-op success.
    pub async fn set_approval(&self, id: Uuid, approved: bool) -> AppResult<Testimonial> {
        let testimonial = self
            .store
            .set_approval(id, approved)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Testimonial {} not found", id)))?;
        tracing::info!(testimonial_id = %id, approved, "Testimonial approval changed");
        self.revalidate();
        Ok(testimonial)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let testimonial = self.get_by_id(id).await?;

        if let Some(image) = testimonial.image {
            delete_images_best_effort(self.assets.as_ref(), &[image]).await;
        }

        if !self.store.delete_by_id(id).await? {
            return Err(AppError::NotFound(format!("Testimonial {} not found", id)));
        }

        tracing::info!(testimonial_id = %id, "Testimonial deleted");
        self.revalidate();
        Ok(())
    }

    fn revalidate(&self) {
        self.revalidator.publish(["/admin/testimonials", "/"]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{repository::MockTestimonialStore, services::assets::MockAssetStore};
    use chrono::Utc;
    use mockall::predicate::eq;

    fn input(rating: i16) -> CreateTestimonial {
        CreateTestimonial {
            name: "Sarah Johnson".into(),
            location: "London, UK".into(),
            rating,
            message: "Unforgettable trip".into(),
            image: None,
            is_approved: None,
        }
    }

    fn stored(id: Uuid, is_approved: bool) -> Testimonial {
        Testimonial {
            id,
            name: "Sarah Johnson".into(),
            location: "London, UK".into(),
            rating: 5,
            message: "Unforgettable trip".into(),
            image: None,
            is_approved,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    const OLD_IMAGE: &str = "https://res.cloudinary.com/vista/image/upload/v3/testimonials/sarah.jpg";
    const NEW_IMAGE: &str = "https://res.cloudinary.com/vista/image/upload/v4/testimonials/sarah-2.jpg";

    fn service(store: MockTestimonialStore) -> TestimonialsService {
        with_assets(store, MockAssetStore::new())
    }

    fn with_assets(store: MockTestimonialStore, assets: MockAssetStore) -> TestimonialsService {
        TestimonialsService::new(Arc::new(store), Arc::new(assets), Revalidator::default())
    }

    fn store_with_image() -> MockTestimonialStore {
        let mut store = MockTestimonialStore::new();
        store.expect_find_by_id().returning(|id| {
            let mut t = stored(id, true);
            t.image = Some(OLD_IMAGE.into());
            Ok(Some(t))
        });
        store
    }

    #[tokio::test]
    async fn test_rating_bounds() {
        let mut store = MockTestimonialStore::new();
        store
            .expect_insert()
            .times(2)
            .returning(|data| Ok(stored(Uuid::new_v4(), data.is_approved.unwrap_or(false))));
        let svc = service(store);

        for rating in [0, 6] {
            assert!(matches!(svc.create(input(rating)).await, Err(AppError::Validation(_))));
        }
        for rating in [1, 5] {
            assert!(svc.create(input(rating)).await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_set_approval_is_idempotent() {
        let id = Uuid::new_v4();
        let mut store = MockTestimonialStore::new();
        store
            .expect_set_approval()
            .with(eq(id), eq(true))
            .times(2)
            .returning(|id, approved| Ok(Some(stored(id, approved))));
        let svc = service(store);

        assert!(svc.set_approval(id, true).await.unwrap().is_approved);
        assert!(svc.set_approval(id, true).await.unwrap().is_approved);
    }

    #[tokio::test]
    async fn test_set_approval_missing() {
        let mut store = MockTestimonialStore::new();
        store.expect_set_approval().returning(|_, _| Ok(None));

        let res = service(store).set_approval(Uuid::new_v4(), false).await;
        assert!(matches!(res, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_public_listing_is_approved_only() {
        let mut store = MockTestimonialStore::new();
        store
            .expect_find_many()
            .with(eq(true))
            .times(1)
            .returning(|_| Ok(vec![stored(Uuid::new_v4(), true)]));

        let list = service(store).list_approved().await.unwrap();
        assert!(list.iter().all(|t| t.is_approved));
    }

    #[tokio::test]
    async fn test_update_rejects_bad_rating() {
        let mut store = MockTestimonialStore::new();
        store.expect_find_by_id().never();

        let patch = UpdateTestimonial {
            rating: Some(9),
            ..Default::default()
        };
        let res = service(store).update(Uuid::new_v4(), patch).await;
        assert!(matches!(res, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_replacing_image_deletes_old_one() {
        let mut store = store_with_image();
        store
            .expect_update()
            .withf(|t| t.image.as_deref() == Some(NEW_IMAGE))
            .returning(|t| Ok(Some(t.clone())));
        let mut assets = MockAssetStore::new();
        assets
            .expect_delete()
            .with(eq("testimonials/sarah"))
            .times(1)
            .returning(|_| Ok(true));

        let patch = UpdateTestimonial {
            image: Some(Some(NEW_IMAGE.into())),
            ..Default::default()
        };
        let updated = with_assets(store, assets).update(Uuid::new_v4(), patch).await.unwrap();
        assert_eq!(updated.image.as_deref(), Some(NEW_IMAGE));
    }

    #[tokio::test]
    async fn test_update_removing_image_deletes_it() {
        let mut store = store_with_image();
        store
            .expect_update()
            .withf(|t| t.image.is_none())
            .returning(|t| Ok(Some(t.clone())));
        let mut assets = MockAssetStore::new();
        assets
            .expect_delete()
            .with(eq("testimonials/sarah"))
            .times(1)
            .returning(|_| Ok(true));

        let patch = UpdateTestimonial {
            image: Some(None),
            ..Default::default()
        };
        let updated = with_assets(store, assets).update(Uuid::new_v4(), patch).await.unwrap();
        assert_eq!(updated.image, None);
    }

    #[tokio::test]
    async fn test_update_without_image_keeps_asset() {
        let mut store = store_with_image();
        store.expect_update().returning(|t| Ok(Some(t.clone())));
        let mut assets = MockAssetStore::new();
        assets.expect_delete().never();

        let patch = UpdateTestimonial {
            message: Some("Would travel again".into()),
            ..Default::default()
        };
        let updated = with_assets(store, assets).update(Uuid::new_v4(), patch).await.unwrap();
        assert_eq!(updated.image.as_deref(), Some(OLD_IMAGE));
    }

    #[tokio::test]
    async fn test_delete_removes_image_then_record() {
        let id = Uuid::new_v4();
        let mut seq = mockall::Sequence::new();
        let mut store = store_with_image();
        let mut assets = MockAssetStore::new();
        assets
            .expect_delete()
            .with(eq("testimonials/sarah"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        store
            .expect_delete_by_id()
            .with(eq(id))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));

        assert!(with_assets(store, assets).delete(id).await.is_ok());
    }
}
