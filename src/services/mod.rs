//! Business logic services

pub mod assets;
pub mod auth;
pub mod dashboard;
pub mod destinations;
pub mod inquiries;
pub mod revalidation;
pub mod seed;
pub mod testimonials;
pub mod tours;

use std::sync::Arc;

use crate::{
    config::AuthConfig,
    repository::{DestinationStore, InquiryStore, Repository, TourStore},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub tours: tours::ToursService,
    pub destinations: destinations::DestinationsService,
    pub testimonials: testimonials::TestimonialsService,
    pub inquiries: inquiries::InquiriesService,
    pub dashboard: dashboard::DashboardService,
    pub assets: Arc<dyn assets::AssetStore>,
    pub revalidator: revalidation::Revalidator,
}

impl Services {
    /// Create all services with the given repository and asset store
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        assets: Arc<dyn assets::AssetStore>,
    ) -> Self {
        let revalidator = revalidation::Revalidator::default();

        let tour_store: Arc<dyn TourStore> = Arc::new(repository.tours);
        let destination_store: Arc<dyn DestinationStore> = Arc::new(repository.destinations);
        let inquiry_store: Arc<dyn InquiryStore> = Arc::new(repository.inquiries);

        Self {
            auth: auth::AuthService::new(Arc::new(repository.admin_users), auth_config),
            tours: tours::ToursService::new(tour_store.clone(), assets.clone(), revalidator.clone()),
            destinations: destinations::DestinationsService::new(
                destination_store.clone(),
                assets.clone(),
                revalidator.clone(),
            ),
            testimonials: testimonials::TestimonialsService::new(
                Arc::new(repository.testimonials),
                assets.clone(),
                revalidator.clone(),
            ),
            inquiries: inquiries::InquiriesService::new(inquiry_store.clone(), revalidator.clone()),
            dashboard: dashboard::DashboardService::new(tour_store, destination_store, inquiry_store),
            assets,
            revalidator,
        }
    }
}
