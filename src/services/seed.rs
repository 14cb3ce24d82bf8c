//! Demo content and default admin account for a fresh installation

use serde::Deserialize;
use validator::Validate;

use super::auth::hash_password;
use crate::{
    error::{AppError, AppResult},
    models::{
        admin_user::{AdminRole, NewAdminUser},
        destination::CreateDestination,
        testimonial::CreateTestimonial,
        tour::{CreateTour, NewTour},
    },
    repository::{AdminUserStore, DestinationStore, TestimonialStore, TourStore},
    slug::slugify,
};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@vistalanka.com";
pub const DEFAULT_ADMIN_USERNAME: &str = "Admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "Admin@1234";

const DEMO_DATA: &str = include_str!("../../data/demo.json");

#[derive(Debug, Deserialize)]
pub struct DemoData {
    pub destinations: Vec<CreateDestination>,
    pub tours: Vec<CreateTour>,
    pub testimonials: Vec<CreateTestimonial>,
}

impl DemoData {
    /// Parse and validate the bundled dataset
    pub fn load() -> AppResult<Self> {
        let data: DemoData = serde_json::from_str(DEMO_DATA)
            .map_err(|e| AppError::Internal(format!("Invalid demo data: {}", e)))?;
        for destination in &data.destinations {
            destination.validate()?;
        }
        for tour in &data.tours {
            tour.validate()?;
        }
        for testimonial in &data.testimonials {
            testimonial.validate()?;
        }
        Ok(data)
    }

    /// Tours with their slugs resolved
    pub fn new_tours(&self) -> Vec<NewTour> {
        self.tours
            .iter()
            .cloned()
            .map(|tour| {
                let slug = slugify(&tour.title);
                NewTour::from_request(tour, slug)
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeedReport {
    pub admin_created: bool,
    pub destinations: u64,
    pub tours: u64,
    pub testimonials: u64,
}

/// Stores touched by the seed run
pub struct SeedTargets<'a> {
    pub admin_users: &'a dyn AdminUserStore,
    pub destinations: &'a dyn DestinationStore,
    pub tours: &'a dyn TourStore,
    pub testimonials: &'a dyn TestimonialStore,
}

/// Create the default admin if missing, then replace all public content with the demo dataset
pub async fn run_seed(targets: SeedTargets<'_>) -> AppResult<SeedReport> {
    let data = DemoData::load()?;
    let mut report = SeedReport::default();

    if targets
        .admin_users
        .find_by_email(DEFAULT_ADMIN_EMAIL)
        .await?
        .is_some()
    {
        tracing::info!(email = DEFAULT_ADMIN_EMAIL, "Admin user already exists");
    } else {
        let admin = NewAdminUser {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            password_hash: hash_password(DEFAULT_ADMIN_PASSWORD)?,
            role: AdminRole::SuperAdmin,
        };
        targets.admin_users.insert(&admin).await?;
        report.admin_created = true;
        tracing::info!(email = DEFAULT_ADMIN_EMAIL, "Admin user created");
    }

    report.destinations = targets.destinations.replace_all(&data.destinations).await?;
    tracing::info!(count = report.destinations, "Destinations seeded");

    report.tours = targets.tours.replace_all(&data.new_tours()).await?;
    tracing::info!(count = report.tours, "Tour packages seeded");

    report.testimonials = targets.testimonials.replace_all(&data.testimonials).await?;
    tracing::info!(count = report.testimonials, "Testimonials seeded");

    Ok(report)
}
