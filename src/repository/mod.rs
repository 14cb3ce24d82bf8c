//! Repository layer for database operations
//!
//! Each collection is reached through a store trait so services can be exercised
//! against mocks; the Postgres implementations live in the submodules.

pub mod admin_users;
pub mod destinations;
pub mod inquiries;
pub mod testimonials;
pub mod tours;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        admin_user::{AdminUser, NewAdminUser},
        destination::{CreateDestination, Destination},
        inquiry::{CreateInquiry, Inquiry, InquiryQuery, InquiryStatus},
        testimonial::{CreateTestimonial, Testimonial},
        tour::{NewTour, Tour, TourQuery},
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TourStore: Send + Sync {
    async fn insert(&self, tour: &NewTour) -> AppResult<Tour>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Tour>>;
    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Tour>>;
    /// Newest first
    async fn find_many(&self, query: &TourQuery) -> AppResult<Vec<Tour>>;
    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> AppResult<bool>;
    /// Write every mutable column of `tour`; `None` if the row is gone
    async fn update(&self, tour: &Tour) -> AppResult<Option<Tour>>;
    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool>;
    async fn count(&self) -> AppResult<i64>;
    /// Drop every tour and insert `tours` in one transaction
    async fn replace_all(&self, tours: &[NewTour]) -> AppResult<u64>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DestinationStore: Send + Sync {
    async fn insert(&self, data: &CreateDestination) -> AppResult<Destination>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Destination>>;
    async fn find_many(&self) -> AppResult<Vec<Destination>>;
    async fn name_exists(&self, name: &str, exclude: Option<Uuid>) -> AppResult<bool>;
    async fn update(&self, destination: &Destination) -> AppResult<Option<Destination>>;
    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool>;
    async fn count(&self) -> AppResult<i64>;
    async fn replace_all(&self, destinations: &[CreateDestination]) -> AppResult<u64>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TestimonialStore: Send + Sync {
    async fn insert(&self, data: &CreateTestimonial) -> AppResult<Testimonial>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Testimonial>>;
    async fn find_many(&self, approved_only: bool) -> AppResult<Vec<Testimonial>>;
    async fn update(&self, testimonial: &Testimonial) -> AppResult<Option<Testimonial>>;
    async fn set_approval(&self, id: Uuid, approved: bool) -> AppResult<Option<Testimonial>>;
    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool>;
    async fn replace_all(&self, testimonials: &[CreateTestimonial]) -> AppResult<u64>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InquiryStore: Send + Sync {
    /// Always stored with status `New`
    async fn insert(&self, data: &CreateInquiry) -> AppResult<Inquiry>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Inquiry>>;
    async fn find_many(&self, query: &InquiryQuery) -> AppResult<Vec<Inquiry>>;
    async fn set_status(&self, id: Uuid, status: InquiryStatus) -> AppResult<Option<Inquiry>>;
    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool>;
    async fn count(&self, status: Option<InquiryStatus>) -> AppResult<i64>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminUserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<AdminUser>>;
    async fn insert(&self, user: &NewAdminUser) -> AppResult<AdminUser>;
}

/// Main repository struct holding the database pool and the per-collection stores
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub tours: tours::ToursRepository,
    pub destinations: destinations::DestinationsRepository,
    pub testimonials: testimonials::TestimonialsRepository,
    pub inquiries: inquiries::InquiriesRepository,
    pub admin_users: admin_users::AdminUsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            tours: tours::ToursRepository::new(pool.clone()),
            destinations: destinations::DestinationsRepository::new(pool.clone()),
            testimonials: testimonials::TestimonialsRepository::new(pool.clone()),
            inquiries: inquiries::InquiriesRepository::new(pool.clone()),
            admin_users: admin_users::AdminUsersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database (readiness check)
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
