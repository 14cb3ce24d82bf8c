//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    auth, dashboard, destinations, health, inquiries, revalidations, testimonials, tours, uploads,
};

/// Declares the `session` cookie used by the admin endpoints
struct SessionCookie;

impl Modify for SessionCookie {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("session"))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vista Lanka API",
        version = "1.0.0",
        description = "Travel agency site and admin REST API"
    ),
    modifiers(&SessionCookie),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Public site
        tours::list_tours,
        tours::featured_tours,
        tours::get_tour_by_slug,
        destinations::list_destinations,
        testimonials::list_approved_testimonials,
        inquiries::submit_contact,
        inquiries::submit_booking,
        inquiries::submit_tailor_made,
        revalidations::stream_revalidations,
        // Auth
        auth::login_page,
        auth::login,
        auth::logout,
        auth::me,
        // Admin
        dashboard::dashboard,
        tours::admin_list_tours,
        tours::get_tour,
        tours::create_tour,
        tours::update_tour,
        tours::delete_tour,
        destinations::admin_list_destinations,
        destinations::get_destination,
        destinations::create_destination,
        destinations::update_destination,
        destinations::delete_destination,
        testimonials::list_all_testimonials,
        testimonials::get_testimonial,
        testimonials::create_testimonial,
        testimonials::update_testimonial,
        testimonials::set_approval,
        testimonials::delete_testimonial,
        inquiries::list_inquiries,
        inquiries::get_inquiry,
        inquiries::set_inquiry_status,
        inquiries::delete_inquiry,
        uploads::upload_image,
    ),
    components(
        schemas(
            // Tours
            crate::models::tour::Tour,
            crate::models::tour::TourCategory,
            crate::models::tour::ItineraryDay,
            crate::models::tour::CreateTour,
            crate::models::tour::UpdateTour,
            // Destinations
            crate::models::destination::Destination,
            crate::models::destination::CreateDestination,
            crate::models::destination::UpdateDestination,
            // Testimonials
            crate::models::testimonial::Testimonial,
            crate::models::testimonial::CreateTestimonial,
            crate::models::testimonial::UpdateTestimonial,
            crate::models::testimonial::SetApproval,
            // Inquiries
            crate::models::inquiry::Inquiry,
            crate::models::inquiry::InquiryStatus,
            crate::models::inquiry::InquiryType,
            crate::models::inquiry::ContactForm,
            crate::models::inquiry::BookingForm,
            crate::models::inquiry::TailorMadeForm,
            crate::models::inquiry::SetInquiryStatus,
            // Auth
            crate::models::admin_user::AdminUser,
            crate::models::admin_user::AdminRole,
            crate::models::admin_user::LoginRequest,
            crate::models::admin_user::LoginResponse,
            crate::models::admin_user::SessionClaims,
            auth::LoginPage,
            // Admin
            crate::services::dashboard::DashboardStats,
            crate::services::assets::UploadedAsset,
            crate::services::revalidation::Revalidation,
            uploads::UploadForm,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "tours", description = "Tour packages"),
        (name = "destinations", description = "Destinations"),
        (name = "testimonials", description = "Approved testimonials"),
        (name = "inquiries", description = "Contact, booking and tailor-made requests"),
        (name = "revalidation", description = "Page revalidation notices"),
        (name = "auth", description = "Admin sign-in"),
        (name = "admin", description = "Content management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_public_and_admin_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/api/v1/tours/slug/{slug}", "/api/v1/inquiries/tailor-made", "/admin/tours/{id}", "/admin/uploads"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
