//! Admin landing page statistics

use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::inquiry::{Inquiry, InquiryQuery, InquiryStatus},
    repository::{DestinationStore, InquiryStore, TourStore},
};

/// Number of inquiries listed on the dashboard
pub const RECENT_INQUIRIES: i64 = 5;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub tours: i64,
    pub destinations: i64,
    pub inquiries: i64,
    /// Inquiries nobody has answered yet
    pub new_inquiries: i64,
    pub recent_inquiries: Vec<Inquiry>,
}

#[derive(Clone)]
pub struct DashboardService {
    tours: Arc<dyn TourStore>,
    destinations: Arc<dyn DestinationStore>,
    inquiries: Arc<dyn InquiryStore>,
}

impl DashboardService {
    pub fn new(
        tours: Arc<dyn TourStore>,
        destinations: Arc<dyn DestinationStore>,
        inquiries: Arc<dyn InquiryStore>,
    ) -> Self {
        Self { tours, destinations, inquiries }
    }

    pub async fn stats(&self) -> AppResult<DashboardStats> {
        let recent_query = InquiryQuery {
            limit: Some(RECENT_INQUIRIES),
            ..Default::default()
        };
        let (tours, destinations, inquiries, new_inquiries, recent_inquiries) = tokio::try_join!(
            self.tours.count(),
            self.destinations.count(),
            self.inquiries.count(None),
            self.inquiries.count(Some(InquiryStatus::New)),
            self.inquiries.find_many(&recent_query),
        )?;

        Ok(DashboardStats {
            tours,
            destinations,
            inquiries,
            new_inquiries,
            recent_inquiries,
        })
    }
}
