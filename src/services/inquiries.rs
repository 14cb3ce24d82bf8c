//! Inquiry intake and status workflow

use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::revalidation::Revalidator;
use crate::{
    error::{AppError, AppResult},
    models::inquiry::{CreateInquiry, Inquiry, InquiryQuery, InquiryStatus, InquiryType},
    repository::InquiryStore,
};

#[derive(Clone)]
pub struct InquiriesService {
    store: Arc<dyn InquiryStore>,
    revalidator: Revalidator,
}

impl InquiriesService {
    pub fn new(store: Arc<dyn InquiryStore>, revalidator: Revalidator) -> Self {
        Self { store, revalidator }
    }

    /// Record a customer inquiry. It always starts with status `New`.
    pub async fn submit(&self, data: CreateInquiry) -> AppResult<Inquiry> {
        data.validate()?;
        check_type_fields(&data)?;

        let inquiry = self.store.insert(&data).await?;
        tracing::info!(
            inquiry_id = %inquiry.id,
            inquiry_type = %inquiry.inquiry_type,
            "Inquiry received"
        );
        self.revalidate();
        Ok(inquiry)
    }

    /// List inquiries, newest first
    pub async fn list(&self, query: &InquiryQuery) -> AppResult<Vec<Inquiry>> {
        self.store.find_many(query).await
    }

    /// Most recent inquiries, whatever their status
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<Inquiry>> {
        let query = InquiryQuery {
            limit: Some(limit),
            ..Default::default()
        };
        self.store.find_many(&query).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Inquiry> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Inquiry {} not found", id)))
    }

    /// Any status may follow any other
    pub async fn set_status(&self, id: Uuid, status: InquiryStatus) -> AppResult<Inquiry> {
        let inquiry = self
            .store
            .set_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Inquiry {} not found", id)))?;
        tracing::info!(inquiry_id = %id, status = %status, "Inquiry status changed");
        self.revalidate();
        Ok(inquiry)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.store.delete_by_id(id).await? {
            return Err(AppError::NotFound(format!("Inquiry {} not found", id)));
        }
        tracing::info!(inquiry_id = %id, "Inquiry deleted");
        self.revalidate();
        Ok(())
    }

    pub async fn count(&self, status: Option<InquiryStatus>) -> AppResult<i64> {
        self.store.count(status).await
    }

    fn revalidate(&self) {
        self.revalidator.publish(["/admin/inquiries", "/admin"]);
    }
}

/// Fields required by the inquiry type beyond the common contact details
fn check_type_fields(data: &CreateInquiry) -> AppResult<()> {
    match data.inquiry_type {
        InquiryType::Contact => Ok(()),
        InquiryType::Booking => {
            if data.tour_id.is_none() {
                return Err(AppError::Validation("tourId: is required for bookings".to_string()));
            }
            if is_blank(&data.tour_title) {
                return Err(AppError::Validation(
                    "tourTitle: is required for bookings".to_string(),
                ));
            }
            Ok(())
        }
        InquiryType::TailorMade => {
            if is_blank(&data.travel_dates) {
                return Err(AppError::Validation(
                    "travelDates: is required for tailor-made requests".to_string(),
                ));
            }
            if !matches!(data.pax_count, Some(n) if n >= 1) {
                return Err(AppError::Validation(
                    "paxCount: must be at least 1".to_string(),
                ));
            }
            if is_blank(&data.budget) {
                return Err(AppError::Validation(
                    "budget: is required for tailor-made requests".to_string(),
                ));
            }
            Ok(())
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
