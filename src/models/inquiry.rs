//! Inquiry model: contact, booking and tailor-made requests

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Inquiry handling status. Only changed by an explicit admin update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum InquiryStatus {
    #[default]
    New,
    Contacted,
    Closed,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::New => "New",
            InquiryStatus::Contacted => "Contacted",
            InquiryStatus::Closed => "Closed",
        }
    }
}

impl std::str::FromStr for InquiryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(InquiryStatus::New),
            "Contacted" => Ok(InquiryStatus::Contacted),
            "Closed" => Ok(InquiryStatus::Closed),
            _ => Err(format!("Invalid inquiry status: {}", s)),
        }
    }
}

super::text_enum_sqlx!(InquiryStatus);

/// Where the inquiry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum InquiryType {
    Booking,
    #[default]
    Contact,
    TailorMade,
}

impl InquiryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryType::Booking => "booking",
            InquiryType::Contact => "contact",
            InquiryType::TailorMade => "tailor-made",
        }
    }
}

impl std::str::FromStr for InquiryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booking" => Ok(InquiryType::Booking),
            "contact" => Ok(InquiryType::Contact),
            "tailor-made" => Ok(InquiryType::TailorMade),
            _ => Err(format!("Invalid inquiry type: {}", s)),
        }
    }
}

super::text_enum_sqlx!(InquiryType);

/// Inquiry record
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: Uuid,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    /// Booked tour (booking inquiries)
    pub tour_id: Option<Uuid>,
    pub tour_title: Option<String>,
    pub status: InquiryStatus,
    pub inquiry_type: InquiryType,
    pub travel_dates: Option<String>,
    pub pax_count: Option<i32>,
    pub budget: Option<String>,
    pub interests: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inquiry creation input. Status is not accepted: new inquiries always start as `New`.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateInquiry {
    #[validate(length(min = 1, message = "Name is required"))]
    pub customer_name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    #[serde(default)]
    pub inquiry_type: InquiryType,
    pub tour_id: Option<Uuid>,
    pub tour_title: Option<String>,
    pub travel_dates: Option<String>,
    pub pax_count: Option<i32>,
    pub budget: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Public contact form
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContactForm {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Per-tour booking form
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookingForm {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub tour_id: Uuid,
    pub tour_title: String,
}

/// Tailor-made trip request form
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TailorMadeForm {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub travel_dates: Option<String>,
    pub pax_count: Option<i32>,
    pub budget: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl From<ContactForm> for CreateInquiry {
    fn from(f: ContactForm) -> Self {
        CreateInquiry {
            customer_name: f.customer_name,
            email: f.email,
            phone: f.phone,
            message: f.message,
            inquiry_type: InquiryType::Contact,
            tour_id: None,
            tour_title: None,
            travel_dates: None,
            pax_count: None,
            budget: None,
            interests: Vec::new(),
        }
    }
}

impl From<BookingForm> for CreateInquiry {
    fn from(f: BookingForm) -> Self {
        CreateInquiry {
            customer_name: f.customer_name,
            email: f.email,
            phone: f.phone,
            message: f.message,
            inquiry_type: InquiryType::Booking,
            tour_id: Some(f.tour_id),
            tour_title: Some(f.tour_title),
            travel_dates: None,
            pax_count: None,
            budget: None,
            interests: Vec::new(),
        }
    }
}

impl From<TailorMadeForm> for CreateInquiry {
    fn from(f: TailorMadeForm) -> Self {
        CreateInquiry {
            customer_name: f.customer_name,
            email: f.email,
            phone: f.phone,
            message: f.message,
            inquiry_type: InquiryType::TailorMade,
            tour_id: None,
            tour_title: None,
            travel_dates: f.travel_dates,
            pax_count: f.pax_count,
            budget: f.budget,
            interests: f.interests,
        }
    }
}

/// Set status request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetInquiryStatus {
    pub status: InquiryStatus,
}

/// Inquiry list filters
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct InquiryQuery {
    pub status: Option<InquiryStatus>,
    pub inquiry_type: Option<InquiryType>,
    pub limit: Option<i64>,
}
