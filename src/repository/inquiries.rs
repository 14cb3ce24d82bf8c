//! Inquiries repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::InquiryStore;
use crate::{
    error::AppResult,
    models::inquiry::{CreateInquiry, Inquiry, InquiryQuery, InquiryStatus},
};

#[derive(Clone)]
pub struct InquiriesRepository {
    pool: Pool<Postgres>,
}

impl InquiriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InquiryStore for InquiriesRepository {
    async fn insert(&self, data: &CreateInquiry) -> AppResult<Inquiry> {
        let row = sqlx::query_as::<_, Inquiry>(
            r#"
            INSERT INTO inquiries (
                id, customer_name, email, phone, message, tour_id, tour_title,
                status, inquiry_type, travel_dates, pax_count, budget, interests,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $14)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.customer_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.message)
        .bind(data.tour_id)
        .bind(&data.tour_title)
        .bind(InquiryStatus::New)
        .bind(data.inquiry_type)
        .bind(&data.travel_dates)
        .bind(data.pax_count)
        .bind(&data.budget)
        .bind(&data.interests)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Inquiry>> {
        let row = sqlx::query_as::<_, Inquiry>("SELECT * FROM inquiries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_many(&self, query: &InquiryQuery) -> AppResult<Vec<Inquiry>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.status.is_some() {
            conditions.push(format!("status = ${}", idx));
            idx += 1;
        }
        if query.inquiry_type.is_some() {
            conditions.push(format!("inquiry_type = ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let limit_clause = match query.limit {
            Some(limit) if limit > 0 => format!("LIMIT {}", limit),
            _ => String::new(),
        };

        let select_q = format!(
            "SELECT * FROM inquiries {} ORDER BY created_at DESC {}",
            where_clause, limit_clause
        );
        let mut builder = sqlx::query_as::<_, Inquiry>(&select_q);
        if let Some(status) = query.status {
            builder = builder.bind(status);
        }
        if let Some(inquiry_type) = query.inquiry_type {
            builder = builder.bind(inquiry_type);
        }

        Ok(builder.fetch_all(&self.pool).await?)
    }

    async fn set_status(&self, id: Uuid, status: InquiryStatus) -> AppResult<Option<Inquiry>> {
        let row = sqlx::query_as::<_, Inquiry>(
            "UPDATE inquiries SET status = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM inquiries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, status: Option<InquiryStatus>) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM inquiries WHERE ($1::text IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
