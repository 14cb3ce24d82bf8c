//! Testimonials repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::TestimonialStore;
use crate::{
    error::AppResult,
    models::testimonial::{CreateTestimonial, Testimonial},
};

const INSERT_TESTIMONIAL: &str = r#"
    INSERT INTO testimonials (
        id, name, location, rating, message, image, is_approved, created_at, updated_at
    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
    RETURNING *
"#;

#[derive(Clone)]
pub struct TestimonialsRepository {
    pool: Pool<Postgres>,
}

impl TestimonialsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TestimonialStore for TestimonialsRepository {
    async fn insert(&self, data: &CreateTestimonial) -> AppResult<Testimonial> {
        let row = sqlx::query_as::<_, Testimonial>(INSERT_TESTIMONIAL)
            .bind(Uuid::new_v4())
            .bind(&data.name)
            .bind(&data.location)
            .bind(data.rating)
            .bind(&data.message)
            .bind(&data.image)
            .bind(data.is_approved.unwrap_or(true))
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Testimonial>> {
        let row = sqlx::query_as::<_, Testimonial>("SELECT * FROM testimonials WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_many(&self, approved_only: bool) -> AppResult<Vec<Testimonial>> {
        let rows = sqlx::query_as::<_, Testimonial>(
            r#"
            SELECT * FROM testimonials
            WHERE ($1 = FALSE OR is_approved = TRUE)
            ORDER BY created_at DESC
            "#,
        )
        .bind(approved_only)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update(&self, testimonial: &Testimonial) -> AppResult<Option<Testimonial>> {
        let row = sqlx::query_as::<_, Testimonial>(
            r#"
            UPDATE testimonials
            SET name = $2, location = $3, rating = $4, message = $5, image = $6, updated_at = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(testimonial.id)
        .bind(&testimonial.name)
        .bind(&testimonial.location)
        .bind(testimonial.rating)
        .bind(&testimonial.message)
        .bind(&testimonial.image)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn set_approval(&self, id: Uuid, approved: bool) -> AppResult<Option<Testimonial>> {
        let row = sqlx::query_as::<_, Testimonial>(
            "UPDATE testimonials SET is_approved = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(approved)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn replace_all(&self, testimonials: &[CreateTestimonial]) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM testimonials").execute(&mut *tx).await?;
        for data in testimonials {
            sqlx::query(INSERT_TESTIMONIAL)
                .bind(Uuid::new_v4())
                .bind(&data.name)
                .bind(&data.location)
                .bind(data.rating)
                .bind(&data.message)
                .bind(&data.image)
                .bind(data.is_approved.unwrap_or(true))
                .bind(Utc::now())
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(testimonials.len() as u64)
    }
}
