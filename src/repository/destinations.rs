//! Destinations repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::DestinationStore;
use crate::{
    error::AppResult,
    models::destination::{CreateDestination, Destination},
};

const INSERT_DESTINATION: &str = r#"
    INSERT INTO destinations (id, name, description, image, highlights, created_at, updated_at)
    VALUES ($1, $2, $3, $4, $5, $6, $6)
    RETURNING *
"#;

#[derive(Clone)]
pub struct DestinationsRepository {
    pool: Pool<Postgres>,
}

impl DestinationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DestinationStore for DestinationsRepository {
    async fn insert(&self, data: &CreateDestination) -> AppResult<Destination> {
        let row = sqlx::query_as::<_, Destination>(INSERT_DESTINATION)
            .bind(Uuid::new_v4())
            .bind(&data.name)
            .bind(&data.description)
            .bind(&data.image)
            .bind(&data.highlights)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Destination>> {
        let row = sqlx::query_as::<_, Destination>("SELECT * FROM destinations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_many(&self) -> AppResult<Vec<Destination>> {
        let rows = sqlx::query_as::<_, Destination>(
            "SELECT * FROM destinations ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn name_exists(&self, name: &str, exclude: Option<Uuid>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM destinations WHERE name = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(name)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn update(&self, destination: &Destination) -> AppResult<Option<Destination>> {
        let row = sqlx::query_as::<_, Destination>(
            r#"
            UPDATE destinations
            SET name = $2, description = $3, image = $4, highlights = $5, updated_at = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(destination.id)
        .bind(&destination.name)
        .bind(&destination.description)
        .bind(&destination.image)
        .bind(&destination.highlights)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM destinations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM destinations")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn replace_all(&self, destinations: &[CreateDestination]) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM destinations").execute(&mut *tx).await?;
        for data in destinations {
            sqlx::query(INSERT_DESTINATION)
                .bind(Uuid::new_v4())
                .bind(&data.name)
                .bind(&data.description)
                .bind(&data.image)
                .bind(&data.highlights)
                .bind(Utc::now())
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(destinations.len() as u64)
    }
}
