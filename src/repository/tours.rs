//! Tours repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{types::Json, Pool, Postgres};
use uuid::Uuid;

use super::TourStore;
use crate::{
    error::AppResult,
    models::tour::{NewTour, Tour, TourQuery, TourRow},
};

const INSERT_TOUR: &str = r#"
    INSERT INTO tours (
        id, title, slug, price, duration, category, description,
        images, itinerary, inclusions, exclusions,
        group_size, start_location, is_featured, created_at, updated_at
    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $15)
    RETURNING *
"#;

#[derive(Clone)]
pub struct ToursRepository {
    pool: Pool<Postgres>,
}

impl ToursRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn bind_new<'q>(
    query: sqlx::query::QueryAs<'q, Postgres, TourRow, sqlx::postgres::PgArguments>,
    tour: &'q NewTour,
) -> sqlx::query::QueryAs<'q, Postgres, TourRow, sqlx::postgres::PgArguments> {
    query
        .bind(Uuid::new_v4())
        .bind(&tour.title)
        .bind(&tour.slug)
        .bind(tour.price)
        .bind(&tour.duration)
        .bind(tour.category)
        .bind(&tour.description)
        .bind(&tour.images)
        .bind(Json(&tour.itinerary))
        .bind(&tour.inclusions)
        .bind(&tour.exclusions)
        .bind(&tour.group_size)
        .bind(&tour.start_location)
        .bind(tour.is_featured)
        .bind(Utc::now())
}

#[async_trait]
impl TourStore for ToursRepository {
    async fn insert(&self, tour: &NewTour) -> AppResult<Tour> {
        let row = bind_new(sqlx::query_as::<_, TourRow>(INSERT_TOUR), tour)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Tour>> {
        let row = sqlx::query_as::<_, TourRow>("SELECT * FROM tours WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Tour::from))
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Tour>> {
        let row = sqlx::query_as::<_, TourRow>("SELECT * FROM tours WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Tour::from))
    }

    async fn find_many(&self, query: &TourQuery) -> AppResult<Vec<Tour>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.category.is_some() {
            conditions.push(format!("category = ${}", idx));
            idx += 1;
        }
        if query.featured.is_some() {
            conditions.push(format!("is_featured = ${}", idx));
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
            "SELECT * FROM tours {} ORDER BY created_at DESC {}",
            where_clause, limit_clause
        );
        let mut builder = sqlx::query_as::<_, TourRow>(&select_q);
        if let Some(category) = query.category {
            builder = builder.bind(category);
        }
        if let Some(featured) = query.featured {
            builder = builder.bind(featured);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Tour::from).collect())
    }

    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM tours WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn update(&self, tour: &Tour) -> AppResult<Option<Tour>> {
        let row = sqlx::query_as::<_, TourRow>(
            r#"
            UPDATE tours SET
                title = $2, slug = $3, price = $4, duration = $5, category = $6,
                description = $7, images = $8, itinerary = $9, inclusions = $10,
                exclusions = $11, group_size = $12, start_location = $13,
                is_featured = $14, updated_at = $15
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(tour.id)
        .bind(&tour.title)
        .bind(&tour.slug)
        .bind(tour.price)
        .bind(&tour.duration)
        .bind(tour.category)
        .bind(&tour.description)
        .bind(&tour.images)
        .bind(Json(&tour.itinerary))
        .bind(&tour.inclusions)
        .bind(&tour.exclusions)
        .bind(&tour.group_size)
        .bind(&tour.start_location)
        .bind(tour.is_featured)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Tour::from))
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tours WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tours")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn replace_all(&self, tours: &[NewTour]) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM tours").execute(&mut *tx).await?;
        for tour in tours {
            bind_new(sqlx::query_as::<_, TourRow>(INSERT_TOUR), tour)
                .fetch_one(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(tours.len() as u64)
    }
}
