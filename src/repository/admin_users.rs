//! Admin users repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::AdminUserStore;
use crate::{
    error::AppResult,
    models::admin_user::{AdminUser, NewAdminUser},
};

#[derive(Clone)]
pub struct AdminUsersRepository {
    pool: Pool<Postgres>,
}

impl AdminUsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminUserStore for AdminUsersRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<AdminUser>> {
        let row = sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, user: &NewAdminUser) -> AppResult<AdminUser> {
        let row = sqlx::query_as::<_, AdminUser>(
            r#"
            INSERT INTO admin_users (id, username, email, password_hash, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
