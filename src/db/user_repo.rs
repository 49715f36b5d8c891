// src/db/user_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::User};

use super::map_unique_violation;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_uuid: Uuid,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_uuid(&self, user_uuid: Uuid) -> Result<Option<User>, AppError>;
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;
}

// Postgres-backed user repository.
#[derive(Clone)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_uuid, password_hash, first_name, last_name, email, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    async fn find_by_uuid(&self, user_uuid: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_uuid, password_hash, first_name, last_name, email, created_at
            FROM users
            WHERE user_uuid = $1
            "#,
        )
        .bind(user_uuid)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_uuid, password_hash, first_name, last_name, email, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING id, user_uuid, password_hash, first_name, last_name, email, created_at
            "#,
        )
        .bind(new_user.user_uuid)
        .bind(&new_user.password_hash)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "User with that email already exists"))?;

        Ok(user)
    }
}
