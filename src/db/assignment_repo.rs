// src/db/assignment_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{common::error::AppError, models::assignment::ClientProperty};

use super::map_unique_violation;

#[async_trait]
pub trait AssignmentRepo: Send + Sync {
    async fn find(
        &self,
        client_id: i32,
        property_id: i32,
    ) -> Result<Option<ClientProperty>, AppError>;
    /// Inserts a new link with `is_active = false` and the current time.
    async fn insert(&self, client_id: i32, property_id: i32) -> Result<ClientProperty, AppError>;
    async fn update(&self, link: &ClientProperty) -> Result<(), AppError>;
    /// Hard delete; returns whether a row was removed.
    async fn delete(&self, client_id: i32, property_id: i32) -> Result<bool, AppError>;
    /// All links for one client, in creation order.
    async fn list_for_client(&self, client_id: i32) -> Result<Vec<ClientProperty>, AppError>;
}

const LINK_COLUMNS: &str = "id, client_id, property_id, comment, is_active, created_at";

#[derive(Clone)]
pub struct PgAssignmentRepo {
    pool: PgPool,
}

impl PgAssignmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentRepo for PgAssignmentRepo {
    async fn find(
        &self,
        client_id: i32,
        property_id: i32,
    ) -> Result<Option<ClientProperty>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM client_properties WHERE client_id = $1 AND property_id = $2"
        );
        let maybe_link = sqlx::query_as::<_, ClientProperty>(&sql)
            .bind(client_id)
            .bind(property_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_link)
    }

    async fn insert(&self, client_id: i32, property_id: i32) -> Result<ClientProperty, AppError> {
        let sql = format!(
            r#"
            INSERT INTO client_properties (client_id, property_id, comment, is_active, created_at)
            VALUES ($1, $2, NULL, FALSE, NOW())
            RETURNING {LINK_COLUMNS}
            "#
        );
        let link = sqlx::query_as::<_, ClientProperty>(&sql)
            .bind(client_id)
            .bind(property_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "Property already assigned"))?;
        Ok(link)
    }

    async fn update(&self, link: &ClientProperty) -> Result<(), AppError> {
        sqlx::query("UPDATE client_properties SET comment = $2, is_active = $3 WHERE id = $1")
            .bind(link.id)
            .bind(&link.comment)
            .bind(link.is_active)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, client_id: i32, property_id: i32) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM client_properties WHERE client_id = $1 AND property_id = $2")
                .bind(client_id)
                .bind(property_id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_for_client(&self, client_id: i32) -> Result<Vec<ClientProperty>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM client_properties WHERE client_id = $1 ORDER BY id"
        );
        let links = sqlx::query_as::<_, ClientProperty>(&sql)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(links)
    }
}
