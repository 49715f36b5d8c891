// src/db/client_repo.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{common::error::AppError, models::client::Client};

use super::map_unique_violation;

#[derive(Debug, Clone, Default)]
pub struct NewClient {
    pub code: String,
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub nationality: Option<String>,
    pub contact_type: Option<String>,
    pub contact: String,
    pub starting_date: Option<NaiveDate>,
    pub move_in: Option<NaiveDate>,
    pub budget: Option<Decimal>,
    pub bedrooms: Option<i32>,
    pub bath: Option<i32>,
    pub area: Option<String>,
    pub size: Option<Decimal>,
    pub preferred: Option<String>,
    pub status: Option<String>,
    pub work_sheet: Option<String>,
    pub login_link: Option<String>,
    pub access_key: Option<String>,
}

#[async_trait]
pub trait ClientRepo: Send + Sync {
    async fn create(&self, new_client: NewClient) -> Result<Client, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Client>, AppError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Client>, AppError>;
    async fn list(&self) -> Result<Vec<Client>, AppError>;
    async fn update(&self, client: &Client) -> Result<(), AppError>;
    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

const CLIENT_COLUMNS: &str = "id, code, title, first_name, last_name, nationality, \
    contact_type, contact, starting_date, move_in, budget, bedrooms, bath, area, size, \
    preferred, status, work_sheet, login_link, access_key, created_at";

#[derive(Clone)]
pub struct PgClientRepo {
    pool: PgPool,
}

impl PgClientRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepo for PgClientRepo {
    async fn create(&self, new_client: NewClient) -> Result<Client, AppError> {
        let sql = format!(
            r#"
            INSERT INTO clients (
                code, title, first_name, last_name, nationality, contact_type, contact,
                starting_date, move_in, budget, bedrooms, bath, area, size,
                preferred, status, work_sheet, login_link, access_key, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, NOW())
            RETURNING {CLIENT_COLUMNS}
            "#
        );
        let client = sqlx::query_as::<_, Client>(&sql)
            .bind(&new_client.code)
            .bind(&new_client.title)
            .bind(&new_client.first_name)
            .bind(&new_client.last_name)
            .bind(&new_client.nationality)
            .bind(&new_client.contact_type)
            .bind(&new_client.contact)
            .bind(new_client.starting_date)
            .bind(new_client.move_in)
            .bind(new_client.budget)
            .bind(new_client.bedrooms)
            .bind(new_client.bath)
            .bind(&new_client.area)
            .bind(new_client.size)
            .bind(&new_client.preferred)
            .bind(&new_client.status)
            .bind(&new_client.work_sheet)
            .bind(&new_client.login_link)
            .bind(&new_client.access_key)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "Client with that code already exists"))?;

        Ok(client)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Client>, AppError> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1");
        let maybe_client = sqlx::query_as::<_, Client>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_client)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Client>, AppError> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE code = $1");
        let maybe_client = sqlx::query_as::<_, Client>(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_client)
    }

    async fn list(&self) -> Result<Vec<Client>, AppError> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients ORDER BY id");
        let clients = sqlx::query_as::<_, Client>(&sql).fetch_all(&self.pool).await?;
        Ok(clients)
    }

    async fn update(&self, client: &Client) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE clients SET
                code = $2, title = $3, first_name = $4, last_name = $5, nationality = $6,
                contact_type = $7, contact = $8, starting_date = $9, move_in = $10,
                budget = $11, bedrooms = $12, bath = $13, area = $14, size = $15,
                preferred = $16, status = $17, work_sheet = $18, login_link = $19,
                access_key = $20
            WHERE id = $1
            "#,
        )
        .bind(client.id)
        .bind(&client.code)
        .bind(&client.title)
        .bind(&client.first_name)
        .bind(&client.last_name)
        .bind(&client.nationality)
        .bind(&client.contact_type)
        .bind(&client.contact)
        .bind(client.starting_date)
        .bind(client.move_in)
        .bind(client.budget)
        .bind(client.bedrooms)
        .bind(client.bath)
        .bind(&client.area)
        .bind(client.size)
        .bind(&client.preferred)
        .bind(&client.status)
        .bind(&client.work_sheet)
        .bind(&client.login_link)
        .bind(&client.access_key)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // Assignment rows go with the client via ON DELETE CASCADE.
    async fn delete(&self, id: i32) -> Result<(), AppError> {
        sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
