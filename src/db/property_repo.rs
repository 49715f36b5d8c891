// src/db/property_repo.rs

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::{PgPool, Row};

use crate::{common::error::AppError, models::property::Property};

use super::map_unique_violation;

// Insert data for a single property. For bulk imports `building_id`
// may be absent, in which case `building_name` resolves (or lazily
// creates) the building.
#[derive(Debug, Clone, Default)]
pub struct NewProperty {
    pub property_code: String,
    pub building_id: Option<i32>,
    pub building_name: Option<String>,
    pub unit: String,
    pub owner: Option<String>,
    pub contact: Option<String>,
    pub size: Option<Decimal>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub year_built: Option<i32>,
    pub floor: Option<i32>,
    pub area: Option<String>,
    pub status: Option<String>,
    pub price: Option<Decimal>,
    pub sell_price: Option<Decimal>,
    pub sent: Option<String>,
    pub preferred_tenant: Option<String>,
    pub photo_urls: Option<Value>,
}

#[async_trait]
pub trait PropertyRepo: Send + Sync {
    async fn create(&self, new_property: NewProperty) -> Result<Property, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Property>, AppError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Property>, AppError>;
    async fn list(&self) -> Result<Vec<Property>, AppError>;
    async fn update(&self, property: &Property) -> Result<(), AppError>;
    async fn delete(&self, id: i32) -> Result<(), AppError>;
    async fn exists_for_building(&self, building_id: i32) -> Result<bool, AppError>;

    /// Stage every importable row and commit once: duplicate codes and
    /// unresolvable buildings are skipped row by row; buildings named but
    /// unknown are created inside the same transaction. Returns
    /// (created, skipped).
    async fn bulk_create(&self, rows: Vec<NewProperty>) -> Result<(u32, u32), AppError>;
}

const PROPERTY_COLUMNS: &str = "id, property_code, building_id, building_name, unit, owner, \
    contact, size, bedrooms, bathrooms, year_built, floor, area, status, price, sell_price, \
    preferred_tenant, sent, photo_urls, created_at";

const PROPERTY_INSERT: &str = r#"
    INSERT INTO properties (
        property_code, building_id, building_name, unit, owner, contact, size,
        bedrooms, bathrooms, year_built, floor, area, status, price, sell_price,
        preferred_tenant, sent, photo_urls, created_at
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
            $16, $17, $18, NOW())
"#;

#[derive(Clone)]
pub struct PgPropertyRepo {
    pool: PgPool,
}

impl PgPropertyRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PropertyRepo for PgPropertyRepo {
    async fn create(&self, new_property: NewProperty) -> Result<Property, AppError> {
        let sql = format!("{PROPERTY_INSERT} RETURNING {PROPERTY_COLUMNS}");
        let property = sqlx::query_as::<_, Property>(&sql)
            .bind(&new_property.property_code)
            .bind(new_property.building_id)
            .bind(&new_property.building_name)
            .bind(&new_property.unit)
            .bind(&new_property.owner)
            .bind(&new_property.contact)
            .bind(new_property.size)
            .bind(new_property.bedrooms)
            .bind(new_property.bathrooms)
            .bind(new_property.year_built)
            .bind(new_property.floor)
            .bind(&new_property.area)
            .bind(&new_property.status)
            .bind(new_property.price)
            .bind(new_property.sell_price)
            .bind(&new_property.preferred_tenant)
            .bind(&new_property.sent)
            .bind(&new_property.photo_urls)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "Property with that code already exists"))?;

        Ok(property)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Property>, AppError> {
        let sql = format!("SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = $1");
        let maybe_property = sqlx::query_as::<_, Property>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_property)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Property>, AppError> {
        let sql = format!("SELECT {PROPERTY_COLUMNS} FROM properties WHERE property_code = $1");
        let maybe_property = sqlx::query_as::<_, Property>(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_property)
    }

    async fn list(&self) -> Result<Vec<Property>, AppError> {
        let sql = format!("SELECT {PROPERTY_COLUMNS} FROM properties ORDER BY id");
        let properties = sqlx::query_as::<_, Property>(&sql).fetch_all(&self.pool).await?;
        Ok(properties)
    }

    async fn update(&self, property: &Property) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE properties SET
                property_code = $2, building_id = $3, building_name = $4, unit = $5,
                owner = $6, contact = $7, size = $8, bedrooms = $9, bathrooms = $10,
                year_built = $11, floor = $12, area = $13, status = $14, price = $15,
                sell_price = $16, preferred_tenant = $17, sent = $18, photo_urls = $19
            WHERE id = $1
            "#,
        )
        .bind(property.id)
        .bind(&property.property_code)
        .bind(property.building_id)
        .bind(&property.building_name)
        .bind(&property.unit)
        .bind(&property.owner)
        .bind(&property.contact)
        .bind(property.size)
        .bind(property.bedrooms)
        .bind(property.bathrooms)
        .bind(property.year_built)
        .bind(property.floor)
        .bind(&property.area)
        .bind(&property.status)
        .bind(property.price)
        .bind(property.sell_price)
        .bind(&property.preferred_tenant)
        .bind(&property.sent)
        .bind(&property.photo_urls)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Property with that code already exists"))?;
        Ok(())
    }

    // Assignment rows go with the property via ON DELETE CASCADE.
    async fn delete(&self, id: i32) -> Result<(), AppError> {
        sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn exists_for_building(&self, building_id: i32) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM properties WHERE building_id = $1")
            .bind(building_id)
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = row.try_get("n")?;
        Ok(count > 0)
    }

    async fn bulk_create(&self, rows: Vec<NewProperty>) -> Result<(u32, u32), AppError> {
        let mut created: u32 = 0;
        let mut skipped: u32 = 0;

        let mut tx = self.pool.begin().await?;

        for row in rows {
            // Duplicate check sees rows staged earlier in this batch.
            let existing =
                sqlx::query("SELECT 1 FROM properties WHERE property_code = $1")
                    .bind(&row.property_code)
                    .fetch_optional(&mut *tx)
                    .await?;
            if existing.is_some() {
                tracing::debug!(code = %row.property_code, "bulk import: duplicate code, skipping");
                skipped += 1;
                continue;
            }

            // Resolve the building: by id when given, otherwise by name,
            // lazily creating it in the same transaction.
            let building_id = match (row.building_id, row.building_name.as_deref()) {
                (Some(id), _) => {
                    let found = sqlx::query("SELECT 1 FROM buildings WHERE id = $1")
                        .bind(id)
                        .fetch_optional(&mut *tx)
                        .await?;
                    if found.is_none() {
                        tracing::debug!(
                            code = %row.property_code,
                            building_id = id,
                            "bulk import: unknown building id, skipping"
                        );
                        skipped += 1;
                        continue;
                    }
                    id
                }
                (None, Some(name)) => {
                    let found = sqlx::query("SELECT id FROM buildings WHERE name = $1")
                        .bind(name)
                        .fetch_optional(&mut *tx)
                        .await?;
                    match found {
                        Some(r) => r.try_get::<i32, _>("id")?,
                        None => {
                            let r = sqlx::query(
                                "INSERT INTO buildings (name, created_at) VALUES ($1, NOW()) RETURNING id",
                            )
                            .bind(name)
                            .fetch_one(&mut *tx)
                            .await?;
                            tracing::debug!(building = name, "bulk import: created building");
                            r.try_get::<i32, _>("id")?
                        }
                    }
                }
                (None, None) => {
                    tracing::debug!(
                        code = %row.property_code,
                        "bulk import: no building id or name, skipping"
                    );
                    skipped += 1;
                    continue;
                }
            };

            sqlx::query(PROPERTY_INSERT)
                .bind(&row.property_code)
                .bind(building_id)
                .bind(&row.building_name)
                .bind(&row.unit)
                .bind(&row.owner)
                .bind(&row.contact)
                .bind(row.size)
                .bind(row.bedrooms)
                .bind(row.bathrooms)
                .bind(row.year_built)
                .bind(row.floor)
                .bind(&row.area)
                .bind(&row.status)
                .bind(row.price)
                .bind(row.sell_price)
                .bind(&row.preferred_tenant)
                .bind(&row.sent)
                .bind(&row.photo_urls)
                .execute(&mut *tx)
                .await?;
            created += 1;
        }

        // Single commit: a failure here rolls the whole batch back.
        tx.commit().await?;

        Ok((created, skipped))
    }
}
