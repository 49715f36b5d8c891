// src/db/building_repo.rs

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::PgPool;

use crate::{common::error::AppError, models::building::Building};

use super::map_unique_violation;

#[derive(Debug, Clone, Default)]
pub struct NewBuilding {
    pub name: String,
    pub year_built: Option<i32>,
    pub nearest_bts: Option<String>,
    pub nearest_mrt: Option<String>,
    pub distance_to_bts: Option<Decimal>,
    pub distance_to_mrt: Option<Decimal>,
    pub facilities: Option<Value>,
    pub photo_urls: Option<Value>,
}

#[async_trait]
pub trait BuildingRepo: Send + Sync {
    async fn create(&self, new_building: NewBuilding) -> Result<Building, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Building>, AppError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Building>, AppError>;
    /// Case-insensitive name substring filter when `search` is non-empty.
    async fn list(&self, search: Option<&str>) -> Result<Vec<Building>, AppError>;
    async fn update(&self, building: &Building) -> Result<(), AppError>;
    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

const BUILDING_COLUMNS: &str = "id, name, year_built, nearest_bts, nearest_mrt, \
    distance_to_bts, distance_to_mrt, facilities, photo_urls, created_at";

#[derive(Clone)]
pub struct PgBuildingRepo {
    pool: PgPool,
}

impl PgBuildingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BuildingRepo for PgBuildingRepo {
    async fn create(&self, new_building: NewBuilding) -> Result<Building, AppError> {
        let sql = format!(
            r#"
            INSERT INTO buildings (
                name, year_built, nearest_bts, nearest_mrt,
                distance_to_bts, distance_to_mrt, facilities, photo_urls, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())
            RETURNING {BUILDING_COLUMNS}
            "#
        );
        let building = sqlx::query_as::<_, Building>(&sql)
            .bind(&new_building.name)
            .bind(new_building.year_built)
            .bind(&new_building.nearest_bts)
            .bind(&new_building.nearest_mrt)
            .bind(new_building.distance_to_bts)
            .bind(new_building.distance_to_mrt)
            .bind(&new_building.facilities)
            .bind(&new_building.photo_urls)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "Building with that name already exists"))?;

        Ok(building)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Building>, AppError> {
        let sql = format!("SELECT {BUILDING_COLUMNS} FROM buildings WHERE id = $1");
        let maybe_building = sqlx::query_as::<_, Building>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_building)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Building>, AppError> {
        let sql = format!("SELECT {BUILDING_COLUMNS} FROM buildings WHERE name = $1");
        let maybe_building = sqlx::query_as::<_, Building>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_building)
    }

    async fn list(&self, search: Option<&str>) -> Result<Vec<Building>, AppError> {
        let buildings = match search.filter(|s| !s.is_empty()) {
            Some(term) => {
                let sql = format!(
                    "SELECT {BUILDING_COLUMNS} FROM buildings WHERE name ILIKE $1 ORDER BY id"
                );
                sqlx::query_as::<_, Building>(&sql)
                    .bind(format!("%{term}%"))
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("SELECT {BUILDING_COLUMNS} FROM buildings ORDER BY id");
                sqlx::query_as::<_, Building>(&sql).fetch_all(&self.pool).await?
            }
        };
        Ok(buildings)
    }

    async fn update(&self, building: &Building) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE buildings SET
                name = $2, year_built = $3, nearest_bts = $4, nearest_mrt = $5,
                distance_to_bts = $6, distance_to_mrt = $7, facilities = $8, photo_urls = $9
            WHERE id = $1
            "#,
        )
        .bind(building.id)
        .bind(&building.name)
        .bind(building.year_built)
        .bind(&building.nearest_bts)
        .bind(&building.nearest_mrt)
        .bind(building.distance_to_bts)
        .bind(building.distance_to_mrt)
        .bind(&building.facilities)
        .bind(&building.photo_urls)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Building with that name already exists"))?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        sqlx::query("DELETE FROM buildings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
