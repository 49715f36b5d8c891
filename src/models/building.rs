// src/models/building.rs

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::coerce::{lenient, Patch};
use crate::common::serde_utils::ts_format;

// A physical structure. Name is unique; facilities and photo_urls are
// free-form JSON documents.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Building {
    pub id: i32,
    pub name: String,
    pub year_built: Option<i32>,
    pub nearest_bts: Option<String>,
    pub nearest_mrt: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub distance_to_bts: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub distance_to_mrt: Option<Decimal>,
    #[schema(value_type = Option<Object>)]
    pub facilities: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub photo_urls: Option<Value>,
    #[serde(serialize_with = "ts_format::serialize")]
    #[schema(value_type = String, example = "2025-01-31 08:05:09")]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBuildingPayload {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub year_built: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub nearest_bts: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub nearest_mrt: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    #[schema(value_type = Option<f64>)]
    pub distance_to_bts: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient")]
    #[schema(value_type = Option<f64>)]
    pub distance_to_mrt: Option<Decimal>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub facilities: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub photo_urls: Option<Value>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBuildingPayload {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub name: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub year_built: Patch<i32>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub nearest_bts: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub nearest_mrt: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub distance_to_bts: Patch<Decimal>,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub distance_to_mrt: Patch<Decimal>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub facilities: Patch<Value>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub photo_urls: Patch<Value>,
}
