// src/models/property.rs

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::coerce::{lenient, Patch};
use crate::common::serde_utils::ts_format;

// A rentable/sellable unit. `building_name` is a denormalized copy kept
// for bulk imports; display code falls back to it when the relation is
// gone.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Property {
    pub id: i32,
    pub property_code: String,
    pub building_id: i32,
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
    pub preferred_tenant: Option<String>,
    pub sent: Option<String>,
    pub photo_urls: Option<Value>,
    pub created_at: NaiveDateTime,
}

impl Property {
    // The photo document is free-form; anything unset or non-object
    // collapses to an empty map on the wire.
    pub fn photo_urls_or_empty(&self) -> Value {
        match &self.photo_urls {
            Some(v) if v.is_object() => v.clone(),
            _ => Value::Object(serde_json::Map::new()),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePropertyPayload {
    #[validate(length(min = 1, message = "property_code is required"))]
    pub property_code: String,
    pub building_id: i32,
    #[validate(length(min = 1, message = "unit is required"))]
    pub unit: String,
    #[serde(default, deserialize_with = "lenient")]
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    #[schema(value_type = Option<f64>)]
    pub size: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient")]
    pub bedrooms: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub bathrooms: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub year_built: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub floor: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub area: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient")]
    #[schema(value_type = Option<f64>)]
    pub sell_price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient")]
    pub sent: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub preferred_tenant: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub photo_urls: Option<Value>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePropertyPayload {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub property_code: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub building_id: Patch<i32>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub unit: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub owner: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub contact: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub size: Patch<Decimal>,
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub bedrooms: Patch<i32>,
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub bathrooms: Patch<i32>,
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub year_built: Patch<i32>,
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub floor: Patch<i32>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub area: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub status: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub price: Patch<Decimal>,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub sell_price: Patch<Decimal>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub sent: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub preferred_tenant: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub photo_urls: Patch<Value>,
}

// One bulk-import row. Parsed per-entry so a malformed row is counted
// as skipped instead of rejecting the whole batch.
#[derive(Debug, Default, Deserialize)]
pub struct BulkPropertyEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub property_code: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub building: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub building_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub size: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient")]
    pub bedrooms: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub bathrooms: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub year_built: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub floor: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub area: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient")]
    pub sell_price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient")]
    pub sent: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub preferred_tenant: Option<String>,
    #[serde(default)]
    pub photo_urls: Option<Value>,
}

// Flat wire record; `building` resolves through the relation with a
// fallback to the denormalized name.
#[derive(Debug, Serialize, ToSchema)]
pub struct PropertyResponse {
    pub id: i32,
    pub property_code: String,
    pub building: Option<String>,
    pub building_id: i32,
    pub unit: String,
    pub owner: Option<String>,
    pub contact: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub size: Option<Decimal>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub year_built: Option<i32>,
    pub floor: Option<i32>,
    pub area: Option<String>,
    pub status: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub sell_price: Option<Decimal>,
    pub sent: Option<String>,
    pub preferred_tenant: Option<String>,
    #[schema(value_type = Object)]
    pub photo_urls: Value,
    #[serde(serialize_with = "ts_format::serialize")]
    #[schema(value_type = String, example = "2025-01-31 08:05:09")]
    pub created_at: NaiveDateTime,
}

impl PropertyResponse {
    pub fn from_property(property: &Property, building_name: Option<String>) -> Self {
        Self {
            id: property.id,
            property_code: property.property_code.clone(),
            building: building_name,
            building_id: property.building_id,
            unit: property.unit.clone(),
            owner: property.owner.clone(),
            contact: property.contact.clone(),
            size: property.size,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            year_built: property.year_built,
            floor: property.floor,
            area: property.area.clone(),
            status: property.status.clone(),
            price: property.price,
            sell_price: property.sell_price,
            sent: property.sent.clone(),
            preferred_tenant: property.preferred_tenant.clone(),
            photo_urls: property.photo_urls_or_empty(),
            created_at: property.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkCreateResponse {
    pub message: String,
    pub created: u32,
    pub skipped: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub url: String,
    pub label: String,
}
