// src/models/assignment.rs

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::common::coerce::Patch;
use crate::common::serde_utils::ts_format;
use crate::models::property::Property;

// The Client <-> Property join row. One row per (client, property) pair;
// new links start inactive and need an explicit activation.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClientProperty {
    pub id: i32,
    pub client_id: i32,
    pub property_id: i32,
    pub comment: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignPropertyPayload {
    pub property_id: i32,
}

// At least one of the two fields must be present; `is_active` accepts
// any truthy/falsy-convertible value.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAnnotationPayload {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub comment: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub is_active: Patch<bool>,
}

// One assigned property as seen from a client: the property's display
// fields plus the assignment's own annotation and creation time.
#[derive(Debug, Serialize, ToSchema)]
pub struct AssignmentView {
    pub id: i32,
    pub property_code: String,
    pub building: Option<String>,
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
    pub comment: Option<String>,
    pub is_active: bool,
}

impl AssignmentView {
    pub fn new(link: &ClientProperty, property: &Property, building_name: Option<String>) -> Self {
        Self {
            id: property.id,
            property_code: property.property_code.clone(),
            // Relational name first, denormalized copy as orphan fallback.
            building: building_name.or_else(|| property.building_name.clone()),
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
            created_at: link.created_at,
            comment: link.comment.clone(),
            is_active: link.is_active,
        }
    }
}
