// src/models/client.rs

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::coerce::{lenient, Patch};
use crate::models::assignment::AssignmentView;

// A prospective tenant/buyer as stored in the database. The code is
// unique and always uppercase; the access key is a server-generated
// 6-character shared secret, regenerated on every credential (re)issue.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Client {
    pub id: i32,
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
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClientPayload {
    #[validate(length(min = 1, message = "code is required"))]
    pub code: String,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub nationality: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub contact_type: Option<String>,
    #[validate(length(min = 1, message = "contact is required"))]
    pub contact: String,
    #[serde(default, deserialize_with = "lenient")]
    #[schema(value_type = Option<String>, example = "2025-06-01")]
    pub starting_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient")]
    #[schema(value_type = Option<String>, example = "2025-07-01")]
    pub move_in: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient")]
    #[schema(value_type = Option<f64>)]
    pub budget: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient")]
    pub bedrooms: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub bath: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub area: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    #[schema(value_type = Option<f64>)]
    pub size: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient")]
    pub preferred: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub work_sheet: Option<String>,
}

// Partial update: absent keys leave fields untouched, null/empty clears
// optional fields. The code itself is immutable here; the access key and
// login link are regenerated by the service on every update.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateClientPayload {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub title: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub first_name: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub last_name: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub nationality: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub contact_type: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub contact: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "2025-06-01")]
    pub starting_date: Patch<NaiveDate>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "2025-07-01")]
    pub move_in: Patch<NaiveDate>,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub budget: Patch<Decimal>,
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub bedrooms: Patch<i32>,
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub bath: Patch<i32>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub area: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub size: Patch<Decimal>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub preferred: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub status: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub work_sheet: Patch<String>,
}

// Flat list item: no credentials, no assignments.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClientSummary {
    pub id: i32,
    pub code: String,
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub nationality: Option<String>,
    pub contact_type: Option<String>,
    pub contact: String,
    #[schema(value_type = Option<String>)]
    pub starting_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub move_in: Option<NaiveDate>,
    #[schema(value_type = Option<f64>)]
    pub budget: Option<Decimal>,
    pub bedrooms: Option<i32>,
    pub bath: Option<i32>,
    pub area: Option<String>,
    pub preferred: Option<String>,
    pub status: Option<String>,
    pub work_sheet: Option<String>,
}

impl From<&Client> for ClientSummary {
    fn from(c: &Client) -> Self {
        Self {
            id: c.id,
            code: c.code.clone(),
            title: c.title.clone(),
            first_name: c.first_name.clone(),
            last_name: c.last_name.clone(),
            nationality: c.nationality.clone(),
            contact_type: c.contact_type.clone(),
            contact: c.contact.clone(),
            starting_date: c.starting_date,
            move_in: c.move_in,
            budget: c.budget,
            bedrooms: c.bedrooms,
            bath: c.bath,
            area: c.area.clone(),
            preferred: c.preferred.clone(),
            status: c.status.clone(),
            work_sheet: c.work_sheet.clone(),
        }
    }
}

// Staff-facing detail view: credentials plus assigned properties.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClientDetail {
    #[serde(flatten)]
    pub summary: ClientSummary,
    #[schema(value_type = Option<f64>)]
    pub size: Option<Decimal>,
    pub login_link: Option<String>,
    pub access_key: Option<String>,
    pub assigned_properties: Vec<AssignmentView>,
}

// Portal-facing view (lookup by code): no credentials; the top-level
// `building` is the building of the most recently assigned property.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClientPortalDetail {
    #[serde(flatten)]
    pub summary: ClientSummary,
    #[schema(value_type = Option<f64>)]
    pub size: Option<Decimal>,
    pub building: Option<String>,
    pub assigned_properties: Vec<AssignmentView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginDetailsResponse {
    pub message: String,
    pub login_link: Option<String>,
    pub access_key: Option<String>,
}
