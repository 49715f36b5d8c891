// src/models/auth.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::serde_utils::ts_format;

// A staff user as stored in the database.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub user_uuid: Uuid,

    #[serde(skip_serializing)] // never leaves the server
    pub password_hash: String,

    pub first_name: String,
    pub last_name: String,
    pub email: String,

    #[serde(serialize_with = "ts_format::serialize")]
    #[schema(value_type = String, example = "2025-01-31 08:05:09")]
    pub created_at: NaiveDateTime,
}

// Staff sign-up data.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserPayload {
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

// Staff sign-in data.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

// Client-portal sign-in data (code + shared access key).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ClientLoginPayload {
    #[validate(length(min = 1, message = "client_code is required"))]
    pub client_code: String,
    #[validate(length(min = 1, message = "access_key is required"))]
    pub access_key: String,
}

// Claim set shared by both principal kinds: `id` is the user's UUID or
// the client's code; `value` is the email or the access key, so a
// validator can re-check it against current storage and catch rotation.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub value: String,
    pub exp: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthUserResponse {
    pub message: String,
    pub user_uuid: Uuid,
    pub user_id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub access_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthClientResponse {
    pub message: String,
    pub client_id: i32,
    pub code: String,
    pub login_link: Option<String>,
    pub access_key: Option<String>,
    pub access_token: String,
}
