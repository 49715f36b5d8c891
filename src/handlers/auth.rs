// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{
        AuthClientResponse, AuthUserResponse, ClientLoginPayload, LoginUserPayload,
        RegisterUserPayload, User,
    },
};

// POST /signup
#[utoipa::path(
    post,
    path = "/signup",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "User created", body = AuthUserResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn signup(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterUserPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (user, access_token) = app_state
        .auth_service
        .register_user(
            &payload.first_name,
            &payload.last_name,
            &payload.email,
            &payload.password,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthUserResponse {
            message: "User created successfully".to_string(),
            user_uuid: user.user_uuid,
            user_id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            access_token,
        }),
    ))
}

// POST /signin
#[utoipa::path(
    post,
    path = "/signin",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Signed in", body = AuthUserResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn signin(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<LoginUserPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (user, access_token) = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthUserResponse {
        message: "Sign-in successful".to_string(),
        user_uuid: user.user_uuid,
        user_id: user.id,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        access_token,
    }))
}

// POST /client-signin
#[utoipa::path(
    post,
    path = "/client-signin",
    tag = "Auth",
    request_body = ClientLoginPayload,
    responses(
        (status = 200, description = "Client signed in", body = AuthClientResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn client_signin(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<ClientLoginPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (client, access_token) = app_state
        .auth_service
        .client_login(&payload.client_code, &payload.access_key)
        .await?;

    Ok(Json(AuthClientResponse {
        message: "Client sign-in successful".to_string(),
        client_id: client.id,
        code: client.code,
        login_link: client.login_link,
        access_key: client.access_key,
        access_token,
    }))
}

// GET /me (behind the bearer guard)
#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    responses(
        (status = 200, description = "The authenticated user", body = User),
        (status = 401, description = "Invalid or missing token")
    ),
    security(("bearer_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}
