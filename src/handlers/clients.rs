// src/handlers/clients.rs
//
// Client CRUD plus the assignment sub-resource
// (/clients/{id}/properties...).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        assignment::{AssignPropertyPayload, UpdateAnnotationPayload},
        client::{
            ClientDetail, ClientPortalDetail, ClientSummary, CreateClientPayload,
            LoginDetailsResponse, UpdateClientPayload,
        },
    },
};

// GET /clients
#[utoipa::path(
    get,
    path = "/clients",
    tag = "Clients",
    responses(
        (status = 200, description = "All clients", body = Vec<ClientSummary>),
        (status = 404, description = "No clients found")
    )
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let clients = app_state.client_service.list().await?;

    if clients.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No clients found" })),
        )
            .into_response());
    }
    Ok(Json(clients).into_response())
}

// GET /clients/{id}
#[utoipa::path(
    get,
    path = "/clients/{id}",
    tag = "Clients",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "The client with assignments", body = ClientDetail),
        (status = 404, description = "Client not found")
    )
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ClientDetail>, AppError> {
    let detail = app_state.client_service.get(id).await?;
    Ok(Json(detail))
}

// GET /clients/code/{code}
#[utoipa::path(
    get,
    path = "/clients/code/{code}",
    tag = "Clients",
    params(("code" = String, Path, description = "Client code")),
    responses(
        (status = 200, description = "Portal view of the client", body = ClientPortalDetail),
        (status = 404, description = "Client not found")
    )
)]
pub async fn get_client_by_code(
    State(app_state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ClientPortalDetail>, AppError> {
    let detail = app_state.client_service.get_by_code(&code).await?;
    Ok(Json(detail))
}

// POST /clients
#[utoipa::path(
    post,
    path = "/clients",
    tag = "Clients",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Client created"),
        (status = 409, description = "Code already taken")
    )
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateClientPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state.client_service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Client created successfully",
            "client_id": client.id,
        })),
    ))
}

// PUT /clients/{id}
#[utoipa::path(
    put,
    path = "/clients/{id}",
    tag = "Clients",
    params(("id" = i32, Path, description = "Client id")),
    request_body = UpdateClientPayload,
    responses(
        (status = 200, description = "Client updated, credentials re-issued"),
        (status = 404, description = "Client not found")
    )
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateClientPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    app_state.client_service.update(id, payload).await?;
    Ok(Json(json!({ "message": "Client updated successfully" })))
}

// DELETE /clients/{id}
#[utoipa::path(
    delete,
    path = "/clients/{id}",
    tag = "Clients",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "Client deleted"),
        (status = 404, description = "Client not found")
    )
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.client_service.delete(id).await?;
    Ok(Json(json!({ "message": "Client deleted successfully" })))
}

// PUT /clients/{id}/generate_login
#[utoipa::path(
    put,
    path = "/clients/{id}/generate_login",
    tag = "Clients",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "New portal credentials", body = LoginDetailsResponse),
        (status = 404, description = "Client not found")
    )
)]
pub async fn generate_login(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<LoginDetailsResponse>, AppError> {
    let client = app_state.client_service.generate_login(id).await?;
    Ok(Json(LoginDetailsResponse {
        message: "Login details generated successfully".to_string(),
        login_link: client.login_link,
        access_key: client.access_key,
    }))
}

// POST /clients/{id}/properties
#[utoipa::path(
    post,
    path = "/clients/{id}/properties",
    tag = "Clients",
    params(("id" = i32, Path, description = "Client id")),
    request_body = AssignPropertyPayload,
    responses(
        (status = 201, description = "Property assigned"),
        (status = 200, description = "Property was already assigned"),
        (status = 404, description = "Client or property not found")
    )
)]
pub async fn assign_property(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    WithRejection(Json(payload), _): WithRejection<Json<AssignPropertyPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let (_, created) = app_state
        .assignment_service
        .assign(id, payload.property_id)
        .await?;

    if created {
        Ok((
            StatusCode::CREATED,
            Json(json!({ "message": "Property assigned successfully" })),
        ))
    } else {
        Ok((
            StatusCode::OK,
            Json(json!({ "message": "Property already assigned" })),
        ))
    }
}

// DELETE /clients/{id}/properties/{property_id}
#[utoipa::path(
    delete,
    path = "/clients/{id}/properties/{property_id}",
    tag = "Clients",
    params(
        ("id" = i32, Path, description = "Client id"),
        ("property_id" = i32, Path, description = "Property id")
    ),
    responses(
        (status = 200, description = "Assignment removed"),
        (status = 404, description = "Assignment not found")
    )
)]
pub async fn unassign_property(
    State(app_state): State<AppState>,
    Path((id, property_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    app_state.assignment_service.unassign(id, property_id).await?;
    Ok(Json(json!({ "message": "Property removed from client" })))
}

// PUT /clients/{id}/properties/{property_id}/comment
#[utoipa::path(
    put,
    path = "/clients/{id}/properties/{property_id}/comment",
    tag = "Clients",
    params(
        ("id" = i32, Path, description = "Client id"),
        ("property_id" = i32, Path, description = "Property id")
    ),
    request_body = UpdateAnnotationPayload,
    responses(
        (status = 200, description = "Annotation updated"),
        (status = 400, description = "No fields provided or invalid is_active"),
        (status = 404, description = "Assignment not found")
    )
)]
pub async fn update_assignment(
    State(app_state): State<AppState>,
    Path((id, property_id)): Path<(i32, i32)>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateAnnotationPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .assignment_service
        .update_annotation(id, property_id, payload)
        .await?;
    Ok(Json(json!({ "message": "Client property updated successfully" })))
}
