// src/handlers/buildings.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::building::{Building, CreateBuildingPayload, UpdateBuildingPayload},
};

#[derive(Debug, Deserialize)]
pub struct BuildingListQuery {
    pub search: Option<String>,
}

// GET /buildings
#[utoipa::path(
    get,
    path = "/buildings",
    tag = "Buildings",
    params(("search" = Option<String>, Query, description = "Name substring filter")),
    responses(
        (status = 200, description = "All buildings", body = Vec<Building>),
        (status = 404, description = "No buildings found")
    )
)]
pub async fn list_buildings(
    State(app_state): State<AppState>,
    Query(query): Query<BuildingListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let buildings = app_state
        .building_service
        .list(query.search.as_deref())
        .await?;

    if buildings.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No buildings found" })),
        )
            .into_response());
    }
    Ok(Json(buildings).into_response())
}

// GET /buildings/{id}
#[utoipa::path(
    get,
    path = "/buildings/{id}",
    tag = "Buildings",
    params(("id" = i32, Path, description = "Building id")),
    responses(
        (status = 200, description = "The building", body = Building),
        (status = 404, description = "Building not found")
    )
)]
pub async fn get_building(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Building>, AppError> {
    let building = app_state.building_service.get(id).await?;
    Ok(Json(building))
}

// POST /buildings
#[utoipa::path(
    post,
    path = "/buildings",
    tag = "Buildings",
    request_body = CreateBuildingPayload,
    responses(
        (status = 201, description = "Building created"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_building(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateBuildingPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let building = app_state.building_service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Building created successfully",
            "building_id": building.id,
        })),
    ))
}

// PUT /buildings/{id}
#[utoipa::path(
    put,
    path = "/buildings/{id}",
    tag = "Buildings",
    params(("id" = i32, Path, description = "Building id")),
    request_body = UpdateBuildingPayload,
    responses(
        (status = 200, description = "Building updated"),
        (status = 404, description = "Building not found")
    )
)]
pub async fn update_building(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateBuildingPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    app_state.building_service.update(id, payload).await?;
    Ok(Json(json!({ "message": "Building updated successfully" })))
}

// DELETE /buildings/{id}
#[utoipa::path(
    delete,
    path = "/buildings/{id}",
    tag = "Buildings",
    params(("id" = i32, Path, description = "Building id")),
    responses(
        (status = 200, description = "Building deleted"),
        (status = 404, description = "Building not found"),
        (status = 409, description = "Building still has properties")
    )
)]
pub async fn delete_building(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.building_service.delete(id).await?;
    Ok(Json(json!({ "message": "Building deleted successfully" })))
}
