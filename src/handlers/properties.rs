// src/handlers/properties.rs
//
// Property CRUD, the bulk import, and the photo upload endpoint.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::property::{
        BulkCreateResponse, CreatePropertyPayload, PropertyResponse, UpdatePropertyPayload,
        UploadResponse,
    },
};

// GET /properties
#[utoipa::path(
    get,
    path = "/properties",
    tag = "Properties",
    responses(
        (status = 200, description = "All properties", body = Vec<PropertyResponse>),
        (status = 404, description = "No properties found")
    )
)]
pub async fn list_properties(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let properties = app_state.property_service.list().await?;

    if properties.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No properties found" })),
        )
            .into_response());
    }
    Ok(Json(properties).into_response())
}

// GET /properties/{id}
#[utoipa::path(
    get,
    path = "/properties/{id}",
    tag = "Properties",
    params(("id" = i32, Path, description = "Property id")),
    responses(
        (status = 200, description = "The property", body = PropertyResponse),
        (status = 404, description = "Property not found")
    )
)]
pub async fn get_property(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PropertyResponse>, AppError> {
    let property = app_state.property_service.get(id).await?;
    Ok(Json(property))
}

// POST /properties
#[utoipa::path(
    post,
    path = "/properties",
    tag = "Properties",
    request_body = CreatePropertyPayload,
    responses(
        (status = 201, description = "Property created"),
        (status = 404, description = "Building not found"),
        (status = 409, description = "Code already taken")
    )
)]
pub async fn create_property(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreatePropertyPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let property = app_state.property_service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Property created successfully",
            "property_id": property.id,
        })),
    ))
}

// PUT /properties/{id}
#[utoipa::path(
    put,
    path = "/properties/{id}",
    tag = "Properties",
    params(("id" = i32, Path, description = "Property id")),
    request_body = UpdatePropertyPayload,
    responses(
        (status = 200, description = "Property updated"),
        (status = 404, description = "Property or building not found")
    )
)]
pub async fn update_property(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdatePropertyPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    app_state.property_service.update(id, payload).await?;
    Ok(Json(json!({ "message": "Property updated successfully" })))
}

// DELETE /properties/{id}
#[utoipa::path(
    delete,
    path = "/properties/{id}",
    tag = "Properties",
    params(("id" = i32, Path, description = "Property id")),
    responses(
        (status = 200, description = "Property deleted"),
        (status = 404, description = "Property not found")
    )
)]
pub async fn delete_property(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.property_service.delete(id).await?;
    Ok(Json(json!({ "message": "Property deleted successfully" })))
}

// POST /properties/bulk
#[utoipa::path(
    post,
    path = "/properties/bulk",
    tag = "Properties",
    request_body = Vec<Object>,
    responses(
        (status = 201, description = "Import finished", body = BulkCreateResponse),
        (status = 400, description = "Body is not a list")
    )
)]
pub async fn bulk_create_properties(
    State(app_state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<Value>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let Value::Array(entries) = body else {
        return Err(AppError::BadRequest(
            "Invalid input, expecting a list of properties".to_string(),
        ));
    };

    let (created, skipped) = app_state.property_service.bulk_create(entries).await?;
    Ok((
        StatusCode::CREATED,
        Json(BulkCreateResponse {
            message: format!(
                "{created} properties created successfully, {skipped} properties skipped due to duplicate or missing data"
            ),
            created,
            skipped,
        }),
    ))
}

// POST /upload (multipart: file + label)
#[utoipa::path(
    post,
    path = "/upload",
    tag = "Properties",
    responses(
        (status = 200, description = "Photo stored", body = UploadResponse),
        (status = 400, description = "Missing file or invalid label")
    )
)]
pub async fn upload_photo(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut label: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some((filename, content_type, bytes.to_vec()));
            }
            Some("label") => {
                label = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            _ => {}
        }
    }

    let (filename, content_type, bytes) = file.ok_or_else(|| {
        AppError::BadRequest("No file part in the request".to_string())
    })?;
    let label = label.unwrap_or_default();

    let response = app_state
        .upload_service
        .upload_photo(&label, &filename, bytes, &content_type)
        .await?;
    Ok(Json(response))
}
