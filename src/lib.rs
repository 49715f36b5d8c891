// src/lib.rs
//
// Module declarations and router assembly. The router is built from an
// AppState so the integration tests can drive it in-process over the
// in-memory backend.

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Json, Router,
};
use utoipa::OpenApi;

pub mod blob;
pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

pub fn build_router(app_state: AppState) -> Router {
    let guarded_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(openapi_json))
        // Auth
        .route("/signup", post(handlers::auth::signup))
        .route("/signin", post(handlers::auth::signin))
        .route("/client-signin", post(handlers::auth::client_signin))
        // Buildings
        .route(
            "/buildings",
            post(handlers::buildings::create_building).get(handlers::buildings::list_buildings),
        )
        .route(
            "/buildings/{id}",
            get(handlers::buildings::get_building)
                .put(handlers::buildings::update_building)
                .delete(handlers::buildings::delete_building),
        )
        // Clients
        .route(
            "/clients",
            post(handlers::clients::create_client).get(handlers::clients::list_clients),
        )
        .route(
            "/clients/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        )
        .route(
            "/clients/code/{code}",
            get(handlers::clients::get_client_by_code),
        )
        .route(
            "/clients/{id}/generate_login",
            put(handlers::clients::generate_login),
        )
        // Assignments
        .route(
            "/clients/{id}/properties",
            post(handlers::clients::assign_property),
        )
        .route(
            "/clients/{id}/properties/{property_id}",
            axum::routing::delete(handlers::clients::unassign_property),
        )
        .route(
            "/clients/{id}/properties/{property_id}/comment",
            put(handlers::clients::update_assignment),
        )
        // Properties
        .route(
            "/properties",
            post(handlers::properties::create_property).get(handlers::properties::list_properties),
        )
        .route(
            "/properties/{id}",
            get(handlers::properties::get_property)
                .put(handlers::properties::update_property)
                .delete(handlers::properties::delete_property),
        )
        .route(
            "/properties/bulk",
            post(handlers::properties::bulk_create_properties),
        )
        .route("/upload", post(handlers::properties::upload_photo))
        .merge(guarded_routes)
        .with_state(app_state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(docs::ApiDoc::openapi())
}
