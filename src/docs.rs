// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::signup,
        handlers::auth::signin,
        handlers::auth::client_signin,
        handlers::auth::get_me,

        // --- Buildings ---
        handlers::buildings::list_buildings,
        handlers::buildings::get_building,
        handlers::buildings::create_building,
        handlers::buildings::update_building,
        handlers::buildings::delete_building,

        // --- Clients ---
        handlers::clients::list_clients,
        handlers::clients::get_client,
        handlers::clients::get_client_by_code,
        handlers::clients::create_client,
        handlers::clients::update_client,
        handlers::clients::delete_client,
        handlers::clients::generate_login,
        handlers::clients::assign_property,
        handlers::clients::unassign_property,
        handlers::clients::update_assignment,

        // --- Properties ---
        handlers::properties::list_properties,
        handlers::properties::get_property,
        handlers::properties::create_property,
        handlers::properties::update_property,
        handlers::properties::delete_property,
        handlers::properties::bulk_create_properties,
        handlers::properties::upload_photo,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::ClientLoginPayload,
            models::auth::AuthUserResponse,
            models::auth::AuthClientResponse,

            // --- Buildings ---
            models::building::Building,
            models::building::CreateBuildingPayload,
            models::building::UpdateBuildingPayload,

            // --- Clients ---
            models::client::ClientSummary,
            models::client::ClientDetail,
            models::client::ClientPortalDetail,
            models::client::CreateClientPayload,
            models::client::UpdateClientPayload,
            models::client::LoginDetailsResponse,

            // --- Assignments ---
            models::assignment::AssignPropertyPayload,
            models::assignment::UpdateAnnotationPayload,
            models::assignment::AssignmentView,

            // --- Properties ---
            models::property::PropertyResponse,
            models::property::CreatePropertyPayload,
            models::property::UpdatePropertyPayload,
            models::property::BulkCreateResponse,
            models::property::UploadResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Staff and client sign-in"),
        (name = "Buildings", description = "Building management"),
        (name = "Clients", description = "Client management and property assignments"),
        (name = "Properties", description = "Property management, bulk import and photo upload")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
