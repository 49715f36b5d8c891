// tests/integration_test_clients.rs

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{TestApp, PORTAL_BASE};

#[tokio::test]
async fn create_normalizes_code_and_issues_credentials() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/clients",
            json!({
                "code": "vip010",
                "first_name": "Ann",
                "last_name": "Chan",
                "contact": "ann@example.com",
                "budget": "45000",
                "starting_date": "2025-06-01",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let id = body["client_id"].as_i64().unwrap();

    let (status, detail) = app.get(&format!("/clients/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["code"], "VIP010");
    assert_eq!(detail["budget"], 45000.0);
    assert_eq!(detail["starting_date"], "2025-06-01");
    assert_eq!(
        detail["login_link"],
        format!("{PORTAL_BASE}/VIP010")
    );
    let key = detail["access_key"].as_str().unwrap();
    assert_eq!(key.len(), 6);
    assert!(key
        .bytes()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
    assert!(detail["assigned_properties"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_code_conflicts() {
    let app = TestApp::new();
    app.seed_client("VIP011").await;

    let (status, body) = app
        .post(
            "/clients",
            json!({
                "code": "vip011",
                "first_name": "Bea",
                "last_name": "Wong",
                "contact": "bea@example.com",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Client with that code already exists");
}

#[tokio::test]
async fn list_omits_credentials_and_404s_when_empty() {
    let app = TestApp::new();

    let (status, body) = app.get("/clients").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No clients found");

    app.seed_client("VIP012").await;
    let (status, body) = app.get("/clients").await;
    assert_eq!(status, StatusCode::OK);
    let clients = body.as_array().unwrap();
    assert_eq!(clients.len(), 1);
    assert!(clients[0].get("access_key").is_none());
    assert!(clients[0].get("login_link").is_none());
}

#[tokio::test]
async fn update_patches_fields_and_rotates_credentials() {
    let app = TestApp::new();
    let id = app.seed_client("VIP013").await;

    let (_, before) = app.get(&format!("/clients/{id}")).await;
    let old_key = before["access_key"].as_str().unwrap().to_string();

    let (status, body) = app
        .put(
            &format!("/clients/{id}"),
            json!({ "nationality": "Thai", "bedrooms": "2" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Client updated successfully");

    let (_, after) = app.get(&format!("/clients/{id}")).await;
    assert_eq!(after["nationality"], "Thai");
    assert_eq!(after["bedrooms"], 2);
    // Untouched field survives the patch.
    assert_eq!(after["first_name"], "Ann");
    // Every update re-issues the portal credentials.
    assert_ne!(after["access_key"].as_str().unwrap(), old_key);

    // Null clears an optional field; required fields ignore null.
    let (status, _) = app
        .put(
            &format!("/clients/{id}"),
            json!({ "nationality": null, "first_name": null }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, cleared) = app.get(&format!("/clients/{id}")).await;
    assert!(cleared["nationality"].is_null());
    assert_eq!(cleared["first_name"], "Ann");
}

#[tokio::test]
async fn generate_login_rotates_the_key() {
    let app = TestApp::new();
    let id = app.seed_client("VIP014").await;

    let (_, before) = app.get(&format!("/clients/{id}")).await;
    let old_key = before["access_key"].as_str().unwrap().to_string();

    let (status, body) = app
        .put(&format!("/clients/{id}/generate_login"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login details generated successfully");
    assert_eq!(body["login_link"], format!("{PORTAL_BASE}/VIP014"));
    assert_ne!(body["access_key"].as_str().unwrap(), old_key);
}

#[tokio::test]
async fn portal_lookup_hides_credentials_and_names_the_latest_building() {
    let app = TestApp::new();
    let client_id = app.seed_client("VIP015").await;
    let first_building = app.seed_building("Older Tower").await;
    let second_building = app.seed_building("Newer Tower").await;
    let first_property = app.seed_property("OT-101", first_building).await;
    let second_property = app.seed_property("NT-202", second_building).await;

    app.post(
        &format!("/clients/{client_id}/properties"),
        json!({ "property_id": first_property }),
    )
    .await;
    app.post(
        &format!("/clients/{client_id}/properties"),
        json!({ "property_id": second_property }),
    )
    .await;

    let (status, portal) = app.get("/clients/code/VIP015").await;
    assert_eq!(status, StatusCode::OK, "{portal}");
    assert!(portal.get("access_key").is_none());
    assert!(portal.get("login_link").is_none());
    // The quirky top-level building: the most recent assignment wins.
    assert_eq!(portal["building"], "Newer Tower");

    let views = portal["assigned_properties"].as_array().unwrap();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0]["property_code"], "OT-101");
    assert_eq!(views[1]["property_code"], "NT-202");

    let (status, _) = app.get("/clients/code/NOBODY").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_the_client_and_its_links() {
    let app = TestApp::new();
    let client_id = app.seed_client("VIP016").await;
    let building_id = app.seed_building("Link Tower").await;
    let property_id = app.seed_property("LT-301", building_id).await;

    app.post(
        &format!("/clients/{client_id}/properties"),
        json!({ "property_id": property_id }),
    )
    .await;

    let (status, body) = app.delete(&format!("/clients/{client_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Client deleted successfully");

    let (status, _) = app.get(&format!("/clients/{client_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The property survives; the link does not.
    let (status, _) = app.get(&format!("/properties/{property_id}")).await;
    assert_eq!(status, StatusCode::OK);
    use amas_backend::db::AssignmentRepo;
    let link = app
        .store
        .find(client_id as i32, property_id as i32)
        .await
        .unwrap();
    assert!(link.is_none());
}
