// tests/integration_test_assignments.rs

mod common;

use axum::http::StatusCode;
use serde_json::json;

use amas_backend::db::{AssignmentRepo, PropertyRepo};
use common::TestApp;

async fn seed_linked(app: &TestApp) -> (i64, i64) {
    let client_id = app.seed_client("AS-001").await;
    let building_id = app.seed_building("Assign Tower").await;
    let property_id = app.seed_property("AT-101", building_id).await;
    let (status, _) = app
        .post(
            &format!("/clients/{client_id}/properties"),
            json!({ "property_id": property_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    (client_id, property_id)
}

#[tokio::test]
async fn assign_is_idempotent() {
    let app = TestApp::new();
    let (client_id, property_id) = seed_linked(&app).await;

    let (status, body) = app
        .post(
            &format!("/clients/{client_id}/properties"),
            json!({ "property_id": property_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Property already assigned");

    let (_, detail) = app.get(&format!("/clients/{client_id}")).await;
    let views = detail["assigned_properties"].as_array().unwrap();
    assert_eq!(views.len(), 1);
    // New links start inactive.
    assert_eq!(views[0]["is_active"], false);
    assert_eq!(views[0]["building"], "Assign Tower");
}

#[tokio::test]
async fn assign_checks_both_parents() {
    let app = TestApp::new();
    let client_id = app.seed_client("AS-002").await;

    let (status, body) = app
        .post(
            &format!("/clients/{client_id}/properties"),
            json!({ "property_id": 9999 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Property not found");

    let (status, body) = app
        .post("/clients/9999/properties", json!({ "property_id": 1 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Client not found");
}

#[tokio::test]
async fn unassign_deletes_the_link_once() {
    let app = TestApp::new();
    let (client_id, property_id) = seed_linked(&app).await;

    let (status, body) = app
        .delete(&format!("/clients/{client_id}/properties/{property_id}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Property removed from client");

    let (status, _) = app
        .delete(&format!("/clients/{client_id}/properties/{property_id}"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn annotation_update_touches_only_supplied_fields() {
    let app = TestApp::new();
    let (client_id, property_id) = seed_linked(&app).await;
    let uri = format!("/clients/{client_id}/properties/{property_id}/comment");

    // Neither field present: 400.
    let (status, body) = app.put(&uri, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "At least one of 'comment' or 'is_active' is required"
    );

    // Comment only: is_active stays false.
    let (status, _) = app.put(&uri, json!({ "comment": "sea view" })).await;
    assert_eq!(status, StatusCode::OK);
    let (_, detail) = app.get(&format!("/clients/{client_id}")).await;
    let view = &detail["assigned_properties"][0];
    assert_eq!(view["comment"], "sea view");
    assert_eq!(view["is_active"], false);

    // Truthy string flips is_active; comment is preserved.
    let (status, _) = app.put(&uri, json!({ "is_active": "yes" })).await;
    assert_eq!(status, StatusCode::OK);
    let (_, detail) = app.get(&format!("/clients/{client_id}")).await;
    let view = &detail["assigned_properties"][0];
    assert_eq!(view["comment"], "sea view");
    assert_eq!(view["is_active"], true);

    // Null comment clears it.
    let (status, _) = app.put(&uri, json!({ "comment": null })).await;
    assert_eq!(status, StatusCode::OK);
    let (_, detail) = app.get(&format!("/clients/{client_id}")).await;
    assert!(detail["assigned_properties"][0]["comment"].is_null());

    // Null is_active is rejected.
    let (status, body) = app.put(&uri, json!({ "is_active": null })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid value for is_active");

    // Unparseable is_active is rejected too.
    let (status, _) = app.put(&uri, json!({ "is_active": "maybe" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .put(
            &format!("/clients/{client_id}/properties/9999/comment"),
            json!({ "comment": "x" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn property_delete_cascades_to_links() {
    let app = TestApp::new();
    let (client_id, property_id) = seed_linked(&app).await;

    let (status, _) = app.delete(&format!("/properties/{property_id}")).await;
    assert_eq!(status, StatusCode::OK);

    let link = app
        .store
        .find(client_id as i32, property_id as i32)
        .await
        .unwrap();
    assert!(link.is_none());

    let (_, detail) = app.get(&format!("/clients/{client_id}")).await;
    assert!(detail["assigned_properties"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn views_skip_orphaned_links() {
    let app = TestApp::new();
    let (client_id, property_id) = seed_linked(&app).await;

    // A link pointing at a property that never existed; the repo does
    // not validate parents, only the service does.
    app.store.insert(client_id as i32, 9999).await.unwrap();

    let (status, detail) = app.get(&format!("/clients/{client_id}")).await;
    assert_eq!(status, StatusCode::OK);
    let views = detail["assigned_properties"].as_array().unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0]["id"], property_id);
}

#[tokio::test]
async fn views_fall_back_to_the_denormalized_building_name() {
    let app = TestApp::new();
    let (client_id, property_id) = seed_linked(&app).await;

    // Break the relation behind the service's back; the stored
    // building_name copy must carry the display.
    let mut property = PropertyRepo::find_by_id(&*app.store, property_id as i32)
        .await
        .unwrap()
        .unwrap();
    property.building_id = 9999;
    PropertyRepo::update(&*app.store, &property).await.unwrap();

    let (_, detail) = app.get(&format!("/clients/{client_id}")).await;
    let views = detail["assigned_properties"].as_array().unwrap();
    assert_eq!(views[0]["building"], "Assign Tower");
}
