// tests/integration_test_buildings.rs

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn empty_list_is_a_404_with_message() {
    let app = TestApp::new();

    let (status, body) = app.get("/buildings").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No buildings found");
}

#[tokio::test]
async fn create_accepts_numeric_strings() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/buildings",
            json!({
                "name": "Lumpini Park View",
                "year_built": "2015",
                "distance_to_bts": "0.5",
                "nearest_bts": "Sala Daeng",
                "facilities": { "pool": true },
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], "Building created successfully");
    let id = body["building_id"].as_i64().unwrap();

    let (status, building) = app.get(&format!("/buildings/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(building["year_built"], 2015);
    assert_eq!(building["distance_to_bts"], 0.5);
    assert_eq!(building["facilities"]["pool"], true);
    // Timestamps go out as "YYYY-MM-DD HH:MM:SS".
    let created_at = building["created_at"].as_str().unwrap();
    assert_eq!(created_at.len(), 19);
    assert_eq!(&created_at[4..5], "-");
    assert_eq!(&created_at[10..11], " ");
}

#[tokio::test]
async fn junk_numeric_input_is_rejected() {
    let app = TestApp::new();

    let (status, _) = app
        .post(
            "/buildings",
            json!({ "name": "Bad Tower", "year_built": "twenty" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_name_conflicts() {
    let app = TestApp::new();
    app.seed_building("The Met").await;

    let (status, body) = app.post("/buildings", json!({ "name": "The Met" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Building with that name already exists");
}

#[tokio::test]
async fn search_filters_by_name_substring() {
    let app = TestApp::new();
    app.seed_building("Lumpini Park View").await;
    app.seed_building("Noble Reveal").await;

    let (status, body) = app.get("/buildings?search=lump").await;
    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "Lumpini Park View");

    let (status, body) = app.get("/buildings?search=zzz").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No buildings found");
}

#[tokio::test]
async fn update_is_a_tri_state_patch() {
    let app = TestApp::new();
    let (_, created) = app
        .post(
            "/buildings",
            json!({ "name": "Ashton Asoke", "nearest_bts": "Asok", "year_built": 2018 }),
        )
        .await;
    let id = created["building_id"].as_i64().unwrap();

    // Absent keys leave fields untouched.
    let (status, _) = app
        .put(&format!("/buildings/{id}"), json!({ "nearest_mrt": "Sukhumvit" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, building) = app.get(&format!("/buildings/{id}")).await;
    assert_eq!(building["nearest_bts"], "Asok");
    assert_eq!(building["nearest_mrt"], "Sukhumvit");
    assert_eq!(building["year_built"], 2018);

    // Explicit null (and empty string) clear optional fields.
    let (status, _) = app
        .put(
            &format!("/buildings/{id}"),
            json!({ "nearest_bts": null, "nearest_mrt": "" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, building) = app.get(&format!("/buildings/{id}")).await;
    assert!(building["nearest_bts"].is_null());
    assert!(building["nearest_mrt"].is_null());
}

#[tokio::test]
async fn delete_refuses_while_properties_remain() {
    let app = TestApp::new();
    let building_id = app.seed_building("The River").await;
    let property_id = app.seed_property("RV-101", building_id).await;

    let (status, body) = app.delete(&format!("/buildings/{building_id}")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Building has properties and cannot be deleted");

    app.delete(&format!("/properties/{property_id}")).await;

    let (status, body) = app.delete(&format!("/buildings/{building_id}")).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Building deleted successfully");

    let (status, _) = app.get(&format!("/buildings/{building_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
