// tests/integration_test_properties.rs

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{TestApp, PHOTO_ENDPOINT};

#[tokio::test]
async fn create_requires_a_real_building() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/properties",
            json!({ "property_code": "XX-1", "building_id": 42, "unit": "1/1" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Building not found");
}

#[tokio::test]
async fn create_resolves_building_and_defaults_photos() {
    let app = TestApp::new();
    let building_id = app.seed_building("Photo Tower").await;

    let (status, body) = app
        .post(
            "/properties",
            json!({
                "property_code": "PT-101",
                "building_id": building_id,
                "unit": "10/1",
                "price": "25000",
                "bedrooms": "2",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let id = body["property_id"].as_i64().unwrap();

    let (status, property) = app.get(&format!("/properties/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(property["building"], "Photo Tower");
    assert_eq!(property["building_id"], building_id);
    assert_eq!(property["price"], 25000.0);
    assert_eq!(property["bedrooms"], 2);
    assert_eq!(
        property["photo_urls"]["main"][0],
        format!("{PHOTO_ENDPOINT}/noimageyet.jpg")
    );
}

#[tokio::test]
async fn duplicate_code_conflicts() {
    let app = TestApp::new();
    let building_id = app.seed_building("Dup Tower").await;
    app.seed_property("DT-1", building_id).await;

    let (status, body) = app
        .post(
            "/properties",
            json!({ "property_code": "DT-1", "building_id": building_id, "unit": "2/2" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Property with that code already exists");
}

#[tokio::test]
async fn list_404s_when_empty() {
    let app = TestApp::new();

    let (status, body) = app.get("/properties").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No properties found");
}

#[tokio::test]
async fn update_patches_and_revalidates_the_building() {
    let app = TestApp::new();
    let building_id = app.seed_building("First Tower").await;
    let other_building = app.seed_building("Second Tower").await;
    let id = app.seed_property("UP-1", building_id).await;

    let (status, _) = app
        .put(
            &format!("/properties/{id}"),
            json!({ "building_id": other_building, "owner": "K. Somchai", "floor": "7" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, property) = app.get(&format!("/properties/{id}")).await;
    assert_eq!(property["building"], "Second Tower");
    assert_eq!(property["owner"], "K. Somchai");
    assert_eq!(property["floor"], 7);

    // Null clears, absent keeps.
    let (status, _) = app
        .put(&format!("/properties/{id}"), json!({ "owner": null }))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, property) = app.get(&format!("/properties/{id}")).await;
    assert!(property["owner"].is_null());
    assert_eq!(property["floor"], 7);

    let (status, _) = app
        .put(&format!("/properties/{id}"), json!({ "building_id": 9999 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bulk_import_skips_duplicates_and_bad_rows() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/properties/bulk",
            json!([
                // Created, building made lazily from its name.
                { "property_code": "BK-1", "building": "Bulk Tower", "unit": "1/1" },
                // Duplicate code within the same batch.
                { "property_code": "BK-1", "building": "Bulk Tower", "unit": "1/2" },
                // No code.
                { "building": "Bulk Tower", "unit": "1/3" },
                // Neither building id nor name.
                { "property_code": "BK-4", "unit": "1/4" },
            ]),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["created"], 1);
    assert_eq!(body["skipped"], 3);
    assert_eq!(
        body["message"],
        "1 properties created successfully, 3 properties skipped due to duplicate or missing data"
    );

    // The lazily created building is a real row.
    let (status, buildings) = app.get("/buildings?search=Bulk").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(buildings.as_array().unwrap().len(), 1);

    // The import got the placeholder photo document.
    let (_, properties) = app.get("/properties").await;
    let imported = &properties.as_array().unwrap()[0];
    assert_eq!(imported["property_code"], "BK-1");
    assert_eq!(imported["building"], "Bulk Tower");
    assert_eq!(
        imported["photo_urls"]["main"][0],
        format!("{PHOTO_ENDPOINT}/noimageyet.jpg")
    );
}

#[tokio::test]
async fn bulk_import_rejects_non_list_bodies() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/properties/bulk", json!({ "property_code": "X" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid input, expecting a list of properties");
}

#[tokio::test]
async fn upload_validates_label_and_returns_the_public_url() {
    let app = TestApp::new();

    let (status, body) = app
        .post_multipart("/upload", Some(("room.jpg", b"jpegbytes")), Some("kitchen"))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["label"], "kitchen");
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with(PHOTO_ENDPOINT));
    assert!(url.ends_with("_room.jpg"));

    // The key in the URL is what landed in the blob store.
    let key = url.strip_prefix(&format!("{PHOTO_ENDPOINT}/")).unwrap();
    assert!(app.blob.contains(key));

    let (status, body) = app
        .post_multipart("/upload", Some(("room.jpg", b"jpegbytes")), Some("garage"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid label provided. Allowed labels:"));

    let (status, body) = app.post_multipart("/upload", None, Some("kitchen")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file part in the request");

    let (status, body) = app
        .post_multipart("/upload", Some(("", b"jpegbytes")), Some("kitchen"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No selected file");
}
