// tests/integration_test_auth.rs

mod common;

use axum::http::StatusCode;
use serde_json::json;

use amas_backend::services::AuthService;
use common::TestApp;

#[tokio::test]
async fn signup_returns_profile_and_token() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/signup",
            json!({
                "first_name": "Mara",
                "last_name": "Lind",
                "email": "mara@example.com",
                "password": "hunter22",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["email"], "mara@example.com");
    assert!(body["user_uuid"].as_str().is_some());
    assert!(body["access_token"].as_str().is_some());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_signup_conflicts_and_uuids_differ() {
    let app = TestApp::new();

    let payload = |email: &str| {
        json!({
            "first_name": "A",
            "last_name": "B",
            "email": email,
            "password": "pw123456",
        })
    };

    let (_, first) = app.post("/signup", payload("a@example.com")).await;
    let (_, second) = app.post("/signup", payload("b@example.com")).await;
    assert_ne!(first["user_uuid"], second["user_uuid"]);

    let (status, body) = app.post("/signup", payload("a@example.com")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User with that email already exists");
}

#[tokio::test]
async fn signup_rejects_missing_fields() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/signup",
            json!({
                "first_name": "Mara",
                "last_name": "Lind",
                "email": "mara@example.com",
                "password": "",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["password"].is_array(), "{body}");
}

#[tokio::test]
async fn signin_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.post(
        "/signup",
        json!({
            "first_name": "Mara",
            "last_name": "Lind",
            "email": "mara@example.com",
            "password": "hunter22",
        }),
    )
    .await;

    let (wrong_pw_status, wrong_pw_body) = app
        .post(
            "/signin",
            json!({ "email": "mara@example.com", "password": "nope" }),
        )
        .await;
    let (unknown_status, unknown_body) = app
        .post(
            "/signin",
            json!({ "email": "ghost@example.com", "password": "nope" }),
        )
        .await;

    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    // No user enumeration: identical bodies either way.
    assert_eq!(wrong_pw_body, unknown_body);

    let (ok_status, ok_body) = app
        .post(
            "/signin",
            json!({ "email": "mara@example.com", "password": "hunter22" }),
        )
        .await;
    assert_eq!(ok_status, StatusCode::OK);
    assert_eq!(ok_body["message"], "Sign-in successful");
}

#[tokio::test]
async fn me_requires_a_valid_bearer_token() {
    let app = TestApp::new();
    let (_, signup) = app
        .post(
            "/signup",
            json!({
                "first_name": "Mara",
                "last_name": "Lind",
                "email": "mara@example.com",
                "password": "hunter22",
            }),
        )
        .await;
    let token = signup["access_token"].as_str().unwrap().to_string();

    let (status, body) = app.request("GET", "/me", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["email"], "mara@example.com");

    let (status, _) = app.request("GET", "/me", None, Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn client_signin_normalizes_code_and_key() {
    let app = TestApp::new();
    let client_id = app.seed_client("vip001").await;

    let (_, detail) = app.get(&format!("/clients/{client_id}")).await;
    let access_key = detail["access_key"].as_str().unwrap().to_string();

    // Lowercase input with whitespace still matches the stored values.
    let (status, body) = app
        .post(
            "/client-signin",
            json!({
                "client_code": "  vip001 ",
                "access_key": access_key.to_lowercase(),
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Client sign-in successful");
    assert_eq!(body["code"], "VIP001");
    assert_eq!(body["access_key"], access_key);

    let (status, _) = app
        .post(
            "/client-signin",
            json!({ "client_code": "VIP001", "access_key": "WRONG0" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post(
            "/client-signin",
            json!({ "client_code": "NOBODY", "access_key": access_key }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn rotating_the_access_key_invalidates_client_tokens() {
    let app = TestApp::new();
    let client_id = app.seed_client("vip002").await;

    let (_, detail) = app.get(&format!("/clients/{client_id}")).await;
    let access_key = detail["access_key"].as_str().unwrap().to_string();

    let (_, signin) = app
        .post(
            "/client-signin",
            json!({ "client_code": "VIP002", "access_key": access_key }),
        )
        .await;
    let token = signin["access_token"].as_str().unwrap().to_string();

    // No route consumes client tokens, so validate through the service.
    let auth = AuthService::new(
        app.store.clone(),
        app.store.clone(),
        common::JWT_SECRET.to_string(),
    );
    let validated = auth.validate_client_token(&token).await.unwrap();
    assert_eq!(validated.code, "VIP002");

    let (status, _) = app
        .put(&format!("/clients/{client_id}/generate_login"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);

    assert!(auth.validate_client_token(&token).await.is_err());
}
