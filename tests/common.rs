// tests/common.rs
//
// In-process test harness: the full router over the in-memory backend,
// driven with tower's oneshot. The store and blob handles stay exposed
// so tests can inspect storage directly where no route reaches.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use amas_backend::{
    blob::MemoryBlobStore,
    build_router,
    config::{AppState, BlobConfig, Config},
    db::MemoryStore,
};

pub const PHOTO_ENDPOINT: &str = "https://photos.test";
pub const PORTAL_BASE: &str = "https://portal.test";
pub const JWT_SECRET: &str = "test-secret";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub blob: Arc<MemoryBlobStore>,
}

#[allow(dead_code)]
impl TestApp {
    pub fn new() -> Self {
        let config = Config {
            database_url: None,
            bind_addr: "127.0.0.1:0".to_string(),
            jwt_secret: JWT_SECRET.to_string(),
            portal_base_url: PORTAL_BASE.to_string(),
            blob: BlobConfig {
                public_endpoint: PHOTO_ENDPOINT.to_string(),
                access_key: String::new(),
                secret_key: String::new(),
                bucket: "property-photos".to_string(),
                root: "./blobs".to_string(),
            },
        };

        let store = Arc::new(MemoryStore::new());
        let blob = Arc::new(MemoryBlobStore::new(PHOTO_ENDPOINT));
        let state = AppState::with_memory_backend(&config, store.clone(), blob.clone());

        Self {
            router: build_router(state),
            store,
            blob,
        }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        bearer: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("PUT", uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request("DELETE", uri, None, None).await
    }

    /// Multipart POST with an optional file part and an optional label
    /// part, mirroring the upload endpoint's form.
    pub async fn post_multipart(
        &self,
        uri: &str,
        file: Option<(&str, &[u8])>,
        label: Option<&str>,
    ) -> (StatusCode, Value) {
        let boundary = "test-boundary-4f9a27";
        let mut body = Vec::new();

        if let Some((filename, bytes)) = file {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; \
                     filename=\"{filename}\"\r\nContent-Type: image/jpeg\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        if let Some(label) = label {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"label\"\r\n\r\n{label}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    /// Creates a building and returns its id.
    pub async fn seed_building(&self, name: &str) -> i64 {
        let (status, body) = self
            .post("/buildings", serde_json::json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "seed building: {body}");
        body["building_id"].as_i64().unwrap()
    }

    /// Creates a client and returns its id.
    pub async fn seed_client(&self, code: &str) -> i64 {
        let (status, body) = self
            .post(
                "/clients",
                serde_json::json!({
                    "code": code,
                    "first_name": "Ann",
                    "last_name": "Chan",
                    "contact": "ann@example.com",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "seed client: {body}");
        body["client_id"].as_i64().unwrap()
    }

    /// Creates a property in the given building and returns its id.
    pub async fn seed_property(&self, code: &str, building_id: i64) -> i64 {
        let (status, body) = self
            .post(
                "/properties",
                serde_json::json!({
                    "property_code": code,
                    "building_id": building_id,
                    "unit": "12/34",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "seed property: {body}");
        body["property_id"].as_i64().unwrap()
    }
}
