// src/services/upload_service.rs
//
// Photo upload: validates the label against the closed set of photo
// categories, prefixes the filename with a fresh UUID so keys never
// collide, and hands the bytes to the blob port. The resulting URL is
// returned to the caller and never persisted here.

use std::sync::Arc;

use uuid::Uuid;

use crate::{blob::BlobStore, common::error::AppError, models::property::UploadResponse};

pub const ALLOWED_LABELS: [&str; 8] = [
    "main",
    "bathroom",
    "bedroom",
    "kitchen",
    "living_room",
    "balcony",
    "closet",
    "amenities",
];

#[derive(Clone)]
pub struct UploadService {
    blob: Arc<dyn BlobStore>,
}

impl UploadService {
    pub fn new(blob: Arc<dyn BlobStore>) -> Self {
        Self { blob }
    }

    pub async fn upload_photo(
        &self,
        label: &str,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<UploadResponse, AppError> {
        if filename.is_empty() {
            return Err(AppError::BadRequest("No selected file".to_string()));
        }
        if !ALLOWED_LABELS.contains(&label) {
            return Err(AppError::BadRequest(format!(
                "Invalid label provided. Allowed labels: {}",
                ALLOWED_LABELS.join(", ")
            )));
        }

        let key = format!("{}_{}", Uuid::new_v4(), filename);
        let url = self.blob.put(&key, bytes, content_type).await?;
        tracing::info!(%key, label, "photo uploaded");

        Ok(UploadResponse {
            url,
            label: label.to_string(),
        })
    }
}
