// src/blob.rs
//
// Blob storage port for property photos. Production points the
// filesystem backend at a mounted bucket; tests use the in-memory one.
// Either way the store returns the public URL the photo will be served
// from, `{public_endpoint}/{key}`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use anyhow::Context;
use async_trait::async_trait;

use crate::common::error::AppError;
use crate::config::BlobConfig;

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores the bytes under `key` and returns the public URL.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, AppError>;
}

/// Writes blobs under `{root}/{bucket}/{key}`.
pub struct FsBlobStore {
    root: PathBuf,
    bucket: String,
    public_endpoint: String,
}

impl FsBlobStore {
    pub fn new(config: &BlobConfig) -> Self {
        Self {
            root: PathBuf::from(&config.root),
            bucket: config.bucket.clone(),
            public_endpoint: config.public_endpoint.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, _content_type: &str) -> Result<String, AppError> {
        let path = self.root.join(&self.bucket).join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating blob directory {}", parent.display()))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("writing blob {}", path.display()))?;
        tracing::debug!(key, "stored blob");
        Ok(format!("{}/{}", self.public_endpoint, key))
    }
}

/// Keeps blobs in a map. Backs the test suite.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    public_endpoint: String,
}

impl MemoryBlobStore {
    pub fn new(public_endpoint: &str) -> Self {
        Self {
            blobs: Mutex::new(HashMap::new()),
            public_endpoint: public_endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, _content_type: &str) -> Result<String, AppError> {
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), bytes);
        Ok(format!("{}/{}", self.public_endpoint, key))
    }
}
