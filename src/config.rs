// src/config.rs
//
// Environment configuration plus the application dependency graph.
// When DATABASE_URL is set the Postgres repositories are wired in;
// without it the in-memory store backs everything, which is what the
// integration tests and DB-less development use.

use std::{env, sync::Arc, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    blob::{BlobStore, FsBlobStore, MemoryBlobStore},
    db::{
        AssignmentRepo, BuildingRepo, ClientRepo, MemoryStore, PgAssignmentRepo, PgBuildingRepo,
        PgClientRepo, PgPropertyRepo, PgUserRepo, PropertyRepo, UserRepo,
    },
    services::{
        AssignmentService, AuthService, BuildingService, ClientService, PropertyService,
        UploadService,
    },
};

#[derive(Debug, Clone)]
pub struct BlobConfig {
    pub public_endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub root: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub portal_base_url: String,
    pub blob: BlobConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok(),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?,
            portal_base_url: env::var("PORTAL_BASE_URL")
                .unwrap_or_else(|_| "https://portal.example.com".to_string()),
            blob: BlobConfig {
                public_endpoint: env::var("BLOB_PUBLIC_ENDPOINT")
                    .unwrap_or_else(|_| "https://photos.example.com".to_string()),
                access_key: env::var("BLOB_ACCESS_KEY").unwrap_or_default(),
                secret_key: env::var("BLOB_SECRET_KEY").unwrap_or_default(),
                bucket: env::var("BLOB_BUCKET").unwrap_or_else(|_| "property-photos".to_string()),
                root: env::var("BLOB_ROOT").unwrap_or_else(|_| "./blobs".to_string()),
            },
        })
    }
}

// Repository handles for one storage backend.
struct Repos {
    users: Arc<dyn UserRepo>,
    clients: Arc<dyn ClientRepo>,
    buildings: Arc<dyn BuildingRepo>,
    properties: Arc<dyn PropertyRepo>,
    assignments: Arc<dyn AssignmentRepo>,
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: Option<PgPool>,
    pub auth_service: AuthService,
    pub client_service: ClientService,
    pub building_service: BuildingService,
    pub property_service: PropertyService,
    pub assignment_service: AssignmentService,
    pub upload_service: UploadService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let (db_pool, repos) = match &config.database_url {
            Some(database_url) => {
                let pool = PgPoolOptions::new()
                    .max_connections(5)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(database_url)
                    .await?;
                tracing::info!("connected to Postgres");
                let repos = Repos {
                    users: Arc::new(PgUserRepo::new(pool.clone())),
                    clients: Arc::new(PgClientRepo::new(pool.clone())),
                    buildings: Arc::new(PgBuildingRepo::new(pool.clone())),
                    properties: Arc::new(PgPropertyRepo::new(pool.clone())),
                    assignments: Arc::new(PgAssignmentRepo::new(pool.clone())),
                };
                (Some(pool), repos)
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using the in-memory store");
                let store = Arc::new(MemoryStore::new());
                (None, Self::memory_repos(store))
            }
        };

        let blob: Arc<dyn BlobStore> = match config.database_url {
            Some(_) => Arc::new(FsBlobStore::new(&config.blob)),
            None => Arc::new(MemoryBlobStore::new(&config.blob.public_endpoint)),
        };

        Ok(Self::assemble(config, repos, blob, db_pool))
    }

    /// Builds a state over an explicit in-memory store and blob store.
    /// The integration tests use this to keep a handle on the storage.
    pub fn with_memory_backend(
        config: &Config,
        store: Arc<MemoryStore>,
        blob: Arc<MemoryBlobStore>,
    ) -> Self {
        Self::assemble(config, Self::memory_repos(store), blob, None)
    }

    fn memory_repos(store: Arc<MemoryStore>) -> Repos {
        Repos {
            users: store.clone(),
            clients: store.clone(),
            buildings: store.clone(),
            properties: store.clone(),
            assignments: store,
        }
    }

    fn assemble(
        config: &Config,
        repos: Repos,
        blob: Arc<dyn BlobStore>,
        db_pool: Option<PgPool>,
    ) -> Self {
        let auth_service = AuthService::new(
            repos.users.clone(),
            repos.clients.clone(),
            config.jwt_secret.clone(),
        );
        let assignment_service = AssignmentService::new(
            repos.assignments.clone(),
            repos.clients.clone(),
            repos.properties.clone(),
            repos.buildings.clone(),
        );
        let client_service = ClientService::new(
            repos.clients.clone(),
            assignment_service.clone(),
            config.portal_base_url.clone(),
        );
        let building_service =
            BuildingService::new(repos.buildings.clone(), repos.properties.clone());
        let property_service = PropertyService::new(
            repos.properties.clone(),
            repos.buildings.clone(),
            config.blob.public_endpoint.clone(),
        );
        let upload_service = UploadService::new(blob);

        Self {
            db_pool,
            auth_service,
            client_service,
            building_service,
            property_service,
            assignment_service,
            upload_service,
        }
    }
}
