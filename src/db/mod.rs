// src/db/mod.rs
//
// Storage ports (traits) and their backends. Production runs the
// Postgres implementations; the in-memory store backs tests and
// DB-less development, honoring the same contracts (uppercase-unique
// codes, cascade deletes on client/property removal).

pub mod assignment_repo;
pub mod building_repo;
pub mod client_repo;
pub mod memory;
pub mod property_repo;
pub mod user_repo;

pub use assignment_repo::{AssignmentRepo, PgAssignmentRepo};
pub use building_repo::{BuildingRepo, NewBuilding, PgBuildingRepo};
pub use client_repo::{ClientRepo, NewClient, PgClientRepo};
pub use memory::MemoryStore;
pub use property_repo::{NewProperty, PgPropertyRepo, PropertyRepo};
pub use user_repo::{NewUser, PgUserRepo, UserRepo};

use crate::common::error::AppError;

// Unique-index violations are the backstop behind every lock-free
// duplicate pre-check; they surface as 409s, not 500s.
pub(crate) fn map_unique_violation(e: sqlx::Error, message: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::Conflict(message.to_string());
        }
    }
    e.into()
}
