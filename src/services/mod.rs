// src/services/mod.rs

pub mod assignment_service;
pub mod auth;
pub mod building_service;
pub mod client_service;
pub mod property_service;
pub mod upload_service;

pub use assignment_service::AssignmentService;
pub use auth::AuthService;
pub use building_service::BuildingService;
pub use client_service::ClientService;
pub use property_service::PropertyService;
pub use upload_service::UploadService;
