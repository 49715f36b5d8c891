pub mod assignment;
pub mod auth;
pub mod building;
pub mod client;
pub mod property;
