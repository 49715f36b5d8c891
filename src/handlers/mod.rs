// src/handlers/mod.rs

pub mod auth;
pub mod buildings;
pub mod clients;
pub mod properties;
