pub mod coerce;
pub mod error;
pub mod serde_utils;
