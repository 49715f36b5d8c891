// src/common/serde_utils.rs
//
// Wire formats: timestamps go out as "YYYY-MM-DD HH:MM:SS" (dates use
// chrono's default "YYYY-MM-DD" serialization).

use chrono::NaiveDateTime;
use serde::Serializer;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub mod ts_format {
    use super::*;

    pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.format(TIMESTAMP_FORMAT).to_string())
    }
}
