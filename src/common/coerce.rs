// src/common/coerce.rs
//
// Lenient coercion of loosely-typed request fields, and the tri-state
// `Patch<T>` used by partial updates.
//
// The API accepts numeric fields as JSON numbers or numeric strings, and
// treats empty string the same as null: "no value". Anything that cannot
// be coerced is a validation error, not a silent keep.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// A type that can be coerced out of a loosely-typed JSON value.
///
/// `Ok(None)` means "present but carries no value" (empty string).
pub trait Coerce: Sized {
    fn coerce(value: &Value) -> Result<Option<Self>, String>;
}

impl Coerce for String {
    fn coerce(value: &Value) -> Result<Option<Self>, String> {
        match value {
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => Ok(Some(s.clone())),
            other => Err(format!("expected a string, got {other}")),
        }
    }
}

impl Coerce for i32 {
    fn coerce(value: &Value) -> Result<Option<Self>, String> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i32::try_from(i)
                        .map(Some)
                        .map_err(|_| format!("{i} is out of range"))
                } else {
                    Err(format!("{n} is not a whole number"))
                }
            }
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                s.parse::<i32>()
                    .map(Some)
                    .map_err(|_| format!("'{s}' is not a whole number"))
            }
            other => Err(format!("expected a whole number, got {other}")),
        }
    }
}

impl Coerce for Decimal {
    fn coerce(value: &Value) -> Result<Option<Self>, String> {
        match value {
            Value::Number(n) => parse_decimal(&n.to_string()).map(Some),
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                parse_decimal(s).map(Some)
            }
            other => Err(format!("expected a number, got {other}")),
        }
    }
}

impl Coerce for NaiveDate {
    fn coerce(value: &Value) -> Result<Option<Self>, String> {
        match value {
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map(Some)
                    .map_err(|_| format!("'{s}' is not a valid YYYY-MM-DD date"))
            }
            other => Err(format!("expected a YYYY-MM-DD date string, got {other}")),
        }
    }
}

impl Coerce for bool {
    fn coerce(value: &Value) -> Result<Option<Self>, String> {
        match value {
            Value::Bool(b) => Ok(Some(*b)),
            Value::Number(n) => Ok(Some(n.as_f64().unwrap_or(0.0) != 0.0)),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "" => Ok(None),
                "true" | "1" | "yes" => Ok(Some(true)),
                "false" | "0" | "no" => Ok(Some(false)),
                other => Err(format!("'{other}' cannot be interpreted as a boolean")),
            },
            other => Err(format!("{other} cannot be interpreted as a boolean")),
        }
    }
}

// Raw JSON documents (facilities, photo_urls) pass through untouched.
impl Coerce for Value {
    fn coerce(value: &Value) -> Result<Option<Self>, String> {
        Ok(Some(value.clone()))
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, String> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| format!("'{s}' is not a valid number"))
}

/// Tri-state partial-update field: the JSON source distinguishes
/// "key absent" (leave untouched) from "key null / empty" (clear) from
/// "key with value" (coerce and set).
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    #[default]
    Missing,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }

    /// Apply to a nullable column: `Null` clears it.
    pub fn apply(self, slot: &mut Option<T>) {
        match self {
            Patch::Missing => {}
            Patch::Null => *slot = None,
            Patch::Value(v) => *slot = Some(v),
        }
    }

    /// Apply to a required column: `Null` keeps the prior value, since a
    /// required field cannot be cleared.
    pub fn apply_required(self, slot: &mut T) {
        if let Patch::Value(v) = self {
            *slot = v;
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }
}

// Relies on `#[serde(default)]` at the field site: an absent key stays
// `Patch::Missing`, so deserialization only ever sees present keys.
impl<'de, T: Coerce> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(Patch::Null);
        }
        match T::coerce(&value).map_err(serde::de::Error::custom)? {
            Some(v) => Ok(Patch::Value(v)),
            None => Ok(Patch::Null),
        }
    }
}

/// Deserializer for create-payload fields: absent, null and empty string
/// all collapse to `None`; use with `#[serde(default, deserialize_with = "lenient")]`.
pub fn lenient<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Coerce,
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    T::coerce(&value).map_err(serde::de::Error::custom)
}
