//! Domain model for client and program records.
//!
//! # Responsibility
//! - Define the canonical entity shapes the records store persists.
//! - Provide boundary validation for form-level input.
//!
//! # Invariants
//! - `id` and `created_at` are assigned at creation and never mutated.
//! - Serialized field names and timestamp format match the persisted
//!   mirror shape exactly (camelCase keys, RFC 3339 with milliseconds).

pub mod client;
pub mod program;
pub mod validate;

/// Serde adapter pinning `created_at` to RFC 3339 with exactly three
/// fractional digits (`2023-04-05T09:20:00.000Z`), the shape the mirror
/// has always stored. Reading accepts any valid RFC 3339 offset.
pub(crate) mod rfc3339_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
