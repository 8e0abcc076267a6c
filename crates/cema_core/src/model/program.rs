//! Health program domain model.
//!
//! # Responsibility
//! - Define the canonical program record referenced by client enrollments.
//!
//! # Invariants
//! - `id` is stable; enrollment links hold this id, never a copy of the
//!   program record.
//! - `created_at` is set once at creation and never mutated.

use super::rfc3339_millis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a health program.
pub type ProgramId = String;

/// Canonical health program record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: ProgramId,
    /// Display name. Minimum length enforced at the boundary.
    pub name: String,
    /// Free-text summary. Minimum length enforced at the boundary.
    pub description: String,
    /// Set once at creation, never mutated.
    #[serde(with = "rfc3339_millis")]
    pub created_at: DateTime<Utc>,
}

impl Program {
    /// Creates a program with a generated id and the current timestamp.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, description, Utc::now())
    }

    /// Creates a program with a caller-provided id and timestamp.
    pub fn with_id(
        id: impl Into<ProgramId>,
        name: impl Into<String>,
        description: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            created_at,
        }
    }
}
