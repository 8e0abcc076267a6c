//! Client domain model.
//!
//! # Responsibility
//! - Define the canonical client record and its enrollment helpers.
//!
//! # Invariants
//! - `id` is stable and never reused for another client.
//! - `created_at` is set once at creation and never mutated.
//! - `enrolled_programs` holds no duplicate program ids.

use super::program::ProgramId;
use super::rfc3339_millis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a client record.
///
/// Kept as an opaque string so caller-assigned ids and the persisted
/// mirror shape stay byte-compatible.
pub type ClientId = String;

/// Self-reported gender captured at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Canonical client record.
///
/// The store treats this as a whole-record value: updates replace every
/// field, including the enrollment list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Stable global ID used for lookup, enrollment links and auditing.
    pub id: ClientId,
    /// Display name. Non-empty; minimum length enforced at the boundary.
    pub full_name: String,
    pub gender: Gender,
    /// Domain range [1,120], enforced at the boundary.
    pub age: u8,
    /// Phone or email, free text.
    pub contact_info: String,
    /// Program ids this client is enrolled in. Insertion order carries
    /// no meaning; membership drives enrollment display.
    pub enrolled_programs: Vec<ProgramId>,
    /// Set once at creation, never mutated.
    #[serde(with = "rfc3339_millis")]
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Creates a client with a generated id and the current timestamp.
    pub fn new(
        full_name: impl Into<String>,
        gender: Gender,
        age: u8,
        contact_info: impl Into<String>,
    ) -> Self {
        Self::with_id(
            Uuid::new_v4().to_string(),
            full_name,
            gender,
            age,
            contact_info,
            Vec::new(),
            Utc::now(),
        )
    }

    /// Creates a client with a caller-provided id and timestamp.
    ///
    /// Used by seed data and tests where identity already exists.
    pub fn with_id(
        id: impl Into<ClientId>,
        full_name: impl Into<String>,
        gender: Gender,
        age: u8,
        contact_info: impl Into<String>,
        enrolled_programs: Vec<ProgramId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            gender,
            age,
            contact_info: contact_info.into(),
            enrolled_programs,
            created_at,
        }
    }

    /// Returns whether this client is enrolled in the given program.
    pub fn is_enrolled(&self, program_id: &str) -> bool {
        self.enrolled_programs.iter().any(|id| id == program_id)
    }

    /// Adds a program id to the enrollment list, ignoring duplicates.
    pub fn enroll(&mut self, program_id: impl Into<ProgramId>) {
        let program_id = program_id.into();
        if !self.is_enrolled(&program_id) {
            self.enrolled_programs.push(program_id);
        }
    }

    /// Removes a program id from the enrollment list. No-op if absent.
    pub fn unenroll(&mut self, program_id: &str) {
        self.enrolled_programs.retain(|id| id != program_id);
    }
}
