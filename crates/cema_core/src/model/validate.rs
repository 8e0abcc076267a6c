//! Boundary validation for form-level input.
//!
//! # Responsibility
//! - Validate user-supplied fields before a record reaches the store.
//! - Build validated `Client`/`Program` records with generated identity.
//!
//! # Invariants
//! - The store itself never validates; every caller that accepts free
//!   input goes through a draft here first.
//! - Length rules count characters, not bytes.

use super::client::{Client, Gender};
use super::program::Program;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_AGE: u8 = 1;
pub const MAX_AGE: u8 = 120;
pub const MIN_CONTACT_CHARS: usize = 5;
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// Validation failure for a single draft field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NameTooShort { min: usize },
    AgeOutOfRange { age: u8 },
    ContactTooShort { min: usize },
    DescriptionTooShort { min: usize },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameTooShort { min } => {
                write!(f, "name must be at least {min} characters")
            }
            Self::AgeOutOfRange { age } => {
                write!(f, "age {age} is outside the range {MIN_AGE}..={MAX_AGE}")
            }
            Self::ContactTooShort { min } => {
                write!(f, "contact information must be at least {min} characters")
            }
            Self::DescriptionTooShort { min } => {
                write!(f, "description must be at least {min} characters")
            }
        }
    }
}

impl Error for ValidationError {}

/// Unvalidated client registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDraft {
    pub full_name: String,
    pub gender: Gender,
    pub age: u8,
    pub contact_info: String,
}

impl ClientDraft {
    /// Checks every field rule without building a record.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.full_name.trim().chars().count() < MIN_NAME_CHARS {
            return Err(ValidationError::NameTooShort {
                min: MIN_NAME_CHARS,
            });
        }
        if self.age < MIN_AGE || self.age > MAX_AGE {
            return Err(ValidationError::AgeOutOfRange { age: self.age });
        }
        if self.contact_info.trim().chars().count() < MIN_CONTACT_CHARS {
            return Err(ValidationError::ContactTooShort {
                min: MIN_CONTACT_CHARS,
            });
        }
        Ok(())
    }

    /// Validates and builds a client with generated id and timestamp.
    pub fn build(self) -> Result<Client, ValidationError> {
        self.validate()?;
        Ok(Client::new(
            self.full_name,
            self.gender,
            self.age,
            self.contact_info,
        ))
    }
}

/// Unvalidated program creation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramDraft {
    pub name: String,
    pub description: String,
}

impl ProgramDraft {
    /// Checks every field rule without building a record.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().chars().count() < MIN_NAME_CHARS {
            return Err(ValidationError::NameTooShort {
                min: MIN_NAME_CHARS,
            });
        }
        if self.description.trim().chars().count() < MIN_DESCRIPTION_CHARS {
            return Err(ValidationError::DescriptionTooShort {
                min: MIN_DESCRIPTION_CHARS,
            });
        }
        Ok(())
    }

    /// Validates and builds a program with generated id and timestamp.
    pub fn build(self) -> Result<Program, ValidationError> {
        self.validate()?;
        Ok(Program::new(self.name, self.description))
    }
}
