use thiserror::Error;

use crate::domain::validation::FieldViolation;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Owner not found: {id}")]
    OwnerNotFound { id: i32 },

    #[error("Pet {pet_id} not found for owner {owner_id}")]
    PetNotFound { owner_id: i32, pet_id: i32 },

    #[error("Validation failed: {} field(s) rejected", violations.len())]
    Validation { violations: Vec<FieldViolation> },

    #[error("Invalid page request: {0}")]
    Paging(#[from] page_core::PageError),

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn owner_not_found(id: i32) -> Self {
        Self::OwnerNotFound { id }
    }

    pub fn pet_not_found(owner_id: i32, pet_id: i32) -> Self {
        Self::PetNotFound { owner_id, pet_id }
    }

    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::Validation { violations }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Field violations carried by a validation failure; empty for every other kind.
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::Validation { violations } => violations,
            _ => &[],
        }
    }
}
