use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OwnersError {
    #[error("Owner not found: {id}")]
    NotFound { id: i32 },

    #[error("Pet {pet_id} not found for owner {owner_id}")]
    PetNotFound { owner_id: i32, pet_id: i32 },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl OwnersError {
    pub fn not_found(id: i32) -> Self {
        Self::NotFound { id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for OwnersError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            OwnerNotFound { id } => Self::not_found(id),
            PetNotFound { owner_id, pet_id } => Self::PetNotFound { owner_id, pet_id },
            Validation { violations } => Self::validation(
                violations
                    .iter()
                    .map(|v| format!("{}: {}", v.field, v.message))
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            Paging(_) | Database { .. } => Self::internal(),
        }
    }
}
