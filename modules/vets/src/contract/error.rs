use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VetsError {
    #[error("Internal error")]
    Internal,
}

impl From<crate::domain::error::DomainError> for VetsError {
    fn from(_: crate::domain::error::DomainError) -> Self {
        Self::Internal
    }
}
