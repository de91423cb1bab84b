use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid page request: {0}")]
    Paging(#[from] page_core::PageError),

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
