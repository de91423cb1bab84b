use async_trait::async_trait;
use page_core::Page;

use crate::contract::{error::VetsError, model::Vet};

/// Public API of the vets module for in-process consumers.
#[async_trait]
pub trait VetsApi: Send + Sync {
    /// `page` is 1-based.
    async fn list_vets_page(&self, page: u64) -> Result<Page<Vet>, VetsError>;

    async fn list_all_vets(&self) -> Result<Vec<Vet>, VetsError>;
}
