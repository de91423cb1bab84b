use std::sync::Arc;

use page_core::{Page, PageRequest};
use tracing::{debug, instrument};

use crate::contract::model::Vet;
use crate::domain::error::DomainError;
use crate::domain::repo::VetsRepository;

#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn VetsRepository>,
    page_size: u64,
}

impl Service {
    pub fn new(repo: Arc<dyn VetsRepository>, page_size: u64) -> Self {
        Self {
            repo,
            page_size: page_size.max(1),
        }
    }

    /// `page` is 1-based; 0 is read as 1.
    #[instrument(name = "vets.service.list_vets_page", skip(self))]
    pub async fn list_vets_page(&self, page: u64) -> Result<Page<Vet>, DomainError> {
        let request = PageRequest::of(page.saturating_sub(1), self.page_size)?;
        let result = self
            .repo
            .list_page(request)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        debug!(
            count = result.len(),
            total = result.total_elements,
            "Listed vets page"
        );
        Ok(result)
    }

    #[instrument(name = "vets.service.list_all_vets", skip(self))]
    pub async fn list_all_vets(&self) -> Result<Vec<Vet>, DomainError> {
        let vets = self
            .repo
            .list_all()
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        debug!(count = vets.len(), "Listed all vets");
        Ok(vets)
    }
}
