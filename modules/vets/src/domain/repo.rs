use async_trait::async_trait;
use page_core::{Page, PageRequest};

use crate::contract::model::Vet;

/// Read-only persistence port for the vet directory. Vets are ordered by id.
#[async_trait]
pub trait VetsRepository: Send + Sync {
    async fn list_page(&self, request: PageRequest) -> anyhow::Result<Page<Vet>>;

    async fn list_all(&self) -> anyhow::Result<Vec<Vet>>;
}
