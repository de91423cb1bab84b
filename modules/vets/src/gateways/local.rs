use async_trait::async_trait;
use page_core::Page;
use std::sync::Arc;

use crate::contract::{client::VetsApi, error::VetsError, model::Vet};
use crate::domain::service::Service;

/// Local implementation of the VetsApi trait that delegates to the domain service
pub struct VetsLocalClient {
    service: Arc<Service>,
}

impl VetsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl VetsApi for VetsLocalClient {
    async fn list_vets_page(&self, page: u64) -> Result<Page<Vet>, VetsError> {
        self.service.list_vets_page(page).await.map_err(Into::into)
    }

    async fn list_all_vets(&self) -> Result<Vec<Vet>, VetsError> {
        self.service.list_all_vets().await.map_err(Into::into)
    }
}
