use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::OwnersApi,
    error::OwnersError,
    model::{FindOwnersOutcome, NewPet, NewVisit, Owner, OwnerDraft, Pet, PetType, Visit},
};
use crate::domain::service::Service;

/// Local implementation of the OwnersApi trait that delegates to the domain service
pub struct OwnersLocalClient {
    service: Arc<Service>,
}

impl OwnersLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl OwnersApi for OwnersLocalClient {
    async fn get_owner(&self, id: i32) -> Result<Owner, OwnersError> {
        self.service.get_owner(id).await.map_err(Into::into)
    }

    async fn find_owners(
        &self,
        last_name: Option<String>,
        page: u64,
    ) -> Result<FindOwnersOutcome, OwnersError> {
        self.service
            .find_owners(last_name, page)
            .await
            .map_err(Into::into)
    }

    async fn create_owner(&self, draft: OwnerDraft) -> Result<Owner, OwnersError> {
        self.service.create_owner(draft).await.map_err(Into::into)
    }

    async fn update_owner(&self, id: i32, draft: OwnerDraft) -> Result<Owner, OwnersError> {
        self.service
            .update_owner(id, draft)
            .await
            .map_err(Into::into)
    }

    async fn pet_types(&self) -> Result<Vec<PetType>, OwnersError> {
        self.service.pet_types().await.map_err(Into::into)
    }

    async fn add_pet(&self, owner_id: i32, pet: NewPet) -> Result<Pet, OwnersError> {
        self.service.add_pet(owner_id, pet).await.map_err(Into::into)
    }

    async fn add_visit(
        &self,
        owner_id: i32,
        pet_id: i32,
        visit: NewVisit,
    ) -> Result<Visit, OwnersError> {
        self.service
            .add_visit(owner_id, pet_id, visit)
            .await
            .map_err(Into::into)
    }
}
