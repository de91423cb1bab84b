use async_trait::async_trait;

use crate::contract::{
    error::OwnersError,
    model::{FindOwnersOutcome, NewPet, NewVisit, Owner, OwnerDraft, Pet, PetType, Visit},
};

/// Public API of the owners module for in-process consumers.
#[async_trait]
pub trait OwnersApi: Send + Sync {
    async fn get_owner(&self, id: i32) -> Result<Owner, OwnersError>;

    /// Last-name prefix search; `page` is 1-based.
    async fn find_owners(
        &self,
        last_name: Option<String>,
        page: u64,
    ) -> Result<FindOwnersOutcome, OwnersError>;

    async fn create_owner(&self, draft: OwnerDraft) -> Result<Owner, OwnersError>;

    async fn update_owner(&self, id: i32, draft: OwnerDraft) -> Result<Owner, OwnersError>;

    async fn pet_types(&self) -> Result<Vec<PetType>, OwnersError>;

    async fn add_pet(&self, owner_id: i32, pet: NewPet) -> Result<Pet, OwnersError>;

    async fn add_visit(
        &self,
        owner_id: i32,
        pet_id: i32,
        visit: NewVisit,
    ) -> Result<Visit, OwnersError>;
}
