use async_trait::async_trait;
use chrono::NaiveDate;
use page_core::{Page, PageRequest};

use crate::contract::model::{Owner, OwnerDraft, Pet, PetType, Visit};

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait OwnersRepository: Send + Sync {
    /// Load an owner with its pets and their visits.
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Owner>>;

    /// Insert when `draft.id` is absent, otherwise update by primary key.
    /// Returns the stored owner with its identifier set.
    async fn save(&self, draft: OwnerDraft) -> anyhow::Result<Owner>;

    /// Owners whose last name starts with `prefix`, ordered by id.
    /// An empty prefix matches every owner.
    async fn find_by_last_name_starting_with(
        &self,
        prefix: &str,
        request: PageRequest,
    ) -> anyhow::Result<Page<Owner>>;

    /// All pet types ordered by name.
    async fn pet_types(&self) -> anyhow::Result<Vec<PetType>>;

    async fn insert_pet(
        &self,
        owner_id: i32,
        name: &str,
        birth_date: NaiveDate,
        type_id: i32,
    ) -> anyhow::Result<Pet>;

    async fn insert_visit(
        &self,
        pet_id: i32,
        date: NaiveDate,
        description: &str,
    ) -> anyhow::Result<Visit>;
}
