use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use page_core::PageRequest;
use tracing::{debug, error, info, instrument};

use crate::contract::model::{
    FindOwnersOutcome, NewPet, NewVisit, Owner, OwnerDraft, Pet, PetType, Visit,
};
use crate::domain::error::DomainError;
use crate::domain::repo::OwnersRepository;
use crate::domain::validation;

/// Domain service for owners, their pets and visits.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn OwnersRepository>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub page_size: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { page_size: 5 }
    }
}

impl Service {
    pub fn new(repo: Arc<dyn OwnersRepository>, config: ServiceConfig) -> Self {
        let config = ServiceConfig {
            page_size: config.page_size.max(1),
        };
        Self { repo, config }
    }

    pub fn page_size(&self) -> u64 {
        self.config.page_size
    }

    #[instrument(name = "owners.service.get_owner", skip(self), fields(owner_id = id))]
    pub async fn get_owner(&self, id: i32) -> Result<Owner, DomainError> {
        debug!("Getting owner by id");
        let owner = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::owner_not_found(id))?;
        debug!(pets = owner.pets.len(), "Successfully retrieved owner");
        Ok(owner)
    }

    /// Last-name prefix search. `page` is 1-based; callers clamp it to at least 1.
    ///
    /// An empty page means not found, even when earlier pages have matches. A redirect
    /// needs both a single row on the page and a single match overall.
    #[instrument(
        name = "owners.service.find_owners",
        skip(self, last_name),
        fields(last_name = last_name.as_deref().unwrap_or(""), page = page)
    )]
    pub async fn find_owners(
        &self,
        last_name: Option<String>,
        page: u64,
    ) -> Result<FindOwnersOutcome, DomainError> {
        let last_name = last_name.unwrap_or_default();
        let request = PageRequest::of(page.saturating_sub(1), self.config.page_size)?;

        let result = self
            .repo
            .find_by_last_name_starting_with(&last_name, request)
            .await
            .map_err(|e| {
                error!(error = %e, "Owner search failed");
                DomainError::database(e.to_string())
            })?;

        if result.is_empty() {
            debug!(total = result.total_elements, "No owners on requested page");
            return Ok(FindOwnersOutcome::NotFound { last_name });
        }

        if let [only] = result.content.as_slice() {
            if result.total_elements == 1 {
                debug!(owner_id = only.id, "Single match, redirecting");
                return Ok(FindOwnersOutcome::Redirect { owner_id: only.id });
            }
        }

        debug!(
            total = result.total_elements,
            pages = result.total_pages,
            "Listing owners"
        );
        Ok(FindOwnersOutcome::List {
            last_name,
            current_page: page.max(1),
            page: result,
        })
    }

    #[instrument(
        name = "owners.service.create_owner",
        skip(self, draft),
        fields(last_name = %draft.last_name)
    )]
    pub async fn create_owner(&self, draft: OwnerDraft) -> Result<Owner, DomainError> {
        info!("Creating new owner");
        Self::check(validation::validate_owner(&draft))?;

        let draft = OwnerDraft { id: None, ..draft };
        let owner = self
            .repo
            .save(draft)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Successfully created owner with id={}", owner.id);
        Ok(owner)
    }

    /// The path identifier wins over any id carried by the draft.
    #[instrument(name = "owners.service.update_owner", skip(self, draft), fields(owner_id = id))]
    pub async fn update_owner(&self, id: i32, draft: OwnerDraft) -> Result<Owner, DomainError> {
        info!("Updating owner");
        Self::check(validation::validate_owner(&draft))?;

        let current = self.get_owner(id).await?;
        let draft = OwnerDraft {
            id: Some(current.id),
            ..draft
        };
        let owner = self
            .repo
            .save(draft)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Successfully updated owner");
        Ok(owner)
    }

    #[instrument(name = "owners.service.pet_types", skip(self))]
    pub async fn pet_types(&self) -> Result<Vec<PetType>, DomainError> {
        self.repo
            .pet_types()
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    #[instrument(
        name = "owners.service.add_pet",
        skip(self, pet),
        fields(owner_id = owner_id, pet_name = %pet.name)
    )]
    pub async fn add_pet(&self, owner_id: i32, pet: NewPet) -> Result<Pet, DomainError> {
        info!("Adding pet");
        let owner = self.get_owner(owner_id).await?;
        let types = self.pet_types().await?;
        Self::check(validation::validate_new_pet(
            &pet,
            &owner.pets,
            &types,
            today(),
        ))?;

        let wanted = pet.pet_type.trim();
        let (Some(pet_type), Some(birth_date)) = (
            types.iter().find(|t| t.name.eq_ignore_ascii_case(wanted)),
            pet.birth_date,
        ) else {
            // validate_new_pet already rejected both cases
            return Err(DomainError::validation(Vec::new()));
        };

        let created = self
            .repo
            .insert_pet(owner.id, pet.name.trim(), birth_date, pet_type.id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!(pet_id = created.id, "Successfully added pet");
        Ok(created)
    }

    #[instrument(
        name = "owners.service.add_visit",
        skip(self, visit),
        fields(owner_id = owner_id, pet_id = pet_id)
    )]
    pub async fn add_visit(
        &self,
        owner_id: i32,
        pet_id: i32,
        visit: NewVisit,
    ) -> Result<Visit, DomainError> {
        info!("Adding visit");
        let owner = self.get_owner(owner_id).await?;
        if !owner.pets.iter().any(|p| p.id == pet_id) {
            return Err(DomainError::pet_not_found(owner_id, pet_id));
        }
        Self::check(validation::validate_new_visit(&visit))?;

        let date = visit.date.unwrap_or_else(today);
        let created = self
            .repo
            .insert_visit(pet_id, date, visit.description.trim())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!(visit_id = created.id, "Successfully added visit");
        Ok(created)
    }

    fn check(violations: Vec<validation::FieldViolation>) -> Result<(), DomainError> {
        if violations.is_empty() {
            Ok(())
        } else {
            debug!(count = violations.len(), "Validation rejected input");
            Err(DomainError::validation(violations))
        }
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
