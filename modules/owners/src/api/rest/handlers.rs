use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query},
    http::{StatusCode, Uri},
    Extension, Json,
};
use http_kit::{ProblemResponse, Redirect, View, ViewResponse};
use tracing::{error, info, warn};

use crate::api::rest::dto::{
    FindOwnersQuery, OwnerDto, OwnerFormDto, PetFormDto, PetTypeDto, VisitFormDto,
};
use crate::api::rest::error::{field_errors, map_json_rejection};
use crate::contract::model::{FindOwnersOutcome, Owner};
use crate::domain::error::DomainError;
use crate::domain::service::Service;

pub const OWNER_FORM_VIEW: &str = "owners/createOrUpdateOwnerForm";
pub const FIND_VIEW: &str = "owners/findOwners";
pub const LIST_VIEW: &str = "owners/ownersList";
pub const DETAILS_VIEW: &str = "owners/ownerDetails";
pub const PET_FORM_VIEW: &str = "pets/createOrUpdatePetForm";
pub const VISIT_FORM_VIEW: &str = "pets/createOrUpdateVisitForm";

pub const FIND_ERROR: &str = "An error occurred while finding owners.";
pub const SAVE_ERROR: &str = "An error occurred while saving the owner.";
pub const UPDATE_ERROR: &str = "An error occurred while updating the owner.";
pub const PET_SAVE_ERROR: &str = "An error occurred while saving the pet.";
pub const VISIT_SAVE_ERROR: &str = "An error occurred while saving the visit.";
pub const OWNER_NOT_FOUND: &str = "Owner not found.";

type FormResult = Result<ViewResponse, ProblemResponse>;

fn redirect_to_owner(id: i32) -> ViewResponse {
    Redirect::to(format!("owners/{id}")).into()
}

/// Details view carrying only an error message.
fn owner_error_view(status: StatusCode) -> View {
    View::new(DETAILS_VIEW)
        .with_status(status)
        .attr("error", OWNER_NOT_FOUND)
}

/// Status for a failed owner lookup that precedes a form.
fn lookup_failure(e: &DomainError) -> View {
    match e {
        DomainError::OwnerNotFound { .. } => owner_error_view(StatusCode::NOT_FOUND),
        _ => {
            error!(error = %e, "Owner lookup failed");
            owner_error_view(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Empty owner creation form
#[utoipa::path(
    get,
    path = "/owners/new",
    tag = "owners",
    responses((status = 200, description = "Owner form view", body = http_kit::ViewDocument))
)]
pub async fn init_creation_form() -> View {
    View::new(OWNER_FORM_VIEW).attr("owner", OwnerFormDto::default())
}

/// Validate and store a new owner, then redirect to its details
#[utoipa::path(
    post,
    path = "/owners/new",
    tag = "owners",
    request_body = OwnerFormDto,
    responses(
        (status = 303, description = "Owner created, redirect to details"),
        (status = 422, description = "Form re-rendered with field errors", body = http_kit::ViewDocument),
        (status = 500, description = "Form re-rendered with a save error", body = http_kit::ViewDocument),
        (status = 400, description = "Malformed body", body = http_kit::Problem)
    )
)]
pub async fn process_creation_form(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    body: Result<Json<OwnerFormDto>, JsonRejection>,
) -> FormResult {
    let Json(form) = body.map_err(|r| map_json_rejection(&r, uri.path()))?;
    info!("Creating owner: {:?}", form);

    match svc.create_owner(form.clone().into()).await {
        Ok(owner) => Ok(redirect_to_owner(owner.id)),
        Err(e @ DomainError::Validation { .. }) => Ok(View::new(OWNER_FORM_VIEW)
            .with_status(StatusCode::UNPROCESSABLE_ENTITY)
            .attr("owner", &form)
            .reject_fields(field_errors(&e))
            .into()),
        Err(e) => {
            error!("Failed to create owner: {}", e);
            Ok(View::new(OWNER_FORM_VIEW)
                .with_status(StatusCode::INTERNAL_SERVER_ERROR)
                .attr("owner", &form)
                .reject("saveError", SAVE_ERROR)
                .into())
        }
    }
}

/// Owner search form
#[utoipa::path(
    get,
    path = "/owners/find",
    tag = "owners",
    responses((status = 200, description = "Find form view", body = http_kit::ViewDocument))
)]
pub async fn init_find_form() -> View {
    View::new(FIND_VIEW).attr("owner", OwnerFormDto::default())
}

/// Search owners by last-name prefix
///
/// No match re-renders the find form with a `lastName` error. Exactly one match
/// redirects to that owner. Otherwise the requested page of matches is listed.
#[utoipa::path(
    get,
    path = "/owners",
    tag = "owners",
    params(FindOwnersQuery),
    responses(
        (status = 200, description = "Owners list or find form with errors", body = http_kit::ViewDocument),
        (status = 303, description = "Single match, redirect to details"),
        (status = 500, description = "Find form with a store error", body = http_kit::ViewDocument)
    )
)]
pub async fn process_find_form(
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<FindOwnersQuery>,
) -> ViewResponse {
    let page = query.page_number();
    info!(last_name = ?query.last_name, page, "Finding owners");

    let searched = OwnerFormDto {
        last_name: query.last_name.clone().unwrap_or_default(),
        ..Default::default()
    };

    let outcome = match svc.find_owners(query.last_name, page).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Failed to find owners: {}", e);
            return View::new(FIND_VIEW)
                .with_status(StatusCode::INTERNAL_SERVER_ERROR)
                .attr("owner", &searched)
                .reject("findError", FIND_ERROR)
                .into();
        }
    };

    match outcome {
        FindOwnersOutcome::NotFound { .. } => View::new(FIND_VIEW)
            .attr("owner", &searched)
            .reject_value("lastName", "notFound", "not found")
            .into(),
        FindOwnersOutcome::Redirect { owner_id } => redirect_to_owner(owner_id),
        FindOwnersOutcome::List {
            last_name,
            current_page,
            page,
        } => {
            let owners: Vec<OwnerDto> = page.content.into_iter().map(OwnerDto::from).collect();
            View::new(LIST_VIEW)
                .attr("lastName", last_name)
                .attr("currentPage", current_page)
                .attr("totalPages", page.total_pages)
                .attr("totalItems", page.total_elements)
                .attr("listOwners", owners)
                .into()
        }
    }
}

/// Owner details with pets and visits
#[utoipa::path(
    get,
    path = "/owners/{ownerId}",
    tag = "owners",
    params(("ownerId" = i32, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Owner details view", body = http_kit::ViewDocument),
        (status = 404, description = "Details view with an error", body = http_kit::ViewDocument),
        (status = 500, description = "Details view with an error", body = http_kit::ViewDocument)
    )
)]
pub async fn show_owner(Extension(svc): Extension<Arc<Service>>, Path(id): Path<i32>) -> View {
    info!("Showing owner {}", id);
    match svc.get_owner(id).await {
        Ok(owner) => View::new(DETAILS_VIEW).attr("owner", OwnerDto::from(owner)),
        Err(e) => {
            warn!("Failed to show owner {}: {}", id, e);
            lookup_failure(&e)
        }
    }
}

/// Owner update form prefilled with the stored values
#[utoipa::path(
    get,
    path = "/owners/{ownerId}/edit",
    tag = "owners",
    params(("ownerId" = i32, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Owner form view", body = http_kit::ViewDocument),
        (status = 404, description = "Details view with an error", body = http_kit::ViewDocument)
    )
)]
pub async fn init_update_form(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<i32>,
) -> View {
    match svc.get_owner(id).await {
        Ok(owner) => View::new(OWNER_FORM_VIEW)
            .attr("ownerId", owner.id)
            .attr("owner", OwnerFormDto::from(&owner)),
        Err(e) => lookup_failure(&e),
    }
}

/// Validate and store changes to an existing owner
///
/// The owner id comes from the path; an id in the body is ignored.
#[utoipa::path(
    post,
    path = "/owners/{ownerId}/edit",
    tag = "owners",
    params(("ownerId" = i32, Path, description = "Owner id")),
    request_body = OwnerFormDto,
    responses(
        (status = 303, description = "Owner updated, redirect to details"),
        (status = 404, description = "Details view with an error", body = http_kit::ViewDocument),
        (status = 422, description = "Form re-rendered with field errors", body = http_kit::ViewDocument),
        (status = 500, description = "Form re-rendered with an update error", body = http_kit::ViewDocument),
        (status = 400, description = "Malformed body", body = http_kit::Problem)
    )
)]
pub async fn process_update_form(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<i32>,
    body: Result<Json<OwnerFormDto>, JsonRejection>,
) -> FormResult {
    let Json(form) = body.map_err(|r| map_json_rejection(&r, uri.path()))?;
    info!("Updating owner {} with: {:?}", id, form);

    match svc.update_owner(id, form.clone().into()).await {
        Ok(owner) => Ok(redirect_to_owner(owner.id)),
        Err(e @ DomainError::Validation { .. }) => Ok(View::new(OWNER_FORM_VIEW)
            .with_status(StatusCode::UNPROCESSABLE_ENTITY)
            .attr("ownerId", id)
            .attr("owner", &form)
            .reject_fields(field_errors(&e))
            .into()),
        Err(e @ DomainError::OwnerNotFound { .. }) => Ok(lookup_failure(&e).into()),
        Err(e) => {
            error!("Failed to update owner {}: {}", id, e);
            Ok(View::new(OWNER_FORM_VIEW)
                .with_status(StatusCode::INTERNAL_SERVER_ERROR)
                .attr("ownerId", id)
                .attr("owner", &form)
                .reject("updateError", UPDATE_ERROR)
                .into())
        }
    }
}

async fn pet_form(svc: &Service, owner: &Owner, pet: &PetFormDto) -> View {
    let types: Vec<PetTypeDto> = match svc.pet_types().await {
        Ok(types) => types.into_iter().map(PetTypeDto::from).collect(),
        Err(e) => {
            error!("Failed to load pet types: {}", e);
            Vec::new()
        }
    };
    View::new(PET_FORM_VIEW)
        .attr("owner", OwnerDto::from(owner.clone()))
        .attr("pet", pet)
        .attr("types", types)
}

/// Empty pet form for an owner
#[utoipa::path(
    get,
    path = "/owners/{ownerId}/pets/new",
    tag = "pets",
    params(("ownerId" = i32, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Pet form view", body = http_kit::ViewDocument),
        (status = 404, description = "Details view with an error", body = http_kit::ViewDocument)
    )
)]
pub async fn init_new_pet_form(
    Extension(svc): Extension<Arc<Service>>,
    Path(owner_id): Path<i32>,
) -> View {
    match svc.get_owner(owner_id).await {
        Ok(owner) => pet_form(&svc, &owner, &PetFormDto::default()).await,
        Err(e) => lookup_failure(&e),
    }
}

/// Register a pet for an owner, then redirect to the owner's details
#[utoipa::path(
    post,
    path = "/owners/{ownerId}/pets/new",
    tag = "pets",
    params(("ownerId" = i32, Path, description = "Owner id")),
    request_body = PetFormDto,
    responses(
        (status = 303, description = "Pet added, redirect to owner details"),
        (status = 404, description = "Details view with an error", body = http_kit::ViewDocument),
        (status = 422, description = "Pet form re-rendered with field errors", body = http_kit::ViewDocument),
        (status = 500, description = "Pet form re-rendered with a save error", body = http_kit::ViewDocument),
        (status = 400, description = "Malformed body", body = http_kit::Problem)
    )
)]
pub async fn process_new_pet_form(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(owner_id): Path<i32>,
    body: Result<Json<PetFormDto>, JsonRejection>,
) -> FormResult {
    let Json(form) = body.map_err(|r| map_json_rejection(&r, uri.path()))?;
    info!("Adding pet to owner {}: {:?}", owner_id, form);

    let result = svc.add_pet(owner_id, form.clone().into()).await;
    let e = match result {
        Ok(pet) => {
            info!(pet_id = pet.id, "Pet added");
            return Ok(redirect_to_owner(owner_id));
        }
        Err(e @ DomainError::OwnerNotFound { .. }) => return Ok(lookup_failure(&e).into()),
        Err(e) => e,
    };

    // Re-render the form against the current owner state.
    let owner = match svc.get_owner(owner_id).await {
        Ok(owner) => owner,
        Err(lookup) => return Ok(lookup_failure(&lookup).into()),
    };
    let view = pet_form(&svc, &owner, &form).await;
    let view = match e {
        DomainError::Validation { .. } => view
            .with_status(StatusCode::UNPROCESSABLE_ENTITY)
            .reject_fields(field_errors(&e)),
        other => {
            error!("Failed to add pet for owner {}: {}", owner_id, other);
            view.with_status(StatusCode::INTERNAL_SERVER_ERROR)
                .reject("saveError", PET_SAVE_ERROR)
        }
    };
    Ok(view.into())
}

/// Record a visit for one of the owner's pets, then redirect to the owner's details
#[utoipa::path(
    post,
    path = "/owners/{ownerId}/pets/{petId}/visits/new",
    tag = "visits",
    params(
        ("ownerId" = i32, Path, description = "Owner id"),
        ("petId" = i32, Path, description = "Pet id")
    ),
    request_body = VisitFormDto,
    responses(
        (status = 303, description = "Visit added, redirect to owner details"),
        (status = 404, description = "Owner or pet not found", body = http_kit::ViewDocument),
        (status = 422, description = "Visit form re-rendered with field errors", body = http_kit::ViewDocument),
        (status = 500, description = "Visit form re-rendered with a save error", body = http_kit::ViewDocument),
        (status = 400, description = "Malformed body", body = http_kit::Problem)
    )
)]
pub async fn process_new_visit_form(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
    body: Result<Json<VisitFormDto>, JsonRejection>,
) -> FormResult {
    let Json(form) = body.map_err(|r| map_json_rejection(&r, uri.path()))?;
    info!("Adding visit for pet {} of owner {}: {:?}", pet_id, owner_id, form);

    let form_view = |status: StatusCode| {
        View::new(VISIT_FORM_VIEW)
            .with_status(status)
            .attr("ownerId", owner_id)
            .attr("petId", pet_id)
            .attr("visit", &form)
    };

    match svc.add_visit(owner_id, pet_id, form.clone().into()).await {
        Ok(visit) => {
            info!(visit_id = visit.id, "Visit added");
            Ok(redirect_to_owner(owner_id))
        }
        Err(e @ DomainError::OwnerNotFound { .. }) => Ok(lookup_failure(&e).into()),
        Err(DomainError::PetNotFound { .. }) => Ok(form_view(StatusCode::NOT_FOUND)
            .reject("petNotFound", "Pet not found.")
            .into()),
        Err(e @ DomainError::Validation { .. }) => Ok(form_view(StatusCode::UNPROCESSABLE_ENTITY)
            .reject_fields(field_errors(&e))
            .into()),
        Err(e) => {
            error!("Failed to add visit for pet {}: {}", pet_id, e);
            Ok(form_view(StatusCode::INTERNAL_SERVER_ERROR)
                .reject("saveError", VISIT_SAVE_ERROR)
                .into())
        }
    }
}
