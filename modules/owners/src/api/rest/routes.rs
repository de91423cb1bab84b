use std::sync::Arc;

use axum::{routing::get, routing::post, Extension, Router};
use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};
use crate::domain::service::Service;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::init_creation_form,
        handlers::process_creation_form,
        handlers::init_find_form,
        handlers::process_find_form,
        handlers::show_owner,
        handlers::init_update_form,
        handlers::process_update_form,
        handlers::init_new_pet_form,
        handlers::process_new_pet_form,
        handlers::process_new_visit_form,
    ),
    components(schemas(
        dto::OwnerDto,
        dto::PetDto,
        dto::VisitDto,
        dto::PetTypeDto,
        dto::OwnerFormDto,
        dto::PetFormDto,
        dto::VisitFormDto,
        http_kit::ViewDocument,
        http_kit::FieldError,
        http_kit::GlobalError,
        http_kit::Problem,
        http_kit::ValidationError,
    )),
    tags(
        (name = "owners", description = "Owner search and maintenance"),
        (name = "pets", description = "Pet registration"),
        (name = "visits", description = "Visit records")
    )
)]
pub struct OwnersApiDoc;

/// Merge the owners routes into `router`. The service is shared through an extension
/// layer scoped to these routes only.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let owners = Router::new()
        .route(
            "/owners/new",
            get(handlers::init_creation_form).post(handlers::process_creation_form),
        )
        .route("/owners/find", get(handlers::init_find_form))
        .route("/owners", get(handlers::process_find_form))
        .route("/owners/{ownerId}", get(handlers::show_owner))
        .route(
            "/owners/{ownerId}/edit",
            get(handlers::init_update_form).post(handlers::process_update_form),
        )
        .route(
            "/owners/{ownerId}/pets/new",
            get(handlers::init_new_pet_form).post(handlers::process_new_pet_form),
        )
        .route(
            "/owners/{ownerId}/pets/{petId}/visits/new",
            post(handlers::process_new_visit_form),
        )
        .layer(Extension(service));

    router.merge(owners)
}
