use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};
use crate::domain::service::Service;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::show_vet_list, handlers::show_resources_vet_list),
    components(schemas(dto::VetDto, dto::VetsDto, dto::SpecialtyDto)),
    tags((name = "vets", description = "Veterinarian directory"))
)]
pub struct VetsApiDoc;

pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let vets = Router::new()
        .route("/vets", get(handlers::show_vet_list))
        .route("/vets.json", get(handlers::show_resources_vet_list))
        .layer(Extension(service));
    router.merge(vets)
}
