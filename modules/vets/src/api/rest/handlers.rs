use std::sync::Arc;

use axum::{
    extract::Query,
    http::{StatusCode, Uri},
    Extension, Json,
};
use http_kit::problem::from_parts;
use http_kit::{ProblemResponse, View};
use tracing::{error, info};

use crate::api::rest::dto::{VetDto, VetsDto, VetsPageQuery};
use crate::domain::service::Service;

pub const LIST_VIEW: &str = "vets/vetList";

/// Paginated vet list
#[utoipa::path(
    get,
    path = "/vets",
    tag = "vets",
    params(VetsPageQuery),
    responses(
        (status = 200, description = "Vet list view", body = http_kit::ViewDocument),
        (status = 500, description = "Vet list view with a store error", body = http_kit::ViewDocument)
    )
)]
pub async fn show_vet_list(
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<VetsPageQuery>,
) -> View {
    let page = query.page_number();
    info!(page, "Listing vets");

    match svc.list_vets_page(page).await {
        Ok(result) => {
            let vets: Vec<VetDto> = result.content.into_iter().map(VetDto::from).collect();
            View::new(LIST_VIEW)
                .attr("currentPage", page)
                .attr("totalPages", result.total_pages)
                .attr("totalItems", result.total_elements)
                .attr("listVets", vets)
        }
        Err(e) => {
            error!("Failed to list vets: {}", e);
            View::new(LIST_VIEW)
                .with_status(StatusCode::INTERNAL_SERVER_ERROR)
                .reject("listError", "An error occurred while listing vets.")
        }
    }
}

/// Whole vet directory as JSON
#[utoipa::path(
    get,
    path = "/vets.json",
    tag = "vets",
    responses(
        (status = 200, description = "All vets", body = VetsDto),
        (status = 500, description = "Internal Server Error", body = http_kit::Problem)
    )
)]
pub async fn show_resources_vet_list(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<VetsDto>, ProblemResponse> {
    match svc.list_all_vets().await {
        Ok(vets) => Ok(Json(VetsDto {
            vet_list: vets.into_iter().map(VetDto::from).collect(),
        })),
        Err(e) => {
            error!("Failed to list vets: {}", e);
            Err(from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "VETS_INTERNAL_DB",
                "Internal error",
                "An internal database error occurred",
                uri.path(),
            ))
        }
    }
}
