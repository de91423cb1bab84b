//! Integration-style tests for the owners module.
//!
//! Each test runs on a fresh in-memory SQLite database with migrations applied,
//! so the SeaORM adapter, the service, the local client and the REST routes are
//! all exercised against a real store.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

use owners::{
    contract::{
        client::OwnersApi,
        error::OwnersError,
        model::{FindOwnersOutcome, NewPet, NewVisit, OwnerDraft},
    },
    domain::{
        error::DomainError,
        service::{Service, ServiceConfig},
    },
    gateways::local::OwnersLocalClient,
    infra::storage::{migrations::Migrator, sea_orm_repo::SeaOrmOwnersRepository, seed},
};

async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// Service over a database loaded with the sample data set.
async fn create_seeded_service() -> Arc<Service> {
    let db = create_test_db().await;
    assert!(seed::seed_sample_data(&db).await.expect("seed failed"));
    Arc::new(Service::new(
        Arc::new(SeaOrmOwnersRepository::new(db)),
        ServiceConfig::default(),
    ))
}

async fn create_test_router() -> Router {
    let service = create_seeded_service().await;
    owners::api::rest::routes::register_routes(Router::new(), service)
}

fn draft(last_name: &str) -> OwnerDraft {
    OwnerDraft {
        id: None,
        first_name: "Jane".into(),
        last_name: last_name.into(),
        address: "12 Oak Rd.".into(),
        city: "Verona".into(),
        telephone: "6085550101".into(),
    }
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, header::HeaderMap, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, headers, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_migrations_are_idempotent() -> Result<()> {
    let db = create_test_db().await;
    Migrator::up(&db, None).await?;
    assert!(seed::seed_sample_data(&db).await?);
    assert!(!seed::seed_sample_data(&db).await?, "second seed must be a no-op");
    Ok(())
}

#[tokio::test]
async fn test_search_outcomes_on_sample_data() -> Result<()> {
    let service = create_seeded_service().await;

    match service.find_owners(Some("Davis".into()), 1).await? {
        FindOwnersOutcome::List { page, .. } => {
            let names: Vec<_> = page.content.iter().map(|o| o.first_name.as_str()).collect();
            assert_eq!(names, vec!["Betty", "Harold"]);
            assert_eq!(page.total_pages, 1);
        }
        other => panic!("expected list, got {other:?}"),
    }

    let outcome = service.find_owners(Some("Franklin".into()), 1).await?;
    assert_eq!(outcome.redirect_target().as_deref(), Some("owners/1"));

    match service.find_owners(None, 2).await? {
        FindOwnersOutcome::List {
            current_page, page, ..
        } => {
            assert_eq!(current_page, 2);
            assert_eq!(page.len(), 5);
            assert_eq!(page.total_elements, 10);
            assert_eq!(page.total_pages, 2);
            assert_eq!(page.content[0].id, 6);
        }
        other => panic!("expected list, got {other:?}"),
    }

    assert!(matches!(
        service.find_owners(None, 3).await?,
        FindOwnersOutcome::NotFound { .. }
    ));
    assert!(matches!(
        service.find_owners(Some("Zzz".into()), 1).await?,
        FindOwnersOutcome::NotFound { .. }
    ));
    Ok(())
}

#[tokio::test]
async fn test_like_wildcards_match_literally() -> Result<()> {
    let service = create_seeded_service().await;

    // "M_" would match "McTavish" as a raw LIKE pattern
    assert!(matches!(
        service.find_owners(Some("M_".into()), 1).await?,
        FindOwnersOutcome::NotFound { .. }
    ));

    let created = service.create_owner(draft("O_Brien")).await?;
    let outcome = service.find_owners(Some("O_".into()), 1).await?;
    assert_eq!(outcome.redirect_target(), Some(format!("owners/{}", created.id)));
    Ok(())
}

#[tokio::test]
async fn test_huge_page_is_not_found() -> Result<()> {
    let service = create_seeded_service().await;

    for page in [1u64 << 62, i64::MAX as u64, u64::MAX] {
        assert!(
            matches!(
                service.find_owners(None, page).await?,
                FindOwnersOutcome::NotFound { .. }
            ),
            "page {page} should be past the end"
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_rest_huge_page_rerenders_find_form() {
    let (status, _, doc) = send(
        create_test_router().await,
        get("/owners?lastName=Davis&page=4611686018427387904"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["view"], "owners/findOwners");
    assert_eq!(doc["fieldErrors"][0]["code"], "notFound");
}

#[tokio::test]
async fn test_owner_details_include_pets_and_visits() -> Result<()> {
    let service = create_seeded_service().await;

    let jean = service.get_owner(6).await?;
    assert_eq!(jean.last_name, "Coleman");
    let pets: Vec<_> = jean.pets.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(pets, vec!["Max", "Samantha"]);

    let max = &jean.pets[0];
    assert_eq!(max.pet_type, "cat");
    let visits: Vec<_> = max.visits.iter().map(|v| v.description.as_str()).collect();
    assert_eq!(visits, vec!["rabies shot", "neutered"]);

    assert!(matches!(
        service.get_owner(999).await,
        Err(DomainError::OwnerNotFound { id: 999 })
    ));
    Ok(())
}

#[tokio::test]
async fn test_create_and_update_owner() -> Result<()> {
    let service = create_seeded_service().await;

    let created = service.create_owner(draft("Newman")).await?;
    assert_eq!(created.id, 11);
    assert!(created.pets.is_empty());

    let mut changed = draft("Newman");
    changed.city = "Fitchburg".into();
    let updated = service.update_owner(created.id, changed).await?;
    assert_eq!(updated.id, created.id);
    assert_eq!(service.get_owner(created.id).await?.city, "Fitchburg");

    let invalid = service.create_owner(draft("")).await;
    assert!(matches!(invalid, Err(DomainError::Validation { .. })));
    Ok(())
}

#[tokio::test]
async fn test_pets_and_visits() -> Result<()> {
    let service = create_seeded_service().await;

    let born = NaiveDate::from_ymd_opt(2020, 5, 1).unwrap();
    let pet = service
        .add_pet(
            1,
            NewPet {
                name: "Milo".into(),
                birth_date: Some(born),
                pet_type: "Dog".into(),
            },
        )
        .await?;
    assert_eq!(pet.pet_type, "dog");

    let duplicate = service
        .add_pet(
            1,
            NewPet {
                name: "milo".into(),
                birth_date: Some(born),
                pet_type: "dog".into(),
            },
        )
        .await;
    let err = duplicate.unwrap_err();
    assert_eq!(err.violations()[0].code, "duplicate");

    let visit = service
        .add_visit(
            1,
            pet.id,
            NewVisit {
                date: None,
                description: "checkup".into(),
            },
        )
        .await?;
    assert_eq!(visit.date, Utc::now().date_naive());

    // Leo (pet 1) belongs to owner 1, not owner 2
    let wrong_owner = service
        .add_visit(
            2,
            1,
            NewVisit {
                date: None,
                description: "checkup".into(),
            },
        )
        .await;
    assert!(matches!(
        wrong_owner,
        Err(DomainError::PetNotFound {
            owner_id: 2,
            pet_id: 1
        })
    ));

    let george = service.get_owner(1).await?;
    let names: Vec<_> = george.pets.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Leo", "Milo"]);
    assert_eq!(george.pets[1].visits.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_local_client() -> Result<()> {
    let client: Arc<dyn OwnersApi> = Arc::new(OwnersLocalClient::new(create_seeded_service().await));

    let types = client.pet_types().await?;
    assert_eq!(types.len(), 6);

    let outcome = client.find_owners(Some("Escobito".into()), 1).await?;
    assert_eq!(outcome.redirect_target().as_deref(), Some("owners/8"));

    assert_eq!(client.get_owner(404).await, Err(OwnersError::NotFound { id: 404 }));

    let err = client.create_owner(draft("")).await.unwrap_err();
    match err {
        OwnersError::Validation { message } => assert!(message.contains("lastName")),
        other => panic!("expected validation error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_rest_find_redirects_on_single_match() {
    let (status, headers, body) = send(
        create_test_router().await,
        get("/owners?lastName=Franklin"),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/owners/1");
    assert_eq!(body["redirect"], "owners/1");
}

#[tokio::test]
async fn test_rest_find_lists_matches() {
    let (status, _, body) = send(create_test_router().await, get("/owners?lastName=Davis")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "owners/ownersList");
    assert_eq!(body["model"]["currentPage"], 1);
    assert_eq!(body["model"]["totalPages"], 1);
    assert_eq!(body["model"]["totalItems"], 2);
    assert_eq!(body["model"]["listOwners"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_rest_find_without_filter_clamps_page() {
    let (status, _, body) = send(create_test_router().await, get("/owners?page=-4")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"]["currentPage"], 1);
    assert_eq!(body["model"]["totalItems"], 10);
    assert_eq!(body["model"]["totalPages"], 2);
}

#[tokio::test]
async fn test_rest_find_not_found_rerenders_form() {
    let (status, _, body) = send(create_test_router().await, get("/owners?lastName=Zzz")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "owners/findOwners");
    assert_eq!(body["model"]["owner"]["lastName"], "Zzz");
    assert_eq!(
        body["fieldErrors"],
        json!([{ "field": "lastName", "code": "notFound", "message": "not found" }])
    );
}

#[tokio::test]
async fn test_rest_forms_render() {
    let router = create_test_router().await;
    let (_, _, body) = send(router.clone(), get("/owners/find")).await;
    assert_eq!(body["view"], "owners/findOwners");

    let (_, _, body) = send(router.clone(), get("/owners/new")).await;
    assert_eq!(body["view"], "owners/createOrUpdateOwnerForm");
    assert_eq!(body["model"]["owner"]["lastName"], "");

    let (_, _, body) = send(router.clone(), get("/owners/3/edit")).await;
    assert_eq!(body["model"]["owner"]["lastName"], "Rodriquez");
    assert_eq!(body["model"]["ownerId"], 3);

    let (_, _, body) = send(router, get("/owners/3/pets/new")).await;
    assert_eq!(body["view"], "pets/createOrUpdatePetForm");
    assert_eq!(body["model"]["types"].as_array().map(Vec::len), Some(6));
}

#[tokio::test]
async fn test_rest_owner_details() {
    let router = create_test_router().await;

    let (status, _, body) = send(router.clone(), get("/owners/6")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "owners/ownerDetails");
    assert_eq!(body["model"]["owner"]["pets"][0]["type"], "cat");

    let (status, _, body) = send(router, get("/owners/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["model"]["error"], "Owner not found.");
}

#[tokio::test]
async fn test_rest_create_owner() {
    let router = create_test_router().await;

    let form = json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "address": "1 Analytical Way",
        "city": "London",
        "telephone": "0123456789"
    });
    let (status, headers, _) = send(router.clone(), post_json("/owners/new", &form)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/owners/11");

    let bad = json!({ "firstName": "Ada", "telephone": "12" });
    let (status, _, body) = send(router, post_json("/owners/new", &bad)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["view"], "owners/createOrUpdateOwnerForm");
    let fields: Vec<_> = body["fieldErrors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["lastName", "address", "city", "telephone"]);
}

#[tokio::test]
async fn test_rest_update_ignores_submitted_id() {
    let router = create_test_router().await;

    let form = json!({
        "id": 7,
        "firstName": "Maria",
        "lastName": "Escobito",
        "address": "346 Maple St.",
        "city": "Madison",
        "telephone": "6085557683"
    });
    let (status, headers, _) = send(router.clone(), post_json("/owners/8/edit", &form)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/owners/8");

    let (_, _, body) = send(router.clone(), get("/owners/8")).await;
    assert_eq!(body["model"]["owner"]["address"], "346 Maple St.");
    let (_, _, body) = send(router.clone(), get("/owners/7")).await;
    assert_eq!(body["model"]["owner"]["lastName"], "Black");

    let (status, _, _) = send(router, post_json("/owners/999/edit", &form)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rest_malformed_body_is_a_problem() {
    let request = Request::builder()
        .method("POST")
        .uri("/owners/new")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, headers, body) = send(create_test_router().await, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers[header::CONTENT_TYPE], "application/problem+json");
    assert_eq!(body["code"], "OWNERS_BAD_REQUEST");
    assert_eq!(body["instance"], "/owners/new");
}

#[tokio::test]
async fn test_rest_add_pet_and_visit() {
    let router = create_test_router().await;

    let pet = json!({ "name": "Rex", "birthDate": "2021-02-03", "type": "dog" });
    let (status, headers, _) = send(router.clone(), post_json("/owners/2/pets/new", &pet)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/owners/2");

    let future = json!({ "name": "Tomorrow", "birthDate": "2999-01-01", "type": "cat" });
    let (status, _, body) = send(router.clone(), post_json("/owners/2/pets/new", &future)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fieldErrors"][0]["field"], "birthDate");

    let visit = json!({ "date": "2024-03-01", "description": "annual shots" });
    let (status, _, _) = send(
        router.clone(),
        post_json("/owners/2/pets/2/visits/new", &visit),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (status, _, body) = send(
        router.clone(),
        post_json("/owners/2/pets/2/visits/new", &json!({ "description": " " })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["view"], "pets/createOrUpdateVisitForm");

    let (_, _, body) = send(router, get("/owners/2")).await;
    let pets = body["model"]["owner"]["pets"].as_array().unwrap();
    assert_eq!(pets.len(), 2);
    assert_eq!(pets[0]["name"], "Basil");
    assert_eq!(pets[0]["visits"][0]["description"], "annual shots");
    assert_eq!(pets[1]["name"], "Rex");
}
