//! Owner search flow against an in-memory repository: the three outcomes,
//! page bounds and store failures.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use owners::contract::model::{FindOwnersOutcome, Owner, OwnerDraft, Pet, PetType, Visit};
use owners::domain::error::DomainError;
use owners::domain::repo::OwnersRepository;
use owners::domain::service::{Service, ServiceConfig};
use page_core::{Page, PageRequest};
use serde_json::{json, Value};
use tower::ServiceExt;
use tracing_test::traced_test;

#[derive(Default)]
struct MockOwnersRepository {
    owners: Mutex<Vec<Owner>>,
    fail: bool,
    searches: AtomicUsize,
}

impl MockOwnersRepository {
    fn with_last_names(names: &[&str]) -> Self {
        let owners = names
            .iter()
            .enumerate()
            .map(|(i, n)| Owner {
                id: i as i32 + 1,
                first_name: format!("First{i}"),
                last_name: (*n).to_string(),
                address: "1 Main St.".into(),
                city: "Madison".into(),
                telephone: "6085550000".into(),
                pets: vec![],
            })
            .collect();
        Self {
            owners: Mutex::new(owners),
            ..Default::default()
        }
    }

    /// Holds one owner ("Jones", id 1); searches and saves fail.
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_last_names(&["Jones"])
        }
    }
}

#[async_trait::async_trait]
impl OwnersRepository for MockOwnersRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Owner>> {
        Ok(self.owners.lock().unwrap().iter().find(|o| o.id == id).cloned())
    }

    async fn save(&self, draft: OwnerDraft) -> Result<Owner> {
        if self.fail {
            bail!("connection refused");
        }
        let mut owners = self.owners.lock().unwrap();
        let id = draft.id.unwrap_or(owners.len() as i32 + 1);
        let owner = Owner {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            address: draft.address,
            city: draft.city,
            telephone: draft.telephone,
            pets: vec![],
        };
        owners.retain(|o| o.id != id);
        owners.push(owner.clone());
        Ok(owner)
    }

    async fn find_by_last_name_starting_with(
        &self,
        prefix: &str,
        request: PageRequest,
    ) -> Result<Page<Owner>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            bail!("connection refused");
        }
        let matching: Vec<Owner> = self
            .owners
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.last_name.starts_with(prefix))
            .cloned()
            .collect();
        let total = matching.len() as u64;
        let content = matching
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size() as usize)
            .collect();
        Ok(Page::new(content, request, total))
    }

    async fn pet_types(&self) -> Result<Vec<PetType>> {
        Ok(vec![])
    }

    async fn insert_pet(&self, _: i32, _: &str, _: NaiveDate, _: i32) -> Result<Pet> {
        bail!("not used")
    }

    async fn insert_visit(&self, _: i32, _: NaiveDate, _: &str) -> Result<Visit> {
        bail!("not used")
    }
}

fn service(repo: MockOwnersRepository) -> (Service, Arc<MockOwnersRepository>) {
    let repo = Arc::new(repo);
    let svc = Service::new(repo.clone(), ServiceConfig::default());
    (svc, repo)
}

fn names(page: &Page<Owner>) -> Vec<&str> {
    page.content.iter().map(|o| o.last_name.as_str()).collect()
}

#[tokio::test]
async fn prefix_lists_multiple_matches() {
    let (svc, _) = service(MockOwnersRepository::with_last_names(&[
        "Smith", "Jones", "Smithson",
    ]));

    match svc.find_owners(Some("Smith".into()), 1).await.unwrap() {
        FindOwnersOutcome::List {
            current_page, page, ..
        } => {
            assert_eq!(current_page, 1);
            assert_eq!(names(&page), vec!["Smith", "Smithson"]);
            assert_eq!(page.total_elements, 2);
            assert_eq!(page.total_pages, 1);
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[tokio::test]
async fn single_match_redirects() {
    let (svc, _) = service(MockOwnersRepository::with_last_names(&["Jones"]));

    let outcome = svc.find_owners(Some("Jones".into()), 1).await.unwrap();
    assert!(matches!(outcome, FindOwnersOutcome::Redirect { owner_id: 1 }));
    assert_eq!(outcome.redirect_target().as_deref(), Some("owners/1"));
}

#[tokio::test]
async fn single_match_among_many_owners_redirects() {
    let (svc, _) = service(MockOwnersRepository::with_last_names(&[
        "Smith", "Jones", "Smithson",
    ]));
    let outcome = svc.find_owners(Some("Jo".into()), 1).await.unwrap();
    assert_eq!(outcome.redirect_target().as_deref(), Some("owners/2"));
}

#[tokio::test]
async fn empty_store_is_not_found() {
    let (svc, _) = service(MockOwnersRepository::default());

    let outcome = svc.find_owners(Some(String::new()), 1).await.unwrap();
    assert!(matches!(outcome, FindOwnersOutcome::NotFound { .. }));
    assert!(outcome.redirect_target().is_none());
}

#[tokio::test]
async fn unmatched_filter_is_not_found() {
    let (svc, _) = service(MockOwnersRepository::with_last_names(&["Smith", "Jones"]));

    match svc.find_owners(Some("Zzz".into()), 1).await.unwrap() {
        FindOwnersOutcome::NotFound { last_name } => assert_eq!(last_name, "Zzz"),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_filter_matches_everyone() {
    let (svc, _) = service(MockOwnersRepository::with_last_names(&[
        "Smith", "Jones", "Smithson",
    ]));

    match svc.find_owners(None, 1).await.unwrap() {
        FindOwnersOutcome::List { last_name, page, .. } => {
            assert_eq!(last_name, "");
            assert_eq!(page.total_elements, 3);
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[tokio::test]
async fn pages_hold_at_most_five_and_round_up() {
    let all: Vec<String> = (0..12).map(|i| format!("Davis{i:02}")).collect();
    let refs: Vec<&str> = all.iter().map(String::as_str).collect();
    let (svc, _) = service(MockOwnersRepository::with_last_names(&refs));

    for (page_no, expected_len) in [(1, 5), (2, 5), (3, 2)] {
        match svc.find_owners(Some("Davis".into()), page_no).await.unwrap() {
            FindOwnersOutcome::List {
                current_page, page, ..
            } => {
                assert_eq!(current_page, page_no);
                assert_eq!(page.len(), expected_len);
                assert!(page.len() <= 5);
                assert_eq!(page.total_elements, 12);
                assert_eq!(page.total_pages, 3);
            }
            other => panic!("expected list on page {page_no}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn page_past_the_end_is_not_found() {
    let (svc, _) = service(MockOwnersRepository::with_last_names(&[
        "Smith", "Smithson",
    ]));

    let outcome = svc.find_owners(Some("Smith".into()), 2).await.unwrap();
    assert!(matches!(outcome, FindOwnersOutcome::NotFound { .. }));
}

#[tokio::test]
async fn lone_row_on_last_page_of_many_is_listed() {
    let all: Vec<String> = (0..6).map(|i| format!("Black{i}")).collect();
    let refs: Vec<&str> = all.iter().map(String::as_str).collect();
    let (svc, _) = service(MockOwnersRepository::with_last_names(&refs));

    match svc.find_owners(Some("Black".into()), 2).await.unwrap() {
        FindOwnersOutcome::List { page, .. } => {
            assert_eq!(page.len(), 1);
            assert_eq!(page.total_elements, 6);
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[tokio::test]
async fn whitespace_filter_is_passed_through_untrimmed() {
    let (svc, _) = service(MockOwnersRepository::with_last_names(&["Smith"]));

    match svc.find_owners(Some("  ".into()), 1).await.unwrap() {
        FindOwnersOutcome::NotFound { last_name } => assert_eq!(last_name, "  "),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn page_zero_is_treated_as_first_page() {
    let (svc, _) = service(MockOwnersRepository::with_last_names(&["Smith", "Smithson"]));

    match svc.find_owners(None, 0).await.unwrap() {
        FindOwnersOutcome::List { current_page, .. } => assert_eq!(current_page, 1),
        other => panic!("expected list, got {other:?}"),
    }
}

#[tokio::test]
async fn store_failure_is_a_recoverable_error() {
    let (svc, repo) = service(MockOwnersRepository::failing());

    let err = svc.find_owners(Some("Smith".into()), 1).await.unwrap_err();
    assert!(matches!(err, DomainError::Database { .. }));
    assert_eq!(repo.searches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn invalid_owner_never_reaches_the_store() {
    let (svc, repo) = service(MockOwnersRepository::default());

    let draft = OwnerDraft {
        first_name: "Jane".into(),
        last_name: String::new(),
        address: "1 Main St.".into(),
        city: "Madison".into(),
        telephone: "12345".into(),
        ..Default::default()
    };
    let err = svc.create_owner(draft).await.unwrap_err();
    let fields: Vec<_> = err.violations().iter().map(|v| v.field).collect();
    assert_eq!(fields, vec!["lastName", "telephone"]);
    assert!(repo.owners.lock().unwrap().is_empty());
}

#[tokio::test]
async fn update_uses_path_id_and_keeps_identity() {
    let (svc, repo) = service(MockOwnersRepository::with_last_names(&["Jones"]));

    let draft = OwnerDraft {
        id: Some(99),
        first_name: "Jenny".into(),
        last_name: "Jones".into(),
        address: "2 Elm St.".into(),
        city: "Monona".into(),
        telephone: "6085551111".into(),
    };
    let updated = svc.update_owner(1, draft).await.unwrap();
    assert_eq!(updated.id, 1);
    assert_eq!(updated.city, "Monona");
    assert_eq!(repo.owners.lock().unwrap().len(), 1);

    let missing = svc.update_owner(42, OwnerDraft::from(&updated)).await;
    assert!(matches!(missing, Err(DomainError::OwnerNotFound { id: 42 })));
}

#[traced_test]
#[tokio::test]
async fn find_owners_emits_spans() {
    let (svc, _) = service(MockOwnersRepository::with_last_names(&["Jones"]));

    let result = svc.find_owners(Some("Jones".into()), 1).await;
    assert!(result.is_ok());
    assert!(logs_contain("owners.service.find_owners"));
    assert!(logs_contain("Single match, redirecting"));
}

#[traced_test]
#[tokio::test]
async fn store_failure_is_logged() {
    let (svc, _) = service(MockOwnersRepository::failing());

    let _ = svc.find_owners(None, 1).await;
    assert!(logs_contain("Owner search failed"));
    assert!(logs_contain("connection refused"));
}

#[tokio::test]
async fn page_far_past_the_end_is_not_found() {
    let (svc, repo) = service(MockOwnersRepository::with_last_names(&["Smith", "Smithson"]));

    for page in [1u64 << 62, u64::MAX] {
        match svc.find_owners(None, page).await.unwrap() {
            FindOwnersOutcome::NotFound { last_name } => assert_eq!(last_name, ""),
            other => panic!("expected not found for page {page}, got {other:?}"),
        }
    }
    assert_eq!(repo.searches.load(Ordering::SeqCst), 2);
}

fn failing_router() -> Router {
    let (svc, _) = service(MockOwnersRepository::failing());
    owners::api::rest::routes::register_routes(Router::new(), Arc::new(svc))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn post_owner(uri: &str) -> Request<Body> {
    let body = json!({
        "firstName": "Jenny",
        "lastName": "Jones",
        "address": "2 Elm St.",
        "city": "Monona",
        "telephone": "6085551111"
    });
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn failed_search_returns_to_find_form() {
    let request = Request::builder()
        .uri("/owners?lastName=Jo")
        .body(Body::empty())
        .unwrap();
    let (status, doc) = send(failing_router(), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(doc["view"], "owners/findOwners");
    assert_eq!(doc["model"]["owner"]["lastName"], "Jo");
    assert_eq!(doc["globalErrors"][0]["code"], "findError");
    assert_eq!(
        doc["globalErrors"][0]["message"],
        "An error occurred while finding owners."
    );
}

#[tokio::test]
async fn failed_create_returns_to_owner_form() {
    let (status, doc) = send(failing_router(), post_owner("/owners/new")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(doc["view"], "owners/createOrUpdateOwnerForm");
    assert_eq!(doc["model"]["owner"]["firstName"], "Jenny");
    assert_eq!(doc["globalErrors"][0]["code"], "saveError");
    assert_eq!(
        doc["globalErrors"][0]["message"],
        "An error occurred while saving the owner."
    );
}

#[tokio::test]
async fn failed_update_returns_to_owner_form() {
    let (status, doc) = send(failing_router(), post_owner("/owners/1/edit")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(doc["view"], "owners/createOrUpdateOwnerForm");
    assert_eq!(doc["model"]["ownerId"], 1);
    assert_eq!(doc["globalErrors"][0]["code"], "updateError");
    assert_eq!(
        doc["globalErrors"][0]["message"],
        "An error occurred while updating the owner."
    );
}
