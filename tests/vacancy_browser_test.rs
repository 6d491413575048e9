mod common;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::Query,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use careers_portal::{
    dto::view_dto::BrowserView,
    models::{
        filter::{FilterChange, SortKey},
        vacancy::EmploymentType,
    },
    routes::Route,
    services::careers_api::CareersApi,
};
use serde_json::{json, Value as JsonValue};

use common::{app_state, spawn_backend, unreachable_backend, vacancy_json};

type Queries = Arc<Mutex<Vec<HashMap<String, String>>>>;
type CountRequests = Arc<Mutex<Vec<JsonValue>>>;

fn counts_route(seen: CountRequests) -> axum::routing::MethodRouter {
    post(move |Json(body): Json<JsonValue>| {
        let seen = seen.clone();
        async move {
            let counts: HashMap<String, u64> = body["jobIds"]
                .as_array()
                .map(|ids| {
                    ids.iter()
                        .filter_map(|id| id.as_str())
                        .map(|id| (id.to_string(), if id == "1" { 1 } else { 3 }))
                        .collect()
                })
                .unwrap_or_default();
            seen.lock().unwrap().push(body);
            Json(json!({ "success": true, "counts": counts }))
        }
    })
}

fn industries_route() -> axum::routing::MethodRouter {
    get(|| async {
        Json(json!({
            "success": true,
            "data": [
                { "_id": "IND1", "name": "Information Technology" },
                { "_id": "IND2", "name": "Finance" }
            ]
        }))
    })
}

#[tokio::test]
async fn empty_promoted_view_falls_back_to_recent_openings() {
    let queries: Queries = Arc::default();
    let counts: CountRequests = Arc::default();

    let list = {
        let queries = queries.clone();
        get(move |Query(params): Query<HashMap<String, String>>| {
            let queries = queries.clone();
            async move {
                let show_all = params.get("showAll").map(String::as_str) == Some("true");
                queries.lock().unwrap().push(params);
                if !show_all {
                    return Json(json!({
                        "success": true,
                        "data": [],
                        "pagination": { "currentPage": 1, "totalPages": 0, "totalItems": 0, "itemsPerPage": 10 }
                    }));
                }
                let mut closed = vacancy_json("9", "Closed Role", 28);
                closed["isActive"] = json!(false);
                Json(json!({
                    "success": true,
                    "data": [
                        vacancy_json("1", "Analyst", 1),
                        vacancy_json("2", "Engineer", 5),
                        closed,
                        vacancy_json("3", "Designer", 3),
                        vacancy_json("4", "Tester", 2),
                        vacancy_json("5", "Recruiter", 4),
                        vacancy_json("6", "Manager", 6)
                    ]
                }))
            }
        })
    };

    let app = Router::new()
        .route("/api/industry/list", industries_route())
        .route("/api/vacancy/list", list)
        .route("/api/cv/counts/batch", counts_route(counts.clone()));
    let state = app_state(spawn_backend(app).await);

    let mut browser = state.browser();
    browser.mount().await;

    let recorded = queries.lock().unwrap().clone();
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded[0]["showAll"], "false");
    assert_eq!(recorded[0]["limit"], "10");
    assert_eq!(recorded[1]["showAll"], "true");
    assert_eq!(recorded[1]["limit"], "5");
    assert_eq!(recorded[1]["page"], "1");

    let s = browser.state();
    assert_eq!(s.industries.len(), 2);
    let ids: Vec<&str> = s.vacancies.iter().map(|v| v.job_id.as_str()).collect();
    assert_eq!(ids, vec!["6", "2", "5", "3", "4"]);
    let pagination = s.pagination.expect("synthesized pagination");
    assert_eq!(pagination.total_pages, 1);
    assert_eq!(pagination.total_items, 5);
    assert_eq!(pagination.items_per_page, 5);

    let sent = counts.lock().unwrap().clone();
    assert_eq!(sent, vec![json!({ "jobIds": ["6", "2", "5", "3", "4"] })]);

    match browser.view() {
        BrowserView::Listing { roles, cards, pager, .. } => {
            assert_eq!(roles.as_deref(), Some("5 roles"));
            assert!(pager.is_none());
            assert_eq!(cards[0].applied_badge.as_deref(), Some("3 people applied"));
            assert_eq!(cards[0].salary.as_deref(), Some("₹50,000 - ₹80,000"));
            assert!(cards[0].negotiable);
        }
        other => panic!("expected listing, got {:?}", other),
    }
}

#[tokio::test]
async fn filters_are_sent_and_page_resets() {
    let queries: Queries = Arc::default();

    let list = {
        let queries = queries.clone();
        get(move |Query(params): Query<HashMap<String, String>>| {
            let queries = queries.clone();
            async move {
                queries.lock().unwrap().push(params);
                Json(json!({
                    "success": true,
                    "data": [vacancy_json("1", "Analyst", 1), vacancy_json("7", "backend dev", 9)],
                    "pagination": { "currentPage": 1, "totalPages": 3, "totalItems": 25, "itemsPerPage": 10 }
                }))
            }
        })
    };

    let app = Router::new()
        .route("/api/industry/list", industries_route())
        .route("/api/vacancy/list", list)
        .route("/api/cv/counts/batch", counts_route(Arc::default()));
    let state = app_state(spawn_backend(app).await);

    let mut browser = state.browser();
    browser.mount().await;

    let request = browser.next_page().expect("page 2 exists");
    assert_eq!(request.criteria.page, 2);
    browser.run(request).await;

    let request = browser.update_filter(FilterChange::Search("rust".into()));
    assert_eq!(request.criteria.page, 1);
    browser.run(request).await;

    browser.update_filter(FilterChange::EmploymentType(Some(EmploymentType::Contract)));
    browser.update_filter(FilterChange::City(" ".into()));
    let request = browser.update_filter(FilterChange::RemoteOnly(true));
    browser.run(request).await;

    let recorded = queries.lock().unwrap().clone();
    assert_eq!(recorded.len(), 4);
    assert_eq!(recorded[1]["page"], "2");

    let last = &recorded[3];
    assert_eq!(last["page"], "1");
    assert_eq!(last["showAll"], "false");
    assert_eq!(last["search"], "rust");
    assert_eq!(last["employmentType"], "Contract");
    assert_eq!(last["isRemote"], "true");
    assert!(!last.contains_key("city"));
    assert!(!last.contains_key("industry"));

    browser.set_sort(SortKey::Title);
    match browser.view() {
        BrowserView::Listing { cards, pager, .. } => {
            let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
            assert_eq!(titles, vec!["Analyst", "backend dev"]);
            let pager = pager.expect("three pages");
            assert_eq!(pager.label, "Page 1 of 3");
            assert!(!pager.previous_enabled);
            assert!(pager.next_enabled);
        }
        other => panic!("expected listing, got {:?}", other),
    }
    assert_eq!(queries.lock().unwrap().len(), 4);

    let route = browser.apply_route(&browser.state().vacancies[0]);
    assert_eq!(route, Route::Apply { job_id: "oid-1".into() });
    assert_eq!(route.path().parse::<Route>().unwrap(), route);
}

#[tokio::test]
async fn failure_envelope_and_bad_status_surface_as_list_errors() {
    let app = Router::new()
        .route(
            "/api/industry/list",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/api/vacancy/list",
            get(|| async { Json(json!({ "success": false, "message": "Database unavailable" })) }),
        );
    let state = app_state(spawn_backend(app).await);

    let mut browser = state.browser();
    browser.mount().await;

    assert!(browser.state().industries.is_empty());
    assert!(!browser.state().loading);
    assert_eq!(
        browser.view(),
        BrowserView::Error("Failed to fetch vacancies".to_string())
    );

    let err = state.api.list_industries().await.unwrap_err();
    assert!(matches!(
        err,
        careers_portal::error::Error::Api { status: Some(500), message: None }
    ));
}

#[tokio::test]
async fn transport_failure_uses_generic_list_error() {
    let state = app_state(unreachable_backend().await);

    let mut browser = state.browser();
    browser.mount().await;

    assert_eq!(
        browser.view(),
        BrowserView::Error("Error fetching vacancies".to_string())
    );
    assert!(browser.state().counts.is_empty());
}

#[tokio::test]
async fn numeric_job_ids_and_unknown_enums_still_deserialize() {
    let app = Router::new().route(
        "/api/vacancy/list",
        get(|| async {
            Json(json!({
                "success": true,
                "data": [{
                    "_id": "oid-77",
                    "jobId": 77,
                    "jobTitle": "Seasonal Helper",
                    "employmentType": "Seasonal",
                    "isPromoted": true
                }],
                "pagination": { "currentPage": 1, "totalPages": 1, "totalItems": 1, "itemsPerPage": 10 }
            }))
        }),
    );
    let state = app_state(spawn_backend(app).await);

    let page = state
        .api
        .list_vacancies(&careers_portal::dto::vacancy_dto::VacancyListQuery::from(
            &careers_portal::models::filter::FilterCriteria::default(),
        ))
        .await
        .expect("list");

    assert_eq!(page.vacancies[0].job_id, "77");
    assert_eq!(
        page.vacancies[0].employment_type,
        Some(EmploymentType::Other("Seasonal".into()))
    );
    assert!(page.vacancies[0].is_active);
}
