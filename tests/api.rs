use std::{net::SocketAddr, sync::Arc};

use actix_web::{App, http::StatusCode, middleware::NormalizePath, test, web};
use async_trait::async_trait;
use serde_json::{Value, json};

use pto_tracker::config::Config;
use pto_tracker::model::{Employee, PtoRequest, PublicHoliday};
use pto_tracker::routes;
use pto_tracker::store::{KvStore, MemoryStore, StoreError, load_collection};

macro_rules! init_app {
    ($store:expr) => {{
        let store: Arc<dyn KvStore> = $store;
        test::init_service(
            App::new()
                .wrap(NormalizePath::trim())
                .app_data(web::Data::from(store))
                .service(web::scope("/api").configure(routes::api)),
        )
        .await
    }};
}

macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

/// Every call fails, as if the backing service were down.
struct UnavailableStore;

#[async_trait]
impl KvStore for UnavailableStore {
    async fn get(&self, _key: &str) -> Result<Option<Value>, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn set(&self, _key: &str, _value: Value) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }
}

fn employee_body(name: &str, total: f64, year: i32) -> Value {
    json!({ "name": name, "totalPTODays": total, "takenDays": 0, "year": year })
}

#[actix_web::test]
async fn employees_can_be_created_listed_and_updated() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let app = init_app!(store.clone());

    let (status, created) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/employees")
            .set_json(json!({ "name": "Jane", "totalPTODays": "20", "takenDays": "1.5", "year": "2024" }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Jane");
    assert_eq!(created["totalPTODays"], 20.0);
    assert_eq!(created["takenDays"], 1.5);
    assert_eq!(created["year"], 2024);
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    let (status, listed) = send!(app, test::TestRequest::get().uri("/api/employees"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, updated) = send!(
        app,
        test::TestRequest::put()
            .uri("/api/employees")
            .set_json(json!({ "id": id, "totalPTODays": 25 }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["totalPTODays"], 25.0);
    assert_eq!(updated["name"], "Jane");

    let stored: Vec<Employee> = load_collection(store.as_ref()).await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].total_pto_days, 25.0);
    assert_eq!(stored[0].taken_days, 1.5);
    Ok(())
}

#[actix_web::test]
async fn list_of_an_empty_store_is_an_empty_array() {
    let app = init_app!(MemoryStore::new());
    for uri in ["/api/employees", "/api/pto-requests", "/api/holidays", "/api/stats"] {
        let (status, body) = send!(app, test::TestRequest::get().uri(uri));
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, json!([]), "{uri}");
    }
}

#[actix_web::test]
async fn missing_required_field_never_touches_the_store() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let app = init_app!(store.clone());

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/employees")
            .set_json(json!({ "name": "Jane", "takenDays": 0, "year": 2024 }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing required fields" }));
    assert_eq!(store.get("employees").await?, None);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/pto-requests")
            .set_json(json!({ "employeeId": "e1", "employeeName": "Jane", "startDate": "2024-01-02", "totalDays": 1, "year": 2024 }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.get("pto-requests").await?, None);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/holidays")
            .set_json(json!({ "name": "Christmas", "date": "2024-12-25" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.get("public-holidays").await?, None);
    Ok(())
}

#[actix_web::test]
async fn updates_need_an_id_that_exists() {
    let app = init_app!(MemoryStore::new());

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri("/api/employees")
            .set_json(json!({ "name": "Nobody" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Employee ID is required");

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri("/api/employees")
            .set_json(json!({ "id": "missing", "name": "Nobody" }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Employee not found");

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri("/api/pto-requests")
            .set_json(json!({ "id": "missing", "totalDays": 2 }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Request not found");
}

#[actix_web::test]
async fn pto_request_lifecycle() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let app = init_app!(store.clone());

    let (status, created) = send!(
        app,
        test::TestRequest::post().uri("/api/pto-requests").set_json(json!({
            "employeeId": "e1",
            "employeeName": "Jane",
            "startDate": "2024-07-01",
            "endDate": "2024-07-05",
            "totalDays": "5",
            "year": 2024
        }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["totalDays"], 5.0);
    assert_eq!(created["startDate"], "2024-07-01");
    assert!(created["createdAt"].is_string());
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = send!(
        app,
        test::TestRequest::put()
            .uri("/api/pto-requests")
            .set_json(json!({ "id": id, "endDate": "2024-07-03", "totalDays": 3 }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["endDate"], "2024-07-03");
    assert_eq!(updated["totalDays"], 3.0);
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let (status, body) = send!(
        app,
        test::TestRequest::delete().uri(&format!("/api/pto-requests?id={id}"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let stored: Vec<PtoRequest> = load_collection(store.as_ref()).await?;
    assert!(stored.is_empty());
    Ok(())
}

#[actix_web::test]
async fn deleting_an_unknown_id_is_not_found_and_changes_nothing() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let app = init_app!(store.clone());

    let (status, created) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/holidays")
            .set_json(json!({ "name": "Christmas", "date": "2024-12-25", "year": 2024 }))
    );
    assert_eq!(status, StatusCode::CREATED);
    let before = store.get("public-holidays").await?;

    let (status, body) = send!(app, test::TestRequest::delete().uri("/api/holidays?id=nope"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Holiday not found");
    assert_eq!(store.get("public-holidays").await?, before);

    let (status, body) = send!(app, test::TestRequest::delete().uri("/api/pto-requests?id=nope"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Request not found");

    let (status, body) = send!(app, test::TestRequest::delete().uri("/api/holidays"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Holiday ID is required");

    let id = created["id"].as_str().unwrap();
    let (status, _) = send!(
        app,
        test::TestRequest::delete().uri(&format!("/api/holidays?id={id}"))
    );
    assert_eq!(status, StatusCode::OK);
    let stored: Vec<PublicHoliday> = load_collection(store.as_ref()).await?;
    assert!(stored.is_empty());
    Ok(())
}

#[actix_web::test]
async fn stats_reconcile_requests_against_holidays() {
    let app = init_app!(MemoryStore::new());

    let (_, employee) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/employees")
            .set_json(employee_body("Jane", 20.0, 2024))
    );
    let employee_id = employee["id"].as_str().unwrap().to_string();

    for body in [
        json!({ "name": "Christmas Day", "date": "2024-12-25", "year": 2024 }),
        json!({ "name": "New Year's Day", "date": "2024-01-01", "year": 2024 }),
        json!({ "name": "New Year's Day", "date": "2025-01-01", "year": 2025 }),
    ] {
        let (status, _) = send!(app, test::TestRequest::post().uri("/api/holidays").set_json(body));
        assert_eq!(status, StatusCode::CREATED);
    }

    for (start, end, days, year) in [
        ("2024-12-24", "2024-12-26", 3, 2024),
        ("2024-08-05", "2024-08-06", 2, 2025),
    ] {
        let (status, _) = send!(
            app,
            test::TestRequest::post().uri("/api/pto-requests").set_json(json!({
                "employeeId": employee_id,
                "employeeName": "Jane",
                "startDate": start,
                "endDate": end,
                "totalDays": days,
                "year": year
            }))
        );
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, stats) = send!(app, test::TestRequest::get().uri("/api/stats"));
    assert_eq!(status, StatusCode::OK);
    let s = &stats[0];
    assert_eq!(s["employee"]["id"], employee_id.as_str());
    assert_eq!(s["employee"]["takenDays"], 0.0);
    assert_eq!(s["publicHolidayDays"], 3.0);
    assert_eq!(s["remainingDays"], 20.0);
    assert_eq!(s["requests"].as_array().unwrap().len(), 1);
    assert_eq!(
        s["workingOnHolidays"],
        json!([{ "date": "2024-01-01", "holidayName": "New Year's Day" }])
    );
}

#[actix_web::test]
async fn store_failures_become_generic_server_errors() {
    let app = init_app!(Arc::new(UnavailableStore));

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/employees"));
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch employees" }));

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/stats"));
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch stats" }));

    // validation still wins before the store is touched
    let (status, _) = send!(
        app,
        test::TestRequest::post().uri("/api/employees").set_json(json!({}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn malformed_bodies_and_trailing_slashes() {
    let app = init_app!(MemoryStore::new());

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/employees")
            .insert_header(("content-type", "application/json"))
            .set_payload("{ not json")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/employees")
            .set_json(json!({ "name": "Jane", "totalPTODays": "lots", "takenDays": 0, "year": 2024 }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "totalPTODays must be a number");

    let (status, _) = send!(app, test::TestRequest::get().uri("/api/holidays/"));
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn reversed_range_on_update_is_rejected_and_not_stored() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let app = init_app!(store.clone());

    let (status, created) = send!(
        app,
        test::TestRequest::post().uri("/api/pto-requests").set_json(json!({
            "employeeId": "e1",
            "employeeName": "Jane",
            "startDate": "2024-07-01",
            "endDate": "2024-07-05",
            "totalDays": 5,
            "year": 2024
        }))
    );
    assert_eq!(status, StatusCode::CREATED);
    let before = store.get("pto-requests").await?;

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri("/api/pto-requests")
            .set_json(json!({ "id": created["id"], "startDate": "2024-07-10" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "startDate cannot be after endDate");
    assert_eq!(store.get("pto-requests").await?, before);
    Ok(())
}

#[actix_web::test]
async fn server_wiring_serves_health_page_and_rate_limited_api() -> anyhow::Result<()> {
    let config = Config::from_lookup(|key| match key {
        "API_PREFIX" => Some("v1".to_string()),
        "RATE_API_PER_MIN" => Some("2".to_string()),
        _ => None,
    })?;
    let limiter = routes::rate_limit(config.rate_api_per_min).unwrap();
    let store: Arc<dyn KvStore> = MemoryStore::new();
    let app = test::init_service(
        App::new()
            .wrap(NormalizePath::trim())
            .app_data(web::Data::from(store))
            .app_data(web::Data::new(config.clone()))
            .configure(|cfg| routes::configure(cfg, &config, &limiter)),
    )
    .await;
    let peer: SocketAddr = "10.0.0.7:40000".parse()?;
    let other_peer: SocketAddr = "10.0.0.8:40000".parse()?;

    let (status, body) = send!(app, test::TestRequest::get().uri("/health").peer_addr(peer));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").peer_addr(peer).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = test::read_body(resp).await;
    assert!(std::str::from_utf8(&page)?.contains("const API = \"/v1\";"));

    // the old prefix is not mounted
    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/employees").peer_addr(peer).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let (status, body) = send!(app, test::TestRequest::get().uri("/v1/employees").peer_addr(peer));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    let (status, _) = send!(app, test::TestRequest::get().uri("/v1/stats").peer_addr(peer));
    assert_eq!(status, StatusCode::OK);

    // burst of two per peer is spent
    let limited = test::try_call_service(&app, test::TestRequest::get().uri("/v1/employees").peer_addr(peer).to_request())
        .await
        .map_or_else(|err| err.error_response().status(), |resp| resp.status());
    assert_eq!(limited, StatusCode::TOO_MANY_REQUESTS);

    let (status, _) = send!(app, test::TestRequest::get().uri("/v1/employees").peer_addr(other_peer));
    assert_eq!(status, StatusCode::OK);

    // health and the page sit outside the limited scope
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").peer_addr(peer).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}
