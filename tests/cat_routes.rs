//! Cat HTTP Route Tests
//!
//! Drives the full router with `tower::ServiceExt::oneshot`:
//! - success statuses and JSON bodies
//! - client errors as 400 with the literal message as plain text

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use cattery::entity::Cat;
use cattery::http_server::{HttpServer, HttpServerConfig};
use cattery::repository::InMemoryCatRepository;
use cattery::service::CatService;

// =============================================================================
// Helper Functions
// =============================================================================

const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

fn setup(cats: &[(&str, u32)]) -> Router {
    let service = CatService::new(Arc::new(InMemoryCatRepository::new()));
    for (name, age) in cats {
        service
            .create(Cat::builder().name(*name).age(*age).build())
            .unwrap();
    }
    HttpServer::with_config(HttpServerConfig::default(), service).router()
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, String, String) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(router: &Router, uri: &str) -> (StatusCode, String, String) {
    send(router, Method::GET, uri, None).await
}

fn assert_bad_request(result: (StatusCode, String, String), message: &str) {
    let (status, content_type, body) = result;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type, PLAIN_TEXT);
    assert_eq!(body, message);
}

fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

// =============================================================================
// CRUD Tests
// =============================================================================

#[tokio::test]
async fn test_create_returns_201_with_fresh_id() {
    let router = setup(&[]);
    let (status, content_type, body) = send(
        &router,
        Method::POST,
        "/cat/create",
        Some(json!({"id": 1001, "name": "Couscous", "age": 10})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(content_type, "application/json");
    assert_eq!(parse(&body), json!({"id": 1, "name": "Couscous", "age": 10}));
}

#[tokio::test]
async fn test_create_rejects_malformed_body() {
    let router = setup(&[]);
    let (status, content_type, body) = send(
        &router,
        Method::POST,
        "/cat/create",
        Some(json!({"name": "Couscous", "age": -3})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type, PLAIN_TEXT);
    assert!(body.starts_with("Invalid request body: "));
}

#[tokio::test]
async fn test_update_existing_cat() {
    let router = setup(&[("Couscous", 10)]);
    let (status, _, body) = send(
        &router,
        Method::PUT,
        "/cat/update/1",
        Some(json!({"id": 1, "name": "Millefoglie", "age": 10})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["name"], "Millefoglie");

    let (_, _, body) = get(&router, "/cat/1").await;
    assert_eq!(parse(&body), json!({"id": 1, "name": "Millefoglie", "age": 10}));
}

#[tokio::test]
async fn test_update_unknown_id() {
    let router = setup(&[]);
    let result = send(
        &router,
        Method::PUT,
        "/cat/update/-1",
        Some(json!({"id": -1, "name": "Millefoglie", "age": 10})),
    )
    .await;

    assert_bad_request(result, "There is no cat with id = -1");
}

#[tokio::test]
async fn test_get_by_id() {
    let router = setup(&[("Couscous", 10)]);
    let (status, content_type, body) = get(&router, "/cat/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(parse(&body), json!({"id": 1, "name": "Couscous", "age": 10}));
}

#[tokio::test]
async fn test_get_unknown_id() {
    let router = setup(&[]);
    assert_bad_request(get(&router, "/cat/-1").await, "Cat with id = '-1' is not found");
}

#[tokio::test]
async fn test_get_non_numeric_id() {
    let router = setup(&[]);
    assert_bad_request(
        get(&router, "/cat/*").await,
        "Invalid value \"*\" for parameter \"id\"",
    );
}

#[tokio::test]
async fn test_list_all() {
    let router = setup(&[("Couscous", 0), ("Tiramisu", 7)]);
    for uri in ["/cat", "/cat/"] {
        let (status, _, body) = get(&router, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            parse(&body),
            json!([
                {"id": 1, "name": "Couscous", "age": 0},
                {"id": 2, "name": "Tiramisu", "age": 7}
            ])
        );
    }
}

#[tokio::test]
async fn test_delete_returns_204() {
    let router = setup(&[("Couscous", 0)]);
    let (status, _, body) = send(&router, Method::DELETE, "/cat/delete/1", None).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    assert_bad_request(get(&router, "/cat/1").await, "Cat with id = '1' is not found");
}

#[tokio::test]
async fn test_delete_unknown_id() {
    let router = setup(&[]);
    assert_bad_request(
        send(&router, Method::DELETE, "/cat/delete/-1", None).await,
        "There is no cat with id = -1",
    );
}

// =============================================================================
// Query Tests
// =============================================================================

#[tokio::test]
async fn test_top_by_field() {
    let router = setup(&[("Tiramisu", 7), ("Couscous", 0)]);
    let (status, content_type, body) = get(&router, "/cat/?top=2&fieldName=age").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(
        parse(&body),
        json!([
            {"id": 2, "name": "Couscous", "age": 0},
            {"id": 1, "name": "Tiramisu", "age": 7}
        ])
    );
}

#[tokio::test]
async fn test_top_by_field_invalid_top() {
    let router = setup(&[]);
    assert_bad_request(
        get(&router, "/cat/?top=-2&fieldName=any").await,
        "Invalid value \"-2\" for parameter \"top\"",
    );
    assert_bad_request(
        get(&router, "/cat/?top=two&fieldName=age").await,
        "Invalid value \"two\" for parameter \"top\"",
    );
}

#[tokio::test]
async fn test_top_by_field_invalid_field() {
    let router = setup(&[]);
    assert_bad_request(
        get(&router, "/cat/?top=2&fieldName=invalid").await,
        "No such field as 'invalid'",
    );
}

#[tokio::test]
async fn test_top_by_field_missing_parameter() {
    let router = setup(&[]);
    assert_bad_request(
        get(&router, "/cat/?fieldName=age").await,
        "Invalid value \"\" for parameter \"top\"",
    );
    assert_bad_request(
        get(&router, "/cat/?top=2").await,
        "Invalid value \"\" for parameter \"fieldName\"",
    );
}

#[tokio::test]
async fn test_top_three() {
    let router = setup(&[("Couscous", 0), ("Tiramisu", 7), ("Humus", 1)]);
    let (status, _, body) = get(&router, "/cat/top3?fieldName=age").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = parse(&body)
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Couscous", "Humus", "Tiramisu"]);
}

#[tokio::test]
async fn test_top_three_invalid_field() {
    let router = setup(&[("Couscous", 0)]);
    assert_bad_request(
        get(&router, "/cat/top3?fieldName=diet").await,
        "No such field as 'diet'",
    );
}

#[tokio::test]
async fn test_youngest() {
    let router = setup(&[("Tiramisu", 7), ("Couscous", 0)]);
    let (status, _, body) = get(&router, "/cat/youngest").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body), json!({"id": 2, "name": "Couscous", "age": 0}));
}

#[tokio::test]
async fn test_youngest_empty_store() {
    let router = setup(&[]);
    assert_bad_request(
        get(&router, "/cat/youngest").await,
        "There are no records in data base",
    );
}

#[tokio::test]
async fn test_total_by_age() {
    let router = setup(&[("Couscous", 100), ("Tiramisu", 23)]);
    let (status, content_type, body) = get(&router, "/cat/total?fieldName=age").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(parse(&body), json!(123));
}

#[tokio::test]
async fn test_total_by_name_rejected() {
    let router = setup(&[("Couscous", 100)]);
    assert_bad_request(
        get(&router, "/cat/total?fieldName=name").await,
        "No such field as 'name'",
    );
}

#[tokio::test]
async fn test_health() {
    let router = setup(&[]);
    let (status, _, body) = get(&router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let health = parse(&body);
    assert_eq!(health["status"], "ok");
    assert_eq!(health["store"], "memory");
    assert_eq!(health["cats"], 0);
}
