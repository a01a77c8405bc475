//! End-to-end fetch tests against a mock HTTP server.

use serde_json::json;
use wiremock::matchers::{any, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use commission_catalog::pipeline::{CatalogSource, StatusLevel};
use commission_catalog::*;

const V1: &str = "/api/v1/GetCategoriesForCalculator";

// ─────────────────────── helpers ───────────────────────

fn orchestrator(server: &MockServer) -> FetchOrchestrator {
    FetchOrchestrator::new(HttpExecutor::new(2_000)).with_origin(server.uri())
}

fn category_payload() -> serde_json::Value {
    json!({
        "success": true,
        "data": [
            {"categoryId": 1, "categoryName": "Telefon", "commission": 8.5,
             "children": [{"id": 11, "name": "Kılıf", "rate": "15"}]},
            {"categoryId": 2, "categoryName": "Kitap", "commission": 6}
        ]
    })
}

fn source(server: &MockServer, route: &str) -> SourceConfig {
    SourceConfig::new("mock", format!("{}{}", server.uri(), route))
}

// ─────────────────────── default chain ───────────────────────

#[tokio::test]
async fn test_all_attempts_fail_returns_static_catalog() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(8)
        .mount(&server)
        .await;

    let outcome = orchestrator(&server).fetch_categories().await;

    assert!(outcome.is_fallback());
    assert_eq!(outcome.categories, static_catalog());
    assert_eq!(outcome.categories.len(), 12);
    assert_eq!(outcome.categories[0].name, "Elektronik");
    assert_eq!(outcome.categories[0].commission_rate, 12.5);
    assert_eq!(outcome.categories[0].sub_categories.len(), 8);

    assert_eq!(outcome.failures.len(), 8);
    assert!(outcome.failures.iter().all(|f| f.kind == "HttpStatusError"));
}

#[tokio::test]
async fn test_decode_errors_fall_back() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let outcome = orchestrator(&server).fetch_categories().await;

    assert_eq!(outcome.source, CatalogSource::StaticFallback);
    assert!(outcome.failures.iter().all(|f| f.kind == "DecodeError"));
}

#[tokio::test]
async fn test_unreachable_origin_falls_back() {
    let outcome = FetchOrchestrator::new(HttpExecutor::new(500))
        .with_origin("http://127.0.0.1:1")
        .fetch_categories()
        .await;

    assert!(outcome.is_fallback());
    assert_eq!(outcome.failures.len(), 8);
    assert!(outcome.failures.iter().all(|f| f.kind == "NetworkError"));
}

#[tokio::test]
async fn test_first_success_stops_chain() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(V1))
        .and(body_string(r#"{"action":"GetCategoriesForCalculator"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(category_payload()))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    // attempts 1 and 2 only; nothing after attempt 3 may be sent
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let outcome = orchestrator(&server).fetch_categories().await;

    assert_eq!(
        outcome.source,
        CatalogSource::Live {
            attempt: 2,
            name: "POST with action parameter".to_string()
        }
    );
    assert_eq!(outcome.failures.len(), 2);

    let names: Vec<&str> = outcome.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Telefon", "Kitap"]);
    assert_eq!(outcome.categories[0].commission_rate, 8.5);
    assert_eq!(outcome.categories[0].sub_categories[0].commission_rate, 15.0);
}

#[tokio::test]
async fn test_empty_object_continues_chain() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(V1))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(V1))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"deep": {"items": [{"id": 5, "title": "Oyuncak", "oran": 14}]}}
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(V1))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = orchestrator(&server).fetch_categories().await;

    assert_eq!(
        outcome.source,
        CatalogSource::Live {
            attempt: 4,
            name: "GET with query params".to_string()
        }
    );
    assert_eq!(outcome.categories, vec![Category::new(5, "Oyuncak", 14.0)]);
    assert!(outcome.failures.iter().all(|f| f.kind == "EmptyResult"));
}

#[tokio::test]
async fn test_first_attempt_sends_calculator_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(V1))
        .and(header("User-Agent", "TrendyolCalculator/1.0"))
        .and(header("Content-Type", "application/json"))
        .and(body_string("{}"))
        .respond_with(ResponseTemplate::new(200).set_body_json(category_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = orchestrator(&server).fetch_categories().await;
    assert!(!outcome.is_fallback());
    assert!(outcome.failures.is_empty());
}

// ─────────────────────── configured sources ───────────────────────

#[tokio::test]
async fn test_source_with_nested_data_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/cats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"categories": [
                {"cat_id": "7", "title": " Toys ", "fee": "9.5",
                 "kids": [{"cat_id": 8, "title": "Lego", "fee": 11}]},
                {"cat_id": 9, "fee": 3}
            ]}
        })))
        .mount(&server)
        .await;

    let mut config = source(&server, "/v2/cats");
    config.data_path = "data.categories".to_string();
    config.field_mapping = FieldMapping {
        id: "cat_id".to_string(),
        name: "title".to_string(),
        commission_rate: "fee".to_string(),
        sub_categories: "kids".to_string(),
    };

    let categories = orchestrator(&server).fetch_with_config(&config).await.unwrap();

    assert_eq!(
        categories,
        vec![Category::new(7, "Toys", 9.5)
            .with_sub_categories(vec![Category::new(8, "Lego", 11.0)])]
    );
}

#[tokio::test]
async fn test_source_missing_path() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .mount(&server)
        .await;

    let mut config = source(&server, "/cats");
    config.data_path = "data.missing".to_string();

    match orchestrator(&server).fetch_source(&config).await {
        Err(CatalogError::PathNotFound(p)) => assert_eq!(p, "data.missing"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_source_http_error_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = orchestrator(&server)
        .fetch_source(&source(&server, "/cats"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "HttpStatusError");
    assert_eq!(err.to_string(), "HTTP 404 Not Found");
}

#[tokio::test]
async fn test_source_without_endpoint() {
    let orchestrator = FetchOrchestrator::new(HttpExecutor::default());
    let config = SourceConfig::preset("custom").unwrap();

    let err = orchestrator.fetch_source(&config).await.unwrap_err();
    assert_eq!(err.kind(), "ConfigError");
}

#[tokio::test]
async fn test_source_auth_headers() {
    let server = MockServer::start().await;
    Mock::given(header("X-API-Key", "secret"))
        .and(path("/apikey"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "A"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(header("Authorization", "Bearer tok"))
        .and(path("/bearer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 2, "name": "B"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(header("Authorization", "Basic dXNlcjpwYXNz"))
        .and(path("/basic"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 3, "name": "C"}])))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = orchestrator(&server);
    for (route, auth, key) in [
        ("/apikey", AuthType::ApiKey, "secret"),
        ("/bearer", AuthType::Bearer, "tok"),
        ("/basic", AuthType::Basic, "user:pass"),
    ] {
        let mut config = source(&server, route);
        config.auth_type = auth;
        config.api_key = key.to_string();
        let categories = orchestrator.fetch_with_config(&config).await.unwrap();
        assert_eq!(categories.len(), 1, "route {route}");
    }
}

#[tokio::test]
async fn test_source_post_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(body_string(r#"{"lang":"tr"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "A"}])))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = source(&server, "/cats");
    config.method = HttpMethod::Put;
    config.body = Some(r#"{"lang":"tr"}"#.to_string());

    let categories = orchestrator(&server).fetch_with_config(&config).await.unwrap();
    assert_eq!(categories[0].commission_rate, 12.0);
}

#[tokio::test]
async fn test_source_xml_is_opaque() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string("<cats><cat id=\"1\"/></cats>"))
        .mount(&server)
        .await;

    let mut config = source(&server, "/cats.xml");
    config.response_format = ResponseFormat::Xml;

    let orchestrator = orchestrator(&server);
    assert!(orchestrator.fetch_source(&config).await.unwrap().is_empty());

    let err = orchestrator.fetch_with_config(&config).await.unwrap_err();
    assert_eq!(err.kind(), "EmptyResult");
}

#[tokio::test]
async fn test_source_report() {
    let server = MockServer::start().await;
    let items: Vec<_> = (1..=5)
        .map(|i| json!({"id": i, "name": format!("Cat {i}"), "commissionRate": i}))
        .collect();
    Mock::given(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(items)))
        .mount(&server)
        .await;
    Mock::given(path("/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(path("/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{oops"))
        .mount(&server)
        .await;

    let orchestrator = orchestrator(&server);

    let report = orchestrator.test_source(&source(&server, "/ok")).await;
    assert!(report.success);
    assert_eq!(report.categories_found, Some(5));
    assert_eq!(report.sample.len(), 3);
    assert_eq!(report.error, None);

    let report = orchestrator.test_source(&source(&server, "/empty")).await;
    assert!(report.success);
    assert_eq!(report.categories_found, Some(0));
    assert!(report.sample.is_empty());
    assert_eq!(report.error, None);

    let report = orchestrator.test_source(&source(&server, "/broken")).await;
    assert!(!report.success);
    assert_eq!(report.error.as_deref(), Some("DecodeError"));
    assert!(report.sample.is_empty());
}

// ─────────────────────── diagnostics ───────────────────────

#[tokio::test]
async fn test_probe_reports_raw_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(V1))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let report = orchestrator(&server).probe().await;

    assert!(report.success);
    assert_eq!(report.status, Some(200));
    assert_eq!(report.decoded_body, Some(json!({"success": true, "data": []})));
    assert!(report.raw_text.contains("success"));
    assert_eq!(report.error, None);
}

#[tokio::test]
async fn test_probe_errors() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .mount(&server)
        .await;

    let report = orchestrator(&server).probe().await;
    assert!(!report.success);
    assert_eq!(report.error.as_deref(), Some("HTTP 503"));
    assert_eq!(report.raw_text, "busy");

    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let report = orchestrator(&server).probe().await;
    assert!(!report.success);
    assert_eq!(report.error.as_deref(), Some("JSON parse failed"));
    assert_eq!(report.decoded_body, None);
}

#[tokio::test]
async fn test_status_levels() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&server)
        .await;
    assert_eq!(orchestrator(&server).check_status().await.level, StatusLevel::Ok);

    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;
    let status = orchestrator(&server).check_status().await;
    assert_eq!(status.level, StatusLevel::Warning);
    assert_eq!(status.details, "Status: 405 Method Not Allowed");

    let status = FetchOrchestrator::new(HttpExecutor::new(500))
        .with_origin("http://127.0.0.1:1")
        .check_status()
        .await;
    assert_eq!(status.level, StatusLevel::Error);
}
