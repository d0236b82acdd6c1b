use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::declarations::declaration_router;
use crate::workflows::declarations::service::DeclarationService;

fn router() -> axum::Router {
    declaration_router(service_with(
        Arc::new(RecordingExporter::default()),
        Arc::new(RecordingExporter::default()),
    ))
}

async fn send(router: &axum::Router, request: Request<Body>) -> axum::response::Response {
    router
        .clone()
        .oneshot(request)
        .await
        .expect("route executes")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("encode body")))
        .expect("request builds")
}

fn empty(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

async fn open_session(router: &axum::Router) -> String {
    let response = send(router, empty("POST", "/api/v1/declarations/sessions")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    payload["session_id"]
        .as_str()
        .expect("session id present")
        .to_string()
}

#[tokio::test]
async fn create_route_returns_snapshot() {
    let router = router();
    let response = send(&router, empty("POST", "/api/v1/declarations/sessions")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["session_id"], "decl-000001");
    assert_eq!(payload["snapshot"]["state"]["doc_type"], "deregistration");
    assert_eq!(payload["snapshot"]["state"]["category_id"], "HIS-2");
    assert_eq!(payload["snapshot"]["export_status"]["state"], "idle");
}

#[tokio::test]
async fn events_route_masks_and_recomputes() {
    let router = router();
    let id = open_session(&router).await;

    let response = send(
        &router,
        post_json(
            &format!("/api/v1/declarations/sessions/{id}/events"),
            json!({
                "events": [
                    { "event": "set_field", "field": "doc_type", "value": "primeira_aquisicao" },
                    { "event": "set_field", "field": "party1_name", "value": "Ana Lima" },
                    { "event": "set_field", "field": "party1_tax_id", "value": "12345678901" },
                    { "event": "set_second_party", "enabled": true }
                ]
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["state"]["doc_type"], "first_acquisition");
    assert_eq!(payload["state"]["party1"]["tax_id"], "123.456.789-01");
    assert_eq!(
        payload["state"]["file_name"],
        "DECLARAÇÃO PRIMEIRA AQUISIÇÃO - ANA LIMA"
    );
    assert_eq!(payload["state"]["second_party"], true);
    assert_eq!(payload["grammatical_number"], "singular");
}

#[tokio::test]
async fn document_route_returns_typed_blocks() {
    let router = router();
    let id = open_session(&router).await;

    send(
        &router,
        post_json(
            &format!("/api/v1/declarations/sessions/{id}/events"),
            json!({ "events": [
                { "event": "set_field", "field": "doc_type", "value": "first_acquisition" },
                { "event": "set_field", "field": "acquisition_type", "value": "second" }
            ] }),
        ),
    )
    .await;

    let response = send(
        &router,
        empty("GET", &format!("/api/v1/declarations/sessions/{id}/document")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["document"]["doc_type"], "first_acquisition");
    let blocks = payload["document"]["blocks"].as_array().expect("blocks");
    let marks: Vec<bool> = blocks
        .iter()
        .filter(|block| block["type"] == "checkbox")
        .map(|block| block["marked"].as_bool().expect("marked flag"))
        .collect();
    assert_eq!(marks, vec![false, true]);
    assert!(payload["plain_text"]
        .as_str()
        .expect("plain text")
        .contains("DECLARAÇÃO DE PRIMEIRA/SEGUNDA AQUISIÇÃO"));
}

#[tokio::test]
async fn document_route_rejects_unknown_project() {
    let router = router();
    let id = open_session(&router).await;

    send(
        &router,
        post_json(
            &format!("/api/v1/declarations/sessions/{id}/events"),
            json!({ "events": [{ "event": "set_field", "field": "project_id", "value": "ghost" }] }),
        ),
    )
    .await;

    let response = send(
        &router,
        empty("GET", &format!("/api/v1/declarations/sessions/{id}/document")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "unknown project 'ghost'");

    let response = send(
        &router,
        empty("POST", &format!("/api/v1/declarations/sessions/{id}/export")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn export_route_writes_html_into_output_dir() {
    let dir = tempfile::tempdir().expect("temp dir");
    let service = Arc::new(DeclarationService::with_output_dir(registry(), dir.path()));
    let router = declaration_router(service);
    let id = open_session(&router).await;

    let response = send(
        &router,
        empty("POST", &format!("/api/v1/declarations/sessions/{id}/export")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["exporter"], "html");
    assert_eq!(payload["fallback_used"], false);
    assert_eq!(
        payload["file_name"],
        "DECLARAÇÃO DE DESENQUADRAMENTO PMCMV - .pdf"
    );

    let written = dir
        .path()
        .join("DECLARAÇÃO DE DESENQUADRAMENTO PMCMV - .html");
    let html = std::fs::read_to_string(written).expect("html written");
    assert!(html.contains("ILUSTRÍSSIMO SENHOR DOUTOR DO 06° OFICIAL"));
    assert!(html.contains("page-break-inside: avoid"));

    let snapshot = send(
        &router,
        empty("GET", &format!("/api/v1/declarations/sessions/{id}")),
    )
    .await;
    let payload = read_json_body(snapshot).await;
    assert_eq!(payload["export_status"]["state"], "idle");
}

#[tokio::test]
async fn unknown_and_discarded_sessions_are_not_found() {
    let router = router();

    let response = send(&router, empty("GET", "/api/v1/declarations/sessions/decl-999999")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let id = open_session(&router).await;
    let response = send(
        &router,
        empty("DELETE", &format!("/api/v1/declarations/sessions/{id}")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(
        &router,
        empty("GET", &format!("/api/v1/declarations/sessions/{id}")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn registry_routes_list_reference_data() {
    let router = router();

    let response = send(&router, empty("GET", "/api/v1/registry/projects")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let projects = payload["projects"].as_array().expect("projects");
    assert_eq!(projects.len(), 9);
    assert_eq!(projects[7]["id"], "villagio");
    assert_eq!(projects[7]["house_based"], true);

    let response = send(&router, empty("GET", "/api/v1/registry/categories")).await;
    let payload = read_json_body(response).await;
    let codes: Vec<&str> = payload["categories"]
        .as_array()
        .expect("categories")
        .iter()
        .map(|category| category["code"].as_str().expect("code"))
        .collect();
    assert_eq!(codes, vec!["HIS-1", "HIS-2", "HMP"]);
}
