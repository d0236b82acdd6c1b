use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::json;

use super::export::ExportError;
use super::form::FormEvent;
use super::service::{DeclarationService, DeclarationServiceError, SessionId};

#[derive(Debug, Deserialize)]
pub(crate) struct EventBatch {
    pub(crate) events: Vec<FormEvent>,
}

/// Router builder exposing the declaration sessions and the reference registry.
pub fn declaration_router(service: Arc<DeclarationService>) -> Router {
    Router::new()
        .route("/api/v1/declarations/sessions", post(create_handler))
        .route(
            "/api/v1/declarations/sessions/:session_id",
            get(snapshot_handler).delete(discard_handler),
        )
        .route(
            "/api/v1/declarations/sessions/:session_id/events",
            post(events_handler),
        )
        .route(
            "/api/v1/declarations/sessions/:session_id/document",
            get(document_handler),
        )
        .route(
            "/api/v1/declarations/sessions/:session_id/export",
            post(export_handler),
        )
        .route("/api/v1/registry/projects", get(projects_handler))
        .route("/api/v1/registry/categories", get(categories_handler))
        .with_state(service)
}

fn error_response(error: DeclarationServiceError) -> Response {
    let status = match &error {
        DeclarationServiceError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        DeclarationServiceError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        DeclarationServiceError::Resolution(_)
        | DeclarationServiceError::Export(ExportError::Resolution(_)) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        DeclarationServiceError::Export(ExportError::InProgress) => StatusCode::CONFLICT,
        DeclarationServiceError::Export(ExportError::Failed { .. }) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn create_handler(State(service): State<Arc<DeclarationService>>) -> Response {
    match service.create() {
        Ok((session_id, snapshot)) => {
            let payload = json!({
                "session_id": session_id,
                "snapshot": snapshot,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn snapshot_handler(
    State(service): State<Arc<DeclarationService>>,
    Path(session_id): Path<String>,
) -> Response {
    match service.snapshot(&SessionId(session_id)) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn events_handler(
    State(service): State<Arc<DeclarationService>>,
    Path(session_id): Path<String>,
    axum::Json(batch): axum::Json<EventBatch>,
) -> Response {
    match service.apply(&SessionId(session_id), batch.events) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn document_handler(
    State(service): State<Arc<DeclarationService>>,
    Path(session_id): Path<String>,
) -> Response {
    match service.document(&SessionId(session_id)) {
        Ok(document) => {
            let payload = json!({
                "plain_text": document.to_plain_text(),
                "document": document,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_handler(
    State(service): State<Arc<DeclarationService>>,
    Path(session_id): Path<String>,
) -> Response {
    let id = SessionId(session_id);
    let worker = Arc::clone(&service);
    let worker_id = id.clone();
    let outcome = tokio::task::spawn_blocking(move || worker.export(&worker_id)).await;

    match outcome {
        Ok(Ok(receipt)) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Ok(Err(error)) => error_response(error),
        Err(join_error) => {
            let payload = json!({
                "error": format!("export task for '{id}' aborted: {join_error}"),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn discard_handler(
    State(service): State<Arc<DeclarationService>>,
    Path(session_id): Path<String>,
) -> Response {
    match service.discard(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn projects_handler(State(service): State<Arc<DeclarationService>>) -> Response {
    let payload = json!({ "projects": service.registry().projects() });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn categories_handler(
    State(service): State<Arc<DeclarationService>>,
) -> Response {
    let payload = json!({ "categories": service.registry().categories() });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
