use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::registry::{ReferenceRegistry, StaticRegistry};
use crate::workflows::declarations::export::{DocumentExporter, ExportFailure, ExportRequest};
use crate::workflows::declarations::form::{FormEvent, FormField};
use crate::workflows::declarations::service::DeclarationService;
use crate::workflows::declarations::session::DeclarationSession;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid date")
}

pub(super) fn registry() -> Arc<dyn ReferenceRegistry> {
    Arc::new(StaticRegistry::builtin())
}

pub(super) fn session() -> DeclarationSession {
    DeclarationSession::new(registry(), today())
}

pub(super) fn session_with(fields: &[(FormField, &str)]) -> DeclarationSession {
    let mut session = session();
    for (field, value) in fields {
        session.apply(FormEvent::set(*field, *value));
    }
    session
}

/// Exporter that succeeds and keeps every request it saw.
#[derive(Debug, Default)]
pub(super) struct RecordingExporter {
    requests: Mutex<Vec<ExportRequest>>,
}

impl RecordingExporter {
    pub(super) fn requests(&self) -> Vec<ExportRequest> {
        self.requests.lock().expect("recording mutex poisoned").clone()
    }
}

impl DocumentExporter for RecordingExporter {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn export(&self, request: &ExportRequest) -> Result<PathBuf, ExportFailure> {
        self.requests
            .lock()
            .expect("recording mutex poisoned")
            .push(request.clone());
        Ok(PathBuf::from(&request.file_name))
    }
}

/// Exporter that always fails and counts attempts.
#[derive(Debug)]
pub(super) struct FailingExporter {
    reason: &'static str,
    calls: AtomicUsize,
}

impl FailingExporter {
    pub(super) fn new(reason: &'static str) -> Self {
        Self {
            reason,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DocumentExporter for FailingExporter {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn export(&self, _request: &ExportRequest) -> Result<PathBuf, ExportFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ExportFailure::Rejected(self.reason.to_string()))
    }
}

pub(super) fn service_with(
    primary: Arc<dyn DocumentExporter>,
    fallback: Arc<dyn DocumentExporter>,
) -> Arc<DeclarationService> {
    Arc::new(DeclarationService::new(registry(), primary, fallback))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
