use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use super::composer::{DocumentComposer, ResolutionError};
use super::derived::{DerivedField, DerivedFieldEngine};
use super::document::Document;
use super::export::{
    export_file_name, export_with_fallback, DocumentExporter, ExportError, ExportReceipt,
    ExportRequest, ExportStatus,
};
use super::form::{FormEvent, FormField, FormState};
use super::plural::{self, GrammaticalForms, GrammaticalNumber};
use crate::registry::ReferenceRegistry;

/// One form being filled in: state, derived fields, and export status.
///
/// Every mutation runs mask → store → recompute before returning, so readers never
/// observe stale derived fields.
#[derive(Clone)]
pub struct DeclarationSession {
    registry: Arc<dyn ReferenceRegistry>,
    engine: DerivedFieldEngine,
    state: FormState,
    status: ExportStatus,
}

/// Read model handed to the input layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub state: FormState,
    pub export_status: ExportStatus,
    pub grammatical_number: GrammaticalNumber,
    pub export_file_name: String,
}

impl DeclarationSession {
    /// Start a session on the registry's first project with derived fields populated.
    pub fn new(registry: Arc<dyn ReferenceRegistry>, today: NaiveDate) -> Self {
        let default_project = registry
            .projects()
            .first()
            .map(|project| project.id.clone())
            .unwrap_or_default();
        let mut state = FormState::new(default_project, today);
        let engine = DerivedFieldEngine;
        engine.initialize(&mut state, registry.as_ref());

        Self {
            registry,
            engine,
            state,
            status: ExportStatus::Idle,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn status(&self) -> &ExportStatus {
        &self.status
    }

    pub fn registry(&self) -> &dyn ReferenceRegistry {
        self.registry.as_ref()
    }

    pub fn grammatical_forms(&self) -> &'static GrammaticalForms {
        plural::resolve_for(&self.state)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state.clone(),
            export_status: self.status.clone(),
            grammatical_number: self.grammatical_forms().number,
            export_file_name: export_file_name(&self.state.file_name),
        }
    }

    /// Apply one input event and return the derived fields it rewrote.
    pub fn apply(&mut self, event: FormEvent) -> Vec<DerivedField> {
        match event {
            FormEvent::SetField { field, value } => self.set_field(field, &value),
            FormEvent::SetSecondParty { enabled } => {
                self.state.second_party = enabled;
                debug!(enabled, "second party toggled");
                Vec::new()
            }
        }
    }

    /// Mask, store, recompute. Unknown closed-choice values are ignored.
    pub fn set_field(&mut self, field: FormField, raw: &str) -> Vec<DerivedField> {
        let value = field.canonicalize(raw);
        if let Err(error) = self.state.set(field, value) {
            warn!(%error, "ignoring form value");
            return Vec::new();
        }
        self.engine
            .recompute(&mut self.state, field, self.registry.as_ref())
    }

    pub fn document(&self) -> Result<Document, ResolutionError> {
        DocumentComposer::new(self.registry.as_ref()).compose(&self.state)
    }

    /// Enter the generating state and snapshot the document for an exporter.
    ///
    /// Refused while another export is running. A document that cannot be composed
    /// leaves the status untouched.
    pub fn begin_export(&mut self) -> Result<ExportRequest, ExportError> {
        if self.status.is_generating() {
            return Err(ExportError::InProgress);
        }
        let document = self.document()?;
        self.status = ExportStatus::Generating;
        Ok(ExportRequest::new(document, &self.state.file_name))
    }

    /// Leave the generating state. Always clears the flag.
    pub fn finish_export(&mut self, outcome: &Result<ExportReceipt, ExportError>) {
        self.status = match outcome {
            Ok(receipt) => match &receipt.primary_failure {
                Some(reason) => ExportStatus::Failed {
                    reason: reason.clone(),
                },
                None => ExportStatus::Idle,
            },
            Err(error @ ExportError::Failed { .. }) => ExportStatus::Failed {
                reason: error.to_string(),
            },
            Err(_) => ExportStatus::Idle,
        };
    }

    /// Synchronous export: primary first, one fallback attempt on failure.
    pub fn export(
        &mut self,
        primary: &dyn DocumentExporter,
        fallback: &dyn DocumentExporter,
    ) -> Result<ExportReceipt, ExportError> {
        let request = self.begin_export()?;
        let outcome = export_with_fallback(&request, primary, fallback);
        self.finish_export(&outcome);
        outcome
    }
}

impl fmt::Debug for DeclarationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeclarationSession")
            .field("state", &self.state)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
