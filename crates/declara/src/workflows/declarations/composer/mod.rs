//! Assembles the four declaration templates into typed [`Document`] blocks.
//!
//! Reference lookups are the only way composing can fail. Every other field falls
//! back to placeholder text so a half-filled form still renders.

mod acquisition;
mod deregistration;
mod investor;
mod qualification;

use tracing::debug;

use super::document::{Alignment, Block, Document, Signatory, Span};
use super::form::{DocType, FormState};
use super::plural::{self, GrammaticalForms};
use crate::registry::{Category, Project, ReferenceRegistry};

/// Placeholder for blank identity fields.
pub const BLANK_ID: &str = "_________";
/// Placeholder for a blank unit or house number.
pub const BLANK_UNIT: &str = "_____";

/// A reference the current form points at could not be found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("unknown project '{0}'")]
    UnknownProject(String),
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
}

/// Everything a template reads, resolved once per render.
pub(crate) struct Context<'a> {
    pub state: &'a FormState,
    pub project: &'a Project,
    pub category: Option<&'a Category>,
    pub forms: &'static GrammaticalForms,
}

impl Context<'_> {
    fn category(&self) -> Result<&Category, ResolutionError> {
        self.category
            .ok_or_else(|| ResolutionError::UnknownCategory(self.state.category_id.clone()))
    }

    /// Income wording: the form's override first, then the category default.
    fn income_text(&self) -> Option<String> {
        let text = self.state.income_text.trim();
        if !text.is_empty() {
            return Some(text.to_string());
        }
        self.category
            .map(|category| category.income_range_text.clone())
            .filter(|text| !text.trim().is_empty())
    }

    fn place_date(&self) -> String {
        format!(
            "{}, {}",
            self.project.city,
            self.state.emission_date.long_form()
        )
    }

    /// Registry number the unit is actually filed under.
    fn effective_registry_number(&self) -> &str {
        if self.state.registry_override.trim().is_empty() {
            &self.project.registry_number
        } else {
            &self.state.registry_override
        }
    }

    /// Closing block signed by the project's legal entity.
    fn entity_closing(&self) -> Block {
        Block::Closing {
            place_date: self.place_date(),
            alignment: Alignment::Center,
            signatories: vec![Signatory {
                name: self.project.legal_entity.clone(),
                details: vec![format!("CNPJ: {}", self.project.tax_id)],
            }],
            note: None,
        }
    }
}

/// Renders form state against a registry.
pub struct DocumentComposer<'r> {
    registry: &'r dyn ReferenceRegistry,
}

impl<'r> DocumentComposer<'r> {
    pub fn new(registry: &'r dyn ReferenceRegistry) -> Self {
        Self { registry }
    }

    pub fn compose(&self, state: &FormState) -> Result<Document, ResolutionError> {
        let project = self
            .registry
            .project(&state.project_id)
            .ok_or_else(|| ResolutionError::UnknownProject(state.project_id.clone()))?;
        let category = self.registry.category(&state.category_id);

        let context = Context {
            state,
            project,
            category,
            forms: plural::resolve_for(state),
        };

        let blocks = match state.doc_type {
            DocType::Deregistration => deregistration::blocks(&context),
            DocType::CategoryQualification => qualification::blocks(&context)?,
            DocType::Investor => investor::blocks(&context)?,
            DocType::FirstAcquisition => acquisition::blocks(&context),
        };

        debug!(
            doc_type = %state.doc_type,
            project = %project.id,
            blocks = blocks.len(),
            "composed declaration"
        );
        Ok(Document::new(state.doc_type, blocks))
    }
}

/// `value` or `placeholder` when blank.
pub(crate) fn or_placeholder(value: &str, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}

/// The project's qualification spans as an opening paragraph.
pub(crate) fn qualification_paragraph(project: &Project) -> Block {
    Block::paragraph(project.qualification.clone())
}

/// Collapse adjacent runs of the same kind so callers can build spans piecemeal.
pub(crate) fn merge_spans(spans: Vec<Span>) -> Vec<Span> {
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        if span.text().is_empty() {
            continue;
        }
        match (merged.last_mut(), span) {
            (Some(Span::Plain(previous)), Span::Plain(next)) => previous.push_str(&next),
            (Some(Span::Emphasis(previous)), Span::Emphasis(next)) => previous.push_str(&next),
            (_, span) => merged.push(span),
        }
    }
    merged
}
