//! Derived form fields and the statically declared graph that feeds them.
//!
//! The engine is an explicit pass run once after every mutation. Targets are
//! recomputed in declaration order whenever one of their sources was written, so the
//! update order never depends on observer registration.
//!
//! A direct write to `file_name` is kept only until the next source mutation; a direct
//! write to `income_text` is kept until the next `category_id` mutation.

use serde::Serialize;
use tracing::debug;

use super::form::{DocType, FormField, FormState};
use crate::registry::ReferenceRegistry;

pub const DEREGISTRATION_PREFIX: &str = "DECLARAÇÃO DE DESENQUADRAMENTO PMCMV - ";
pub const INVESTOR_PREFIX: &str = "DECLARAÇÃO DE INVESTIDOR - ";
pub const FIRST_ACQUISITION_PREFIX: &str = "DECLARAÇÃO PRIMEIRA AQUISIÇÃO - ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedField {
    IncomeText,
    FileName,
}

/// `target ← sources` edge of the derivation graph.
#[derive(Debug, Clone, Copy)]
pub struct Dependency {
    pub target: DerivedField,
    pub sources: &'static [FormField],
}

impl Dependency {
    pub fn depends_on(&self, field: FormField) -> bool {
        self.sources.contains(&field)
    }
}

pub const DEPENDENCIES: [Dependency; 2] = [
    Dependency {
        target: DerivedField::IncomeText,
        sources: &[FormField::CategoryId],
    },
    Dependency {
        target: DerivedField::FileName,
        sources: &[
            FormField::DocType,
            FormField::CategoryId,
            FormField::Party1Name,
            FormField::Party1Qualification,
            FormField::UnitNumber,
            FormField::HouseNumber,
            FormField::ProjectId,
        ],
    },
];

/// Stateless recompute pass over [`DEPENDENCIES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DerivedFieldEngine;

impl DerivedFieldEngine {
    /// Recompute every target fed by `changed`, returning the targets rewritten.
    pub fn recompute(
        &self,
        state: &mut FormState,
        changed: FormField,
        registry: &dyn ReferenceRegistry,
    ) -> Vec<DerivedField> {
        let targets: Vec<DerivedField> = DEPENDENCIES
            .iter()
            .filter(|dependency| dependency.depends_on(changed))
            .map(|dependency| dependency.target)
            .collect();

        for target in &targets {
            self.apply(*target, state, registry);
        }

        if !targets.is_empty() {
            debug!(?changed, ?targets, "recomputed derived fields");
        }
        targets
    }

    /// Populate every target; used once when a session starts.
    pub fn initialize(&self, state: &mut FormState, registry: &dyn ReferenceRegistry) {
        for dependency in &DEPENDENCIES {
            self.apply(dependency.target, state, registry);
        }
    }

    fn apply(&self, target: DerivedField, state: &mut FormState, registry: &dyn ReferenceRegistry) {
        match target {
            DerivedField::IncomeText => {
                // an unknown category keeps whatever text is already there
                if let Some(text) = default_income_text(state, registry) {
                    state.income_text = text;
                }
            }
            DerivedField::FileName => state.file_name = derive_file_name(state, registry),
        }
    }
}

/// Default income wording of the selected category, if it resolves.
pub fn default_income_text(state: &FormState, registry: &dyn ReferenceRegistry) -> Option<String> {
    registry
        .category(&state.category_id)
        .map(|category| category.income_range_text.clone())
}

/// File name for the current document type: fixed prefix plus an upper-cased suffix.
pub fn derive_file_name(state: &FormState, registry: &dyn ReferenceRegistry) -> String {
    let (prefix, suffix) = match state.doc_type {
        DocType::Deregistration => {
            let house_based = registry
                .project(&state.project_id)
                .is_some_and(|project| project.house_based);
            let suffix = if house_based {
                labelled("CASA", &state.unit.house_number)
            } else {
                labelled("APT", &state.unit.unit_number)
            };
            (DEREGISTRATION_PREFIX.to_string(), suffix)
        }
        DocType::CategoryQualification => {
            let name = state
                .party1
                .qualification
                .split(',')
                .next()
                .unwrap_or_default()
                .to_string();
            (
                format!("DECLARAÇÃO DE ENQUADRAMENTO {} - ", state.category_id),
                name,
            )
        }
        DocType::Investor => (INVESTOR_PREFIX.to_string(), state.party1.name.clone()),
        DocType::FirstAcquisition => (
            FIRST_ACQUISITION_PREFIX.to_string(),
            state.party1.name.clone(),
        ),
    };

    format!("{prefix}{}", suffix.trim().to_uppercase())
}

fn labelled(label: &str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        String::new()
    } else {
        format!("{label} {value}")
    }
}
