//! Read-only reference data: development projects and usage categories.
//!
//! The registry is consumed by the declaration workflow for lookups only; both lookups
//! may fail and callers decide whether a miss is fatal.

mod builtin;
pub mod domain;
pub mod emphasis;
mod loader;

use std::io::Read;
use std::path::Path;

use tracing::info;

pub use domain::{Category, CategoryCode, Project, UnknownCategoryCode};
pub use emphasis::{emphasize, EMPHASIS_ALLOWLIST};

/// Lookup seam between the workflow and wherever project/category records live.
pub trait ReferenceRegistry: Send + Sync {
    fn project(&self, id: &str) -> Option<&Project>;
    fn category(&self, id: &str) -> Option<&Category>;
    fn projects(&self) -> &[Project];
    fn categories(&self) -> &[Category];
}

/// Errors raised while loading a replacement project table.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read project table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid project CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("project on line {line} has an empty id")]
    MissingProjectId { line: usize },
    #[error("project id '{0}' appears more than once")]
    DuplicateProject(String),
    #[error("project table contains no rows")]
    EmptyProjectTable,
}

/// In-memory registry backed by fixed tables.
#[derive(Debug, Clone)]
pub struct StaticRegistry {
    projects: Vec<Project>,
    categories: Vec<Category>,
}

impl StaticRegistry {
    pub fn new(projects: Vec<Project>, categories: Vec<Category>) -> Self {
        Self {
            projects,
            categories,
        }
    }

    /// The developments and categories the declarations are issued for.
    pub fn builtin() -> Self {
        Self::new(builtin::projects(), builtin::categories())
    }

    /// Replace the project table with rows parsed from CSV, keeping the categories.
    pub fn with_projects_from_reader<R: Read>(self, reader: R) -> Result<Self, RegistryError> {
        let projects = loader::parse_projects(reader)?;
        info!(count = projects.len(), "loaded project table from csv");
        Ok(Self {
            projects,
            categories: self.categories,
        })
    }

    pub fn with_projects_from_path<P: AsRef<Path>>(self, path: P) -> Result<Self, RegistryError> {
        let file = std::fs::File::open(path)?;
        self.with_projects_from_reader(file)
    }
}

impl Default for StaticRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReferenceRegistry for StaticRegistry {
    fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    fn category(&self, id: &str) -> Option<&Category> {
        let code = id.parse::<CategoryCode>().ok()?;
        self.categories.iter().find(|category| category.code == code)
    }

    fn projects(&self) -> &[Project] {
        &self.projects
    }

    fn categories(&self) -> &[Category] {
        &self.categories
    }
}
