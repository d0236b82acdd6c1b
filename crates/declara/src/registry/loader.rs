use std::collections::HashSet;
use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::domain::Project;
use super::emphasis::{emphasize, EMPHASIS_ALLOWLIST};
use super::RegistryError;

/// Parse a project table exported as CSV.
///
/// Expected headers: `id,name,legal_entity,tax_id,registry_office,registry_number,
/// parent_registry,house_based,qualification,city,address`.
pub(crate) fn parse_projects<R: Read>(reader: R) -> Result<Vec<Project>, RegistryError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut projects = Vec::new();
    let mut seen = HashSet::new();

    for (index, record) in csv_reader.deserialize::<ProjectRow>().enumerate() {
        let row = record?;
        if row.id.is_empty() {
            // header occupies line 1
            return Err(RegistryError::MissingProjectId { line: index + 2 });
        }
        if !seen.insert(row.id.clone()) {
            return Err(RegistryError::DuplicateProject(row.id));
        }
        projects.push(row.into_project());
    }

    if projects.is_empty() {
        return Err(RegistryError::EmptyProjectTable);
    }

    Ok(projects)
}

#[derive(Debug, Deserialize)]
struct ProjectRow {
    id: String,
    name: String,
    legal_entity: String,
    tax_id: String,
    registry_office: String,
    registry_number: String,
    #[serde(deserialize_with = "flag")]
    parent_registry: bool,
    #[serde(default, deserialize_with = "flag")]
    house_based: bool,
    qualification: String,
    city: String,
    address: String,
}

impl ProjectRow {
    fn into_project(self) -> Project {
        Project {
            qualification: emphasize(&self.qualification, &EMPHASIS_ALLOWLIST),
            id: self.id,
            name: self.name,
            legal_entity: self.legal_entity,
            tax_id: self.tax_id,
            registry_office: self.registry_office,
            registry_number: self.registry_number,
            is_parent_registry: self.parent_registry,
            house_based: self.house_based,
            city: self.city,
            address: self.address,
        }
    }
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "sim" | "s" => Ok(true),
        "false" | "0" | "no" | "não" | "nao" | "n" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected a yes/no flag, found '{other}'"
        ))),
    }
}
