use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::workflows::declarations::document::Span;

/// Real-estate development whose legal entity signs or receives the declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub legal_entity: String,
    pub tax_id: String,
    pub registry_office: String,
    pub registry_number: String,
    /// The registry number is the umbrella ("mãe") registration of the development.
    pub is_parent_registry: bool,
    /// Units are identified by house number instead of apartment + tower.
    pub house_based: bool,
    /// Pre-authored qualification of the legal entity with its emphasis spans.
    pub qualification: Vec<Span>,
    pub city: String,
    pub address: String,
}

/// Closed set of usage categories recognised by the municipal housing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryCode {
    #[serde(rename = "HIS-1")]
    His1,
    #[serde(rename = "HIS-2")]
    His2,
    #[serde(rename = "HMP")]
    Hmp,
}

impl CategoryCode {
    pub const fn ordered() -> [Self; 3] {
        [Self::His1, Self::His2, Self::Hmp]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::His1 => "HIS-1",
            Self::His2 => "HIS-2",
            Self::Hmp => "HMP",
        }
    }
}

impl fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category code '{0}'")]
pub struct UnknownCategoryCode(pub String);

impl FromStr for CategoryCode {
    type Err = UnknownCategoryCode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        CategoryCode::ordered()
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCategoryCode(value.to_string()))
    }
}

/// Income band a unit is destined to, with its default income wording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub code: CategoryCode,
    pub label: String,
    pub full_label: String,
    pub income_range_text: String,
    pub value_limit: u32,
}

impl Category {
    pub fn id(&self) -> &'static str {
        self.code.as_str()
    }
}
