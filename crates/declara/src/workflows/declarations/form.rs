use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::mask::{mask_registry_number, mask_state_id, mask_tax_id};

pub const DEFAULT_CATEGORY_ID: &str = "HIS-2";

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// The four declaration templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    /// Request to the registry office to drop the unit from the social housing program.
    #[serde(alias = "desenquadramento")]
    Deregistration,
    /// Certificate that a buyer fits a usage category's income band.
    #[serde(alias = "enquadramento")]
    CategoryQualification,
    /// Investor's awareness of not fitting the unit's income band.
    #[serde(alias = "investidor")]
    Investor,
    /// First or second acquisition declaration for registry fee reduction.
    #[serde(alias = "primeira_aquisicao")]
    FirstAcquisition,
}

impl DocType {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Deregistration,
            Self::CategoryQualification,
            Self::Investor,
            Self::FirstAcquisition,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Deregistration => "deregistration",
            Self::CategoryQualification => "category_qualification",
            Self::Investor => "investor",
            Self::FirstAcquisition => "first_acquisition",
        }
    }

    const fn legacy_key(self) -> &'static str {
        match self {
            Self::Deregistration => "desenquadramento",
            Self::CategoryQualification => "enquadramento",
            Self::Investor => "investidor",
            Self::FirstAcquisition => "primeira_aquisicao",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Deregistration => "Desenquadramento PMCMV",
            Self::CategoryQualification => "Enquadramento de categoria de uso",
            Self::Investor => "Declaração de investidor",
            Self::FirstAcquisition => "Primeira/segunda aquisição",
        }
    }

    /// Variants whose text depends on a usage category.
    pub const fn requires_category(self) -> bool {
        matches!(self, Self::CategoryQualification | Self::Investor)
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DocType {
    type Err = UnknownChoice;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        DocType::ordered()
            .into_iter()
            .find(|doc| doc.key() == normalized || doc.legacy_key() == normalized)
            .ok_or_else(|| UnknownChoice::new("doc_type", value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionType {
    #[default]
    First,
    Second,
}

impl FromStr for AcquisitionType {
    type Err = UnknownChoice;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first" | "primeira" => Ok(Self::First),
            "second" | "segunda" => Ok(Self::Second),
            _ => Err(UnknownChoice::new("acquisition_type", value)),
        }
    }
}

/// Raised when a closed-choice field receives a value outside its options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {field}")]
pub struct UnknownChoice {
    pub field: &'static str,
    pub value: String,
}

impl UnknownChoice {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// Identity of a buyer or declarant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    /// RG, masked as `NN.NNN.NNN-C`.
    pub state_id: String,
    /// CPF, masked as `NNN.NNN.NNN-NN`.
    pub tax_id: String,
    /// Free-text legal qualification, name first and comma separated.
    pub qualification: String,
}

impl Party {
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitInfo {
    pub unit_number: String,
    pub tower_name: String,
    pub house_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionDate {
    pub day: String,
    pub month: String,
    pub year: String,
}

impl EmissionDate {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            day: date.day().to_string(),
            month: month_name(date.month()).to_string(),
            year: date.year().to_string(),
        }
    }

    /// `day de month de year`, as written in the closing line.
    pub fn long_form(&self) -> String {
        format!("{} de {} de {}", self.day, self.month, self.year)
    }
}

/// Portuguese month name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    let index = month.clamp(1, 12) as usize - 1;
    MONTHS[index]
}

/// Everything the input layer can edit, plus the two derived fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub doc_type: DocType,
    pub project_id: String,
    pub category_id: String,
    pub acquisition_type: AcquisitionType,
    pub party1: Party,
    pub party2: Party,
    /// Toggle gating whether `party2` takes part in the declaration.
    pub second_party: bool,
    pub unit: UnitInfo,
    pub registry_override: String,
    pub emission_date: EmissionDate,
    pub file_name: String,
    pub income_text: String,
}

impl FormState {
    /// Session defaults. Derived fields start empty until the first recompute pass.
    pub fn new(default_project_id: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            doc_type: DocType::Deregistration,
            project_id: default_project_id.into(),
            category_id: DEFAULT_CATEGORY_ID.to_string(),
            acquisition_type: AcquisitionType::First,
            party1: Party::default(),
            party2: Party::default(),
            second_party: false,
            unit: UnitInfo::default(),
            registry_override: String::new(),
            emission_date: EmissionDate::from_date(today),
            file_name: String::new(),
            income_text: String::new(),
        }
    }

    /// The second party, when toggled on.
    pub fn second_party(&self) -> Option<&Party> {
        self.second_party.then_some(&self.party2)
    }

    /// True when a second party is toggled on and has a non-blank name.
    pub fn has_second_party(&self) -> bool {
        self.second_party().is_some_and(Party::has_name)
    }

    pub fn get(&self, field: FormField) -> String {
        match field {
            FormField::DocType => self.doc_type.key().to_string(),
            FormField::ProjectId => self.project_id.clone(),
            FormField::CategoryId => self.category_id.clone(),
            FormField::AcquisitionType => match self.acquisition_type {
                AcquisitionType::First => "first".to_string(),
                AcquisitionType::Second => "second".to_string(),
            },
            FormField::Party1Name => self.party1.name.clone(),
            FormField::Party1StateId => self.party1.state_id.clone(),
            FormField::Party1TaxId => self.party1.tax_id.clone(),
            FormField::Party1Qualification => self.party1.qualification.clone(),
            FormField::Party2Name => self.party2.name.clone(),
            FormField::Party2StateId => self.party2.state_id.clone(),
            FormField::Party2TaxId => self.party2.tax_id.clone(),
            FormField::Party2Qualification => self.party2.qualification.clone(),
            FormField::UnitNumber => self.unit.unit_number.clone(),
            FormField::TowerName => self.unit.tower_name.clone(),
            FormField::HouseNumber => self.unit.house_number.clone(),
            FormField::RegistryOverride => self.registry_override.clone(),
            FormField::EmissionDay => self.emission_date.day.clone(),
            FormField::EmissionMonth => self.emission_date.month.clone(),
            FormField::EmissionYear => self.emission_date.year.clone(),
            FormField::FileName => self.file_name.clone(),
            FormField::IncomeText => self.income_text.clone(),
        }
    }

    /// Store an already-canonicalized value. Closed-choice fields reject values outside
    /// their options and leave the state untouched.
    pub fn set(&mut self, field: FormField, value: String) -> Result<(), UnknownChoice> {
        match field {
            FormField::DocType => self.doc_type = value.parse()?,
            FormField::AcquisitionType => self.acquisition_type = value.parse()?,
            FormField::ProjectId => self.project_id = value,
            FormField::CategoryId => self.category_id = value,
            FormField::Party1Name => self.party1.name = value,
            FormField::Party1StateId => self.party1.state_id = value,
            FormField::Party1TaxId => self.party1.tax_id = value,
            FormField::Party1Qualification => self.party1.qualification = value,
            FormField::Party2Name => self.party2.name = value,
            FormField::Party2StateId => self.party2.state_id = value,
            FormField::Party2TaxId => self.party2.tax_id = value,
            FormField::Party2Qualification => self.party2.qualification = value,
            FormField::UnitNumber => self.unit.unit_number = value,
            FormField::TowerName => self.unit.tower_name = value,
            FormField::HouseNumber => self.unit.house_number = value,
            FormField::RegistryOverride => self.registry_override = value,
            FormField::EmissionDay => self.emission_date.day = value,
            FormField::EmissionMonth => self.emission_date.month = value,
            FormField::EmissionYear => self.emission_date.year = value,
            FormField::FileName => self.file_name = value,
            FormField::IncomeText => self.income_text = value,
        }
        Ok(())
    }
}

/// Identifier of every editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    DocType,
    ProjectId,
    CategoryId,
    AcquisitionType,
    Party1Name,
    Party1StateId,
    Party1TaxId,
    Party1Qualification,
    Party2Name,
    Party2StateId,
    Party2TaxId,
    Party2Qualification,
    UnitNumber,
    TowerName,
    HouseNumber,
    RegistryOverride,
    EmissionDay,
    EmissionMonth,
    EmissionYear,
    FileName,
    IncomeText,
}

impl FormField {
    /// Route raw input through the identifier mask owning this field, if any.
    pub fn canonicalize(self, raw: &str) -> String {
        match self {
            Self::Party1TaxId | Self::Party2TaxId => mask_tax_id(raw),
            Self::Party1StateId | Self::Party2StateId => mask_state_id(raw),
            Self::RegistryOverride => mask_registry_number(raw),
            _ => raw.to_string(),
        }
    }

    pub const fn is_masked(self) -> bool {
        matches!(
            self,
            Self::Party1TaxId
                | Self::Party2TaxId
                | Self::Party1StateId
                | Self::Party2StateId
                | Self::RegistryOverride
        )
    }
}

/// Discrete input-layer event applied to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FormEvent {
    SetField { field: FormField, value: String },
    SetSecondParty { enabled: bool },
}

impl FormEvent {
    pub fn set(field: FormField, value: impl Into<String>) -> Self {
        Self::SetField {
            field,
            value: value.into(),
        }
    }
}
