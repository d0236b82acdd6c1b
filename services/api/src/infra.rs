use chrono::NaiveDate;
use declara::registry::{RegistryError, StaticRegistry};
use declara::workflows::declarations::{AcquisitionType, DocType};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Built-in tables, with the project table swapped for `projects_csv` when one is given.
pub(crate) fn load_registry(projects_csv: Option<&Path>) -> Result<StaticRegistry, RegistryError> {
    let registry = StaticRegistry::builtin();
    match projects_csv {
        Some(path) => {
            info!(path = %path.display(), "loading project table");
            registry.with_projects_from_path(path)
        }
        None => Ok(registry),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_doc_type(raw: &str) -> Result<DocType, String> {
    raw.parse::<DocType>().map_err(|err| {
        let options: Vec<&str> = DocType::ordered().iter().map(|doc| doc.key()).collect();
        format!("{err}; expected one of {}", options.join(", "))
    })
}

pub(crate) fn parse_acquisition(raw: &str) -> Result<AcquisitionType, String> {
    raw.parse::<AcquisitionType>()
        .map_err(|err| format!("{err}; expected first or second"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use declara::registry::ReferenceRegistry;

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(
            parse_date(" 2025-03-07 "),
            Ok(NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid date"))
        );
        assert!(parse_date("07/03/2025").is_err());
    }

    #[test]
    fn doc_type_errors_list_the_options() {
        assert_eq!(parse_doc_type("investidor"), Ok(DocType::Investor));
        let message = parse_doc_type("contrato").expect_err("unknown doc type");
        assert!(message.contains("deregistration, category_qualification, investor, first_acquisition"));
        assert_eq!(parse_acquisition("segunda"), Ok(AcquisitionType::Second));
    }

    #[test]
    fn registry_defaults_to_builtin_tables() {
        let registry = load_registry(None).expect("builtin registry");
        assert_eq!(registry.projects().len(), 9);
        assert_eq!(registry.categories().len(), 3);
    }

    #[test]
    fn registry_reports_missing_csv() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("projects.csv");
        assert!(matches!(
            load_registry(Some(&missing)),
            Err(RegistryError::Io(_))
        ));
    }
}
