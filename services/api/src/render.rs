use crate::infra::{load_registry, parse_acquisition, parse_date, parse_doc_type};
use chrono::{Local, NaiveDate};
use clap::Args;
use declara::config::AppConfig;
use declara::error::AppError;
use declara::registry::ReferenceRegistry;
use declara::workflows::declarations::{
    AcquisitionType, DeclarationSession, Document, DocType, ExportReceipt, FormEvent, FormField,
    HtmlFileExporter, TextFileExporter,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    /// Declaration template: deregistration, category_qualification, investor, first_acquisition
    #[arg(long, value_parser = parse_doc_type, default_value = "deregistration")]
    pub(crate) doc_type: DocType,
    /// Project id from the registry (defaults to the first project)
    #[arg(long)]
    pub(crate) project: Option<String>,
    /// Usage category code (HIS-1, HIS-2 or HMP)
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// First or second acquisition
    #[arg(long, value_parser = parse_acquisition)]
    pub(crate) acquisition: Option<AcquisitionType>,
    /// Buyer's full name
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Buyer's RG, masked on input
    #[arg(long)]
    pub(crate) rg: Option<String>,
    /// Buyer's CPF, masked on input
    #[arg(long)]
    pub(crate) cpf: Option<String>,
    /// Buyer's legal qualification, name first and comma separated
    #[arg(long)]
    pub(crate) qualification: Option<String>,
    /// Second buyer's name; enables the second party
    #[arg(long)]
    pub(crate) second_name: Option<String>,
    #[arg(long)]
    pub(crate) second_rg: Option<String>,
    #[arg(long)]
    pub(crate) second_cpf: Option<String>,
    #[arg(long)]
    pub(crate) unit: Option<String>,
    #[arg(long)]
    pub(crate) tower: Option<String>,
    #[arg(long)]
    pub(crate) house: Option<String>,
    /// Individual registry number of the unit
    #[arg(long)]
    pub(crate) registry_number: Option<String>,
    /// Emission date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Replace the category's default income text
    #[arg(long)]
    pub(crate) income_text: Option<String>,
    /// Replace the derived file name
    #[arg(long)]
    pub(crate) file_name: Option<String>,
    /// Write the declaration to the output directory after printing it
    #[arg(long)]
    pub(crate) export: bool,
    /// Override the configured output directory
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
    /// CSV file replacing the built-in project table
    #[arg(long)]
    pub(crate) projects_csv: Option<PathBuf>,
}

impl RenderArgs {
    /// Input events in the order a user would fill the form. Overrides of derived
    /// fields come last so source edits do not rewrite them.
    pub(crate) fn events(&self) -> Vec<FormEvent> {
        let mut events = vec![FormEvent::set(FormField::DocType, self.doc_type.key())];

        let sources = [
            (FormField::ProjectId, &self.project),
            (FormField::CategoryId, &self.category),
            (FormField::Party1Name, &self.name),
            (FormField::Party1StateId, &self.rg),
            (FormField::Party1TaxId, &self.cpf),
            (FormField::Party1Qualification, &self.qualification),
            (FormField::Party2Name, &self.second_name),
            (FormField::Party2StateId, &self.second_rg),
            (FormField::Party2TaxId, &self.second_cpf),
            (FormField::UnitNumber, &self.unit),
            (FormField::TowerName, &self.tower),
            (FormField::HouseNumber, &self.house),
            (FormField::RegistryOverride, &self.registry_number),
        ];
        events.extend(set_events(&sources));

        if let Some(acquisition) = self.acquisition {
            let value = match acquisition {
                AcquisitionType::First => "first",
                AcquisitionType::Second => "second",
            };
            events.push(FormEvent::set(FormField::AcquisitionType, value));
        }
        if self.second_name.is_some() {
            events.push(FormEvent::SetSecondParty { enabled: true });
        }

        let overrides = [
            (FormField::IncomeText, &self.income_text),
            (FormField::FileName, &self.file_name),
        ];
        events.extend(set_events(&overrides));
        events
    }
}

fn set_events(fields: &[(FormField, &Option<String>)]) -> Vec<FormEvent> {
    fields
        .iter()
        .filter_map(|(field, value)| value.as_ref().map(|value| FormEvent::set(*field, value.clone())))
        .collect()
}

#[derive(Args, Debug, Default)]
pub(crate) struct RegistryArgs {
    /// CSV file replacing the built-in project table
    #[arg(long)]
    pub(crate) projects_csv: Option<PathBuf>,
}

pub(crate) struct RenderOutcome {
    pub(crate) document: Document,
    pub(crate) receipt: Option<ExportReceipt>,
}

pub(crate) fn run_render(args: RenderArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let projects_csv = args
        .projects_csv
        .clone()
        .or_else(|| config.registry.projects_csv.clone());
    let registry = load_registry(projects_csv.as_deref())?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.export.output_dir.clone());
    let today = Local::now().date_naive();

    let outcome = render_declaration(&args, Arc::new(registry), today, &output_dir)?;

    print!("{}", outcome.document.to_plain_text());
    if let Some(receipt) = outcome.receipt {
        println!("\nExported {} via {}", receipt.path.display(), receipt.exporter);
        if let Some(reason) = receipt.primary_failure {
            println!("  Primary exporter failed: {reason}");
        }
    }

    Ok(())
}

pub(crate) fn render_declaration(
    args: &RenderArgs,
    registry: Arc<dyn ReferenceRegistry>,
    today: NaiveDate,
    output_dir: &Path,
) -> Result<RenderOutcome, AppError> {
    let mut session = DeclarationSession::new(registry, args.date.unwrap_or(today));
    for event in args.events() {
        session.apply(event);
    }

    let document = session.document()?;
    let receipt = if args.export {
        let receipt = session.export(
            &HtmlFileExporter::new(output_dir),
            &TextFileExporter::new(output_dir),
        )?;
        Some(receipt)
    } else {
        None
    };

    Ok(RenderOutcome { document, receipt })
}

pub(crate) fn run_registry_listing(args: RegistryArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let projects_csv = args.projects_csv.or(config.registry.projects_csv);
    let registry = load_registry(projects_csv.as_deref())?;
    print!("{}", registry_listing(&registry));
    Ok(())
}

pub(crate) fn registry_listing(registry: &dyn ReferenceRegistry) -> String {
    let mut lines = vec!["Projects".to_string()];
    for project in registry.projects() {
        let mut line = format!(
            "- {} | {} | {} | matrícula {} ({})",
            project.id, project.name, project.city, project.registry_number, project.registry_office
        );
        if project.house_based {
            line.push_str(" | casas");
        }
        lines.push(line);
    }

    lines.push(String::new());
    lines.push("Categories".to_string());
    for category in registry.categories() {
        lines.push(format!(
            "- {} | {} | {}",
            category.id(),
            category.full_label,
            category.income_range_text
        ));
    }

    let mut listing = lines.join("\n");
    listing.push('\n');
    listing
}
