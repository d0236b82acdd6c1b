//! End-to-end scenarios for the declaration workflow through its public facade: session
//! mutations, composition against a registry, and export to disk.

use std::io::Cursor;
use std::sync::Arc;

use chrono::NaiveDate;
use declara::registry::{ReferenceRegistry, StaticRegistry};
use declara::workflows::declarations::{
    Block, DeclarationSession, DocType, ExportError, ExportStatus, FormEvent, FormField,
    HtmlFileExporter, ResolutionError, TextFileExporter,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 20).expect("valid date")
}

fn session(registry: Arc<dyn ReferenceRegistry>) -> DeclarationSession {
    DeclarationSession::new(registry, today())
}

fn builtin() -> Arc<dyn ReferenceRegistry> {
    Arc::new(StaticRegistry::builtin())
}

#[test]
fn qualification_certificate_from_keystrokes_to_html() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut session = session(builtin());

    for event in [
        FormEvent::set(FormField::DocType, "enquadramento"),
        FormEvent::set(FormField::ProjectId, "soul"),
        FormEvent::set(FormField::CategoryId, "HIS-1"),
        FormEvent::set(
            FormField::Party1Qualification,
            "CICLANA DE SOUZA, brasileira, casada, <professora>",
        ),
    ] {
        session.apply(event);
    }

    let state = session.state();
    assert_eq!(
        state.file_name,
        "DECLARAÇÃO DE ENQUADRAMENTO HIS-1 - CICLANA DE SOUZA"
    );
    assert_eq!(state.income_text, "inferior a R$4.700,00");
    assert_eq!(state.emission_date.long_form(), "20 de novembro de 2025");

    let receipt = session
        .export(
            &HtmlFileExporter::new(dir.path()),
            &TextFileExporter::new(dir.path()),
        )
        .expect("export succeeds");
    assert_eq!(
        receipt.file_name,
        "DECLARAÇÃO DE ENQUADRAMENTO HIS-1 - CICLANA DE SOUZA.pdf"
    );
    assert_eq!(session.status(), &ExportStatus::Idle);

    let html = std::fs::read_to_string(&receipt.path).expect("html written");
    assert!(html.contains("@page { size: A4 portrait; margin: 0mm; }"));
    assert!(html.contains("HABITAÇÃO DE INTERESSE SOCIAL (HIS-1)"));
    assert!(html.contains("<b>CICLANA DE SOUZA</b>, brasileira, casada, &lt;professora&gt;"));
    assert!(html.contains("Diadema, 20 de novembro de 2025"));
}

#[test]
fn fallback_writes_text_when_html_path_is_unwritable() {
    let dir = tempfile::tempdir().expect("temp dir");
    let blocked = dir.path().join("blocked");
    std::fs::write(&blocked, "not a directory").expect("placeholder file");

    let mut session = session(builtin());
    session.apply(FormEvent::set(FormField::DocType, "first_acquisition"));
    session.apply(FormEvent::set(FormField::Party1Name, "Rui"));

    let receipt = session
        .export(
            &HtmlFileExporter::new(&blocked),
            &TextFileExporter::new(dir.path()),
        )
        .expect("fallback succeeds");

    assert!(receipt.fallback_used);
    assert_eq!(receipt.exporter, "text");
    assert!(matches!(session.status(), ExportStatus::Failed { .. }));

    let text = std::fs::read_to_string(&receipt.path).expect("text written");
    assert!(text.contains("( X ) (1) esta é a minha primeira aquisição imobiliária"));
    assert!(receipt
        .path
        .ends_with("DECLARAÇÃO PRIMEIRA AQUISIÇÃO - RUI.txt"));
}

#[test]
fn total_export_failure_reports_both_paths() {
    let dir = tempfile::tempdir().expect("temp dir");
    let blocked = dir.path().join("blocked");
    std::fs::write(&blocked, "not a directory").expect("placeholder file");

    let mut session = session(builtin());
    let error = session
        .export(
            &HtmlFileExporter::new(&blocked),
            &TextFileExporter::new(&blocked),
        )
        .expect_err("every path fails");

    assert!(matches!(error, ExportError::Failed { .. }));
    assert!(!session.status().is_generating());
}

#[test]
fn csv_registry_drives_composition() {
    let csv = "id,name,legal_entity,tax_id,registry_office,registry_number,parent_registry,house_based,qualification,city,address\n\
               jardim,Jardim das Flores,JARDIM SPE LTDA,22.222.222/0001-22,2° Oficial de Registro de Imóveis de Campinas,55.001,nao,sim,\"JARDIM SPE LTDA., representada por DIOGO ROSSI DE LIMA CANO\",Campinas,\"Rua das Flores, 1\"\n";
    let registry = StaticRegistry::builtin()
        .with_projects_from_reader(Cursor::new(csv))
        .expect("csv loads");
    let mut session = session(Arc::new(registry));

    assert_eq!(session.state().project_id, "jardim");
    session.apply(FormEvent::set(FormField::HouseNumber, "7"));
    assert_eq!(
        session.state().file_name,
        "DECLARAÇÃO DE DESENQUADRAMENTO PMCMV - CASA 7"
    );

    let document = session.document().expect("document composes");
    assert_eq!(document.doc_type, DocType::Deregistration);
    let text = document.to_plain_text();
    assert!(text.contains("objeto da matrícula nº 55.001 do 2° Oficial"));
    assert!(text.contains("referente a Casa *7*"));
    assert!(document.emphasized().contains(&"DIOGO ROSSI DE LIMA CANO"));

    session.apply(FormEvent::set(FormField::ProjectId, "altus"));
    assert_eq!(
        session.document(),
        Err(ResolutionError::UnknownProject("altus".to_string()))
    );
}

#[test]
fn second_party_toggle_switches_signature_block() {
    let mut session = session(builtin());
    session.apply(FormEvent::set(FormField::DocType, "investor"));
    session.apply(FormEvent::set(FormField::Party1Name, "Ana"));
    session.apply(FormEvent::set(FormField::Party2Name, "Bia"));

    let signatures = |session: &DeclarationSession| -> usize {
        session
            .document()
            .expect("document composes")
            .blocks
            .iter()
            .find_map(|block| match block {
                Block::Closing { signatories, .. } => Some(signatories.len()),
                _ => None,
            })
            .expect("closing present")
    };

    assert_eq!(signatures(&session), 1);
    session.apply(FormEvent::SetSecondParty { enabled: true });
    assert_eq!(signatures(&session), 2);
}
