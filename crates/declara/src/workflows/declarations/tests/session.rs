use std::sync::Arc;

use super::common::*;

use crate::workflows::declarations::derived::{DerivedField, DEREGISTRATION_PREFIX};
use crate::workflows::declarations::export::{ExportError, ExportStatus, PageGeometry};
use crate::workflows::declarations::form::{DocType, FormEvent, FormField};
use crate::workflows::declarations::plural::GrammaticalNumber;
use crate::workflows::declarations::service::{DeclarationServiceError, SessionId};

#[test]
fn new_session_starts_with_derived_defaults() {
    let session = session();
    let snapshot = session.snapshot();

    assert_eq!(snapshot.state.project_id, "altus");
    assert_eq!(snapshot.state.doc_type, DocType::Deregistration);
    assert_eq!(snapshot.state.income_text, "inferior a R$4.700,01 X R$8.600,00");
    assert_eq!(snapshot.state.file_name, DEREGISTRATION_PREFIX);
    assert_eq!(
        snapshot.export_file_name,
        format!("{DEREGISTRATION_PREFIX}.pdf")
    );
    assert_eq!(snapshot.export_status, ExportStatus::Idle);
    assert_eq!(snapshot.grammatical_number, GrammaticalNumber::Singular);
    assert_eq!(snapshot.state.emission_date.month, "março");
}

#[test]
fn masked_fields_are_canonicalized_on_write() {
    let session = session_with(&[
        (FormField::Party1TaxId, "123.456.78901999"),
        (FormField::Party1StateId, "12345678x"),
        (FormField::RegistryOverride, "nº 1234"),
    ]);
    let state = session.state();

    assert_eq!(state.party1.tax_id, "123.456.789-01");
    assert_eq!(state.party1.state_id, "12.345.678-x");
    assert_eq!(state.registry_override, "123.4");
}

#[test]
fn category_mutation_resets_income_override() {
    let mut session = session();
    session.apply(FormEvent::set(FormField::IncomeText, "manual"));
    assert_eq!(session.state().income_text, "manual");

    let rewritten = session.apply(FormEvent::set(FormField::CategoryId, "HIS-1"));
    assert_eq!(rewritten, vec![DerivedField::IncomeText, DerivedField::FileName]);
    assert_eq!(session.state().income_text, "inferior a R$4.700,00");

    session.apply(FormEvent::set(FormField::IncomeText, "manual again"));
    session.apply(FormEvent::set(FormField::CategoryId, "HIS-1"));
    assert_eq!(
        session.state().income_text,
        "inferior a R$4.700,00",
        "re-selecting the same category still resets"
    );
}

#[test]
fn income_override_survives_other_mutations() {
    let mut session = session();
    session.apply(FormEvent::set(FormField::IncomeText, "R$ 9.000,00"));
    session.apply(FormEvent::set(FormField::Party1Name, "Ana"));
    session.apply(FormEvent::set(FormField::DocType, "investor"));

    assert_eq!(session.state().income_text, "R$ 9.000,00");
}

#[test]
fn direct_file_name_edit_lasts_until_next_source_mutation() {
    let mut session = session();
    session.apply(FormEvent::set(FormField::FileName, "MEU ARQUIVO"));
    session.apply(FormEvent::set(FormField::TowerName, "B"));
    assert_eq!(session.state().file_name, "MEU ARQUIVO");

    session.apply(FormEvent::set(FormField::UnitNumber, "204"));
    assert_eq!(
        session.state().file_name,
        "DECLARAÇÃO DE DESENQUADRAMENTO PMCMV - APT 204"
    );
}

#[test]
fn file_name_follows_doc_type_and_sources() {
    let mut session = session_with(&[
        (FormField::DocType, "category_qualification"),
        (FormField::Party1Qualification, "FULANO DE TAL, brasileiro, solteiro"),
    ]);
    assert!(session.state().file_name.ends_with("HIS-2 - FULANO DE TAL"));

    session.apply(FormEvent::set(FormField::CategoryId, "HMP"));
    assert_eq!(
        session.state().file_name,
        "DECLARAÇÃO DE ENQUADRAMENTO HMP - FULANO DE TAL"
    );

    let session = session_with(&[
        (FormField::ProjectId, "villagio"),
        (FormField::HouseNumber, "15"),
    ]);
    assert!(session.state().file_name.ends_with("CASA 15"));
}

#[test]
fn unknown_choice_leaves_state_untouched() {
    let mut session = session_with(&[(FormField::FileName, "KEEP")]);
    let rewritten = session.apply(FormEvent::set(FormField::DocType, "testamento"));

    assert!(rewritten.is_empty());
    assert_eq!(session.state().doc_type, DocType::Deregistration);
    assert_eq!(session.state().file_name, "KEEP");
}

#[test]
fn grammatical_number_tracks_second_party() {
    let mut session = session();
    session.apply(FormEvent::set(FormField::Party2Name, "Bia"));
    assert_eq!(session.grammatical_forms().subject, "Eu");

    session.apply(FormEvent::SetSecondParty { enabled: true });
    assert_eq!(session.grammatical_forms().subject, "Nós");
    assert_eq!(
        session.snapshot().grammatical_number,
        GrammaticalNumber::Plural
    );

    session.apply(FormEvent::SetSecondParty { enabled: false });
    assert_eq!(session.grammatical_forms().subject, "Eu");
}

#[test]
fn export_hands_snapshot_to_primary_exporter() {
    let primary = RecordingExporter::default();
    let fallback = RecordingExporter::default();
    let mut session = session_with(&[(FormField::UnitNumber, "101")]);

    let receipt = session.export(&primary, &fallback).expect("export succeeds");

    assert!(!receipt.fallback_used);
    assert_eq!(receipt.exporter, "recording");
    assert_eq!(
        receipt.file_name,
        "DECLARAÇÃO DE DESENQUADRAMENTO PMCMV - APT 101.pdf"
    );
    assert_eq!(session.status(), &ExportStatus::Idle);

    let requests = primary.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].geometry, PageGeometry::default());
    assert_eq!(requests[0].document, session.document().expect("composes"));
    assert!(fallback.requests().is_empty());
}

#[test]
fn blank_file_name_exports_as_documento() {
    let primary = RecordingExporter::default();
    let fallback = RecordingExporter::default();
    let mut session = session_with(&[(FormField::FileName, "  ")]);

    let receipt = session.export(&primary, &fallback).expect("export succeeds");
    assert_eq!(receipt.file_name, "documento.pdf");
}

#[test]
fn failed_primary_uses_fallback_once_and_surfaces_failure() {
    let primary = FailingExporter::new("renderer crashed");
    let fallback = RecordingExporter::default();
    let mut session = session();

    let receipt = session.export(&primary, &fallback).expect("fallback succeeds");

    assert!(receipt.fallback_used);
    assert_eq!(primary.calls(), 1);
    assert_eq!(fallback.requests().len(), 1);
    match session.status() {
        ExportStatus::Failed { reason } => assert!(reason.contains("renderer crashed")),
        other => panic!("expected failed status, got {other:?}"),
    }
}

#[test]
fn total_failure_clears_generating_flag() {
    let primary = FailingExporter::new("primary down");
    let fallback = FailingExporter::new("fallback down");
    let mut session = session();

    let error = session
        .export(&primary, &fallback)
        .expect_err("both paths fail");
    assert!(matches!(error, ExportError::Failed { .. }));
    assert_eq!(primary.calls(), 1);
    assert_eq!(fallback.calls(), 1);
    assert!(!session.status().is_generating());

    session
        .export(&primary, &fallback)
        .expect_err("a new attempt is allowed");
    assert_eq!(primary.calls(), 2);
}

#[test]
fn only_one_export_in_flight() {
    let primary = RecordingExporter::default();
    let fallback = RecordingExporter::default();
    let mut session = session();

    let request = session.begin_export().expect("first export starts");
    assert!(session.status().is_generating());
    assert!(matches!(
        session.export(&primary, &fallback),
        Err(ExportError::InProgress)
    ));
    assert!(primary.requests().is_empty());

    session.finish_export(&Ok(crate::workflows::declarations::export::ExportReceipt {
        file_name: request.file_name.clone(),
        path: request.file_name.clone().into(),
        exporter: "manual",
        fallback_used: false,
        primary_failure: None,
    }));
    assert_eq!(session.status(), &ExportStatus::Idle);
    session.export(&primary, &fallback).expect("next export starts");
}

#[test]
fn unresolvable_project_refuses_export_without_generating() {
    let primary = RecordingExporter::default();
    let fallback = RecordingExporter::default();
    let mut session = session_with(&[(FormField::ProjectId, "nowhere")]);

    assert!(matches!(
        session.export(&primary, &fallback),
        Err(ExportError::Resolution(_))
    ));
    assert_eq!(session.status(), &ExportStatus::Idle);
    assert!(primary.requests().is_empty());
}

#[test]
fn service_assigns_sequential_ids_and_discards_sessions() {
    let primary = Arc::new(RecordingExporter::default());
    let service = service_with(primary.clone(), Arc::new(RecordingExporter::default()));

    let (first, _) = service.create_on(today()).expect("session opens");
    let (second, _) = service.create_on(today()).expect("session opens");
    assert_eq!(first, SessionId("decl-000001".to_string()));
    assert_eq!(second, SessionId("decl-000002".to_string()));
    assert_eq!(service.session_count().expect("count"), 2);

    let snapshot = service
        .apply(
            &first,
            vec![
                FormEvent::set(FormField::DocType, "investor"),
                FormEvent::set(FormField::Party1Name, "ana"),
            ],
        )
        .expect("events apply");
    assert_eq!(snapshot.state.file_name, "DECLARAÇÃO DE INVESTIDOR - ANA");

    service.export(&first).expect("export succeeds");
    assert_eq!(primary.requests().len(), 1);

    service.discard(&first).expect("session closes");
    assert!(matches!(
        service.snapshot(&first),
        Err(DeclarationServiceError::SessionNotFound(_))
    ));
    assert!(service.snapshot(&second).is_ok());
}
