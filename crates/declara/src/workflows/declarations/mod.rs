//! Declaration workflow: input masking, derived fields, grammatical number, document
//! composition, and export, wired together per form session.

pub mod composer;
pub mod derived;
pub mod document;
pub mod export;
pub mod form;
pub mod mask;
pub mod plural;
mod router;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use composer::{DocumentComposer, ResolutionError};
pub use derived::{DerivedField, DerivedFieldEngine, DEPENDENCIES};
pub use document::{Alignment, Block, Document, Signatory, Span};
pub use export::{
    export_file_name, export_with_fallback, DocumentExporter, ExportError, ExportFailure,
    ExportReceipt, ExportRequest, ExportStatus, HtmlFileExporter, PageGeometry, TextFileExporter,
};
pub use form::{
    AcquisitionType, DocType, EmissionDate, FormEvent, FormField, FormState, Party, UnitInfo,
};
pub use mask::{mask_registry_number, mask_state_id, mask_tax_id};
pub use plural::{GrammaticalForms, GrammaticalNumber};
pub use router::declaration_router;
pub use service::{DeclarationService, DeclarationServiceError, SessionId};
pub use session::{DeclarationSession, SessionSnapshot};
