//! Export boundary: a finalized document snapshot handed to a file-producing
//! collaborator, with a single fallback when the primary path fails.

use std::fmt::{Debug, Write as _};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info, warn};

use super::composer::ResolutionError;
use super::document::{checkbox_marker, Alignment, Block, Document, Span};

/// Stem used when the form's file name is blank.
pub const DEFAULT_FILE_STEM: &str = "documento";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaperSize {
    A4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Portrait,
}

/// Page contract every exporter honours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageGeometry {
    pub paper: PaperSize,
    pub orientation: Orientation,
    pub margin_mm: u32,
    /// The closing block (place, date, signatures) must not be split across pages.
    pub keep_signature_together: bool,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            orientation: Orientation::Portrait,
            margin_mm: 0,
            keep_signature_together: true,
        }
    }
}

/// Output file name for a form file name: `{file_name}.pdf`, or `documento.pdf`.
pub fn export_file_name(file_name: &str) -> String {
    if file_name.trim().is_empty() {
        format!("{DEFAULT_FILE_STEM}.pdf")
    } else {
        format!("{file_name}.pdf")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRequest {
    pub document: Document,
    pub file_name: String,
    pub geometry: PageGeometry,
}

impl ExportRequest {
    pub fn new(document: Document, file_name: &str) -> Self {
        Self {
            document,
            file_name: export_file_name(file_name),
            geometry: PageGeometry::default(),
        }
    }

    /// Requested file name with its extension swapped and path separators neutralised.
    pub fn file_name_with_extension(&self, extension: &str) -> String {
        let stem = self
            .file_name
            .strip_suffix(".pdf")
            .unwrap_or(&self.file_name);
        let safe: String = stem
            .chars()
            .map(|c| match c {
                '/' | '\\' => '-',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        let safe = safe.trim_start_matches('.');
        let safe = if safe.is_empty() { DEFAULT_FILE_STEM } else { safe };
        format!("{safe}.{extension}")
    }
}

/// Session-visible export state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ExportStatus {
    #[default]
    Idle,
    Generating,
    Failed { reason: String },
}

impl ExportStatus {
    pub fn is_generating(&self) -> bool {
        matches!(self, Self::Generating)
    }
}

/// A single exporter could not produce its file.
#[derive(Debug, thiserror::Error)]
pub enum ExportFailure {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("exporter rejected the document: {0}")]
    Rejected(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("an export is already in progress")]
    InProgress,
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error("export failed ({primary}); fallback failed ({fallback})")]
    Failed {
        primary: ExportFailure,
        fallback: ExportFailure,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReceipt {
    pub file_name: String,
    pub path: PathBuf,
    pub exporter: &'static str,
    pub fallback_used: bool,
    /// Why the primary exporter failed, when the fallback produced the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_failure: Option<String>,
}

pub trait DocumentExporter: Debug + Send + Sync {
    fn name(&self) -> &'static str;
    fn export(&self, request: &ExportRequest) -> Result<PathBuf, ExportFailure>;
}

/// Try `primary`, then `fallback` exactly once.
pub fn export_with_fallback(
    request: &ExportRequest,
    primary: &dyn DocumentExporter,
    fallback: &dyn DocumentExporter,
) -> Result<ExportReceipt, ExportError> {
    let primary_failure = match primary.export(request) {
        Ok(path) => {
            info!(exporter = primary.name(), path = %path.display(), "document exported");
            return Ok(ExportReceipt {
                file_name: request.file_name.clone(),
                path,
                exporter: primary.name(),
                fallback_used: false,
                primary_failure: None,
            });
        }
        Err(failure) => failure,
    };

    warn!(
        exporter = primary.name(),
        fallback = fallback.name(),
        error = %primary_failure,
        "export failed, trying fallback"
    );

    match fallback.export(request) {
        Ok(path) => {
            info!(exporter = fallback.name(), path = %path.display(), "document exported by fallback");
            Ok(ExportReceipt {
                file_name: request.file_name.clone(),
                path,
                exporter: fallback.name(),
                fallback_used: true,
                primary_failure: Some(primary_failure.to_string()),
            })
        }
        Err(fallback_failure) => {
            error!(
                primary = %primary_failure,
                fallback = %fallback_failure,
                "export failed on every path"
            );
            Err(ExportError::Failed {
                primary: primary_failure,
                fallback: fallback_failure,
            })
        }
    }
}

/// Print-ready HTML page: the primary export path.
#[derive(Debug, Clone)]
pub struct HtmlFileExporter {
    output_dir: PathBuf,
}

impl HtmlFileExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl DocumentExporter for HtmlFileExporter {
    fn name(&self) -> &'static str {
        "html"
    }

    fn export(&self, request: &ExportRequest) -> Result<PathBuf, ExportFailure> {
        let html = render_html(&request.document, &request.geometry);
        write_output(&self.output_dir, &request.file_name_with_extension("html"), &html)
    }
}

/// Plain-text rendering: the fallback path.
#[derive(Debug, Clone)]
pub struct TextFileExporter {
    output_dir: PathBuf,
}

impl TextFileExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl DocumentExporter for TextFileExporter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn export(&self, request: &ExportRequest) -> Result<PathBuf, ExportFailure> {
        if request.document.is_empty() {
            return Err(ExportFailure::Rejected("document has no blocks".to_string()));
        }
        let text = request.document.to_plain_text();
        write_output(&self.output_dir, &request.file_name_with_extension("txt"), &text)
    }
}

fn write_output(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf, ExportFailure> {
    std::fs::create_dir_all(dir).map_err(|source| ExportFailure::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(file_name);
    std::fs::write(&path, contents).map_err(|source| ExportFailure::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Standalone HTML for a document. Every span is escaped; emphasis becomes `<b>`.
pub fn render_html(document: &Document, geometry: &PageGeometry) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n");
    writeln!(html, "<title>{}</title>", escape_html(document.doc_type.label()))
        .expect("write title");
    html.push_str("<style>\n");
    writeln!(
        html,
        "@page {{ size: {:?} {}; margin: {}mm; }}",
        geometry.paper,
        match geometry.orientation {
            Orientation::Portrait => "portrait",
        },
        geometry.margin_mm
    )
    .expect("write page rule");
    html.push_str(
        "body { width: 210mm; min-height: 297mm; margin: 0 auto; padding: 25mm; box-sizing: border-box; font-family: 'Archivo Narrow', sans-serif; font-size: 11pt; text-align: justify; }\n\
         .heading { text-align: center; font-weight: bold; text-transform: uppercase; margin-bottom: 2em; }\n\
         .callout { text-align: center; font-weight: bold; border: 2px solid #facc15; padding: 0.5em; margin: 1.5em 0; }\n\
         .checkbox { display: flex; gap: 0.75em; }\n\
         .marker { font-family: monospace; font-weight: bold; white-space: pre; }\n\
         .closing { margin-top: 2em; }\n\
         .closing.center { text-align: center; }\n\
         .signature { margin-top: 3em; }\n\
         .signature .line { border-top: 1px solid #000; width: 70%; }\n\
         .closing.center .signature .line { margin: 0 auto; }\n\
         .note { margin-top: 1.5em; font-size: 9pt; font-style: italic; border-top: 1px solid #999; padding-top: 0.5em; }\n",
    );
    if geometry.keep_signature_together {
        html.push_str(".closing { page-break-inside: avoid; break-inside: avoid; }\n");
    }
    html.push_str("</style>\n</head>\n<body>\n");

    for block in &document.blocks {
        render_block(&mut html, block);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_block(html: &mut String, block: &Block) {
    match block {
        Block::Heading { lines } => {
            writeln!(html, "<div class=\"heading\">{}</div>", escaped_lines(lines))
                .expect("write heading");
        }
        Block::Callout { lines } => {
            writeln!(html, "<div class=\"callout\">{}</div>", escaped_lines(lines))
                .expect("write callout");
        }
        Block::Paragraph { spans } => {
            writeln!(html, "<p>{}</p>", render_spans(spans)).expect("write paragraph");
        }
        Block::BulletList { items } => {
            html.push_str("<ul>\n");
            for item in items {
                writeln!(html, "<li>{}</li>", render_spans(item)).expect("write list item");
            }
            html.push_str("</ul>\n");
        }
        Block::Checkbox { marked, paragraphs } => {
            writeln!(
                html,
                "<div class=\"checkbox\"><span class=\"marker\">{}</span><div>",
                checkbox_marker(*marked)
            )
            .expect("write checkbox");
            for paragraph in paragraphs {
                writeln!(html, "<p>{}</p>", render_spans(paragraph)).expect("write clause");
            }
            html.push_str("</div></div>\n");
        }
        Block::Closing {
            place_date,
            alignment,
            signatories,
            note,
        } => {
            let class = match alignment {
                Alignment::Center => "closing center",
                Alignment::Left => "closing",
            };
            writeln!(html, "<div class=\"{class}\">").expect("write closing");
            writeln!(html, "<p>{}</p>", escape_html(place_date)).expect("write place date");
            for signatory in signatories {
                writeln!(
                    html,
                    "<div class=\"signature\"><div class=\"line\"></div><b>{}</b>",
                    escape_html(&signatory.name)
                )
                .expect("write signatory");
                for detail in &signatory.details {
                    writeln!(html, "<div>{}</div>", escape_html(detail)).expect("write detail");
                }
                html.push_str("</div>\n");
            }
            if let Some(note) = note {
                writeln!(html, "<div class=\"note\">{}</div>", render_spans(note))
                    .expect("write note");
            }
            html.push_str("</div>\n");
        }
    }
}

fn escaped_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| escape_html(line))
        .collect::<Vec<_>>()
        .join("<br>")
}

fn render_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Plain(text) => escape_html(text),
            Span::Emphasis(text) => format!("<b>{}</b>", escape_html(text)),
        })
        .collect()
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
