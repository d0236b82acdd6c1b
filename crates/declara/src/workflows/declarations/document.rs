use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::form::DocType;

/// Run of document text. User-entered values only ever appear as span payloads,
/// never as markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Span {
    Plain(String),
    Emphasis(String),
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    pub fn emphasis(text: impl Into<String>) -> Self {
        Self::Emphasis(text.into())
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Emphasis(text) => text,
        }
    }

    pub fn is_emphasized(&self) -> bool {
        matches!(self, Self::Emphasis(_))
    }
}

/// One signing party under a signature line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signatory {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
}

/// Structural unit of a composed declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Centered, bold title lines.
    Heading { lines: Vec<String> },
    Paragraph { spans: Vec<Span> },
    /// Boxed, highlighted lines (category callout).
    Callout { lines: Vec<String> },
    BulletList { items: Vec<Vec<Span>> },
    /// Checkbox clause; `marked` decides between `( X )` and `(   )`.
    Checkbox { marked: bool, paragraphs: Vec<Vec<Span>> },
    /// Place, date, and signatures. Exporters keep this block on a single page.
    Closing {
        place_date: String,
        alignment: Alignment,
        signatories: Vec<Signatory>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<Vec<Span>>,
    },
}

impl Block {
    pub fn paragraph(spans: Vec<Span>) -> Self {
        Self::Paragraph { spans }
    }

    pub fn plain_paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph {
            spans: vec![Span::plain(text)],
        }
    }

    pub fn heading<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Heading {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// All spans carried by the block, in reading order.
    pub fn spans(&self) -> Vec<&Span> {
        match self {
            Self::Paragraph { spans } => spans.iter().collect(),
            Self::BulletList { items } => items.iter().flatten().collect(),
            Self::Checkbox { paragraphs, .. } => paragraphs.iter().flatten().collect(),
            Self::Closing { note, .. } => note.iter().flatten().collect(),
            Self::Heading { .. } | Self::Callout { .. } => Vec::new(),
        }
    }
}

/// Marker rendered in front of a checkbox clause.
pub fn checkbox_marker(marked: bool) -> &'static str {
    if marked {
        "( X )"
    } else {
        "(   )"
    }
}

/// Fully composed declaration, ready to be displayed or handed to an exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub doc_type: DocType,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(doc_type: DocType, blocks: Vec<Block>) -> Self {
        Self { doc_type, blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Emphasized runs across the document, in reading order.
    pub fn emphasized(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .flat_map(Block::spans)
            .filter(|span| span.is_emphasized())
            .map(Span::text)
            .collect()
    }

    pub fn checkboxes(&self) -> Vec<bool> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Checkbox { marked, .. } => Some(*marked),
                _ => None,
            })
            .collect()
    }

    /// Terminal-friendly rendering. Emphasis is marked with `*`.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();

        for block in &self.blocks {
            match block {
                Block::Heading { lines } | Block::Callout { lines } => {
                    for line in lines {
                        writeln!(out, "{line}").expect("write to string");
                    }
                }
                Block::Paragraph { spans } => {
                    writeln!(out, "{}", join_spans(spans)).expect("write to string");
                }
                Block::BulletList { items } => {
                    for item in items {
                        writeln!(out, "  - {}", join_spans(item)).expect("write to string");
                    }
                }
                Block::Checkbox { marked, paragraphs } => {
                    let mut lines = paragraphs.iter();
                    if let Some(first) = lines.next() {
                        writeln!(out, "{} {}", checkbox_marker(*marked), join_spans(first))
                            .expect("write to string");
                    }
                    for paragraph in lines {
                        writeln!(out, "      {}", join_spans(paragraph)).expect("write to string");
                    }
                }
                Block::Closing {
                    place_date,
                    signatories,
                    note,
                    ..
                } => {
                    writeln!(out, "{place_date}").expect("write to string");
                    for signatory in signatories {
                        out.push('\n');
                        writeln!(out, "________________________________").expect("write to string");
                        writeln!(out, "{}", signatory.name).expect("write to string");
                        for detail in &signatory.details {
                            writeln!(out, "{detail}").expect("write to string");
                        }
                    }
                    if let Some(note) = note {
                        out.push('\n');
                        writeln!(out, "{}", join_spans(note)).expect("write to string");
                    }
                }
            }
            out.push('\n');
        }

        out
    }
}

fn join_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Plain(text) => text.clone(),
            Span::Emphasis(text) => format!("*{text}*"),
        })
        .collect()
}
