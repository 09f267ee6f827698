//! Native document serialization (`.ptxt`).
//!
//! The on-disk form is a JSON envelope around the document model:
//! `{"format":"powertext","version":1,"document":{...}}`.

use super::document::RichDocument;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const MARKUP_FORMAT: &str = "powertext";
pub const MARKUP_VERSION: u32 = 1;
pub const MARKUP_EXTENSION: &str = "ptxt";
pub const PLAIN_TEXT_EXTENSION: &str = "txt";

#[derive(Debug)]
pub enum MarkupError {
    Json(serde_json::Error),
    UnknownFormat(String),
    UnsupportedVersion(u32),
    Invalid(String),
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkupError::Json(e) => write!(f, "Malformed document: {}", e),
            MarkupError::UnknownFormat(s) => write!(f, "Unknown document format: {}", s),
            MarkupError::UnsupportedVersion(v) => {
                write!(f, "Unsupported document version: {}", v)
            }
            MarkupError::Invalid(s) => write!(f, "Invalid document: {}", s),
        }
    }
}

impl std::error::Error for MarkupError {}

impl From<serde_json::Error> for MarkupError {
    fn from(e: serde_json::Error) -> Self {
        MarkupError::Json(e)
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    format: &'a str,
    version: u32,
    document: &'a RichDocument,
}

#[derive(Deserialize)]
struct Envelope {
    format: String,
    version: u32,
    document: RichDocument,
}

pub fn to_markup(document: &RichDocument) -> Result<String, MarkupError> {
    let envelope = EnvelopeRef {
        format: MARKUP_FORMAT,
        version: MARKUP_VERSION,
        document,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

pub fn from_markup(text: &str) -> Result<RichDocument, MarkupError> {
    let envelope: Envelope = serde_json::from_str(text)?;
    if envelope.format != MARKUP_FORMAT {
        return Err(MarkupError::UnknownFormat(envelope.format));
    }
    if envelope.version != MARKUP_VERSION {
        return Err(MarkupError::UnsupportedVersion(envelope.version));
    }
    let mut document = envelope.document;
    document.repair().map_err(MarkupError::Invalid)?;
    Ok(document)
}

/// How a file's contents map onto a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Markup,
}

impl DocumentKind {
    /// Reading: only the native extension is parsed as markup.
    pub fn for_open(path: &Path) -> Self {
        if has_extension(path, MARKUP_EXTENSION) {
            DocumentKind::Markup
        } else {
            DocumentKind::PlainText
        }
    }

    /// Writing: only `.txt` is written as plain text; everything else keeps the formatting.
    pub fn for_save(path: &Path) -> Self {
        if has_extension(path, PLAIN_TEXT_EXTENSION) {
            DocumentKind::PlainText
        } else {
            DocumentKind::Markup
        }
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
#[path = "../../tests/unit/models/markup.rs"]
mod tests;
