//! Modal prompts and their continuations.
//!
//! A dialog collects one value. What happens with it is decided by its `PendingDialog`, which also
//! carries the workspace the command was started on, so a multi-step command keeps targeting the
//! same document even if the tab order changes in between.

use super::workspace::WorkspaceId;
use crate::models::{Rgb, MAX_TABLE_DIMENSION};
use std::fmt;
use std::path::PathBuf;

pub const DOCUMENT_FILTERS: &str =
    "PowerText Document (*.ptxt);;Text files (*.txt);;All Files (*)";
pub const IMAGE_FILTERS: &str = "Images (*.png *.jpg *.jpeg *.gif *.bmp);;All Files (*)";
pub const PDF_FILTERS: &str = "PDF (*.pdf)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
    pub default: i64,
}

pub const IMAGE_SIZE_RANGE: IntRange = IntRange {
    min: 1,
    max: 2000,
    default: 300,
};

pub const TABLE_SIZE_RANGE: IntRange = IntRange {
    min: 1,
    max: MAX_TABLE_DIMENSION as i64,
    default: 10,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    Highlight,
    Text,
}

impl ColorTarget {
    pub fn initial(self) -> Rgb {
        match self {
            ColorTarget::Highlight => Rgb::YELLOW,
            ColorTarget::Text => Rgb::BLACK,
        }
    }

    fn initial_name(self) -> &'static str {
        match self {
            ColorTarget::Highlight => "yellow",
            ColorTarget::Text => "black",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDialog {
    OpenDocument { workspace: WorkspaceId },
    SaveDocumentAs { workspace: WorkspaceId },
    ExportPdf { workspace: WorkspaceId },
    InsertImagePath { workspace: WorkspaceId },
    ImageWidth { workspace: WorkspaceId, path: PathBuf },
    ImageHeight {
        workspace: WorkspaceId,
        path: PathBuf,
        width: u32,
    },
    TableRows { workspace: WorkspaceId },
    TableColumns { workspace: WorkspaceId, rows: usize },
    PickColor {
        workspace: WorkspaceId,
        target: ColorTarget,
    },
    FontFamily { workspace: WorkspaceId },
    FontSize { workspace: WorkspaceId, range: IntRange },
}

/// How the raw text of a dialog is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogInput {
    Path,
    Integer(IntRange),
    Color,
    Text,
}

impl PendingDialog {
    pub fn workspace(&self) -> WorkspaceId {
        match self {
            PendingDialog::OpenDocument { workspace }
            | PendingDialog::SaveDocumentAs { workspace }
            | PendingDialog::ExportPdf { workspace }
            | PendingDialog::InsertImagePath { workspace }
            | PendingDialog::ImageWidth { workspace, .. }
            | PendingDialog::ImageHeight { workspace, .. }
            | PendingDialog::TableRows { workspace }
            | PendingDialog::TableColumns { workspace, .. }
            | PendingDialog::PickColor { workspace, .. }
            | PendingDialog::FontFamily { workspace }
            | PendingDialog::FontSize { workspace, .. } => *workspace,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PendingDialog::OpenDocument { .. } => "Open File",
            PendingDialog::SaveDocumentAs { .. } => "Save File",
            PendingDialog::ExportPdf { .. } => "Save as PDF",
            PendingDialog::InsertImagePath { .. } => "Insert Image",
            PendingDialog::ImageWidth { .. } => "Image Width",
            PendingDialog::ImageHeight { .. } => "Image Height",
            PendingDialog::TableRows { .. } => "Rows",
            PendingDialog::TableColumns { .. } => "Columns",
            PendingDialog::PickColor {
                target: ColorTarget::Highlight,
                ..
            } => "Highlight Color",
            PendingDialog::PickColor {
                target: ColorTarget::Text,
                ..
            } => "Text Color",
            PendingDialog::FontFamily { .. } => "Font",
            PendingDialog::FontSize { .. } => "Font Size",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            PendingDialog::OpenDocument { .. }
            | PendingDialog::SaveDocumentAs { .. }
            | PendingDialog::ExportPdf { .. }
            | PendingDialog::InsertImagePath { .. } => "Path:",
            PendingDialog::ImageWidth { .. } => "Width (px):",
            PendingDialog::ImageHeight { .. } => "Height (px):",
            PendingDialog::TableRows { .. } => "Number of rows:",
            PendingDialog::TableColumns { .. } => "Number of columns:",
            PendingDialog::PickColor { .. } => "Color (#rrggbb or name):",
            PendingDialog::FontFamily { .. } => "Family:",
            PendingDialog::FontSize { .. } => "Size (pt):",
        }
    }

    pub fn input(&self) -> DialogInput {
        match self {
            PendingDialog::OpenDocument { .. }
            | PendingDialog::SaveDocumentAs { .. }
            | PendingDialog::ExportPdf { .. }
            | PendingDialog::InsertImagePath { .. } => DialogInput::Path,
            PendingDialog::ImageWidth { .. } | PendingDialog::ImageHeight { .. } => {
                DialogInput::Integer(IMAGE_SIZE_RANGE)
            }
            PendingDialog::TableRows { .. } | PendingDialog::TableColumns { .. } => {
                DialogInput::Integer(TABLE_SIZE_RANGE)
            }
            PendingDialog::FontSize { range, .. } => DialogInput::Integer(*range),
            PendingDialog::PickColor { .. } => DialogInput::Color,
            PendingDialog::FontFamily { .. } => DialogInput::Text,
        }
    }

    /// File-type filters shown under path prompts.
    pub fn filters(&self) -> Option<&'static str> {
        match self {
            PendingDialog::OpenDocument { .. } | PendingDialog::SaveDocumentAs { .. } => {
                Some(DOCUMENT_FILTERS)
            }
            PendingDialog::ExportPdf { .. } => Some(PDF_FILTERS),
            PendingDialog::InsertImagePath { .. } => Some(IMAGE_FILTERS),
            _ => None,
        }
    }

    /// Value the prompt starts with, when it has a fixed one.
    pub fn initial_value(&self) -> Option<String> {
        match self {
            PendingDialog::ImageWidth { .. }
            | PendingDialog::ImageHeight { .. }
            | PendingDialog::TableRows { .. }
            | PendingDialog::TableColumns { .. }
            | PendingDialog::FontSize { .. } => match self.input() {
                DialogInput::Integer(range) => Some(range.default.to_string()),
                _ => None,
            },
            PendingDialog::PickColor { target, .. } => Some(target.initial_name().to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogValue {
    Path(PathBuf),
    Integer(i64),
    Color(Rgb),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogInputError {
    Empty,
    NotANumber(String),
    OutOfRange { min: i64, max: i64 },
    InvalidColor(String),
}

impl fmt::Display for DialogInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogInputError::Empty => write!(f, "Value required"),
            DialogInputError::NotANumber(v) => write!(f, "Not a number: {}", v),
            DialogInputError::OutOfRange { min, max } => {
                write!(f, "Value must be between {} and {}", min, max)
            }
            DialogInputError::InvalidColor(v) => write!(f, "Unknown color: {}", v),
        }
    }
}

impl std::error::Error for DialogInputError {}

pub fn parse_input(input: DialogInput, raw: &str) -> Result<DialogValue, DialogInputError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(DialogInputError::Empty);
    }

    match input {
        DialogInput::Path => {
            let expanded = shellexpand::tilde(value);
            Ok(DialogValue::Path(PathBuf::from(expanded.as_ref())))
        }
        DialogInput::Integer(range) => {
            let n: i64 = value
                .parse()
                .map_err(|_| DialogInputError::NotANumber(value.to_string()))?;
            if n < range.min || n > range.max {
                return Err(DialogInputError::OutOfRange {
                    min: range.min,
                    max: range.max,
                });
            }
            Ok(DialogValue::Integer(n))
        }
        DialogInput::Color => Rgb::parse(value)
            .map(DialogValue::Color)
            .ok_or_else(|| DialogInputError::InvalidColor(value.to_string())),
        DialogInput::Text => Ok(DialogValue::Text(value.to_string())),
    }
}

/// The single modal prompt. `value`/`cursor` are a byte-indexed line editor.
#[derive(Debug, Clone, Default)]
pub struct DialogState {
    pub visible: bool,
    pub title: String,
    pub prompt: String,
    pub hint: Option<String>,
    pub value: String,
    pub cursor: usize,
    pub error: Option<String>,
    pub pending: Option<PendingDialog>,
}

impl DialogState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn open(&mut self, pending: PendingDialog, value: String, hint: Option<String>) {
        self.visible = true;
        self.title = pending.title().to_string();
        self.prompt = pending.prompt().to_string();
        self.hint = hint.or_else(|| pending.filters().map(str::to_string));
        self.cursor = value.len();
        self.value = value;
        self.error = None;
        self.pending = Some(pending);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/dialog.rs"]
mod tests;
