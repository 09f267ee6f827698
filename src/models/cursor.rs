use super::document::DocPosition;
use super::format::{CharFormat, CharFormatPatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    WordLeft,
    WordRight,
    Up,
    Down,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
    /// Next table cell; past the last cell, the paragraph after the table.
    NextCell,
    PrevCell,
}

/// Anchor/position pair plus the format used for the next typed character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCursor {
    anchor: DocPosition,
    position: DocPosition,
    format: CharFormat,
}

impl TextCursor {
    pub fn new(format: CharFormat) -> Self {
        Self {
            anchor: DocPosition::default(),
            position: DocPosition::default(),
            format,
        }
    }

    pub fn position(&self) -> DocPosition {
        self.position
    }

    pub fn anchor(&self) -> DocPosition {
        self.anchor
    }

    pub fn has_selection(&self) -> bool {
        self.anchor != self.position
    }

    /// Selection bounds in document order.
    pub fn selection(&self) -> (DocPosition, DocPosition) {
        (
            self.anchor.min(self.position),
            self.anchor.max(self.position),
        )
    }

    pub fn char_format(&self) -> &CharFormat {
        &self.format
    }

    pub(crate) fn set_position(&mut self, pos: DocPosition, keep_anchor: bool) {
        self.position = pos;
        if !keep_anchor {
            self.anchor = pos;
        }
    }

    pub(crate) fn set_char_format(&mut self, format: CharFormat) {
        self.format = format;
    }

    pub(crate) fn merge_char_format(&mut self, patch: &CharFormatPatch) -> bool {
        self.format.merge(patch)
    }
}
