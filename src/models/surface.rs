//! Document surface: one workspace's document plus its cursor.
//!
//! Every mutating method returns whether the document or cursor changed, so callers can report
//! `state_changed` without diffing.

use super::cursor::{Motion, TextCursor};
use super::document::{DocPosition, RichDocument};
use super::format::{Alignment, BlockFormat, CharFormat, CharFormatPatch, ImageFormat, ListStyle};
use super::markup::{self, MarkupError};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone)]
pub struct DocumentSurface {
    document: RichDocument,
    cursor: TextCursor,
}

impl DocumentSurface {
    pub fn new(default_format: CharFormat) -> Self {
        Self {
            cursor: TextCursor::new(default_format.clone()),
            document: RichDocument::new(default_format),
        }
    }

    pub fn document(&self) -> &RichDocument {
        &self.document
    }

    pub fn cursor(&self) -> &TextCursor {
        &self.cursor
    }

    pub fn default_format(&self) -> &CharFormat {
        &self.document.default_format
    }

    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    pub fn set_plain_text(&mut self, text: &str) {
        let default = self.document.default_format.clone();
        self.set_document(RichDocument::from_plain_text(text, default));
    }

    pub fn to_markup(&self) -> Result<String, MarkupError> {
        markup::to_markup(&self.document)
    }

    /// Replaces the content only if `text` parses; on error the surface is untouched.
    pub fn set_markup(&mut self, text: &str) -> Result<(), MarkupError> {
        let document = markup::from_markup(text)?;
        self.set_document(document);
        Ok(())
    }

    pub fn set_document(&mut self, document: RichDocument) {
        self.document = document;
        let start = self.document.first_position();
        self.collapse_to(start);
    }

    pub fn clear(&mut self) {
        self.document.clear();
        let start = self.document.first_position();
        self.collapse_to(start);
    }

    /// The format at the cursor: what the next typed character will use.
    pub fn char_format(&self) -> &CharFormat {
        self.cursor.char_format()
    }

    pub fn block_format(&self) -> BlockFormat {
        self.document
            .text_at(self.cursor.position())
            .map(|p| p.format)
            .unwrap_or_default()
    }

    /// `(row, column)` of the cursor when it sits in a table cell.
    pub fn table_cell(&self) -> Option<(usize, usize)> {
        let pos = self.cursor.position();
        self.document
            .table(pos.block)
            .map(|t| t.coordinates(pos.cell))
    }

    /// With a selection, merges into every selected character. Without one, only the cursor's
    /// pending format changes, so subsequently typed text picks it up.
    pub fn merge_char_format(&mut self, patch: &CharFormatPatch) -> bool {
        let mut changed = false;
        if self.cursor.has_selection() {
            let (start, end) = self.cursor.selection();
            changed |= self.document.merge_char_format(start, end, patch);
        }
        changed |= self.cursor.merge_char_format(patch);
        changed
    }

    pub fn set_alignment(&mut self, alignment: Alignment) -> bool {
        let (start, end) = self.cursor.selection();
        self.document.set_alignment(start, end, alignment)
    }

    pub fn create_list(&mut self, style: ListStyle) -> bool {
        let (first, last) = self.touched_blocks();
        self.document.create_list(first, last, style);
        true
    }

    pub fn insert_text(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.remove_selection();
        let format = self.cursor.char_format().clone();
        let pos = self
            .document
            .insert_text(self.cursor.position(), text, &format);
        self.cursor.set_position(pos, false);
        true
    }

    /// Inside a table cell Enter only clears the selection; cells hold a single paragraph.
    pub fn insert_paragraph_break(&mut self) -> bool {
        let removed = self.remove_selection();
        let before = self.cursor.position();
        let pos = self.document.split_paragraph(before);
        self.cursor.set_position(pos, false);
        removed || pos != before
    }

    pub fn insert_image(&mut self, image: ImageFormat) -> bool {
        self.remove_selection();
        let format = self.cursor.char_format().clone();
        let pos = self
            .document
            .insert_image(self.cursor.position(), image, &format);
        self.cursor.set_position(pos, false);
        true
    }

    /// Puts the cursor in the new table's first cell. Refused inside a cell.
    pub fn insert_table(&mut self, rows: usize, columns: usize) -> bool {
        if self.table_cell().is_some() {
            return false;
        }
        let before = self.document.block_count();
        self.remove_selection();
        let pos = self
            .document
            .insert_table(self.cursor.position(), rows, columns);
        self.collapse_to(pos);
        self.document.block_count() != before
    }

    pub fn delete_backward(&mut self) -> bool {
        if self.remove_selection() {
            return true;
        }
        let pos = self.cursor.position();
        if pos.offset > 0 {
            let start = pos.with_offset(pos.offset - 1);
            let at = self.document.delete_range(start, pos);
            self.collapse_to(at);
            return true;
        }
        if self.table_cell().is_some() {
            return false;
        }

        if let Some(p) = self.document.paragraph_mut(pos.block) {
            if p.format.list.take().is_some() {
                return true;
            }
        }

        let Some(prev) = pos.block.checked_sub(1) else {
            return false;
        };
        if self.document.table(prev).is_some() {
            if self.table_is_blank(prev) {
                self.document.remove_table(prev);
                self.collapse_to(DocPosition::new(prev, 0));
            } else {
                let end = self.document.block_end(prev);
                self.collapse_to(end);
            }
            return true;
        }
        let join_at = self.document.block_end(prev);
        let at = self.document.delete_range(join_at, pos);
        self.collapse_to(at);
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        if self.remove_selection() {
            return true;
        }
        let pos = self.cursor.position();
        let end = self.document.text_end(pos);
        if pos.offset < end.offset {
            let at = self.document.delete_range(pos, pos.with_offset(pos.offset + 1));
            self.collapse_to(at);
            return true;
        }
        if self.table_cell().is_some() {
            return false;
        }

        let next = pos.block + 1;
        if next >= self.document.block_count() {
            return false;
        }
        if self.document.table(next).is_some() {
            return self.table_is_blank(next) && self.document.remove_table(next);
        }
        let at = self.document.delete_range(pos, DocPosition::new(next, 0));
        self.collapse_to(at);
        true
    }

    pub fn move_cursor(&mut self, motion: Motion, extend: bool) -> bool {
        let pos = self.cursor.position();
        if self.cursor.has_selection() && !extend {
            let (start, end) = self.cursor.selection();
            match motion {
                Motion::Left => return self.set_cursor_position(start, false),
                Motion::Right => return self.set_cursor_position(end, false),
                _ => {}
            }
        }

        let doc = &self.document;
        let target = match motion {
            Motion::Left => {
                if pos.offset > 0 {
                    pos.with_offset(pos.offset - 1)
                } else {
                    doc.prev_text_end(pos).unwrap_or(pos)
                }
            }
            Motion::Right => {
                if pos.offset < doc.text_end(pos).offset {
                    pos.with_offset(pos.offset + 1)
                } else {
                    doc.next_text_start(pos).unwrap_or(pos)
                }
            }
            Motion::WordLeft => match self.word_start_before(pos) {
                Some(offset) => pos.with_offset(offset),
                None => doc.prev_text_end(pos).unwrap_or(pos.with_offset(0)),
            },
            Motion::WordRight => match self.word_end_after(pos) {
                Some(offset) => pos.with_offset(offset),
                None => doc.next_text_start(pos).unwrap_or(doc.text_end(pos)),
            },
            Motion::Up => doc.line_above(pos).unwrap_or(pos.with_offset(0)),
            Motion::Down => doc.line_below(pos).unwrap_or(doc.text_end(pos)),
            Motion::LineStart => pos.with_offset(0),
            Motion::LineEnd => doc.text_end(pos),
            Motion::DocumentStart => doc.first_position(),
            Motion::DocumentEnd => doc.end_position(),
            Motion::NextCell => {
                if doc.table(pos.block).is_none() {
                    return false;
                }
                doc.next_text_start(pos).unwrap_or(pos)
            }
            Motion::PrevCell => match doc.table(pos.block) {
                Some(_) if pos.cell > 0 => DocPosition::in_cell(pos.block, pos.cell - 1, 0),
                _ => return false,
            },
        };

        self.set_cursor_position(target, extend)
    }

    pub fn set_cursor_position(&mut self, pos: DocPosition, extend: bool) -> bool {
        let pos = self.document.clamp(pos);
        let before = (self.cursor.anchor(), self.cursor.position());
        self.cursor.set_position(pos, extend);
        let format = self.document.char_format_at(pos);
        self.cursor.set_char_format(format);
        before != (self.cursor.anchor(), self.cursor.position())
    }

    pub fn select_all(&mut self) -> bool {
        let start = self.document.first_position();
        let end = self.document.end_position();
        let before = (self.cursor.anchor(), self.cursor.position());
        self.cursor.set_position(start, false);
        self.cursor.set_position(end, true);
        let format = self.document.char_format_at(end);
        self.cursor.set_char_format(format);
        before != (start, end)
    }

    fn remove_selection(&mut self) -> bool {
        if !self.cursor.has_selection() {
            return false;
        }
        let (start, end) = self.cursor.selection();
        let format = self.document.char_format_at(start.with_offset(start.offset + 1));
        let at = self.document.delete_range(start, end);
        self.cursor.set_position(at, false);
        self.cursor.set_char_format(format);
        true
    }

    fn collapse_to(&mut self, pos: DocPosition) {
        let pos = self.document.clamp(pos);
        self.cursor.set_position(pos, false);
        let format = self.document.char_format_at(pos);
        self.cursor.set_char_format(format);
    }

    fn touched_blocks(&self) -> (usize, usize) {
        let (start, end) = self.cursor.selection();
        (start.block, end.block)
    }

    fn table_is_blank(&self, block: usize) -> bool {
        self.document
            .table(block)
            .is_some_and(|t| t.cells.iter().all(|cell| cell.is_empty()))
    }

    fn word_start_before(&self, pos: DocPosition) -> Option<usize> {
        let text = self.document.text_at(pos)?.plain_text();
        word_spans(&text)
            .into_iter()
            .rev()
            .map(|(start, _)| start)
            .find(|&start| start < pos.offset)
    }

    fn word_end_after(&self, pos: DocPosition) -> Option<usize> {
        let text = self.document.text_at(pos)?.plain_text();
        word_spans(&text)
            .into_iter()
            .map(|(_, end)| end)
            .find(|&end| end > pos.offset)
    }
}

/// Character ranges of the words in `text`.
fn word_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut chars_before = 0;
    for segment in text.split_word_bounds() {
        let len = segment.chars().count();
        if segment.chars().any(char::is_alphanumeric) {
            spans.push((chars_before, chars_before + len));
        }
        chars_before += len;
    }
    spans
}

#[cfg(test)]
#[path = "../../tests/unit/models/surface.rs"]
mod tests;
