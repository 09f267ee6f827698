//! Rich-text document: an ordered list of blocks.
//!
//! A block is either a paragraph (a block format plus a run list) or a table of cell
//! paragraphs. A position is `(block, cell, offset)`: `cell` is the row-major cell index when
//! the block is a table and 0 otherwise, and `offset` counts characters, an inline image
//! counting as one.
//!
//! Invariant: the document always holds at least one paragraph, and every table is followed by
//! a paragraph.

use super::format::{
    Alignment, BlockFormat, CharFormat, CharFormatPatch, ImageFormat, ListFormat, ListStyle,
};
use serde::{Deserialize, Serialize};

/// Plain-text stand-in for inline objects (images).
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DocPosition {
    pub block: usize,
    pub cell: usize,
    pub offset: usize,
}

impl DocPosition {
    pub const fn new(block: usize, offset: usize) -> Self {
        Self {
            block,
            cell: 0,
            offset,
        }
    }

    pub const fn in_cell(block: usize, cell: usize, offset: usize) -> Self {
        Self {
            block,
            cell,
            offset,
        }
    }

    pub const fn with_offset(self, offset: usize) -> Self {
        Self { offset, ..self }
    }
}

/// Largest row or column count a table may have.
pub const MAX_TABLE_DIMENSION: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Inline {
    Text { text: String, format: CharFormat },
    Image { image: ImageFormat, format: CharFormat },
}

impl Inline {
    pub fn char_len(&self) -> usize {
        match self {
            Inline::Text { text, .. } => text.chars().count(),
            Inline::Image { .. } => 1,
        }
    }

    pub fn format(&self) -> &CharFormat {
        match self {
            Inline::Text { format, .. } | Inline::Image { format, .. } => format,
        }
    }

    fn format_mut(&mut self) -> &mut CharFormat {
        match self {
            Inline::Text { format, .. } | Inline::Image { format, .. } => format,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub format: BlockFormat,
    #[serde(default)]
    pub inlines: Vec<Inline>,
}

impl Paragraph {
    pub fn new(format: BlockFormat) -> Self {
        Self {
            format,
            inlines: Vec::new(),
        }
    }

    pub fn from_text(text: &str, format: &CharFormat) -> Self {
        let mut paragraph = Self::default();
        paragraph.insert_text(0, text, format);
        paragraph
    }

    pub fn len(&self) -> usize {
        self.inlines.iter().map(Inline::char_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inlines.is_empty()
    }

    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for inline in &self.inlines {
            match inline {
                Inline::Text { text, .. } => out.push_str(text),
                Inline::Image { .. } => out.push(OBJECT_REPLACEMENT),
            }
        }
        out
    }

    /// Format of the character before `offset`; at offset 0 the first character's format.
    pub fn format_at(&self, offset: usize) -> Option<&CharFormat> {
        let target = offset.saturating_sub(1);
        let mut start = 0;
        for inline in &self.inlines {
            let len = inline.char_len();
            if target < start + len {
                return Some(inline.format());
            }
            start += len;
        }
        self.inlines.last().map(Inline::format)
    }

    pub fn insert_text(&mut self, offset: usize, text: &str, format: &CharFormat) {
        if text.is_empty() {
            return;
        }
        let idx = self.split_run_at(offset);
        self.inlines.insert(
            idx,
            Inline::Text {
                text: text.to_string(),
                format: format.clone(),
            },
        );
        self.normalize();
    }

    pub fn insert_image(&mut self, offset: usize, image: ImageFormat, format: &CharFormat) {
        let idx = self.split_run_at(offset);
        self.inlines.insert(
            idx,
            Inline::Image {
                image,
                format: format.clone(),
            },
        );
        self.normalize();
    }

    pub fn remove_range(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let from = self.split_run_at(start);
        let to = self.split_run_at(end);
        self.inlines.drain(from..to);
        self.normalize();
    }

    pub fn merge_format(&mut self, start: usize, end: usize, patch: &CharFormatPatch) -> bool {
        if start >= end {
            return false;
        }
        let from = self.split_run_at(start);
        let to = self.split_run_at(end);
        let mut changed = false;
        for inline in &mut self.inlines[from..to] {
            changed |= inline.format_mut().merge(patch);
        }
        self.normalize();
        changed
    }

    /// Moves everything from `offset` on into a new paragraph with the same block format.
    pub fn split_off(&mut self, offset: usize) -> Paragraph {
        let idx = self.split_run_at(offset);
        let tail = self.inlines.split_off(idx);
        Paragraph {
            format: self.format,
            inlines: tail,
        }
    }

    pub fn append(&mut self, other: Paragraph) {
        self.inlines.extend(other.inlines);
        self.normalize();
    }

    /// Ensures a run boundary at `offset` and returns the index of the first run at or after it.
    fn split_run_at(&mut self, offset: usize) -> usize {
        let mut start = 0;
        for idx in 0..self.inlines.len() {
            if offset == start {
                return idx;
            }
            let len = self.inlines[idx].char_len();
            if offset < start + len {
                if let Inline::Text { text, format } = &mut self.inlines[idx] {
                    let tail = text.split_off(byte_index(text, offset - start));
                    let format = format.clone();
                    self.inlines
                        .insert(idx + 1, Inline::Text { text: tail, format });
                }
                return idx + 1;
            }
            start += len;
        }
        self.inlines.len()
    }

    fn normalize(&mut self) {
        let mut out: Vec<Inline> = Vec::with_capacity(self.inlines.len());
        for inline in self.inlines.drain(..) {
            if let Inline::Text { text, .. } = &inline {
                if text.is_empty() {
                    continue;
                }
            }
            if let (
                Some(Inline::Text {
                    text: prev,
                    format: prev_format,
                }),
                Inline::Text { text, format },
            ) = (out.last_mut(), &inline)
            {
                if prev_format == format {
                    prev.push_str(text);
                    continue;
                }
            }
            out.push(inline);
        }
        self.inlines = out;
    }
}

fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub rows: usize,
    pub columns: usize,
    /// Row-major, `rows * columns` entries.
    pub cells: Vec<Paragraph>,
}

impl Table {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![Paragraph::default(); rows.saturating_mul(columns)],
        }
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Paragraph> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + column)
    }

    /// `(row, column)` of a row-major cell index.
    pub fn coordinates(&self, cell: usize) -> (usize, usize) {
        let columns = self.columns.max(1);
        (cell / columns, cell % columns)
    }

    /// `(cell, from, to)` for every cell touched between two `(cell, offset)` points.
    fn covered(&self, start: (usize, usize), end: (usize, usize)) -> Vec<(usize, usize, usize)> {
        let Some(last) = self.cells.len().checked_sub(1) else {
            return Vec::new();
        };
        (start.0..=end.0.min(last))
            .map(|cell| {
                let len = self.cells[cell].len();
                let from = if cell == start.0 { start.1.min(len) } else { 0 };
                let to = if cell == end.0 { end.1.min(len) } else { len };
                (cell, from, to)
            })
            .collect()
    }

    fn validate(&self) -> Result<(), String> {
        let dimension = 1..=MAX_TABLE_DIMENSION;
        if !dimension.contains(&self.rows) || !dimension.contains(&self.columns) {
            return Err(format!(
                "declares {}x{}, tables must be between 1x1 and {MAX_TABLE_DIMENSION}x{MAX_TABLE_DIMENSION}",
                self.rows, self.columns
            ));
        }
        if self.rows.checked_mul(self.columns) != Some(self.cells.len()) {
            return Err(format!(
                "declares {}x{} but has {} cells",
                self.rows,
                self.columns,
                self.cells.len()
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichDocument {
    pub default_format: CharFormat,
    blocks: Vec<Block>,
}

impl RichDocument {
    pub fn new(default_format: CharFormat) -> Self {
        Self {
            default_format,
            blocks: vec![Block::Paragraph(Paragraph::default())],
        }
    }

    /// Splits on `\n` only, so the text round-trips byte for byte through `plain_text`.
    pub fn from_plain_text(text: &str, default_format: CharFormat) -> Self {
        let blocks = text
            .split('\n')
            .map(|line| Block::Paragraph(Paragraph::from_text(line, &default_format)))
            .collect();
        Self {
            default_format,
            blocks,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn paragraph(&self, block: usize) -> Option<&Paragraph> {
        match self.blocks.get(block) {
            Some(Block::Paragraph(p)) => Some(p),
            _ => None,
        }
    }

    pub fn paragraph_mut(&mut self, block: usize) -> Option<&mut Paragraph> {
        match self.blocks.get_mut(block) {
            Some(Block::Paragraph(p)) => Some(p),
            _ => None,
        }
    }

    pub fn table(&self, block: usize) -> Option<&Table> {
        match self.blocks.get(block) {
            Some(Block::Table(t)) => Some(t),
            _ => None,
        }
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        })
    }

    /// The paragraph `pos` points into: a body paragraph or a table cell.
    pub fn text_at(&self, pos: DocPosition) -> Option<&Paragraph> {
        match self.blocks.get(pos.block)? {
            Block::Paragraph(p) => Some(p),
            Block::Table(t) => t.cells.get(pos.cell),
        }
    }

    fn text_at_mut(&mut self, pos: DocPosition) -> Option<&mut Paragraph> {
        match self.blocks.get_mut(pos.block)? {
            Block::Paragraph(p) => Some(p),
            Block::Table(t) => t.cells.get_mut(pos.cell),
        }
    }

    pub fn plain_text(&self) -> String {
        let mut lines: Vec<String> = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            match block {
                Block::Paragraph(p) => lines.push(p.plain_text()),
                Block::Table(t) => lines.extend(t.cells.iter().map(Paragraph::plain_text)),
            }
        }
        lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.blocks.as_slice(), [Block::Paragraph(p)] if p.is_empty())
    }

    pub fn clear(&mut self) {
        self.blocks = vec![Block::Paragraph(Paragraph::default())];
    }

    pub fn first_position(&self) -> DocPosition {
        DocPosition::new(0, 0)
    }

    pub fn end_position(&self) -> DocPosition {
        self.block_end(self.blocks.len().saturating_sub(1))
    }

    /// Last position of `block`: the paragraph end, or the end of a table's last cell.
    pub fn block_end(&self, block: usize) -> DocPosition {
        match self.blocks.get(block) {
            Some(Block::Table(t)) => {
                let cell = t.cells.len().saturating_sub(1);
                let len = t.cells.get(cell).map(Paragraph::len).unwrap_or(0);
                DocPosition::in_cell(block, cell, len)
            }
            Some(Block::Paragraph(p)) => DocPosition::new(block, p.len()),
            None => DocPosition::new(block, 0),
        }
    }

    /// End of the paragraph or cell holding `pos`.
    pub fn text_end(&self, pos: DocPosition) -> DocPosition {
        pos.with_offset(self.text_at(pos).map(Paragraph::len).unwrap_or(0))
    }

    /// End of the paragraph or cell before the one holding `pos`.
    pub fn prev_text_end(&self, pos: DocPosition) -> Option<DocPosition> {
        if self.table(pos.block).is_some() && pos.cell > 0 {
            let prev = DocPosition::in_cell(pos.block, pos.cell - 1, 0);
            return Some(self.text_end(prev));
        }
        pos.block.checked_sub(1).map(|b| self.block_end(b))
    }

    /// Start of the paragraph or cell after the one holding `pos`.
    pub fn next_text_start(&self, pos: DocPosition) -> Option<DocPosition> {
        if let Some(t) = self.table(pos.block) {
            if pos.cell + 1 < t.cells.len() {
                return Some(DocPosition::in_cell(pos.block, pos.cell + 1, 0));
            }
        }
        (pos.block + 1 < self.blocks.len()).then(|| DocPosition::new(pos.block + 1, 0))
    }

    /// One visual line up: the cell above inside a table, otherwise the previous block. Entering
    /// a table from below lands in the first cell of its last row.
    pub fn line_above(&self, pos: DocPosition) -> Option<DocPosition> {
        if let Some(t) = self.table(pos.block) {
            if pos.cell >= t.columns {
                let above = DocPosition::in_cell(pos.block, pos.cell - t.columns, pos.offset);
                return Some(self.clamp(above));
            }
        }
        let block = pos.block.checked_sub(1)?;
        let target = match self.table(block) {
            Some(t) => DocPosition::in_cell(block, (t.rows.saturating_sub(1)) * t.columns, pos.offset),
            None => DocPosition::new(block, pos.offset),
        };
        Some(self.clamp(target))
    }

    /// One visual line down: the cell below inside a table, otherwise the next block. Entering
    /// a table from above lands in its first cell.
    pub fn line_below(&self, pos: DocPosition) -> Option<DocPosition> {
        if let Some(t) = self.table(pos.block) {
            if pos.cell + t.columns < t.cells.len() {
                let below = DocPosition::in_cell(pos.block, pos.cell + t.columns, pos.offset);
                return Some(self.clamp(below));
            }
        }
        let block = pos.block + 1;
        if block >= self.blocks.len() {
            return None;
        }
        Some(self.clamp(DocPosition::new(block, pos.offset)))
    }

    /// Moves `pos` onto the closest valid position.
    pub fn clamp(&self, pos: DocPosition) -> DocPosition {
        match self.blocks.get(pos.block) {
            None => self.end_position(),
            Some(Block::Paragraph(p)) => DocPosition::new(pos.block, pos.offset.min(p.len())),
            Some(Block::Table(t)) => {
                let cell = pos.cell.min(t.cells.len().saturating_sub(1));
                let len = t.cells.get(cell).map(Paragraph::len).unwrap_or(0);
                DocPosition::in_cell(pos.block, cell, pos.offset.min(len))
            }
        }
    }

    pub fn char_format_at(&self, pos: DocPosition) -> CharFormat {
        self.text_at(pos)
            .and_then(|p| p.format_at(pos.offset))
            .cloned()
            .unwrap_or_else(|| self.default_format.clone())
    }

    /// Inserts `text` and returns the position after it. Newlines split body paragraphs; inside a
    /// table cell they become spaces.
    pub fn insert_text(&mut self, pos: DocPosition, text: &str, format: &CharFormat) -> DocPosition {
        let mut pos = self.clamp(pos);
        if self.table(pos.block).is_some() {
            let flat = text.replace('\n', " ");
            if let Some(cell) = self.text_at_mut(pos) {
                cell.insert_text(pos.offset, &flat, format);
                pos.offset += flat.chars().count();
            }
            return pos;
        }

        for (i, piece) in text.split('\n').enumerate() {
            if i > 0 {
                pos = self.split_paragraph(pos);
            }
            if piece.is_empty() {
                continue;
            }
            if let Some(p) = self.paragraph_mut(pos.block) {
                p.insert_text(pos.offset, piece, format);
                pos.offset += piece.chars().count();
            }
        }
        pos
    }

    /// Splits the paragraph at `pos`; the new paragraph keeps the block format (alignment and
    /// list membership). Returns the start of the new paragraph. Table cells are never split.
    pub fn split_paragraph(&mut self, pos: DocPosition) -> DocPosition {
        let pos = self.clamp(pos);
        let Some(p) = self.paragraph_mut(pos.block) else {
            return pos;
        };
        let tail = p.split_off(pos.offset);
        self.blocks.insert(pos.block + 1, Block::Paragraph(tail));
        DocPosition::new(pos.block + 1, 0)
    }

    /// Removes `[start, end)`. Inside one table only cell text is removed and the grid stays.
    /// Across blocks, every block strictly inside the range is dropped, a table at either edge
    /// goes as a whole, and the edge paragraphs are joined.
    pub fn delete_range(&mut self, start: DocPosition, end: DocPosition) -> DocPosition {
        let (start, end) = (self.clamp(start.min(end)), self.clamp(start.max(end)));
        if start.block == end.block {
            match &mut self.blocks[start.block] {
                Block::Paragraph(p) => p.remove_range(start.offset, end.offset),
                Block::Table(t) => {
                    for (cell, from, to) in
                        t.covered((start.cell, start.offset), (end.cell, end.offset))
                    {
                        t.cells[cell].remove_range(from, to);
                    }
                }
            }
            return start;
        }

        let tail = self
            .paragraph_mut(end.block)
            .map(|p| p.split_off(end.offset));
        if self.paragraph(start.block).is_some() {
            self.blocks.drain(start.block + 1..=end.block);
            if let Some(p) = self.paragraph_mut(start.block) {
                let len = p.len();
                p.remove_range(start.offset, len);
                if let Some(tail) = tail {
                    p.append(tail);
                }
            }
            return start;
        }

        self.blocks.drain(start.block..=end.block);
        self.blocks
            .insert(start.block, Block::Paragraph(tail.unwrap_or_default()));
        DocPosition::new(start.block, 0)
    }

    /// Drops the table at `block`. Paragraph blocks are never removed this way.
    pub fn remove_table(&mut self, block: usize) -> bool {
        if self.table(block).is_none() {
            return false;
        }
        self.blocks.remove(block);
        true
    }

    /// Merges `patch` into every character in `[start, end)`, table cells included.
    pub fn merge_char_format(
        &mut self,
        start: DocPosition,
        end: DocPosition,
        patch: &CharFormatPatch,
    ) -> bool {
        let (start, end) = (self.clamp(start.min(end)), self.clamp(start.max(end)));
        let mut changed = false;
        for idx in start.block..=end.block {
            let (first, last) = Self::edges(idx, start, end);
            match &mut self.blocks[idx] {
                Block::Paragraph(p) => {
                    let to = last.1.min(p.len());
                    changed |= p.merge_format(first.1, to, patch);
                }
                Block::Table(t) => {
                    for (cell, from, to) in t.covered(first, last) {
                        changed |= t.cells[cell].merge_format(from, to, patch);
                    }
                }
            }
        }
        changed
    }

    /// Sets the alignment of every paragraph or cell touched by `[start, end]`.
    pub fn set_alignment(&mut self, start: DocPosition, end: DocPosition, alignment: Alignment) -> bool {
        let (start, end) = (self.clamp(start.min(end)), self.clamp(start.max(end)));
        let mut changed = false;
        for idx in start.block..=end.block {
            let (first, last) = Self::edges(idx, start, end);
            let targets: Vec<&mut Paragraph> = match &mut self.blocks[idx] {
                Block::Paragraph(p) => vec![p],
                Block::Table(t) => {
                    let cells: Vec<usize> = t.covered(first, last).into_iter().map(|c| c.0).collect();
                    t.cells
                        .iter_mut()
                        .enumerate()
                        .filter(|(i, _)| cells.contains(i))
                        .map(|(_, p)| p)
                        .collect()
                }
            };
            for p in targets {
                changed |= p.format.alignment != alignment;
                p.format.alignment = alignment;
            }
        }
        changed
    }

    /// `(cell, offset)` bounds of the part of block `idx` that lies inside `[start, end]`.
    fn edges(idx: usize, start: DocPosition, end: DocPosition) -> ((usize, usize), (usize, usize)) {
        let first = if idx == start.block {
            (start.cell, start.offset)
        } else {
            (0, 0)
        };
        let last = if idx == end.block {
            (end.cell, end.offset)
        } else {
            (usize::MAX, usize::MAX)
        };
        (first, last)
    }

    /// Puts every paragraph in `first..=last` into one new list and returns its id. Tables are
    /// left out.
    pub fn create_list(&mut self, first: usize, last: usize, style: ListStyle) -> u32 {
        let id = self.next_list_id();
        for idx in first..=last.min(self.blocks.len().saturating_sub(1)) {
            if let Some(p) = self.paragraph_mut(idx) {
                p.format.list = Some(ListFormat { id, style });
            }
        }
        id
    }

    fn next_list_id(&self) -> u32 {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph(p) => p.format.list.map(|l| l.id),
                Block::Table(_) => None,
            })
            .max()
            .map(|id| id + 1)
            .unwrap_or(1)
    }

    /// Marker text for a list item: `3.` for decimal lists, `•` for bullets.
    pub fn list_marker(&self, block: usize) -> Option<String> {
        let list = self.paragraph(block)?.format.list?;
        match list.style {
            ListStyle::Bullet => Some("•".to_string()),
            ListStyle::Decimal => {
                let ordinal = self.blocks[..block]
                    .iter()
                    .filter(|b| {
                        matches!(b, Block::Paragraph(p) if p.format.list.map(|l| l.id) == Some(list.id))
                    })
                    .count()
                    + 1;
                Some(format!("{ordinal}."))
            }
        }
    }

    pub fn insert_image(
        &mut self,
        pos: DocPosition,
        image: ImageFormat,
        format: &CharFormat,
    ) -> DocPosition {
        let pos = self.clamp(pos);
        match self.text_at_mut(pos) {
            Some(p) => {
                p.insert_image(pos.offset, image, format);
                pos.with_offset(pos.offset + 1)
            }
            None => pos,
        }
    }

    /// Splits the paragraph at `pos` and puts an empty `rows x columns` table between the two
    /// halves. Returns the start of the table's first cell. Tables do not nest, so inside a cell
    /// nothing happens.
    pub fn insert_table(&mut self, pos: DocPosition, rows: usize, columns: usize) -> DocPosition {
        let pos = self.clamp(pos);
        let dimension = 1..=MAX_TABLE_DIMENSION;
        if self.paragraph(pos.block).is_none()
            || !dimension.contains(&rows)
            || !dimension.contains(&columns)
        {
            return pos;
        }
        let after = self.split_paragraph(pos);
        self.blocks
            .insert(after.block, Block::Table(Table::new(rows, columns)));
        DocPosition::in_cell(after.block, 0, 0)
    }

    /// Checks tables and restores the paragraph invariants on a freshly deserialized document.
    pub(crate) fn repair(&mut self) -> Result<(), String> {
        for (idx, block) in self.blocks.iter().enumerate() {
            if let Block::Table(t) = block {
                t.validate()
                    .map_err(|e| format!("table at block {idx} {e}"))?;
            }
        }
        if !matches!(self.blocks.last(), Some(Block::Paragraph(_))) {
            self.blocks.push(Block::Paragraph(Paragraph::default()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/document.rs"]
mod tests;
