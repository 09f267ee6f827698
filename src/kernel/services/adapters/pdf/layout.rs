//! Flows a `RichDocument` onto A4 pages as positioned drawing operations.
//!
//! Coordinates are PDF user space: points, origin at the bottom-left of the page. Widths come from
//! `FontId::text_width`, so line breaks are approximate.

use super::fonts::FontId;
use crate::models::{
    Alignment, Block, CharFormat, ImageFormat, Inline, Paragraph, RichDocument, Rgb, Table,
};

pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
pub const MARGIN: f32 = 50.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const CONTENT_HEIGHT: f32 = PAGE_HEIGHT - 2.0 * MARGIN;

const LINE_SPACING: f32 = 1.2;
const LIST_INDENT: f32 = 18.0;
const CELL_PADDING: f32 = 4.0;
const PX_TO_PT: f32 = 0.75;
const IMAGE_LABEL_SIZE: f32 = 8.0;
const GRID_COLOR: Rgb = Rgb::new(0x80, 0x80, 0x80);

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        font: FontId,
        size: f32,
        color: Rgb,
        text: String,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub ops: Vec<DrawOp>,
}

impl PageLayout {
    pub fn text(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone)]
struct Fragment {
    text: String,
    format: CharFormat,
    width: f32,
    is_space: bool,
}

impl Fragment {
    fn new(text: String, format: &CharFormat, is_space: bool) -> Self {
        let width = FontId::for_format(format).text_width(&text, f32::from(format.point_size));
        Self {
            text,
            format: format.clone(),
            width,
            is_space,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct TextLine {
    fragments: Vec<Fragment>,
    width: f32,
    size: f32,
}

impl TextLine {
    fn push(&mut self, fragment: Fragment) {
        self.width += fragment.width;
        self.size = self.size.max(f32::from(fragment.format.point_size));
        self.fragments.push(fragment);
    }

    fn trim_trailing_spaces(&mut self) {
        while self.fragments.last().is_some_and(|f| f.is_space) {
            if let Some(f) = self.fragments.pop() {
                self.width -= f.width;
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

#[derive(Debug, Clone)]
enum LaidOut {
    Text(TextLine),
    Image {
        image: ImageFormat,
        width: f32,
        height: f32,
    },
}

impl LaidOut {
    fn height(&self, fallback_size: f32) -> f32 {
        match self {
            LaidOut::Text(line) => {
                let size = if line.size > 0.0 { line.size } else { fallback_size };
                size * LINE_SPACING
            }
            LaidOut::Image { height, .. } => height + 4.0,
        }
    }
}

fn image_box(image: &ImageFormat, avail: f32) -> (f32, f32) {
    let mut width = image.width.max(1) as f32 * PX_TO_PT;
    let mut height = image.height.max(1) as f32 * PX_TO_PT;
    let scale = (avail / width).min(CONTENT_HEIGHT / height).min(1.0);
    width *= scale;
    height *= scale;
    (width, height)
}

/// Splits runs into words and whitespace, then fills lines greedily. Words wider than the line
/// are broken between characters.
fn wrap_paragraph(paragraph: &Paragraph, avail: f32) -> Vec<LaidOut> {
    let mut out = Vec::new();
    let mut line = TextLine::default();

    for inline in &paragraph.inlines {
        match inline {
            Inline::Image { image, .. } => {
                if !line.is_empty() {
                    line.trim_trailing_spaces();
                    out.push(LaidOut::Text(std::mem::take(&mut line)));
                }
                let (width, height) = image_box(image, avail);
                out.push(LaidOut::Image {
                    image: image.clone(),
                    width,
                    height,
                });
            }
            Inline::Text { text, format } => {
                for (token, is_space) in tokens(text) {
                    let fragment = Fragment::new(token.to_string(), format, is_space);
                    if is_space {
                        if !line.is_empty() {
                            line.push(fragment);
                        }
                        continue;
                    }
                    if !line.is_empty() && line.width + fragment.width > avail {
                        line.trim_trailing_spaces();
                        out.push(LaidOut::Text(std::mem::take(&mut line)));
                    }
                    if fragment.width <= avail {
                        line.push(fragment);
                        continue;
                    }
                    for piece in break_word(&fragment, avail) {
                        if !line.is_empty() {
                            out.push(LaidOut::Text(std::mem::take(&mut line)));
                        }
                        line.push(piece);
                    }
                }
            }
        }
    }

    line.trim_trailing_spaces();
    if !line.is_empty() || out.is_empty() {
        out.push(LaidOut::Text(line));
    }
    out
}

fn tokens(text: &str) -> Vec<(&str, bool)> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;
    for (i, ch) in text.char_indices() {
        let is_space = ch.is_whitespace();
        match current {
            Some(kind) if kind == is_space => {}
            Some(kind) => {
                out.push((&text[start..i], kind));
                start = i;
                current = Some(is_space);
            }
            None => current = Some(is_space),
        }
    }
    if let Some(kind) = current {
        out.push((&text[start..], kind));
    }
    out
}

fn break_word(fragment: &Fragment, avail: f32) -> Vec<Fragment> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for ch in fragment.text.chars() {
        current.push(ch);
        let candidate = Fragment::new(current.clone(), &fragment.format, false);
        if candidate.width > avail && current.chars().count() > 1 {
            current.pop();
            pieces.push(Fragment::new(
                std::mem::take(&mut current),
                &fragment.format,
                false,
            ));
            current.push(ch);
        }
    }
    if !current.is_empty() {
        pieces.push(Fragment::new(current, &fragment.format, false));
    }
    pieces
}

struct PageWriter {
    pages: Vec<PageLayout>,
    y: f32,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            pages: vec![PageLayout::default()],
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    /// Starts a new page unless `height` still fits. A page that is still empty keeps the block
    /// even if it overflows.
    fn ensure_space(&mut self, height: f32) {
        let at_top = self.y >= PAGE_HEIGHT - MARGIN;
        if !at_top && self.y - height < MARGIN {
            self.pages.push(PageLayout::default());
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn emit(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn draw_fragment(&mut self, fragment: &Fragment, x: f32, baseline: f32, width: f32) {
        let size = f32::from(fragment.format.point_size);
        if let Some(bg) = fragment.format.background {
            self.emit(DrawOp::FillRect {
                x,
                y: baseline - size * 0.25,
                width,
                height: size * LINE_SPACING,
                color: bg,
            });
        }
        let color = fragment.format.foreground.unwrap_or(Rgb::BLACK);
        if !fragment.is_space {
            self.emit(DrawOp::Text {
                x,
                y: baseline,
                font: FontId::for_format(&fragment.format),
                size,
                color,
                text: fragment.text.clone(),
            });
        }
        let stroke = (size / 18.0).max(0.5);
        if fragment.format.underline {
            let y = baseline - size * 0.12;
            self.emit(DrawOp::Line {
                from: (x, y),
                to: (x + width, y),
                width: stroke,
                color,
            });
        }
        if fragment.format.strike_out {
            let y = baseline + size * 0.3;
            self.emit(DrawOp::Line {
                from: (x, y),
                to: (x + width, y),
                width: stroke,
                color,
            });
        }
    }

    fn draw_line(
        &mut self,
        line: &TextLine,
        left: f32,
        avail: f32,
        alignment: Alignment,
        last: bool,
        fallback_size: f32,
    ) {
        let size = if line.size > 0.0 { line.size } else { fallback_size };
        let slack = (avail - line.width).max(0.0);
        let spaces = line.fragments.iter().filter(|f| f.is_space).count();
        let (mut x, extra) = match alignment {
            Alignment::Left => (left, 0.0),
            Alignment::Right => (left + slack, 0.0),
            Alignment::Center => (left + slack / 2.0, 0.0),
            Alignment::Justify if !last && spaces > 0 => (left, slack / spaces as f32),
            Alignment::Justify => (left, 0.0),
        };
        let baseline = self.y - size;
        for fragment in &line.fragments {
            let width = if fragment.is_space {
                fragment.width + extra
            } else {
                fragment.width
            };
            self.draw_fragment(fragment, x, baseline, width);
            x += width;
        }
    }

    fn draw_image(&mut self, image: &ImageFormat, x: f32, width: f32, height: f32) {
        let top = self.y - 2.0;
        self.emit(DrawOp::StrokeRect {
            x,
            y: top - height,
            width,
            height,
            color: GRID_COLOR,
        });
        let label_width = FontId::for_format(&CharFormat::new("Helvetica", 8))
            .text_width(&image.name, IMAGE_LABEL_SIZE);
        if height > IMAGE_LABEL_SIZE * 2.0 && label_width + 8.0 < width {
            self.emit(DrawOp::Text {
                x: x + 4.0,
                y: top - IMAGE_LABEL_SIZE - 4.0,
                font: FontId::for_format(&CharFormat::new("Helvetica", 8)),
                size: IMAGE_LABEL_SIZE,
                color: GRID_COLOR,
                text: image.name.clone(),
            });
        }
    }

    /// Draws laid-out lines starting at the current `y` and moves `y` below them.
    fn draw_laid_out(
        &mut self,
        items: &[LaidOut],
        left: f32,
        avail: f32,
        alignment: Alignment,
        fallback_size: f32,
        paginate: bool,
    ) {
        let count = items.len();
        for (i, item) in items.iter().enumerate() {
            let height = item.height(fallback_size);
            if paginate {
                self.ensure_space(height);
            }
            match item {
                LaidOut::Text(line) => {
                    let last = i + 1 == count
                        || matches!(items.get(i + 1), Some(LaidOut::Image { .. }));
                    self.draw_line(line, left, avail, alignment, last, fallback_size);
                }
                LaidOut::Image {
                    image,
                    width,
                    height,
                } => {
                    let x = match alignment {
                        Alignment::Right => left + avail - width,
                        Alignment::Center => left + (avail - width) / 2.0,
                        _ => left,
                    };
                    self.draw_image(image, x, *width, *height);
                }
            }
            self.y -= height;
        }
    }

    fn draw_paragraph(&mut self, paragraph: &Paragraph, marker: Option<String>, fallback: &CharFormat) {
        let indent = if marker.is_some() { LIST_INDENT } else { 0.0 };
        let left = MARGIN + indent;
        let avail = CONTENT_WIDTH - indent;
        let fallback_size = f32::from(fallback.point_size);
        let items = wrap_paragraph(paragraph, avail);

        if let Some(marker) = marker {
            let format = paragraph
                .format_at(0)
                .cloned()
                .unwrap_or_else(|| fallback.clone());
            let first_height = items
                .first()
                .map(|item| item.height(fallback_size))
                .unwrap_or(fallback_size * LINE_SPACING);
            self.ensure_space(first_height);
            let size = f32::from(format.point_size);
            self.emit(DrawOp::Text {
                x: MARGIN,
                y: self.y - size,
                font: FontId::for_format(&format),
                size,
                color: format.foreground.unwrap_or(Rgb::BLACK),
                text: marker,
            });
        }

        self.draw_laid_out(
            &items,
            left,
            avail,
            paragraph.format.alignment,
            fallback_size,
            true,
        );
    }

    fn draw_table(&mut self, table: &Table, fallback: &CharFormat) {
        let columns = table.columns.max(1);
        let cell_width = CONTENT_WIDTH / columns as f32;
        let inner = (cell_width - 2.0 * CELL_PADDING).max(1.0);
        let fallback_size = f32::from(fallback.point_size);

        for row in 0..table.rows {
            let cells: Vec<Vec<LaidOut>> = (0..columns)
                .map(|col| {
                    table
                        .cell(row, col)
                        .map(|p| wrap_paragraph(p, inner))
                        .unwrap_or_default()
                })
                .collect();
            let content_height = cells
                .iter()
                .map(|items| items.iter().map(|i| i.height(fallback_size)).sum::<f32>())
                .fold(fallback_size * LINE_SPACING, f32::max);
            let row_height = content_height + 2.0 * CELL_PADDING;
            self.ensure_space(row_height);

            let top = self.y;
            for (col, items) in cells.iter().enumerate() {
                let x = MARGIN + col as f32 * cell_width;
                self.y = top - CELL_PADDING;
                let alignment = table
                    .cell(row, col)
                    .map(|p| p.format.alignment)
                    .unwrap_or_default();
                self.draw_laid_out(
                    items,
                    x + CELL_PADDING,
                    inner,
                    alignment,
                    fallback_size,
                    false,
                );
                self.y = top;
                self.emit(DrawOp::StrokeRect {
                    x,
                    y: top - row_height,
                    width: cell_width,
                    height: row_height,
                    color: GRID_COLOR,
                });
            }
            self.y = top - row_height;
        }
        self.y -= fallback_size * 0.5;
    }
}

pub fn layout_document(document: &RichDocument) -> Vec<PageLayout> {
    let mut writer = PageWriter::new();
    let fallback = &document.default_format;
    for (index, block) in document.blocks().iter().enumerate() {
        match block {
            Block::Paragraph(p) => writer.draw_paragraph(p, document.list_marker(index), fallback),
            Block::Table(t) => writer.draw_table(t, fallback),
        }
    }
    writer.pages
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/pdf/layout.rs"]
mod tests;
