//! Lays a rich document out as terminal lines: wrapped paragraphs, list markers, tables as grids.

use crate::app::theme::UiTheme;
use crate::models::{
    Alignment, Block, CharFormat, DocPosition, DocumentSurface, Inline, Paragraph, Table,
};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub(super) struct DocumentLines {
    pub lines: Vec<Line<'static>>,
    /// `(line, column)` of the text cursor.
    pub cursor: Option<(usize, u16)>,
}

struct Glyph {
    text: String,
    width: u16,
    style: Style,
    offset: usize,
    breakable: bool,
}

pub(super) fn char_style(format: &CharFormat, theme: &UiTheme) -> Style {
    let mut style = Style::default();
    if let Some(fg) = format.foreground {
        style = style.fg(theme.document_color(fg));
    }
    if let Some(bg) = format.background {
        style = style.bg(theme.document_color(bg));
    }
    let mut modifiers = Modifier::empty();
    if format.is_bold() {
        modifiers |= Modifier::BOLD;
    }
    if format.italic {
        modifiers |= Modifier::ITALIC;
    }
    if format.underline {
        modifiers |= Modifier::UNDERLINED;
    }
    if format.strike_out {
        modifiers |= Modifier::CROSSED_OUT;
    }
    style.add_modifier(modifiers)
}

pub(super) fn image_label(name: &str, width: u32, height: u32) -> String {
    let file = std::path::Path::new(name)
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());
    format!("[image: {file} {width}x{height}]")
}

pub(super) fn layout_document(
    surface: &DocumentSurface,
    width: u16,
    theme: &UiTheme,
) -> DocumentLines {
    let document = surface.document();
    let cursor = surface.cursor();
    let selection = cursor.has_selection().then(|| cursor.selection());
    let width = width.max(1);

    let mut out = DocumentLines {
        lines: Vec::new(),
        cursor: None,
    };

    for (index, block) in document.blocks().iter().enumerate() {
        match block {
            Block::Paragraph(paragraph) => {
                let marker = document.list_marker(index).map(|m| format!("{m} "));
                let cursor_offset =
                    (cursor.position().block == index).then_some(cursor.position().offset);
                layout_paragraph(
                    &mut out,
                    ParagraphInput {
                        index,
                        paragraph,
                        marker,
                        cursor_offset,
                        selection,
                    },
                    width,
                    theme,
                );
            }
            Block::Table(table) => {
                let pos = cursor.position();
                layout_table(
                    &mut out,
                    TableInput {
                        index,
                        table,
                        cursor: (pos.block == index).then_some((pos.cell, pos.offset)),
                        selection,
                    },
                    width,
                    theme,
                );
            }
        }
    }

    out
}

struct ParagraphInput<'a> {
    index: usize,
    paragraph: &'a Paragraph,
    marker: Option<String>,
    cursor_offset: Option<usize>,
    selection: Option<(DocPosition, DocPosition)>,
}

struct TableInput<'a> {
    index: usize,
    table: &'a Table,
    /// `(cell, offset)` of the cursor when it is inside this table.
    cursor: Option<(usize, usize)>,
    selection: Option<(DocPosition, DocPosition)>,
}

/// Glyphs of the paragraph at `(block, cell)`; `cell` is 0 outside tables.
fn glyphs_for(
    paragraph: &Paragraph,
    (block, cell): (usize, usize),
    selection: Option<(DocPosition, DocPosition)>,
    theme: &UiTheme,
) -> Vec<Glyph> {
    let is_selected = |offset: usize| {
        selection.is_some_and(|(start, end)| {
            let pos = DocPosition::in_cell(block, cell, offset);
            start <= pos && pos < end
        })
    };
    let style_for = |format: &CharFormat, offset: usize| {
        let style = char_style(format, theme);
        if is_selected(offset) {
            style.bg(theme.selection_bg)
        } else {
            style
        }
    };

    let mut glyphs = Vec::new();
    let mut offset = 0usize;
    for inline in &paragraph.inlines {
        match inline {
            Inline::Text { text, format } => {
                for ch in text.chars() {
                    let (text, width) = if ch.is_control() {
                        (" ".to_string(), 1)
                    } else {
                        (ch.to_string(), ch.width().unwrap_or(0) as u16)
                    };
                    glyphs.push(Glyph {
                        text,
                        width,
                        style: style_for(format, offset),
                        offset,
                        breakable: ch.is_whitespace(),
                    });
                    offset += 1;
                }
            }
            Inline::Image { image, format } => {
                let label = image_label(&image.name, image.width, image.height);
                let width = label.width() as u16;
                glyphs.push(Glyph {
                    text: label,
                    width,
                    style: style_for(format, offset).add_modifier(Modifier::DIM),
                    offset,
                    breakable: false,
                });
                offset += 1;
            }
        }
    }
    glyphs
}

/// Greedy wrap that prefers breaking after whitespace.
fn wrap_glyphs(glyphs: Vec<Glyph>, available: u16) -> Vec<Vec<Glyph>> {
    let mut rows = Vec::new();
    let mut current: Vec<Glyph> = Vec::new();
    let mut row_width = 0u16;
    let mut last_break: Option<usize> = None;

    for glyph in glyphs {
        if row_width.saturating_add(glyph.width) > available && !current.is_empty() {
            match last_break.filter(|&at| at < current.len()) {
                Some(at) => {
                    let rest = current.split_off(at);
                    rows.push(std::mem::replace(&mut current, rest));
                    row_width = current.iter().map(|g| g.width).sum();
                }
                None => {
                    rows.push(std::mem::take(&mut current));
                    row_width = 0;
                }
            }
            last_break = None;
        }

        row_width = row_width.saturating_add(glyph.width);
        let breakable = glyph.breakable;
        current.push(glyph);
        if breakable {
            last_break = Some(current.len());
        }
    }
    rows.push(current);
    rows
}

fn layout_paragraph(
    out: &mut DocumentLines,
    input: ParagraphInput<'_>,
    width: u16,
    theme: &UiTheme,
) {
    let marker_width = input.marker.as_deref().map(|m| m.width() as u16).unwrap_or(0);
    let indent = marker_width.min(width.saturating_sub(1));
    let available = width.saturating_sub(indent).max(1);
    let paragraph_len = input.paragraph.len();

    let glyphs = glyphs_for(input.paragraph, (input.index, 0), input.selection, theme);
    let rows = wrap_glyphs(glyphs, available);
    let last_row = rows.len().saturating_sub(1);

    for (row_index, row) in rows.into_iter().enumerate() {
        let content_width: u16 = row
            .iter()
            .rev()
            .skip_while(|g| g.breakable)
            .map(|g| g.width)
            .sum();
        let pad = match input.paragraph.format.alignment {
            Alignment::Right => available.saturating_sub(content_width),
            Alignment::Center => available.saturating_sub(content_width) / 2,
            Alignment::Left | Alignment::Justify => 0,
        };

        let mut spans = Vec::with_capacity(row.len() + 2);
        match (&input.marker, row_index) {
            (Some(marker), 0) => spans.push(Span::styled(
                marker.clone(),
                Style::default().fg(theme.accent_fg),
            )),
            _ if indent > 0 => spans.push(Span::raw(" ".repeat(indent as usize))),
            _ => {}
        }
        if pad > 0 {
            spans.push(Span::raw(" ".repeat(pad as usize)));
        }

        let line_index = out.lines.len();
        let mut col = indent.saturating_add(pad);
        for glyph in &row {
            if input.cursor_offset == Some(glyph.offset) {
                out.cursor = Some((line_index, col));
            }
            col = col.saturating_add(glyph.width);
        }
        if row_index == last_row && input.cursor_offset.is_some_and(|o| o >= paragraph_len) {
            out.cursor = Some((line_index, col.min(width.saturating_sub(1))));
        }

        spans.extend(merge_spans(row));
        out.lines.push(Line::from(spans));
    }
}

fn merge_spans(row: Vec<Glyph>) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut text = String::new();
    let mut style: Option<Style> = None;
    for glyph in row {
        if style.is_some_and(|s| s != glyph.style) {
            if let Some(s) = style {
                spans.push(Span::styled(std::mem::take(&mut text), s));
            }
        }
        style = Some(glyph.style);
        text.push_str(&glyph.text);
    }
    if let Some(s) = style {
        spans.push(Span::styled(text, s));
    }
    spans
}

fn paragraph_width(paragraph: &Paragraph) -> usize {
    paragraph
        .inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text { text, .. } => text.chars().map(|ch| ch.width().unwrap_or(0)).sum(),
            Inline::Image { image, .. } => image_label(&image.name, image.width, image.height).width(),
        })
        .sum()
}

fn layout_table(out: &mut DocumentLines, input: TableInput<'_>, width: u16, theme: &UiTheme) {
    let table = input.table;
    if table.columns == 0 || table.rows == 0 {
        return;
    }

    let border = Style::default().fg(theme.inactive_border);
    let borders = table.columns + 1;
    let budget = (width as usize).saturating_sub(borders) / table.columns;
    let budget = budget.max(1);

    let column_widths: Vec<usize> = (0..table.columns)
        .map(|column| {
            let widest = (0..table.rows)
                .filter_map(|row| table.cell(row, column))
                .map(paragraph_width)
                .max()
                .unwrap_or(0);
            (widest + 2).clamp(3.min(budget), budget)
        })
        .collect();

    let rule = |left: &str, mid: &str, right: &str| {
        let mut s = String::from(left);
        for (i, w) in column_widths.iter().enumerate() {
            s.push_str(&"─".repeat(*w));
            s.push_str(if i + 1 == column_widths.len() { right } else { mid });
        }
        Line::from(Span::styled(s, border))
    };

    out.lines.push(rule("┌", "┬", "┐"));
    for row in 0..table.rows {
        let line_index = out.lines.len();
        let mut spans = vec![Span::styled("│", border)];
        let mut x = 1usize;
        for (column, w) in column_widths.iter().enumerate() {
            let cell = row * table.columns + column;
            let inner = w.saturating_sub(2);
            let glyphs = table
                .cells
                .get(cell)
                .map(|p| glyphs_for(p, (input.index, cell), input.selection, theme))
                .unwrap_or_default();

            let cursor_offset = input.cursor.filter(|(c, _)| *c == cell).map(|(_, o)| o);
            let mut used = 0usize;
            let mut cursor_col = None;
            let mut shown = Vec::new();
            for glyph in glyphs {
                if cursor_offset == Some(glyph.offset) {
                    cursor_col = Some(used);
                }
                if used + glyph.width as usize > inner {
                    break;
                }
                used += glyph.width as usize;
                shown.push(glyph);
            }
            if cursor_offset.is_some() {
                let col = cursor_col.unwrap_or(used).min(inner);
                let pad = usize::from(*w >= 2);
                out.cursor = Some((line_index, (x + pad + col).min(u16::MAX as usize) as u16));
            }

            if *w >= 2 {
                spans.push(Span::raw(" "));
                spans.extend(merge_spans(shown));
                spans.push(Span::raw(" ".repeat(inner - used + 1)));
            } else {
                spans.push(Span::raw(" ".repeat(*w)));
            }
            spans.push(Span::styled("│", border));
            x += w + 1;
        }
        out.lines.push(Line::from(spans));
        if row + 1 < table.rows {
            out.lines.push(rule("├", "┼", "┤"));
        }
    }
    out.lines.push(rule("└", "┴", "┘"));
}

#[cfg(test)]
#[path = "../../../../tests/unit/app/workbench/render/document.rs"]
mod tests;
