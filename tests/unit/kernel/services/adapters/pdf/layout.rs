use super::*;
use crate::models::{CharFormatPatch, DocPosition, ListStyle};

fn base() -> CharFormat {
    CharFormat::new("Helvetica", 12)
}

fn texts(page: &PageLayout) -> Vec<(f32, f32, String)> {
    page.ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { x, y, text, .. } => Some((*x, *y, text.clone())),
            _ => None,
        })
        .collect()
}

#[test]
fn test_tokens_split_words_and_spaces() {
    assert_eq!(
        tokens("ab  cd"),
        vec![("ab", false), ("  ", true), ("cd", false)]
    );
    assert!(tokens("").is_empty());
}

#[test]
fn test_simple_paragraph_starts_at_top_left() {
    let doc = RichDocument::from_plain_text("Hello world", base());
    let pages = layout_document(&doc);
    assert_eq!(pages.len(), 1);

    let texts = texts(&pages[0]);
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[0].0, MARGIN);
    assert_eq!(texts[0].1, PAGE_HEIGHT - MARGIN - 12.0);
    assert_eq!(texts[1].2, "world");
    assert!(texts[1].0 > texts[0].0);
}

#[test]
fn test_long_paragraph_wraps_inside_margins() {
    let text = "lorem ipsum dolor sit amet ".repeat(40);
    let doc = RichDocument::from_plain_text(text.trim(), base());
    let pages = layout_document(&doc);

    let texts = texts(&pages[0]);
    let lines: std::collections::BTreeSet<i64> =
        texts.iter().map(|(_, y, _)| *y as i64).collect();
    assert!(lines.len() > 1);
    for (x, _, text) in &texts {
        let width = FontId::for_format(&base()).text_width(text, 12.0);
        assert!(*x >= MARGIN);
        assert!(x + width <= MARGIN + CONTENT_WIDTH + 0.01);
    }
}

#[test]
fn test_many_paragraphs_paginate() {
    let text = vec!["line"; 200].join("\n");
    let doc = RichDocument::from_plain_text(&text, base());
    let pages = layout_document(&doc);
    assert!(pages.len() >= 3);
    for page in &pages {
        for (_, y, _) in texts(page) {
            assert!(y >= MARGIN - 0.01);
        }
    }
}

#[test]
fn test_right_alignment_moves_text_right() {
    let mut doc = RichDocument::from_plain_text("end", base());
    doc.set_alignment(DocPosition::new(0, 0), DocPosition::new(0, 0), Alignment::Right);
    let pages = layout_document(&doc);
    let texts = texts(&pages[0]);
    let width = FontId::for_format(&base()).text_width("end", 12.0);
    assert!((texts[0].0 + width - (MARGIN + CONTENT_WIDTH)).abs() < 0.01);
}

#[test]
fn test_list_marker_and_indent() {
    let mut doc = RichDocument::from_plain_text("one\ntwo", base());
    doc.create_list(0, 1, ListStyle::Decimal);
    let pages = layout_document(&doc);
    let texts = texts(&pages[0]);

    let marker = doc.list_marker(1).unwrap();
    assert!(texts.iter().any(|(x, _, t)| *t == marker && *x == MARGIN));
    assert!(texts
        .iter()
        .any(|(x, _, t)| t == "two" && *x == MARGIN + LIST_INDENT));
}

#[test]
fn test_highlight_and_underline_draw_extra_ops() {
    let mut doc = RichDocument::from_plain_text("mark", base());
    doc.merge_char_format(
        DocPosition::new(0, 0),
        DocPosition::new(0, 4),
        &CharFormatPatch::background(Rgb::YELLOW),
    );
    doc.merge_char_format(
        DocPosition::new(0, 0),
        DocPosition::new(0, 4),
        &CharFormatPatch::underline(true),
    );
    let pages = layout_document(&doc);
    let ops = &pages[0].ops;
    assert!(ops
        .iter()
        .any(|op| matches!(op, DrawOp::FillRect { color, .. } if *color == Rgb::YELLOW)));
    assert!(ops.iter().any(|op| matches!(op, DrawOp::Line { .. })));
}

#[test]
fn test_table_draws_grid() {
    let mut doc = RichDocument::new(base());
    doc.insert_table(DocPosition::new(0, 0), 3, 2);
    let pages = layout_document(&doc);
    let cells = pages[0]
        .ops
        .iter()
        .filter(|op| matches!(op, DrawOp::StrokeRect { .. }))
        .count();
    assert_eq!(cells, 6);
}

#[test]
fn test_image_placeholder_is_scaled_to_fit() {
    let mut doc = RichDocument::new(base());
    doc.insert_image(
        DocPosition::new(0, 0),
        ImageFormat {
            name: "wide.png".to_string(),
            width: 2000,
            height: 100,
        },
        &base(),
    );
    let pages = layout_document(&doc);
    let rect = pages[0].ops.iter().find_map(|op| match op {
        DrawOp::StrokeRect { width, height, .. } => Some((*width, *height)),
        _ => None,
    });
    let (width, height) = rect.unwrap();
    assert!((width - CONTENT_WIDTH).abs() < 0.01);
    assert!(height < 100.0 * 0.75);
}

#[test]
fn test_overlong_word_is_broken() {
    let word = "x".repeat(400);
    let doc = RichDocument::from_plain_text(&word, base());
    let pages = layout_document(&doc);
    let pieces = texts(&pages[0]);
    assert!(pieces.len() > 1);
    assert_eq!(
        pieces.iter().map(|(_, _, t)| t.len()).sum::<usize>(),
        400
    );
}
