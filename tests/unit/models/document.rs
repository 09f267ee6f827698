use super::*;
use crate::models::FontWeight;

fn fmt() -> CharFormat {
    CharFormat::new("Calibri", 12)
}

fn bold() -> CharFormat {
    let mut format = fmt();
    format.merge(&CharFormatPatch::weight(FontWeight::Bold));
    format
}

#[test]
fn test_plain_text_round_trips() {
    for text in ["", "one", "one\ntwo", "trailing\n", "\n\nblank lines\n"] {
        let doc = RichDocument::from_plain_text(text, fmt());
        assert_eq!(doc.plain_text(), text);
    }
}

#[test]
fn test_new_document_is_empty_single_paragraph() {
    let doc = RichDocument::new(fmt());
    assert!(doc.is_empty());
    assert_eq!(doc.block_count(), 1);
    assert_eq!(doc.first_position(), DocPosition::new(0, 0));
    assert_eq!(doc.end_position(), DocPosition::new(0, 0));
}

#[test]
fn test_insert_text_merges_equal_runs() {
    let mut p = Paragraph::from_text("hello", &fmt());
    p.insert_text(5, " world", &fmt());
    assert_eq!(p.inlines.len(), 1);
    assert_eq!(p.plain_text(), "hello world");

    p.insert_text(5, ",", &bold());
    assert_eq!(p.inlines.len(), 3);
    assert_eq!(p.plain_text(), "hello, world");
}

#[test]
fn test_insert_text_with_newlines_splits_paragraphs() {
    let mut doc = RichDocument::from_plain_text("ab", fmt());
    let end = doc.insert_text(DocPosition::new(0, 1), "x\ny", &fmt());
    assert_eq!(doc.plain_text(), "ax\nyb");
    assert_eq!(end, DocPosition::new(1, 1));
}

#[test]
fn test_format_at_uses_char_before() {
    let mut p = Paragraph::from_text("ab", &fmt());
    p.insert_text(2, "cd", &bold());
    assert_eq!(p.format_at(0), Some(&fmt()));
    assert_eq!(p.format_at(2), Some(&fmt()));
    assert_eq!(p.format_at(3), Some(&bold()));
    assert_eq!(p.format_at(99), Some(&bold()));
    assert_eq!(Paragraph::default().format_at(0), None);
}

#[test]
fn test_merge_char_format_across_paragraphs() {
    let mut doc = RichDocument::from_plain_text("abc\ndef", fmt());
    let changed = doc.merge_char_format(
        DocPosition::new(0, 1),
        DocPosition::new(1, 2),
        &CharFormatPatch::italic(true),
    );
    assert!(changed);

    let first = doc.paragraph(0).unwrap();
    assert!(!first.format_at(1).unwrap().italic);
    assert!(first.format_at(2).unwrap().italic);
    let second = doc.paragraph(1).unwrap();
    assert!(second.format_at(2).unwrap().italic);
    assert!(!second.format_at(3).unwrap().italic);
    assert_eq!(doc.plain_text(), "abc\ndef");
}

#[test]
fn test_merge_char_format_empty_range_is_noop() {
    let mut doc = RichDocument::from_plain_text("abc", fmt());
    let pos = DocPosition::new(0, 1);
    assert!(!doc.merge_char_format(pos, pos, &CharFormatPatch::italic(true)));
}

#[test]
fn test_delete_range_joins_paragraphs() {
    let mut doc = RichDocument::from_plain_text("hello\nworld", fmt());
    let at = doc.delete_range(DocPosition::new(0, 3), DocPosition::new(1, 2));
    assert_eq!(at, DocPosition::new(0, 3));
    assert_eq!(doc.plain_text(), "helrld");
    assert_eq!(doc.block_count(), 1);
}

#[test]
fn test_insert_table_splits_paragraph() {
    let mut doc = RichDocument::from_plain_text("abcd", fmt());
    let after = doc.insert_table(DocPosition::new(0, 2), 3, 2);

    assert_eq!(doc.block_count(), 3);
    assert_eq!(after, DocPosition::in_cell(1, 0, 0));
    assert_eq!(doc.paragraph(0).unwrap().plain_text(), "ab");
    assert_eq!(doc.paragraph(2).unwrap().plain_text(), "cd");

    let table = doc.table(1).unwrap();
    assert_eq!((table.rows, table.columns), (3, 2));
    assert_eq!(table.cells.len(), 6);
    assert!(table.cell(2, 1).is_some());
    assert!(table.cell(3, 0).is_none());
    assert_eq!(doc.tables().count(), 1);
}

#[test]
fn test_navigation_enters_table_cells() {
    let mut doc = RichDocument::from_plain_text("ab", fmt());
    doc.insert_table(DocPosition::new(0, 2), 2, 2);

    assert_eq!(doc.next_text_start(DocPosition::new(0, 2)), Some(DocPosition::in_cell(1, 0, 0)));
    assert_eq!(doc.next_text_start(DocPosition::in_cell(1, 1, 0)), Some(DocPosition::in_cell(1, 2, 0)));
    assert_eq!(doc.next_text_start(DocPosition::in_cell(1, 3, 0)), Some(DocPosition::new(2, 0)));
    assert_eq!(doc.prev_text_end(DocPosition::new(2, 0)), Some(DocPosition::in_cell(1, 3, 0)));
    assert_eq!(doc.prev_text_end(DocPosition::in_cell(1, 0, 0)), Some(DocPosition::new(0, 2)));

    assert_eq!(doc.line_below(DocPosition::in_cell(1, 1, 0)), Some(DocPosition::in_cell(1, 3, 0)));
    assert_eq!(doc.line_above(DocPosition::new(2, 0)), Some(DocPosition::in_cell(1, 2, 0)));
    assert_eq!(doc.line_above(DocPosition::in_cell(1, 1, 0)), Some(DocPosition::new(0, 0)));
}

#[test]
fn test_clamp_keeps_positions_inside_cells() {
    let mut doc = RichDocument::from_plain_text("ab", fmt());
    doc.insert_table(DocPosition::new(0, 2), 1, 2);
    doc.insert_text(DocPosition::in_cell(1, 1, 0), "xyz", &fmt());

    assert_eq!(doc.clamp(DocPosition::in_cell(1, 1, 9)), DocPosition::in_cell(1, 1, 3));
    assert_eq!(doc.clamp(DocPosition::in_cell(1, 7, 0)), DocPosition::in_cell(1, 1, 0));
    assert_eq!(doc.clamp(DocPosition::new(0, 99)), DocPosition::new(0, 2));
    assert_eq!(doc.clamp(DocPosition::new(42, 0)), doc.end_position());
    assert_eq!(doc.block_end(1), DocPosition::in_cell(1, 1, 3));
}

#[test]
fn test_cell_text_stays_on_one_line() {
    let mut doc = RichDocument::from_plain_text("", fmt());
    let cell = doc.insert_table(DocPosition::new(0, 0), 1, 1);
    let end = doc.insert_text(cell, "a\nb", &fmt());

    assert_eq!(end, DocPosition::in_cell(1, 0, 3));
    assert_eq!(doc.block_count(), 3);
    assert_eq!(doc.table(1).unwrap().cells[0].plain_text(), "a b");
    assert_eq!(doc.split_paragraph(end), end);
    assert_eq!(doc.insert_table(end, 2, 2), end);
}

#[test]
fn test_delete_range_inside_table_keeps_grid() {
    let mut doc = RichDocument::from_plain_text("", fmt());
    doc.insert_table(DocPosition::new(0, 0), 1, 3);
    for (cell, text) in ["one", "two", "six"].iter().enumerate() {
        doc.insert_text(DocPosition::in_cell(1, cell, 0), text, &fmt());
    }

    let at = doc.delete_range(DocPosition::in_cell(1, 0, 1), DocPosition::in_cell(1, 2, 2));
    assert_eq!(at, DocPosition::in_cell(1, 0, 1));
    let cells: Vec<String> = doc.table(1).unwrap().cells.iter().map(|c| c.plain_text()).collect();
    assert_eq!(cells, vec!["o", "", "x"]);
}

#[test]
fn test_delete_range_across_a_table_drops_it() {
    let mut doc = RichDocument::from_plain_text("abcd", fmt());
    doc.insert_table(DocPosition::new(0, 2), 2, 2);
    doc.insert_text(DocPosition::in_cell(1, 0, 0), "cell", &fmt());

    let at = doc.delete_range(DocPosition::new(0, 1), DocPosition::new(2, 1));
    assert_eq!(at, DocPosition::new(0, 1));
    assert_eq!(doc.tables().count(), 0);
    assert_eq!(doc.plain_text(), "ad");

    let mut doc = RichDocument::from_plain_text("abcd", fmt());
    doc.insert_table(DocPosition::new(0, 2), 1, 1);
    let at = doc.delete_range(DocPosition::in_cell(1, 0, 0), DocPosition::new(2, 1));
    assert_eq!(at, DocPosition::new(1, 0));
    assert_eq!(doc.plain_text(), "ab\nd");
}

#[test]
fn test_remove_table_only_removes_tables() {
    let mut doc = RichDocument::from_plain_text("ab", fmt());
    doc.insert_table(DocPosition::new(0, 1), 2, 2);
    assert!(!doc.remove_table(0));
    assert!(doc.remove_table(1));
    assert_eq!(doc.tables().count(), 0);
    assert_eq!(doc.block_count(), 2);
}

#[test]
fn test_table_cells_in_plain_text() {
    let mut doc = RichDocument::from_plain_text("x", fmt());
    doc.insert_table(DocPosition::new(0, 1), 1, 2);
    assert_eq!(doc.plain_text(), "x\n\n\n");
}

#[test]
fn test_insert_image_counts_as_one_char() {
    let mut doc = RichDocument::from_plain_text("ab", fmt());
    let image = ImageFormat {
        name: "/tmp/cat.png".to_string(),
        width: 300,
        height: 200,
    };
    let after = doc.insert_image(DocPosition::new(0, 1), image, &fmt());
    assert_eq!(after, DocPosition::new(0, 2));
    assert_eq!(doc.paragraph(0).unwrap().len(), 3);
    assert_eq!(doc.plain_text(), format!("a{OBJECT_REPLACEMENT}b"));
}

#[test]
fn test_set_alignment_range() {
    let mut doc = RichDocument::from_plain_text("a\nb\nc", fmt());
    let (start, end) = (DocPosition::new(0, 0), DocPosition::new(1, 1));
    assert!(doc.set_alignment(start, end, Alignment::Center));
    assert!(!doc.set_alignment(start, end, Alignment::Center));
    assert_eq!(doc.paragraph(1).unwrap().format.alignment, Alignment::Center);
    assert_eq!(doc.paragraph(2).unwrap().format.alignment, Alignment::Left);
}

#[test]
fn test_create_list_numbers_items() {
    let mut doc = RichDocument::from_plain_text("a\nb\nc", fmt());
    let first = doc.create_list(0, 1, ListStyle::Decimal);
    let second = doc.create_list(2, 2, ListStyle::Bullet);
    assert_ne!(first, second);

    assert_eq!(doc.list_marker(0).as_deref(), Some("1."));
    assert_eq!(doc.list_marker(1).as_deref(), Some("2."));
    assert_eq!(doc.list_marker(2).as_deref(), Some("•"));
}

#[test]
fn test_split_paragraph_keeps_block_format() {
    let mut doc = RichDocument::from_plain_text("ab", fmt());
    doc.create_list(0, 0, ListStyle::Decimal);
    let pos = doc.split_paragraph(DocPosition::new(0, 1));
    assert_eq!(pos, DocPosition::new(1, 0));
    assert_eq!(doc.list_marker(1).as_deref(), Some("2."));
}

#[test]
fn test_repair_rejects_malformed_table() {
    let mut doc = RichDocument::new(fmt());
    doc.blocks.push(Block::Table(Table {
        rows: 2,
        columns: 2,
        cells: vec![Paragraph::default()],
    }));
    assert!(doc.repair().is_err());
}

#[test]
fn test_repair_appends_trailing_paragraph() {
    let mut doc = RichDocument::new(fmt());
    doc.blocks.push(Block::Table(Table::new(1, 1)));
    doc.repair().unwrap();
    assert!(matches!(doc.blocks().last(), Some(Block::Paragraph(_))));
}

#[test]
fn test_set_alignment_reaches_selected_cells() {
    let mut doc = RichDocument::from_plain_text("", fmt());
    doc.insert_table(DocPosition::new(0, 0), 1, 3);
    let (start, end) = (DocPosition::in_cell(1, 1, 0), DocPosition::in_cell(1, 2, 0));
    assert!(doc.set_alignment(start, end, Alignment::Right));

    let cells = &doc.table(1).unwrap().cells;
    assert_eq!(cells[0].format.alignment, Alignment::Left);
    assert_eq!(cells[1].format.alignment, Alignment::Right);
    assert_eq!(cells[2].format.alignment, Alignment::Right);
}

#[test]
fn test_repair_rejects_overflowing_table_size() {
    let mut doc = RichDocument::new(fmt());
    doc.blocks.push(Block::Table(Table {
        rows: usize::MAX / 2 + 1,
        columns: 2,
        cells: Vec::new(),
    }));
    let err = doc.repair().unwrap_err();
    assert!(err.starts_with("table at block 1"));
}

#[test]
fn test_repair_rejects_oversized_table() {
    let mut doc = RichDocument::new(fmt());
    doc.blocks.push(Block::Table(Table {
        rows: MAX_TABLE_DIMENSION + 1,
        columns: 1,
        cells: vec![Paragraph::default(); MAX_TABLE_DIMENSION + 1],
    }));
    assert!(doc.repair().is_err());

    let mut doc = RichDocument::new(fmt());
    doc.blocks.push(Block::Table(Table {
        rows: 0,
        columns: 0,
        cells: Vec::new(),
    }));
    assert!(doc.repair().is_err());
}

#[test]
fn test_insert_table_rejects_out_of_range_sizes() {
    let mut doc = RichDocument::from_plain_text("ab", fmt());
    let pos = DocPosition::new(0, 1);
    assert_eq!(doc.insert_table(pos, 0, 3), pos);
    assert_eq!(doc.insert_table(pos, 3, MAX_TABLE_DIMENSION + 1), pos);
    assert_eq!(doc.tables().count(), 0);
    assert_eq!(doc.block_count(), 1);
}
