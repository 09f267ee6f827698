use super::*;
use crate::models::{CharFormatPatch, FontWeight, ImageFormat, ListStyle, Motion};

fn surface_with(text: &str) -> DocumentSurface {
    let mut surface = DocumentSurface::new(CharFormat::new("Calibri", 12));
    surface.insert_text(text);
    surface
}

fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

#[test]
fn short_paragraph_is_one_line_with_cursor_at_end() {
    let surface = surface_with("hello world");
    let laid = layout_document(&surface, 40, &UiTheme::default());

    assert_eq!(laid.lines.len(), 1);
    assert_eq!(line_text(&laid.lines[0]), "hello world");
    assert_eq!(laid.cursor, Some((0, 11)));
}

#[test]
fn wrapping_breaks_after_whitespace() {
    let surface = surface_with("hello world foo");
    let laid = layout_document(&surface, 11, &UiTheme::default());

    let lines: Vec<String> = laid.lines.iter().map(line_text).collect();
    assert_eq!(lines, vec!["hello ".to_string(), "world foo".to_string()]);
    assert_eq!(laid.cursor, Some((1, 9)));
}

#[test]
fn long_word_is_hard_broken() {
    let surface = surface_with("abcdefgh");
    let laid = layout_document(&surface, 3, &UiTheme::default());

    let lines: Vec<String> = laid.lines.iter().map(line_text).collect();
    assert_eq!(lines, vec!["abc", "def", "gh"]);
}

#[test]
fn center_and_right_alignment_pad_the_line() {
    let mut surface = surface_with("ab");
    surface.set_alignment(Alignment::Center);
    let laid = layout_document(&surface, 10, &UiTheme::default());
    assert_eq!(line_text(&laid.lines[0]), "    ab");

    surface.set_alignment(Alignment::Right);
    let laid = layout_document(&surface, 10, &UiTheme::default());
    assert_eq!(line_text(&laid.lines[0]), "        ab");
    assert_eq!(laid.cursor, Some((0, 9)));
}

#[test]
fn list_items_get_markers() {
    let mut surface = surface_with("first");
    surface.insert_paragraph_break();
    surface.insert_text("second");
    surface.select_all();
    surface.create_list(ListStyle::Decimal);

    let laid = layout_document(&surface, 40, &UiTheme::default());
    assert_eq!(line_text(&laid.lines[0]), "1. first");
    assert_eq!(line_text(&laid.lines[1]), "2. second");
}

#[test]
fn table_renders_as_grid_between_paragraphs() {
    let mut surface = DocumentSurface::new(CharFormat::new("Calibri", 12));
    surface.insert_table(2, 2);

    let laid = layout_document(&surface, 40, &UiTheme::default());
    let lines: Vec<String> = laid.lines.iter().map(line_text).collect();

    assert_eq!(lines.len(), 7);
    assert!(lines[1].starts_with('┌'));
    assert!(lines[2].starts_with('│'));
    assert!(lines[3].starts_with('├'));
    assert!(lines[5].starts_with('└'));
    assert_eq!(laid.cursor, Some((2, 2)));
}

#[test]
fn typed_cell_text_shows_inside_the_grid() {
    let mut surface = DocumentSurface::new(CharFormat::new("Calibri", 12));
    surface.insert_table(2, 2);
    surface.insert_text("ab");
    surface.move_cursor(Motion::NextCell, false);
    surface.insert_text("c");

    let laid = layout_document(&surface, 40, &UiTheme::default());
    let lines: Vec<String> = laid.lines.iter().map(line_text).collect();

    assert_eq!(lines[2], "│ ab │ c │");
    assert_eq!(lines[1], "┌────┬───┐");
    assert_eq!(laid.cursor, Some((2, 8)));
}

#[test]
fn bold_text_carries_bold_modifier() {
    let mut surface = DocumentSurface::new(CharFormat::new("Calibri", 12));
    surface.merge_char_format(&CharFormatPatch::weight(FontWeight::Bold));
    surface.insert_text("loud");

    let laid = layout_document(&surface, 40, &UiTheme::default());
    let span = &laid.lines[0].spans[0];
    assert!(span.style.add_modifier.contains(Modifier::BOLD));
}

#[test]
fn images_render_as_labeled_placeholders() {
    let mut surface = DocumentSurface::new(CharFormat::new("Calibri", 12));
    surface.insert_image(ImageFormat {
        name: "/tmp/pics/cat.png".to_string(),
        width: 120,
        height: 80,
    });

    let laid = layout_document(&surface, 60, &UiTheme::default());
    assert_eq!(line_text(&laid.lines[0]), "[image: cat.png 120x80]");
    assert_eq!(laid.cursor, Some((0, 23)));
}

#[test]
fn selection_uses_selection_background() {
    let mut surface = surface_with("pick");
    surface.select_all();
    let theme = UiTheme::default();

    let laid = layout_document(&surface, 40, &theme);
    assert_eq!(laid.lines[0].spans[0].style.bg, Some(theme.selection_bg));
}
