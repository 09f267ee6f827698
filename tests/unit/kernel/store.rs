use super::*;
use crate::kernel::services::ports::EditorConfig;
use crate::kernel::MessageLevel;
use crate::models::{Block, Inline, Rgb};
use std::path::{Path, PathBuf};

fn new_store() -> Store {
    Store::new(AppState::new(EditorConfig::default()))
}

fn run(store: &mut Store, command: Command) -> DispatchResult {
    store.dispatch(Action::RunCommand(command))
}

fn type_text(store: &mut Store, text: &str) {
    for ch in text.chars() {
        run(store, Command::InsertChar(ch));
    }
}

/// Replaces whatever the dialog currently holds, then accepts it.
fn answer_dialog(store: &mut Store, value: &str) -> DispatchResult {
    while !store.state.ui.dialog.value.is_empty() {
        let len = store.state.ui.dialog.value.len();
        store.state.ui.dialog.cursor = len;
        store.dispatch(Action::DialogBackspace);
    }
    for ch in value.chars() {
        store.dispatch(Action::DialogAppend(ch));
    }
    store.dispatch(Action::DialogAccept)
}

fn active_text(store: &Store) -> String {
    store
        .state
        .workspaces
        .active()
        .map(|ws| ws.surface.plain_text())
        .unwrap_or_default()
}

fn active_id(store: &Store) -> crate::kernel::WorkspaceId {
    store.state.workspaces.active_id().unwrap()
}

#[test]
fn test_typing_inserts_into_active_workspace() {
    let mut store = new_store();
    type_text(&mut store, "hi");
    run(&mut store, Command::InsertNewline);
    type_text(&mut store, "there");
    assert_eq!(active_text(&store), "hi\nthere");

    run(&mut store, Command::DeleteBackward);
    assert_eq!(active_text(&store), "hi\nther");

    let result = store.dispatch(Action::InsertText("e!".to_string()));
    assert!(result.state_changed);
    assert_eq!(active_text(&store), "hi\nthere!");
}

#[test]
fn test_toggle_bold_twice_restores_normal_weight() {
    let mut store = new_store();
    run(&mut store, Command::ToggleBold);
    assert!(store.state.ui.toolbar.bold);
    type_text(&mut store, "a");

    run(&mut store, Command::ToggleBold);
    assert!(!store.state.ui.toolbar.bold);
    type_text(&mut store, "b");

    let ws = store.state.workspaces.active().unwrap();
    let paragraph = ws.surface.document().paragraph(0).unwrap();
    assert!(paragraph.format_at(0).unwrap().is_bold());
    assert!(!paragraph.format_at(1).unwrap().is_bold());
}

#[test]
fn test_style_toggles_apply_to_typed_text() {
    let mut store = new_store();
    for command in [
        Command::ToggleItalic,
        Command::ToggleUnderline,
        Command::ToggleStrikethrough,
    ] {
        assert!(run(&mut store, command).state_changed);
    }
    let toolbar = &store.state.ui.toolbar;
    assert!(toolbar.italic && toolbar.underline && toolbar.strikethrough);
    type_text(&mut store, "x");

    run(&mut store, Command::ToggleUnderline);
    assert!(!store.state.ui.toolbar.underline);
    type_text(&mut store, "y");

    let ws = store.state.workspaces.active().unwrap();
    let paragraph = ws.surface.document().paragraph(0).unwrap();
    let x = paragraph.format_at(1).unwrap();
    assert!(x.italic && x.underline && x.strike_out);
    let y = paragraph.format_at(2).unwrap();
    assert!(y.italic && !y.underline && y.strike_out);
}

#[test]
fn test_toggle_italic_formats_selection() {
    let mut store = new_store();
    type_text(&mut store, "slant");
    run(&mut store, Command::SelectAll);
    run(&mut store, Command::ToggleItalic);

    let ws = store.state.workspaces.active().unwrap();
    let paragraph = ws.surface.document().paragraph(0).unwrap();
    assert!((1..=5).all(|offset| paragraph.format_at(offset).unwrap().italic));
}

#[test]
fn test_text_color_dialog_sets_foreground() {
    let mut store = new_store();
    type_text(&mut store, "ink");
    run(&mut store, Command::SelectAll);
    run(&mut store, Command::TextColor);
    assert_eq!(store.state.ui.dialog.value, "black");
    answer_dialog(&mut store, "#ff0000");
    assert!(!store.state.ui.dialog.visible);

    let ws = store.state.workspaces.active().unwrap();
    let format = ws.surface.document().paragraph(0).unwrap().format_at(1).unwrap();
    assert_eq!(format.foreground, Some(Rgb::new(0xFF, 0, 0)));
}

#[test]
fn test_text_color_cancel_changes_nothing() {
    let mut store = new_store();
    run(&mut store, Command::TextColor);
    store.dispatch(Action::DialogCancel);
    type_text(&mut store, "a");

    let ws = store.state.workspaces.active().unwrap();
    let format = ws.surface.document().paragraph(0).unwrap().format_at(1).unwrap();
    assert_eq!(format.foreground, None);
}

#[test]
fn test_workspace_switch_resyncs_toolbar() {
    let mut store = new_store();
    store.dispatch(Action::SetFontSize(18));
    assert_eq!(store.state.ui.toolbar.font_size, 18);

    run(&mut store, Command::NewWorkspace);
    assert_eq!(store.state.workspaces.len(), 2);
    assert_eq!(store.state.ui.toolbar.font_size, 12);

    store.dispatch(Action::SetActiveWorkspace { index: 0 });
    assert_eq!(store.state.ui.toolbar.font_size, 18);

    run(&mut store, Command::NextWorkspace);
    assert_eq!(store.state.workspaces.active_index(), Some(1));
    assert_eq!(store.state.ui.toolbar.font_size, 12);
}

#[test]
fn test_next_and_prev_workspace_wrap_around() {
    let mut store = new_store();
    run(&mut store, Command::NewWorkspace);
    run(&mut store, Command::NewWorkspace);
    assert_eq!(store.state.workspaces.active_index(), Some(2));

    run(&mut store, Command::NextWorkspace);
    assert_eq!(store.state.workspaces.active_index(), Some(0));

    run(&mut store, Command::PrevWorkspace);
    assert_eq!(store.state.workspaces.active_index(), Some(2));
}

#[test]
fn test_font_size_clamped_and_stepped() {
    let mut store = new_store();
    store.dispatch(Action::SetFontSize(500));
    assert_eq!(store.state.ui.toolbar.font_size, 96);

    run(&mut store, Command::FontSizeUp);
    assert_eq!(store.state.ui.toolbar.font_size, 96);

    run(&mut store, Command::FontSizeDown);
    assert_eq!(store.state.ui.toolbar.font_size, 95);
}

#[test]
fn test_save_without_path_opens_save_as_dialog() {
    let mut store = new_store();
    let result = run(&mut store, Command::SaveDocument);
    assert!(result.effects.is_empty());
    assert!(store.state.ui.dialog.visible);
    assert_eq!(store.state.ui.dialog.title, "Save File");
    assert!(store.state.ui.dialog.value.is_empty());
}

#[test]
fn test_save_as_plain_text_emits_write() {
    let mut store = new_store();
    type_text(&mut store, "hello");
    run(&mut store, Command::SaveDocumentAs);

    let result = answer_dialog(&mut store, "/tmp/notes.txt");
    assert!(!store.state.ui.dialog.visible);
    let [Effect::WriteFile {
        path, content, ..
    }] = result.effects.as_slice()
    else {
        panic!("expected a single write, got {:?}", result.effects);
    };
    assert_eq!(path, Path::new("/tmp/notes.txt"));
    assert_eq!(content, "hello");

    // Path and label only change once the write is confirmed.
    let id = active_id(&store);
    assert!(store.state.paths.get(id).is_none());
    store.dispatch(Action::FileSaved {
        workspace: id,
        path: PathBuf::from("/tmp/notes.txt"),
    });
    assert_eq!(store.state.paths.get(id), Some(Path::new("/tmp/notes.txt")));
    assert_eq!(
        store.state.workspaces.active().unwrap().label,
        "File: notes.txt"
    );
}

#[test]
fn test_save_markup_for_native_extension() {
    let mut store = new_store();
    type_text(&mut store, "rich");
    run(&mut store, Command::SaveDocumentAs);
    let result = answer_dialog(&mut store, "/tmp/doc.ptxt");

    let [Effect::WriteFile { content, .. }] = result.effects.as_slice() else {
        panic!("expected a single write");
    };
    assert!(content.contains("\"powertext\""));
    assert!(content.contains("rich"));
}

#[test]
fn test_file_loaded_sets_label_path_and_content() {
    let mut store = new_store();
    let id = active_id(&store);
    store.dispatch(Action::FileLoaded {
        workspace: id,
        path: PathBuf::from("/docs/notes.txt"),
        content: "hello".to_string(),
    });

    assert_eq!(active_text(&store), "hello");
    assert_eq!(
        store.state.workspaces.active().unwrap().label,
        "File: notes.txt"
    );

    let result = run(&mut store, Command::SaveDocument);
    let [Effect::WriteFile { path, content, .. }] = result.effects.as_slice() else {
        panic!("expected save to reuse the recorded path");
    };
    assert_eq!(path, Path::new("/docs/notes.txt"));
    assert_eq!(content, "hello");
}

#[test]
fn test_failed_save_keeps_path_and_label() {
    let mut store = new_store();
    let id = active_id(&store);
    store.dispatch(Action::FileLoaded {
        workspace: id,
        path: PathBuf::from("/docs/notes.txt"),
        content: "hello".to_string(),
    });
    run(&mut store, Command::SaveDocumentAs);
    answer_dialog(&mut store, "/readonly/copy.ptxt");

    let result = store.dispatch(Action::FileSaveFailed {
        workspace: id,
        path: PathBuf::from("/readonly/copy.ptxt"),
        error: "permission denied".to_string(),
    });
    assert!(result.state_changed);

    let message = &store.state.ui.message_box;
    assert!(message.visible);
    assert_eq!(message.level, MessageLevel::Warning);
    assert_eq!(message.title, "Save Error");
    assert_eq!(message.body, "Unable to save document due to:\npermission denied");

    assert_eq!(store.state.paths.len(), 1);
    assert_eq!(store.state.paths.get(id), Some(Path::new("/docs/notes.txt")));
    assert_eq!(
        store.state.workspaces.active().unwrap().label,
        "File: notes.txt"
    );
    assert_eq!(active_text(&store), "hello");
}

#[test]
fn test_failed_first_save_leaves_workspace_untitled() {
    let mut store = new_store();
    let label = store.state.workspaces.active().unwrap().label.clone();
    type_text(&mut store, "draft");
    run(&mut store, Command::SaveDocument);
    answer_dialog(&mut store, "/nowhere/draft.txt");

    let id = active_id(&store);
    store.dispatch(Action::FileSaveFailed {
        workspace: id,
        path: PathBuf::from("/nowhere/draft.txt"),
        error: "no such directory".to_string(),
    });

    assert_eq!(store.state.ui.message_box.title, "Save Error");
    assert!(store.state.paths.is_empty());
    assert_eq!(store.state.workspaces.active().unwrap().label, label);

    store.dispatch(Action::DismissMessage);
    let result = run(&mut store, Command::SaveDocument);
    assert!(result.effects.is_empty());
    assert_eq!(store.state.ui.dialog.title, "Save File");
}

#[test]
fn test_open_dialog_emits_read() {
    let mut store = new_store();
    run(&mut store, Command::OpenDocument);
    assert_eq!(store.state.ui.dialog.title, "Open File");
    assert!(store.state.ui.dialog.hint.is_some());

    let result = answer_dialog(&mut store, "/docs/a.ptxt");
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::ReadFile { path, .. }] if path == Path::new("/docs/a.ptxt")
    ));
}

#[test]
fn test_invalid_markup_reports_and_keeps_document() {
    let mut store = new_store();
    type_text(&mut store, "keep");
    let id = active_id(&store);
    store.dispatch(Action::FileLoaded {
        workspace: id,
        path: PathBuf::from("/docs/broken.ptxt"),
        content: "not json".to_string(),
    });

    assert_eq!(active_text(&store), "keep");
    assert!(store.state.paths.get(id).is_none());
    assert!(store.state.ui.message_box.visible);
    assert_eq!(store.state.ui.message_box.title, "Open Error");
}

#[test]
fn test_load_failure_shows_message_and_blocks_input() {
    let mut store = new_store();
    let id = active_id(&store);
    store.dispatch(Action::FileLoadFailed {
        workspace: id,
        path: PathBuf::from("/missing.txt"),
        error: "not found".to_string(),
    });
    assert_eq!(
        store.state.ui.message_box.body,
        "Unable to open document due to:\nnot found"
    );

    let result = run(&mut store, Command::InsertChar('x'));
    assert!(!result.state_changed);
    assert_eq!(active_text(&store), "");

    store.dispatch(Action::DismissMessage);
    assert!(!store.state.ui.is_modal());
}

#[test]
fn test_quit_passes_while_modal() {
    let mut store = new_store();
    run(&mut store, Command::OpenDocument);
    assert!(store.state.ui.is_modal());
    run(&mut store, Command::Quit);
    assert!(store.state.ui.should_quit);
}

#[test]
fn test_export_appends_pdf_extension() {
    let mut store = new_store();
    type_text(&mut store, "report");
    run(&mut store, Command::ExportPdf);
    assert_eq!(store.state.ui.dialog.title, "Save as PDF");

    let result = answer_dialog(&mut store, "/tmp/report");
    let [Effect::ExportPdf { path, document, .. }] = result.effects.as_slice() else {
        panic!("expected an export");
    };
    assert_eq!(path, Path::new("/tmp/report.pdf"));
    assert_eq!(document.plain_text(), "report");

    store.dispatch(Action::PdfExported {
        workspace: active_id(&store),
        path: path.clone(),
    });
    assert_eq!(store.state.ui.message_box.title, "Export Successful");
}

#[test]
fn test_export_dialog_starts_from_document_path() {
    let mut store = new_store();
    let id = active_id(&store);
    store.state.paths.set(id, PathBuf::from("/docs/a.ptxt"));
    run(&mut store, Command::ExportPdf);
    assert_eq!(store.state.ui.dialog.value, "/docs/a.pdf");
}

#[test]
fn test_insert_table_through_dialogs() {
    let mut store = new_store();
    run(&mut store, Command::InsertTable);
    assert_eq!(store.state.ui.dialog.title, "Rows");
    assert_eq!(store.state.ui.dialog.value, "10");

    answer_dialog(&mut store, "3");
    assert_eq!(store.state.ui.dialog.title, "Columns");
    answer_dialog(&mut store, "2");
    assert!(!store.state.ui.dialog.visible);

    let ws = store.state.workspaces.active().unwrap();
    let table = ws.surface.document().tables().next().unwrap();
    assert_eq!((table.rows, table.columns), (3, 2));
}

#[test]
fn test_typing_after_table_insert_fills_first_cell() {
    let mut store = new_store();
    run(&mut store, Command::InsertTable);
    answer_dialog(&mut store, "2");
    answer_dialog(&mut store, "2");
    type_text(&mut store, "q1");
    run(&mut store, Command::NextCell);
    type_text(&mut store, "q2");
    assert!(!run(&mut store, Command::InsertNewline).state_changed);

    let ws = store.state.workspaces.active().unwrap();
    let table = ws.surface.document().tables().next().unwrap();
    assert_eq!(table.cell(0, 0).unwrap().plain_text(), "q1");
    assert_eq!(table.cell(0, 1).unwrap().plain_text(), "q2");
    assert_eq!(ws.surface.table_cell(), Some((0, 1)));
}

#[test]
fn test_out_of_range_keeps_dialog_open() {
    let mut store = new_store();
    run(&mut store, Command::InsertTable);
    answer_dialog(&mut store, "0");
    assert!(store.state.ui.dialog.visible);
    assert_eq!(store.state.ui.dialog.title, "Rows");
    assert_eq!(
        store.state.ui.dialog.error.as_deref(),
        Some("Value must be between 1 and 1000")
    );

    store.dispatch(Action::DialogAppend('1'));
    assert!(store.state.ui.dialog.error.is_none());
}

#[test]
fn test_insert_image_through_dialogs() {
    let mut store = new_store();
    run(&mut store, Command::InsertImage);
    answer_dialog(&mut store, "/pics/cat.png");
    assert_eq!(store.state.ui.dialog.title, "Image Width");
    answer_dialog(&mut store, "120");
    assert_eq!(store.state.ui.dialog.title, "Image Height");
    answer_dialog(&mut store, "80");

    let ws = store.state.workspaces.active().unwrap();
    let Some(Block::Paragraph(p)) = ws.surface.document().blocks().first() else {
        panic!("expected a paragraph");
    };
    let [Inline::Image { image, .. }] = p.inlines.as_slice() else {
        panic!("expected one image, got {:?}", p.inlines);
    };
    assert_eq!(image.name, "/pics/cat.png");
    assert_eq!((image.width, image.height), (120, 80));
}

#[test]
fn test_insert_image_aborts_on_cancel() {
    for accepted in 0..3 {
        let mut store = new_store();
        run(&mut store, Command::InsertImage);
        let answers = ["/pics/cat.png", "120", "80"];
        for answer in &answers[..accepted] {
            answer_dialog(&mut store, answer);
        }
        store.dispatch(Action::DialogCancel);

        assert!(!store.state.ui.dialog.visible);
        let ws = store.state.workspaces.active().unwrap();
        assert!(ws.surface.document().is_empty(), "cancel at step {accepted}");
    }
}

#[test]
fn test_highlight_applies_to_selection() {
    let mut store = new_store();
    type_text(&mut store, "mark");
    run(&mut store, Command::SelectAll);
    run(&mut store, Command::Highlight);
    assert_eq!(store.state.ui.dialog.value, "yellow");
    answer_dialog(&mut store, "#00ff00");

    let ws = store.state.workspaces.active().unwrap();
    let format = ws.surface.document().paragraph(0).unwrap().format_at(0).unwrap();
    assert_eq!(format.background, Some(Rgb::new(0, 0xFF, 0)));
}

#[test]
fn test_font_family_dialog_lists_families() {
    let mut store = new_store();
    run(&mut store, Command::FontFamily);
    assert_eq!(store.state.ui.dialog.value, "Calibri");
    assert!(store
        .state
        .ui
        .dialog
        .hint
        .as_deref()
        .is_some_and(|h| h.contains("Georgia")));

    answer_dialog(&mut store, "Georgia");
    assert_eq!(store.state.ui.toolbar.font_family, "Georgia");
    assert_eq!(
        store.state.workspaces.active().unwrap().surface.char_format().family,
        "Georgia"
    );
}

#[test]
fn test_new_document_clears_content_and_path() {
    let mut store = new_store();
    let id = active_id(&store);
    store.dispatch(Action::FileLoaded {
        workspace: id,
        path: PathBuf::from("/docs/notes.txt"),
        content: "hello".to_string(),
    });
    run(&mut store, Command::NewDocument);

    let ws = store.state.workspaces.active().unwrap();
    assert!(ws.surface.document().is_empty());
    assert_eq!(ws.label, "New Workspace");
    assert!(store.state.paths.get(id).is_none());
}

#[test]
fn test_closing_last_workspace_leaves_fresh_one() {
    let mut store = new_store();
    type_text(&mut store, "bye");
    let old = active_id(&store);
    store.state.paths.set(old, PathBuf::from("/docs/a.txt"));

    run(&mut store, Command::CloseWorkspace);
    assert_eq!(store.state.workspaces.len(), 1);
    assert_ne!(active_id(&store), old);
    assert_eq!(active_text(&store), "");
    assert!(store.state.paths.is_empty());
}

#[test]
fn test_open_path_reuses_pristine_workspace() {
    let mut store = new_store();
    let first = active_id(&store);
    let result = store.dispatch(Action::OpenPath(PathBuf::from("/docs/a.txt")));
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::ReadFile { workspace, .. }] if *workspace == first
    ));

    store.dispatch(Action::FileLoaded {
        workspace: first,
        path: PathBuf::from("/docs/a.txt"),
        content: "a".to_string(),
    });
    let result = store.dispatch(Action::OpenPath(PathBuf::from("/docs/b.txt")));
    assert_eq!(store.state.workspaces.len(), 2);
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::ReadFile { workspace, .. }] if *workspace != first
    ));
}

#[test]
fn test_result_for_closed_workspace_is_ignored() {
    let mut store = new_store();
    run(&mut store, Command::NewWorkspace);
    let closed = active_id(&store);
    run(&mut store, Command::CloseWorkspace);

    let result = store.dispatch(Action::FileLoaded {
        workspace: closed,
        path: PathBuf::from("/docs/late.txt"),
        content: "late".to_string(),
    });
    assert!(!result.state_changed);
    assert_eq!(active_text(&store), "");
}

#[test]
fn test_alignment_and_lists() {
    let mut store = new_store();
    type_text(&mut store, "item");
    assert!(run(&mut store, Command::AlignCenter).state_changed);
    assert!(run(&mut store, Command::BulletList).state_changed);

    let ws = store.state.workspaces.active().unwrap();
    let format = ws.surface.block_format();
    assert_eq!(format.alignment, crate::models::Alignment::Center);
    assert!(format.list.is_some());
}
