use super::*;

fn rule(key: &str, command: &str, context: Option<&str>) -> KeybindingRule {
    KeybindingRule {
        key: key.to_string(),
        command: command.to_string(),
        context: context.map(str::to_string),
    }
}

#[test]
fn editor_has_cursor_bindings() {
    let service = KeybindingService::new();
    assert_eq!(
        service.resolve(KeybindingContext::Editor, &Key::simple(KeyCode::Left)),
        Some(&Command::CursorLeft)
    );
    assert_eq!(
        service.resolve(KeybindingContext::Editor, &Key::shift(KeyCode::End)),
        Some(&Command::SelectLineEnd)
    );
}

#[test]
fn tab_keys_move_between_table_cells() {
    let service = KeybindingService::new();
    assert_eq!(
        service.resolve(KeybindingContext::Editor, &Key::simple(KeyCode::Tab)),
        Some(&Command::NextCell)
    );
    assert_eq!(
        service.resolve(KeybindingContext::Editor, &Key::shift(KeyCode::BackTab)),
        Some(&Command::PrevCell)
    );
}

#[test]
fn global_commands_fall_through_in_editor() {
    let service = KeybindingService::new();
    assert_eq!(
        service.resolve(KeybindingContext::Editor, &Key::alt(KeyCode::Char('b'))),
        Some(&Command::ToggleBold)
    );
    assert_eq!(
        service.resolve(KeybindingContext::Editor, &Key::ctrl_shift(KeyCode::Char('s'))),
        Some(&Command::SaveDocumentAs)
    );
}

#[test]
fn editor_keys_do_not_leak_into_global() {
    let service = KeybindingService::new();
    assert_eq!(
        service.resolve(KeybindingContext::Global, &Key::simple(KeyCode::Enter)),
        None
    );
}

#[test]
fn rules_rebind_and_unbind() {
    let mut service = KeybindingService::new();
    service.apply_rules(&[
        rule("ctrl+b", "toggleBold", None),
        rule("alt+b", "", None),
        rule("f5", "exportPdf", Some("editor")),
        rule("nonsense+++", "quit", None),
    ]);

    assert_eq!(
        service.resolve(KeybindingContext::Editor, &Key::ctrl(KeyCode::Char('b'))),
        Some(&Command::ToggleBold)
    );
    assert_eq!(
        service.resolve(KeybindingContext::Editor, &Key::alt(KeyCode::Char('b'))),
        None
    );
    assert_eq!(
        service.resolve(KeybindingContext::Editor, &Key::simple(KeyCode::F(5))),
        Some(&Command::ExportPdf)
    );
    assert!(service
        .bindings(KeybindingContext::Global)
        .get(&Key::simple(KeyCode::F(5)))
        .is_none());
}

#[test]
fn context_parse_is_case_insensitive() {
    assert_eq!(
        KeybindingContext::parse(" Editor "),
        Some(KeybindingContext::Editor)
    );
    assert_eq!(KeybindingContext::parse("sidebar"), None);
}
