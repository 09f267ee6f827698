use super::*;

fn registry() -> WorkspaceRegistry {
    WorkspaceRegistry::new(CharFormat::new("Calibri", 12))
}

#[test]
fn test_add_workspace_is_empty_and_active() {
    let mut reg = registry();
    assert!(reg.active().is_none());
    assert_eq!(reg.active_index(), None);

    let a = reg.add_workspace();
    let b = reg.add_workspace();
    assert_ne!(a, b);
    assert_eq!(reg.len(), 2);
    assert_eq!(reg.active_id(), Some(b));

    let ws = reg.active().unwrap();
    assert_eq!(ws.label, NEW_WORKSPACE_LABEL);
    assert!(ws.surface.document().is_empty());
    assert_eq!(ws.surface.char_format().point_size, 12);
}

#[test]
fn test_ids_are_never_reused() {
    let mut reg = registry();
    let a = reg.add_workspace();
    reg.close(0);
    let b = reg.add_workspace();
    assert!(b > a);
}

#[test]
fn test_set_active_bounds() {
    let mut reg = registry();
    reg.add_workspace();
    reg.add_workspace();
    assert!(reg.set_active(0));
    assert!(!reg.set_active(0));
    assert!(!reg.set_active(5));
    assert_eq!(reg.active_index(), Some(0));
}

#[test]
fn test_close_keeps_active_workspace() {
    let mut reg = registry();
    let a = reg.add_workspace();
    let b = reg.add_workspace();
    let c = reg.add_workspace();
    reg.set_active(2);

    let removed = reg.close(0).unwrap();
    assert_eq!(removed.id(), a);
    assert_eq!(reg.active_id(), Some(c));

    reg.set_active(0);
    reg.close(0);
    assert_eq!(reg.active_id(), Some(c));
    assert_eq!(reg.index_of(b), None);
}

#[test]
fn test_close_last_active_moves_left() {
    let mut reg = registry();
    let a = reg.add_workspace();
    reg.add_workspace();
    reg.close(1);
    assert_eq!(reg.active_id(), Some(a));
    assert!(reg.close(7).is_none());
}

#[test]
fn test_file_label_uses_basename() {
    assert_eq!(file_label(Path::new("/tmp/x/notes.txt")), "File: notes.txt");
    assert_eq!(file_label(Path::new("report.ptxt")), "File: report.ptxt");
}

#[test]
fn test_path_table_keyed_by_id() {
    let mut reg = registry();
    let a = reg.add_workspace();
    let b = reg.add_workspace();

    let mut paths = PathTable::default();
    paths.set(b, PathBuf::from("/tmp/b.txt"));
    reg.close(0);

    assert_eq!(paths.get(a), None);
    assert_eq!(paths.get(b), Some(Path::new("/tmp/b.txt")));
    assert_eq!(paths.remove(b), Some(PathBuf::from("/tmp/b.txt")));
    assert!(paths.is_empty());
}
