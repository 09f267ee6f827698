use crate::kernel::dialog::{parse_input, DialogValue, PendingDialog};
use crate::kernel::{Action, Effect};
use crate::models::ImageFormat;

impl super::Store {
    pub(super) fn reduce_dialog_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::DialogAppend(ch) => {
                let dialog = &mut self.state.ui.dialog;
                if !dialog.visible {
                    return super::DispatchResult::changed(false);
                }

                dialog.error = None;
                if dialog.cursor > dialog.value.len() {
                    dialog.cursor = dialog.value.len();
                }
                dialog.value.insert(dialog.cursor, ch);
                dialog.cursor += ch.len_utf8();
                super::DispatchResult::changed(true)
            }
            Action::DialogBackspace => {
                let dialog = &mut self.state.ui.dialog;
                if !dialog.visible || dialog.cursor == 0 {
                    return super::DispatchResult::changed(false);
                }

                dialog.error = None;
                let prev = dialog.value[..dialog.cursor]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                dialog.value.drain(prev..dialog.cursor);
                dialog.cursor = prev;
                super::DispatchResult::changed(true)
            }
            Action::DialogCursorLeft => {
                let dialog = &mut self.state.ui.dialog;
                if !dialog.visible || dialog.cursor == 0 {
                    return super::DispatchResult::changed(false);
                }

                let prev = dialog.value[..dialog.cursor]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                let changed = prev != dialog.cursor;
                dialog.cursor = prev;
                super::DispatchResult::changed(changed)
            }
            Action::DialogCursorRight => {
                let dialog = &mut self.state.ui.dialog;
                if !dialog.visible || dialog.cursor >= dialog.value.len() {
                    return super::DispatchResult::changed(false);
                }

                let next = dialog.value[dialog.cursor..]
                    .chars()
                    .next()
                    .map(|ch| dialog.cursor + ch.len_utf8())
                    .unwrap_or(dialog.value.len());
                let changed = next != dialog.cursor;
                dialog.cursor = next;
                super::DispatchResult::changed(changed)
            }
            Action::DialogCancel => {
                let visible = self.state.ui.dialog.visible;
                self.state.ui.dialog.reset();
                super::DispatchResult::changed(visible)
            }
            Action::DialogAccept => self.accept_dialog(),
            _ => super::DispatchResult::changed(false),
        }
    }

    fn accept_dialog(&mut self) -> super::DispatchResult {
        let dialog = &mut self.state.ui.dialog;
        if !dialog.visible {
            return super::DispatchResult::changed(false);
        }

        let Some(pending) = dialog.pending.clone() else {
            dialog.reset();
            return super::DispatchResult::changed(true);
        };

        let value = match parse_input(pending.input(), &dialog.value) {
            Ok(value) => value,
            Err(e) => {
                let prev = dialog.error.replace(e.to_string());
                return super::DispatchResult::changed(
                    prev.as_deref() != dialog.error.as_deref(),
                );
            }
        };
        dialog.reset();

        let workspace = pending.workspace();
        if self.state.workspaces.get(workspace).is_none() {
            return super::DispatchResult::changed(true);
        }

        match (pending, value) {
            (PendingDialog::OpenDocument { .. }, DialogValue::Path(path)) => {
                super::DispatchResult {
                    effects: vec![Effect::ReadFile { workspace, path }],
                    state_changed: true,
                }
            }
            (PendingDialog::SaveDocumentAs { .. }, DialogValue::Path(path)) => {
                let mut result = self.save_to(workspace, path);
                result.state_changed = true;
                result
            }
            (PendingDialog::ExportPdf { .. }, DialogValue::Path(path)) => {
                let mut result = self.export_to(workspace, path);
                result.state_changed = true;
                result
            }
            (PendingDialog::InsertImagePath { .. }, DialogValue::Path(path)) => {
                self.open_dialog(PendingDialog::ImageWidth { workspace, path }, None, None);
                super::DispatchResult::changed(true)
            }
            (PendingDialog::ImageWidth { path, .. }, DialogValue::Integer(width)) => {
                self.open_dialog(
                    PendingDialog::ImageHeight {
                        workspace,
                        path,
                        width: width as u32,
                    },
                    None,
                    None,
                );
                super::DispatchResult::changed(true)
            }
            (PendingDialog::ImageHeight { path, width, .. }, DialogValue::Integer(height)) => {
                let image = ImageFormat {
                    name: path.display().to_string(),
                    width,
                    height: height as u32,
                };
                if let Some(ws) = self.state.workspaces.get_mut(workspace) {
                    ws.surface.insert_image(image);
                }
                super::DispatchResult::changed(true)
            }
            (PendingDialog::TableRows { .. }, DialogValue::Integer(rows)) => {
                self.open_dialog(
                    PendingDialog::TableColumns {
                        workspace,
                        rows: rows as usize,
                    },
                    None,
                    None,
                );
                super::DispatchResult::changed(true)
            }
            (PendingDialog::TableColumns { rows, .. }, DialogValue::Integer(columns)) => {
                if let Some(ws) = self.state.workspaces.get_mut(workspace) {
                    ws.surface.insert_table(rows, columns as usize);
                }
                super::DispatchResult::changed(true)
            }
            (PendingDialog::PickColor { target, .. }, DialogValue::Color(color)) => {
                self.apply_color(workspace, target, color);
                super::DispatchResult::changed(true)
            }
            (PendingDialog::FontFamily { .. }, DialogValue::Text(family)) => {
                let mut result = self.apply_font_family(family);
                result.state_changed = true;
                result
            }
            (PendingDialog::FontSize { .. }, DialogValue::Integer(size)) => {
                let size = u16::try_from(size).unwrap_or(u16::MAX);
                let mut result = self.apply_font_size(size);
                result.state_changed = true;
                result
            }
            _ => super::DispatchResult::changed(true),
        }
    }

    /// Shows the prompt for `pending`. `value` overrides the dialog's own initial value.
    pub(super) fn open_dialog(
        &mut self,
        pending: PendingDialog,
        value: Option<String>,
        hint: Option<String>,
    ) {
        let value = value
            .or_else(|| pending.initial_value())
            .unwrap_or_default();
        self.state.ui.dialog.open(pending, value, hint);
    }
}
