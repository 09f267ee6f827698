use crate::core::Command;

use super::{Action, AppState, Effect};

mod dialogs;
mod editing;
mod files;
mod format;

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }
}

pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::RunCommand(cmd) => self.dispatch_command(cmd),
            Action::OpenPath(path) => self.open_path_in_workspace(path),
            Action::SetActiveWorkspace { index } => {
                if self.state.ui.is_modal() {
                    return DispatchResult::changed(false);
                }
                let changed = self.state.workspaces.set_active(index);
                if changed {
                    self.resync_toolbar();
                }
                DispatchResult::changed(changed)
            }
            Action::CloseWorkspace { index } => {
                if self.state.ui.is_modal() {
                    return DispatchResult::changed(false);
                }
                DispatchResult::changed(self.close_workspace(index))
            }
            Action::SetFontFamily(_) | Action::SetFontSize(_) if self.state.ui.is_modal() => {
                DispatchResult::changed(false)
            }
            Action::SetFontFamily(family) => self.apply_font_family(family),
            Action::SetFontSize(size) => self.apply_font_size(size),
            Action::InsertText(text) => {
                if self.state.ui.is_modal() {
                    return DispatchResult::changed(false);
                }
                let changed = self
                    .state
                    .workspaces
                    .active_mut()
                    .is_some_and(|ws| ws.surface.insert_text(&text));
                DispatchResult::changed(changed)
            }
            Action::DialogAppend(_)
            | Action::DialogBackspace
            | Action::DialogCursorLeft
            | Action::DialogCursorRight
            | Action::DialogAccept
            | Action::DialogCancel => self.reduce_dialog_action(action),
            Action::DismissMessage => {
                let visible = self.state.ui.message_box.visible;
                self.state.ui.message_box.reset();
                DispatchResult::changed(visible)
            }
            Action::FileLoaded { .. }
            | Action::FileLoadFailed { .. }
            | Action::FileSaved { .. }
            | Action::FileSaveFailed { .. }
            | Action::PdfExported { .. }
            | Action::PdfExportFailed { .. } => self.reduce_file_result(action),
        }
    }

    fn dispatch_command(&mut self, command: Command) -> DispatchResult {
        if command == Command::Quit {
            self.state.ui.should_quit = true;
            return DispatchResult::changed(true);
        }
        if self.state.ui.is_modal() {
            return DispatchResult::changed(false);
        }

        match command {
            Command::NewWorkspace => {
                self.state.workspaces.add_workspace();
                self.resync_toolbar();
                DispatchResult::changed(true)
            }
            Command::CloseWorkspace => {
                let Some(index) = self.state.workspaces.active_index() else {
                    return DispatchResult::changed(false);
                };
                DispatchResult::changed(self.close_workspace(index))
            }
            Command::NextWorkspace | Command::PrevWorkspace => {
                let len = self.state.workspaces.len();
                let Some(active) = self.state.workspaces.active_index() else {
                    return DispatchResult::changed(false);
                };
                if len < 2 {
                    return DispatchResult::changed(false);
                }
                let next = if command == Command::NextWorkspace {
                    (active + 1) % len
                } else if active == 0 {
                    len - 1
                } else {
                    active - 1
                };
                let changed = self.state.workspaces.set_active(next);
                if changed {
                    self.resync_toolbar();
                }
                DispatchResult::changed(changed)
            }

            Command::NewDocument => self.new_document(),
            Command::OpenDocument => self.begin_open_document(),
            Command::SaveDocument => self.save_document(),
            Command::SaveDocumentAs => self.begin_save_document_as(),
            Command::ExportPdf => self.begin_export_pdf(),

            Command::FontFamily => self.begin_font_family(),
            Command::FontSize => self.begin_font_size(),
            Command::FontSizeUp => {
                let size = self.state.ui.toolbar.font_size.saturating_add(1);
                self.apply_font_size(size)
            }
            Command::FontSizeDown => {
                let size = self.state.ui.toolbar.font_size.saturating_sub(1);
                self.apply_font_size(size)
            }
            Command::ToggleBold
            | Command::ToggleItalic
            | Command::ToggleUnderline
            | Command::ToggleStrikethrough => self.toggle_style(&command),
            Command::Highlight => self.begin_pick_color(super::ColorTarget::Highlight),
            Command::TextColor => self.begin_pick_color(super::ColorTarget::Text),
            Command::AlignLeft
            | Command::AlignRight
            | Command::AlignCenter
            | Command::AlignJustify
            | Command::NumberedList
            | Command::BulletList => self.apply_block_command(&command),

            Command::InsertImage => self.begin_insert_image(),
            Command::InsertTable => self.begin_insert_table(),

            other => self.apply_editing_command(other),
        }
    }

    /// Re-reads the toolbar from the active workspace's cursor format. Never writes back.
    fn resync_toolbar(&mut self) -> bool {
        let Some(ws) = self.state.workspaces.active() else {
            return false;
        };
        let format = ws.surface.char_format().clone();
        self.state.ui.toolbar.sync_from(&format)
    }

    fn close_workspace(&mut self, index: usize) -> bool {
        let Some(removed) = self.state.workspaces.close(index) else {
            return false;
        };
        self.state.paths.remove(removed.id());
        if self
            .state
            .ui
            .dialog
            .pending
            .as_ref()
            .is_some_and(|p| p.workspace() == removed.id())
        {
            self.state.ui.dialog.reset();
        }
        if self.state.workspaces.is_empty() {
            self.state.workspaces.add_workspace();
        }
        self.resync_toolbar();
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
