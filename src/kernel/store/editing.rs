use crate::core::Command;
use crate::kernel::dialog::PendingDialog;
use crate::models::Motion;

fn motion_for(command: &Command) -> Option<(Motion, bool)> {
    let motion = match command {
        Command::CursorLeft => (Motion::Left, false),
        Command::CursorRight => (Motion::Right, false),
        Command::CursorUp => (Motion::Up, false),
        Command::CursorDown => (Motion::Down, false),
        Command::CursorWordLeft => (Motion::WordLeft, false),
        Command::CursorWordRight => (Motion::WordRight, false),
        Command::CursorLineStart => (Motion::LineStart, false),
        Command::CursorLineEnd => (Motion::LineEnd, false),
        Command::CursorDocumentStart => (Motion::DocumentStart, false),
        Command::CursorDocumentEnd => (Motion::DocumentEnd, false),
        Command::NextCell => (Motion::NextCell, false),
        Command::PrevCell => (Motion::PrevCell, false),
        Command::SelectLeft => (Motion::Left, true),
        Command::SelectRight => (Motion::Right, true),
        Command::SelectUp => (Motion::Up, true),
        Command::SelectDown => (Motion::Down, true),
        Command::SelectWordLeft => (Motion::WordLeft, true),
        Command::SelectWordRight => (Motion::WordRight, true),
        Command::SelectLineStart => (Motion::LineStart, true),
        Command::SelectLineEnd => (Motion::LineEnd, true),
        _ => return None,
    };
    Some(motion)
}

impl super::Store {
    pub(super) fn apply_editing_command(&mut self, command: Command) -> super::DispatchResult {
        let Some(ws) = self.state.workspaces.active_mut() else {
            return super::DispatchResult::changed(false);
        };

        if let Some((motion, extend)) = motion_for(&command) {
            return super::DispatchResult::changed(ws.surface.move_cursor(motion, extend));
        }

        let changed = match command {
            Command::SelectAll => ws.surface.select_all(),
            Command::InsertChar(ch) => {
                let mut buf = [0u8; 4];
                ws.surface.insert_text(ch.encode_utf8(&mut buf))
            }
            Command::InsertNewline => ws.surface.insert_paragraph_break(),
            Command::DeleteBackward => ws.surface.delete_backward(),
            Command::DeleteForward => ws.surface.delete_forward(),
            Command::Custom(name) => {
                tracing::debug!(command = %name, "unknown command ignored");
                false
            }
            _ => false,
        };
        super::DispatchResult::changed(changed)
    }

    pub(super) fn begin_insert_image(&mut self) -> super::DispatchResult {
        let Some(workspace) = self.state.workspaces.active_id() else {
            return super::DispatchResult::changed(false);
        };
        self.open_dialog(PendingDialog::InsertImagePath { workspace }, None, None);
        super::DispatchResult::changed(true)
    }

    pub(super) fn begin_insert_table(&mut self) -> super::DispatchResult {
        let Some(workspace) = self.state.workspaces.active_id() else {
            return super::DispatchResult::changed(false);
        };
        self.open_dialog(PendingDialog::TableRows { workspace }, None, None);
        super::DispatchResult::changed(true)
    }
}
