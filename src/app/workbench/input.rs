use super::Workbench;
use crate::core::event::{
    InputEvent, Key, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use crate::core::Command;
use crate::kernel::services::adapters::KeybindingContext;
use crate::kernel::Action;
use crate::tui::view::EventResult;
use ratatui::layout::Rect;

pub(super) fn handle_input(workbench: &mut Workbench, event: &InputEvent) -> EventResult {
    let result = match event {
        InputEvent::Key(key_event) => workbench.handle_key_event(key_event),
        InputEvent::Paste(text) => workbench.handle_paste(text),
        InputEvent::Mouse(mouse_event) => workbench.handle_mouse(mouse_event),
        InputEvent::Resize(_, _) => EventResult::Consumed,
        InputEvent::Other => EventResult::Ignored,
    };

    if workbench.should_quit() {
        return EventResult::Quit;
    }
    result
}

fn rect_contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

impl Workbench {
    fn handle_key_event(&mut self, key_event: &KeyEvent) -> EventResult {
        if key_event.kind == KeyEventKind::Release {
            return EventResult::Ignored;
        }

        let key = Key::from(*key_event);
        let ui = &self.store.state().ui;

        if ui.dialog.visible {
            return self.handle_dialog_key(&key);
        }
        if ui.message_box.visible {
            return match key.code {
                KeyCode::Enter | KeyCode::Esc => {
                    EventResult::from_changed(self.dispatch_kernel(Action::DismissMessage))
                }
                _ => self.dispatch_quit_binding(&key),
            };
        }

        if let Some(command) = self
            .keybindings
            .resolve(KeybindingContext::Editor, &key)
            .cloned()
        {
            return EventResult::from_changed(self.run_command(command));
        }

        match key.code {
            KeyCode::Char(ch) if is_text_input(key.modifiers) => {
                EventResult::from_changed(self.run_command(Command::InsertChar(ch)))
            }
            _ => EventResult::Ignored,
        }
    }

    fn handle_dialog_key(&mut self, key: &Key) -> EventResult {
        let action = match key.code {
            KeyCode::Enter => Action::DialogAccept,
            KeyCode::Esc => Action::DialogCancel,
            KeyCode::Backspace => Action::DialogBackspace,
            KeyCode::Left => Action::DialogCursorLeft,
            KeyCode::Right => Action::DialogCursorRight,
            KeyCode::Char(ch) if is_text_input(key.modifiers) => Action::DialogAppend(ch),
            _ => return self.dispatch_quit_binding(key),
        };
        EventResult::from_changed(self.dispatch_kernel(action))
    }

    /// Modal surfaces swallow everything except the quit binding.
    fn dispatch_quit_binding(&mut self, key: &Key) -> EventResult {
        let is_quit = matches!(
            self.keybindings.resolve(KeybindingContext::Global, key),
            Some(Command::Quit)
        );
        if !is_quit {
            return EventResult::Ignored;
        }
        EventResult::from_changed(self.run_command(Command::Quit))
    }

    fn handle_paste(&mut self, text: &str) -> EventResult {
        if self.store.state().ui.dialog.visible {
            let mut changed = false;
            for ch in text.chars().filter(|ch| !ch.is_control()) {
                changed |= self.dispatch_kernel(Action::DialogAppend(ch));
            }
            return EventResult::from_changed(changed);
        }

        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        EventResult::from_changed(self.dispatch_kernel(Action::InsertText(text)))
    }

    fn handle_mouse(&mut self, event: &MouseEvent) -> EventResult {
        let (x, y) = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(button) => {
                if let Some(index) = self
                    .last_tab_hits
                    .iter()
                    .find(|(area, _)| rect_contains(*area, x, y))
                    .map(|(_, index)| *index)
                {
                    let action = match button {
                        MouseButton::Middle => Action::CloseWorkspace { index },
                        _ => Action::SetActiveWorkspace { index },
                    };
                    return EventResult::from_changed(self.dispatch_kernel(action));
                }

                if button != MouseButton::Left || self.store.state().ui.is_modal() {
                    return EventResult::Ignored;
                }
                if self.last_tabs_area.is_some_and(|area| rect_contains(area, x, y)) {
                    return EventResult::from_changed(self.run_command(Command::NewWorkspace));
                }
                let command = self
                    .last_toolbar_hits
                    .iter()
                    .find(|(area, _)| rect_contains(*area, x, y))
                    .map(|(_, command)| command.clone());
                match command {
                    Some(command) => EventResult::from_changed(self.run_command(command)),
                    None => EventResult::Ignored,
                }
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let Some(area) = self.last_document_area else {
                    return EventResult::Ignored;
                };
                if !rect_contains(area, x, y) {
                    return EventResult::Ignored;
                }
                let step = self.store.state().config.scroll_step();
                let current = self.active_scroll();
                let next = if event.kind == MouseEventKind::ScrollUp {
                    current.saturating_sub(step)
                } else {
                    current.saturating_add(step)
                };
                self.follow_cursor = false;
                self.set_active_scroll(next);
                EventResult::from_changed(next != current)
            }
            _ => EventResult::Ignored,
        }
    }
}

fn is_text_input(modifiers: KeyModifiers) -> bool {
    modifiers.difference(KeyModifiers::SHIFT).is_empty()
}
