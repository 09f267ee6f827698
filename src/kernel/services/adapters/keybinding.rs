//! Key chords to commands, per input context.

use crate::core::event::Key;
use crate::core::event::KeyCode;
use crate::core::Command;
use crate::kernel::services::ports::KeybindingRule;
use rustc_hash::FxHashMap;

use super::settings::parse_keybinding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeybindingContext {
    Global,
    Editor,
}

impl KeybindingContext {
    pub fn parse(value: &str) -> Option<Self> {
        let v = value.trim().to_ascii_lowercase();
        match v.as_str() {
            "global" => Some(Self::Global),
            "editor" | "document" => Some(Self::Editor),
            _ => None,
        }
    }
}

pub struct KeybindingService {
    global: FxHashMap<Key, Command>,
    editor: FxHashMap<Key, Command>,
}

impl KeybindingService {
    pub fn new() -> Self {
        Self::with_defaults()
    }

    pub fn with_defaults() -> Self {
        Self {
            global: default_global_keybindings(),
            editor: default_editor_keybindings(),
        }
    }

    pub fn resolve(&self, context: KeybindingContext, key: &Key) -> Option<&Command> {
        match context {
            KeybindingContext::Global => self.global.get(key),
            KeybindingContext::Editor => self.editor.get(key).or_else(|| self.global.get(key)),
        }
    }

    pub fn bindings(&self, context: KeybindingContext) -> &FxHashMap<Key, Command> {
        match context {
            KeybindingContext::Global => &self.global,
            KeybindingContext::Editor => &self.editor,
        }
    }

    pub fn bind(&mut self, context: KeybindingContext, key: Key, command: Command) {
        self.map_mut(context).insert(key, command);
    }

    pub fn unbind(&mut self, context: KeybindingContext, key: &Key) -> Option<Command> {
        self.map_mut(context).remove(key)
    }

    /// Layers user rules over the defaults. Rules with an unparsable key are skipped.
    pub fn apply_rules(&mut self, rules: &[KeybindingRule]) {
        for rule in rules {
            let Some(key) = parse_keybinding(&rule.key) else {
                tracing::warn!(key = %rule.key, "unparsable keybinding ignored");
                continue;
            };
            let context = rule
                .context
                .as_deref()
                .and_then(KeybindingContext::parse)
                .unwrap_or(KeybindingContext::Global);
            if rule.command.trim().is_empty() {
                let _ = self.unbind(context, &key);
            } else {
                self.bind(context, key, Command::from_name(&rule.command));
            }
        }
    }

    fn map_mut(&mut self, context: KeybindingContext) -> &mut FxHashMap<Key, Command> {
        match context {
            KeybindingContext::Global => &mut self.global,
            KeybindingContext::Editor => &mut self.editor,
        }
    }
}

impl Default for KeybindingService {
    fn default() -> Self {
        Self::new()
    }
}

fn default_global_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.reserve(40);

    bindings.insert(Key::ctrl(KeyCode::Char('q')), Command::Quit);

    bindings.insert(Key::ctrl(KeyCode::Char('t')), Command::NewWorkspace);
    bindings.insert(Key::ctrl(KeyCode::Char('w')), Command::CloseWorkspace);
    bindings.insert(Key::ctrl(KeyCode::PageDown), Command::NextWorkspace);
    bindings.insert(Key::ctrl(KeyCode::PageUp), Command::PrevWorkspace);

    bindings.insert(Key::ctrl(KeyCode::Char('n')), Command::NewDocument);
    bindings.insert(Key::ctrl(KeyCode::Char('o')), Command::OpenDocument);
    bindings.insert(Key::ctrl(KeyCode::Char('s')), Command::SaveDocument);
    bindings.insert(Key::ctrl_shift(KeyCode::Char('s')), Command::SaveDocumentAs);
    bindings.insert(Key::ctrl(KeyCode::Char('p')), Command::ExportPdf);

    bindings.insert(Key::alt(KeyCode::Char('f')), Command::FontFamily);
    bindings.insert(Key::alt(KeyCode::Char('z')), Command::FontSize);
    bindings.insert(Key::alt(KeyCode::Char('=')), Command::FontSizeUp);
    bindings.insert(Key::alt(KeyCode::Char('-')), Command::FontSizeDown);
    bindings.insert(Key::alt(KeyCode::Char('b')), Command::ToggleBold);
    bindings.insert(Key::alt(KeyCode::Char('i')), Command::ToggleItalic);
    bindings.insert(Key::alt(KeyCode::Char('u')), Command::ToggleUnderline);
    bindings.insert(Key::alt(KeyCode::Char('k')), Command::ToggleStrikethrough);
    bindings.insert(Key::alt(KeyCode::Char('h')), Command::Highlight);
    bindings.insert(Key::alt(KeyCode::Char('c')), Command::TextColor);

    bindings.insert(Key::alt(KeyCode::Char('l')), Command::AlignLeft);
    bindings.insert(Key::alt(KeyCode::Char('r')), Command::AlignRight);
    bindings.insert(Key::alt(KeyCode::Char('e')), Command::AlignCenter);
    bindings.insert(Key::alt(KeyCode::Char('j')), Command::AlignJustify);
    bindings.insert(Key::alt(KeyCode::Char('n')), Command::NumberedList);
    bindings.insert(Key::alt(KeyCode::Char('d')), Command::BulletList);

    bindings.insert(Key::alt(KeyCode::Char('g')), Command::InsertImage);
    bindings.insert(Key::alt(KeyCode::Char('t')), Command::InsertTable);

    bindings
}

fn default_editor_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.reserve(32);

    bindings.insert(Key::simple(KeyCode::Left), Command::CursorLeft);
    bindings.insert(Key::simple(KeyCode::Right), Command::CursorRight);
    bindings.insert(Key::simple(KeyCode::Up), Command::CursorUp);
    bindings.insert(Key::simple(KeyCode::Down), Command::CursorDown);
    bindings.insert(Key::simple(KeyCode::Home), Command::CursorLineStart);
    bindings.insert(Key::simple(KeyCode::End), Command::CursorLineEnd);
    bindings.insert(Key::ctrl(KeyCode::Home), Command::CursorDocumentStart);
    bindings.insert(Key::ctrl(KeyCode::End), Command::CursorDocumentEnd);
    bindings.insert(Key::ctrl(KeyCode::Left), Command::CursorWordLeft);
    bindings.insert(Key::ctrl(KeyCode::Right), Command::CursorWordRight);
    bindings.insert(Key::simple(KeyCode::Tab), Command::NextCell);
    bindings.insert(Key::simple(KeyCode::BackTab), Command::PrevCell);
    bindings.insert(Key::shift(KeyCode::BackTab), Command::PrevCell);

    bindings.insert(Key::shift(KeyCode::Left), Command::SelectLeft);
    bindings.insert(Key::shift(KeyCode::Right), Command::SelectRight);
    bindings.insert(Key::shift(KeyCode::Up), Command::SelectUp);
    bindings.insert(Key::shift(KeyCode::Down), Command::SelectDown);
    bindings.insert(Key::shift(KeyCode::Home), Command::SelectLineStart);
    bindings.insert(Key::shift(KeyCode::End), Command::SelectLineEnd);
    bindings.insert(Key::ctrl_shift(KeyCode::Left), Command::SelectWordLeft);
    bindings.insert(Key::ctrl_shift(KeyCode::Right), Command::SelectWordRight);
    bindings.insert(Key::ctrl(KeyCode::Char('a')), Command::SelectAll);

    bindings.insert(Key::simple(KeyCode::Enter), Command::InsertNewline);
    bindings.insert(Key::simple(KeyCode::Backspace), Command::DeleteBackward);
    bindings.insert(Key::simple(KeyCode::Delete), Command::DeleteForward);

    bindings
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/keybinding.rs"]
mod tests;
