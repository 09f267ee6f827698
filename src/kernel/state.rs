use super::dialog::DialogState;
use super::services::ports::{default_font_families, EditorConfig, MAX_FONT_SIZE, MIN_FONT_SIZE};
use super::workspace::{PathTable, WorkspaceRegistry};
use crate::models::CharFormat;

/// What the toolbar shows. This is user intent: toggles flip it, and it is only re-read from the
/// document when the active workspace changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarState {
    pub font_family: String,
    pub font_size: u16,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

impl ToolbarState {
    pub fn from_format(format: &CharFormat) -> Self {
        Self {
            font_family: format.family.to_string(),
            font_size: format.point_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
            bold: format.is_bold(),
            italic: format.italic,
            underline: format.underline,
            strikethrough: format.strike_out,
        }
    }

    /// Returns whether any control changed.
    pub fn sync_from(&mut self, format: &CharFormat) -> bool {
        let next = Self::from_format(format);
        if *self == next {
            return false;
        }
        *self = next;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageLevel {
    #[default]
    Info,
    Warning,
}

#[derive(Debug, Clone, Default)]
pub struct MessageBoxState {
    pub visible: bool,
    pub level: MessageLevel,
    pub title: String,
    pub body: String,
}

impl MessageBoxState {
    pub fn show(&mut self, level: MessageLevel, title: impl Into<String>, body: impl Into<String>) {
        self.visible = true;
        self.level = level;
        self.title = title.into();
        self.body = body.into();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub toolbar: ToolbarState,
    pub dialog: DialogState,
    pub message_box: MessageBoxState,
    pub should_quit: bool,
}

impl UiState {
    /// A dialog or message box is up, so the document does not get input.
    pub fn is_modal(&self) -> bool {
        self.dialog.visible || self.message_box.visible
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub workspaces: WorkspaceRegistry,
    pub paths: PathTable,
    pub ui: UiState,
    pub config: EditorConfig,
    pub font_families: Vec<String>,
}

impl AppState {
    /// Starts with one empty workspace.
    pub fn new(config: EditorConfig) -> Self {
        let default_format = config.default_char_format();
        let mut workspaces = WorkspaceRegistry::new(default_format.clone());
        workspaces.add_workspace();

        Self {
            workspaces,
            paths: PathTable::default(),
            ui: UiState {
                toolbar: ToolbarState::from_format(&default_format),
                dialog: DialogState::default(),
                message_box: MessageBoxState::default(),
                should_quit: false,
            },
            config,
            font_families: default_font_families(),
        }
    }

    pub fn with_font_families(mut self, families: Vec<String>) -> Self {
        if !families.is_empty() {
            self.font_families = families;
        }
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
