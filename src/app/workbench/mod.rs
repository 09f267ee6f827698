//! Workbench: owns the store and the services, runs effects and routes input to the kernel.

use super::theme::UiTheme;
use crate::core::event::InputEvent;
use crate::core::Command;
use crate::kernel::services::adapters::{KeybindingService, LocalFileProvider, PdfExporter};
use crate::kernel::services::ports::{FileProvider, Settings};
use crate::kernel::{Action, AppState, Effect, Store, WorkspaceId};
use crate::tui::view::{EventResult, View};
use ratatui::layout::Rect;
use ratatui::Frame;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::path::PathBuf;

mod input;
mod render;

const TOOLBAR_HEIGHT: u16 = 2;
const TABS_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;

pub struct Workbench {
    store: Store,
    files: Box<dyn FileProvider>,
    pdf: PdfExporter,
    keybindings: KeybindingService,
    theme: UiTheme,
    scroll_offsets: FxHashMap<WorkspaceId, usize>,
    follow_cursor: bool,
    last_toolbar_hits: Vec<(Rect, Command)>,
    last_tab_hits: Vec<(Rect, usize)>,
    last_tabs_area: Option<Rect>,
    last_document_area: Option<Rect>,
    last_cursor: Option<(u16, u16)>,
}

impl Workbench {
    /// Loads `settings.json` from the cache dir, creating it with defaults on first run.
    pub fn new() -> Self {
        use crate::kernel::services::adapters::{ensure_settings_file, load_settings};

        if let Err(e) = ensure_settings_file() {
            tracing::warn!(error = %e, "ensure_settings_file failed");
        }
        let mut workbench = Self::with_settings(load_settings().unwrap_or_default());
        workbench.theme.adapt_to_terminal_capabilities();
        workbench
    }

    pub fn with_settings(settings: Settings) -> Self {
        let mut keybindings = KeybindingService::new();
        keybindings.apply_rules(&settings.keybindings);

        let mut theme = UiTheme::default();
        theme.apply_settings(&settings.theme);

        let state = AppState::new(settings.editor).with_font_families(settings.font_families);

        Self {
            store: Store::new(state),
            files: Box::new(LocalFileProvider::new()),
            pdf: PdfExporter::new().with_title("PowerText Document"),
            keybindings,
            theme,
            scroll_offsets: FxHashMap::default(),
            follow_cursor: true,
            last_toolbar_hits: Vec::new(),
            last_tab_hits: Vec::new(),
            last_tabs_area: None,
            last_document_area: None,
            last_cursor: None,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn should_quit(&self) -> bool {
        self.store.state().ui.should_quit
    }

    /// Opens each path in its own workspace, the way paths given on the command line are handled.
    pub fn open_paths(&mut self, paths: &[PathBuf]) {
        for path in paths {
            let _ = self.dispatch_kernel(Action::OpenPath(path.clone()));
        }
    }

    pub fn run_command(&mut self, command: Command) -> bool {
        self.dispatch_kernel(Action::RunCommand(command))
    }

    /// Dispatches `action` and runs every resulting effect to completion, feeding the outcomes
    /// back into the store. Returns whether the state changed.
    pub fn dispatch_kernel(&mut self, action: Action) -> bool {
        let mut queue = VecDeque::from([action]);
        let mut changed = false;
        while let Some(action) = queue.pop_front() {
            let result = self.store.dispatch(action);
            changed |= result.state_changed;
            for effect in result.effects {
                queue.push_back(self.run_effect(effect));
            }
        }
        if changed {
            self.follow_cursor = true;
        }
        changed
    }

    fn run_effect(&mut self, effect: Effect) -> Action {
        match effect {
            Effect::ReadFile { workspace, path } => match self.files.read_file(&path) {
                Ok(content) => {
                    tracing::info!(path = %path.display(), bytes = content.len(), "document opened");
                    Action::FileLoaded {
                        workspace,
                        path,
                        content,
                    }
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "read_file failed");
                    Action::FileLoadFailed {
                        workspace,
                        path,
                        error: e.to_string(),
                    }
                }
            },
            Effect::WriteFile {
                workspace,
                path,
                content,
            } => match self.files.write_file(&path, &content) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), bytes = content.len(), "document saved");
                    Action::FileSaved { workspace, path }
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "write_file failed");
                    Action::FileSaveFailed {
                        workspace,
                        path,
                        error: e.to_string(),
                    }
                }
            },
            Effect::ExportPdf {
                workspace,
                path,
                document,
            } => match self.pdf.export(self.files.as_ref(), &document, &path) {
                Ok(()) => Action::PdfExported { workspace, path },
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "pdf export failed");
                    Action::PdfExportFailed {
                        workspace,
                        path,
                        error: e.to_string(),
                    }
                }
            },
        }
    }

    fn active_scroll(&self) -> usize {
        self.store
            .state()
            .workspaces
            .active_id()
            .and_then(|id| self.scroll_offsets.get(&id).copied())
            .unwrap_or(0)
    }

    fn set_active_scroll(&mut self, offset: usize) {
        if let Some(id) = self.store.state().workspaces.active_id() {
            self.scroll_offsets.insert(id, offset);
        }
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl View for Workbench {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        input::handle_input(self, event)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        render::render(self, frame, area);
    }

    fn cursor_position(&self) -> Option<(u16, u16)> {
        self.last_cursor
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/workbench/mod.rs"]
mod tests;
