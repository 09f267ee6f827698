use std::path::PathBuf;

use crate::kernel::dialog::PendingDialog;
use crate::kernel::state::MessageLevel;
use crate::kernel::workspace::{file_label, WorkspaceId, NEW_WORKSPACE_LABEL};
use crate::kernel::{Action, Effect};
use crate::models::DocumentKind;

impl super::Store {
    pub(super) fn new_document(&mut self) -> super::DispatchResult {
        let Some(ws) = self.state.workspaces.active_mut() else {
            return super::DispatchResult::changed(false);
        };
        let id = ws.id();
        ws.surface.clear();
        ws.label = NEW_WORKSPACE_LABEL.to_string();
        self.state.paths.remove(id);
        super::DispatchResult::changed(true)
    }

    pub(super) fn begin_open_document(&mut self) -> super::DispatchResult {
        let Some(workspace) = self.state.workspaces.active_id() else {
            return super::DispatchResult::changed(false);
        };
        self.open_dialog(PendingDialog::OpenDocument { workspace }, None, None);
        super::DispatchResult::changed(true)
    }

    pub(super) fn save_document(&mut self) -> super::DispatchResult {
        let Some(workspace) = self.state.workspaces.active_id() else {
            return super::DispatchResult::changed(false);
        };
        match self.state.paths.get(workspace).map(|p| p.to_path_buf()) {
            Some(path) => self.save_to(workspace, path),
            None => self.begin_save_document_as(),
        }
    }

    pub(super) fn begin_save_document_as(&mut self) -> super::DispatchResult {
        let Some(workspace) = self.state.workspaces.active_id() else {
            return super::DispatchResult::changed(false);
        };
        let initial = self
            .state
            .paths
            .get(workspace)
            .map(|p| p.display().to_string());
        self.open_dialog(PendingDialog::SaveDocumentAs { workspace }, initial, None);
        super::DispatchResult::changed(true)
    }

    pub(super) fn begin_export_pdf(&mut self) -> super::DispatchResult {
        let Some(workspace) = self.state.workspaces.active_id() else {
            return super::DispatchResult::changed(false);
        };
        let initial = self
            .state
            .paths
            .get(workspace)
            .map(|p| p.with_extension("pdf").display().to_string());
        self.open_dialog(PendingDialog::ExportPdf { workspace }, initial, None);
        super::DispatchResult::changed(true)
    }

    /// Command-line open: reuses the active workspace while it is still untouched.
    pub(super) fn open_path_in_workspace(&mut self, path: PathBuf) -> super::DispatchResult {
        let reusable = self.state.workspaces.active().filter(|ws| {
            ws.label == NEW_WORKSPACE_LABEL
                && ws.surface.document().is_empty()
                && self.state.paths.get(ws.id()).is_none()
        });
        let workspace = match reusable.map(|ws| ws.id()) {
            Some(id) => id,
            None => {
                let id = self.state.workspaces.add_workspace();
                self.resync_toolbar();
                id
            }
        };
        super::DispatchResult {
            effects: vec![Effect::ReadFile { workspace, path }],
            state_changed: true,
        }
    }

    /// Serializes the workspace according to the target extension. A serialization failure is
    /// reported the same way as a failed write.
    pub(super) fn save_to(&mut self, workspace: WorkspaceId, path: PathBuf) -> super::DispatchResult {
        let Some(ws) = self.state.workspaces.get(workspace) else {
            return super::DispatchResult::changed(false);
        };
        let content = match DocumentKind::for_save(&path) {
            DocumentKind::PlainText => Ok(ws.surface.plain_text()),
            DocumentKind::Markup => ws.surface.to_markup(),
        };
        match content {
            Ok(content) => super::DispatchResult {
                effects: vec![Effect::WriteFile {
                    workspace,
                    path,
                    content,
                }],
                state_changed: false,
            },
            Err(e) => {
                self.state.ui.message_box.show(
                    MessageLevel::Warning,
                    "Save Error",
                    format!("Unable to save document due to:\n{e}"),
                );
                super::DispatchResult::changed(true)
            }
        }
    }

    pub(super) fn export_to(
        &mut self,
        workspace: WorkspaceId,
        mut path: PathBuf,
    ) -> super::DispatchResult {
        let Some(ws) = self.state.workspaces.get(workspace) else {
            return super::DispatchResult::changed(false);
        };
        let has_pdf_extension = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !has_pdf_extension {
            let mut raw = path.into_os_string();
            raw.push(".pdf");
            path = PathBuf::from(raw);
        }
        super::DispatchResult {
            effects: vec![Effect::ExportPdf {
                workspace,
                path,
                document: ws.surface.document().clone(),
            }],
            state_changed: false,
        }
    }

    pub(super) fn reduce_file_result(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::FileLoaded {
                workspace,
                path,
                content,
            } => {
                let Some(ws) = self.state.workspaces.get_mut(workspace) else {
                    return super::DispatchResult::changed(false);
                };
                match DocumentKind::for_open(&path) {
                    DocumentKind::PlainText => ws.surface.set_plain_text(&content),
                    DocumentKind::Markup => {
                        if let Err(e) = ws.surface.set_markup(&content) {
                            self.state.ui.message_box.show(
                                MessageLevel::Warning,
                                "Open Error",
                                format!("Unable to open document due to:\n{e}"),
                            );
                            return super::DispatchResult::changed(true);
                        }
                    }
                }
                ws.label = file_label(&path);
                self.state.paths.set(workspace, path);
                super::DispatchResult::changed(true)
            }
            Action::FileLoadFailed { error, .. } => {
                self.state.ui.message_box.show(
                    MessageLevel::Warning,
                    "Open Error",
                    format!("Unable to open document due to:\n{error}"),
                );
                super::DispatchResult::changed(true)
            }
            Action::FileSaved { workspace, path } => {
                let Some(ws) = self.state.workspaces.get_mut(workspace) else {
                    return super::DispatchResult::changed(false);
                };
                ws.label = file_label(&path);
                self.state.paths.set(workspace, path);
                super::DispatchResult::changed(true)
            }
            Action::FileSaveFailed { error, .. } => {
                self.state.ui.message_box.show(
                    MessageLevel::Warning,
                    "Save Error",
                    format!("Unable to save document due to:\n{error}"),
                );
                super::DispatchResult::changed(true)
            }
            Action::PdfExported { path, .. } => {
                self.state.ui.message_box.show(
                    MessageLevel::Info,
                    "Export Successful",
                    format!("Document exported as PDF:\n{}", path.display()),
                );
                super::DispatchResult::changed(true)
            }
            Action::PdfExportFailed { error, .. } => {
                self.state.ui.message_box.show(
                    MessageLevel::Warning,
                    "Export Failed",
                    format!("Unable to export document due to:\n{error}"),
                );
                super::DispatchResult::changed(true)
            }
            _ => super::DispatchResult::changed(false),
        }
    }
}
