use std::path::PathBuf;

use crate::core::Command;
use crate::kernel::workspace::WorkspaceId;

#[derive(Debug, Clone)]
pub enum Action {
    RunCommand(Command),
    /// Opens `path` in its own workspace (used for paths given on the command line).
    OpenPath(PathBuf),
    SetActiveWorkspace {
        index: usize,
    },
    CloseWorkspace {
        index: usize,
    },
    SetFontFamily(String),
    SetFontSize(u16),
    InsertText(String),
    DialogAppend(char),
    DialogBackspace,
    DialogCursorLeft,
    DialogCursorRight,
    DialogAccept,
    DialogCancel,
    DismissMessage,
    FileLoaded {
        workspace: WorkspaceId,
        path: PathBuf,
        content: String,
    },
    FileLoadFailed {
        workspace: WorkspaceId,
        path: PathBuf,
        error: String,
    },
    FileSaved {
        workspace: WorkspaceId,
        path: PathBuf,
    },
    FileSaveFailed {
        workspace: WorkspaceId,
        path: PathBuf,
        error: String,
    },
    PdfExported {
        workspace: WorkspaceId,
        path: PathBuf,
    },
    PdfExportFailed {
        workspace: WorkspaceId,
        path: PathBuf,
        error: String,
    },
}
