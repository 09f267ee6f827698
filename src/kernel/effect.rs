use super::workspace::WorkspaceId;
use crate::models::RichDocument;
use std::path::PathBuf;

/// I/O the kernel asks the shell to perform. Outcomes come back as `Action`s.
#[derive(Debug, Clone)]
pub enum Effect {
    ReadFile {
        workspace: WorkspaceId,
        path: PathBuf,
    },
    WriteFile {
        workspace: WorkspaceId,
        path: PathBuf,
        content: String,
    },
    ExportPdf {
        workspace: WorkspaceId,
        path: PathBuf,
        document: RichDocument,
    },
}
