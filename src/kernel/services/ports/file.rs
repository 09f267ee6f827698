//! Filesystem contract used by the file effects.

use std::io;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, FileError>;

#[derive(Debug)]
pub enum FileError {
    Io(io::Error),
    NotFound(PathBuf),
    NotAFile(PathBuf),
    PermissionDenied(PathBuf),
    InvalidPath(String),
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::Io(e) => write!(f, "IO error: {}", e),
            FileError::NotFound(p) => write!(f, "Not found: {}", p.display()),
            FileError::NotAFile(p) => write!(f, "Not a file: {}", p.display()),
            FileError::PermissionDenied(p) => write!(f, "Permission denied: {}", p.display()),
            FileError::InvalidPath(s) => write!(f, "Invalid path: {}", s),
        }
    }
}

impl std::error::Error for FileError {}

impl From<io::Error> for FileError {
    fn from(e: io::Error) -> Self {
        FileError::Io(e)
    }
}

impl FileError {
    /// Attaches the path to the bare io errors the OS reports without one.
    pub fn with_path(self, path: &Path) -> Self {
        match self {
            FileError::Io(e) => match e.kind() {
                io::ErrorKind::NotFound => FileError::NotFound(path.to_path_buf()),
                io::ErrorKind::PermissionDenied => FileError::PermissionDenied(path.to_path_buf()),
                _ => FileError::Io(e),
            },
            other => other,
        }
    }
}

/// Where documents are read from and written to.
pub trait FileProvider: Send + Sync {
    fn read_file(&self, path: &Path) -> Result<String>;

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        self.write_file_bytes(path, content.as_bytes())
    }

    fn write_file_bytes(&self, path: &Path, content: &[u8]) -> Result<()>;
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/file.rs"]
mod tests;
