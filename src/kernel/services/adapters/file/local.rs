//! Local disk provider.

use crate::kernel::services::ports::file::{FileError, FileProvider, Result};
use std::fs;
use std::path::Path;

pub struct LocalFileProvider;

impl LocalFileProvider {
    pub fn new() -> Self {
        Self
    }

    fn ensure_parent(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| FileError::from(e).with_path(parent))?;
            }
        }
        Ok(())
    }
}

impl Default for LocalFileProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FileProvider for LocalFileProvider {
    fn read_file(&self, path: &Path) -> Result<String> {
        if path.as_os_str().is_empty() {
            return Err(FileError::InvalidPath(String::new()));
        }
        if !path.exists() {
            return Err(FileError::NotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(FileError::NotAFile(path.to_path_buf()));
        }
        fs::read_to_string(path).map_err(|e| FileError::from(e).with_path(path))
    }

    fn write_file_bytes(&self, path: &Path, content: &[u8]) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(FileError::InvalidPath(String::new()));
        }
        if path.is_dir() {
            return Err(FileError::NotAFile(path.to_path_buf()));
        }
        Self::ensure_parent(path)?;
        fs::write(path, content).map_err(|e| FileError::from(e).with_path(path))
    }
}
