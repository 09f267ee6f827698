//! Service ports: traits + data contracts.

pub mod config;
pub mod file;
pub mod settings;

pub use config::{EditorConfig, MAX_FONT_SIZE, MIN_FONT_SIZE};
pub use file::{FileError, FileProvider, Result as FileResult};
pub use settings::{default_font_families, KeybindingRule, Settings, ThemeSettings};
