//! Service adapters: OS specific implementations (disk, settings, PDF).

pub mod file;
pub mod keybinding;
pub mod pdf;
pub mod settings;

pub use file::LocalFileProvider;
pub use keybinding::{KeybindingContext, KeybindingService};
pub use pdf::{PdfError, PdfExporter};
pub use settings::{
    ensure_settings_file, get_app_dir, get_cache_dir, get_settings_path, load_settings,
    parse_keybinding,
};
