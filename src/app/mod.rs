//! Application shell: the workbench that owns the store and the terminal rendering.

pub mod theme;
pub mod workbench;

pub use workbench::Workbench;
