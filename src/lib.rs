//! powertext - a terminal rich-text word processor.
//!
//! Module layout:
//! - core: commands and input events
//! - models: the rich document, its cursor and the `.ptxt` markup
//! - kernel: application state, actions, effects and the store (command dispatcher)
//! - kernel::services: file access, settings, keybindings and PDF export
//! - app: the workbench (shell) and its rendering
//! - tui: terminal setup/restore

pub mod app;
pub mod core;
pub mod kernel;
pub mod models;
pub mod tui;
