//! Terminal front-end plumbing (crossterm + ratatui).
//!
//! Kept apart from `kernel`/`models` so the editing core has no terminal dependency.

pub mod terminal_guard;
pub mod view;
