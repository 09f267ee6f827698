//! Headless application core (state/action/effect).

pub mod action;
pub mod dialog;
pub mod effect;
pub mod services;
pub mod state;
pub mod store;
pub mod workspace;

pub use action::Action;
pub use dialog::{ColorTarget, DialogState, PendingDialog};
pub use effect::Effect;
pub use state::{AppState, MessageBoxState, MessageLevel, ToolbarState, UiState};
pub use store::{DispatchResult, Store};
pub use workspace::{PathTable, Workspace, WorkspaceId, WorkspaceRegistry};
