//! Frontend-neutral building blocks: the command set and normalized input events.

pub mod command;
pub mod event;

pub use command::Command;
pub use event::{InputEvent, Key};
