//! Filesystem access behind `FileProvider`.

pub mod local;

pub use local::LocalFileProvider;
