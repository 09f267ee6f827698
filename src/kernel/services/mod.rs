//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used across the app (kernel-facing).
//! - `adapters`: OS specific implementations of those contracts.

pub mod adapters;
pub mod ports;
