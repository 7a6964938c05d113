//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified error handling (`AppError`) with an HTTP mapping
//! - The per-call `Context` carrying an optional deadline
//! - Configuration structures

pub mod config;
pub mod context;
pub mod error;

pub use config::*;
pub use context::Context;
pub use error::{AppError, AppResult, OptionExt};
