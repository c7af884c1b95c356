//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Presentation-facing error codes and messages
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult};
