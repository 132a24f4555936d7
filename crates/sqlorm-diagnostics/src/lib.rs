//! sqlorm diagnostics and error handling
//!
//! This crate provides the error handling infrastructure shared by the
//! sqlorm crates: structured error codes, the workspace-wide [`OrmError`]
//! and diagnostic reporting.

mod error;
mod error_code;

pub use error::*;
pub use error_code::*;

/// Result type for sqlorm operations
pub type Result<T> = std::result::Result<T, OrmError>;
