//! sqlorm serialization context
//!
//! This crate provides the configuration record SQL renderers read while
//! producing statement text:
//! - Rendering toggles (bindable placeholders, table qualifiers, parentheses)
//! - A borrowed handle to the schema context
//! - A builder that borrows the schema from whatever owns it

pub mod context;
pub mod error;

pub use context::*;
pub use error::*;
