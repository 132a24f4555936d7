//! sqlorm schema catalog
//!
//! This crate provides:
//! - Table, column and named-relation descriptions
//! - An immutable schema snapshot implementing the resolver's lookups
//! - A shared registry publishing copy-on-write snapshots
//! - JSON loading of table mappings

pub mod error;
pub mod registry;
pub mod schema_info;

pub use error::*;
pub use registry::*;
pub use schema_info::*;
