//! sqlorm result types
//!
//! This crate defines the semantic types query projections resolve to and
//! the static resolver that computes them:
//! - Semantic types (primitives, nullable wrappers, objects, tuples)
//! - The read-only schema context the resolver consults
//! - Result-type resolution over expression trees

pub mod catalog;
pub mod inference;
pub mod type_system;

pub use catalog::*;
pub use inference::*;
pub use type_system::*;
