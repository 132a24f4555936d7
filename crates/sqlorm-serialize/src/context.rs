//! Serialization context
//!
//! Renderers thread a [`SerializationContext`] through every node they
//! print. It is a flat record: three toggles and a borrowed schema. A
//! renderer that needs a different toggle for a sub-tree copies the context
//! and flips the flag on the copy.

use std::ops::{Deref, DerefMut};
use std::path::Path;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};
use sqlorm_types::SchemaContext;

use crate::ConfigError;

/// Rendering toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerializationFlags {
    /// Render bindable values as `?` placeholders instead of inline literals
    pub replace_bindable_with_question: bool,
    /// Omit the owning table or relation qualifier when naming a column
    pub skip_table_name: bool,
    /// Wrap sub-expressions in parentheses
    pub use_parentheses: bool,
}

impl Default for SerializationFlags {
    fn default() -> Self {
        Self {
            replace_bindable_with_question: false,
            skip_table_name: true,
            use_parentheses: true,
        }
    }
}

impl SerializationFlags {
    /// Load flags from a JSON document; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load flags from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("loading serialization flags from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Anything that owns a schema context and can lend it out
pub trait ContextSource {
    /// Schema context type
    type Schema: SchemaContext + ?Sized;

    /// Borrow the schema context
    fn schema(&self) -> &Self::Schema;
}

impl<T: ContextSource + ?Sized> ContextSource for &T {
    type Schema = T::Schema;

    fn schema(&self) -> &Self::Schema {
        (**self).schema()
    }
}

impl<T: ContextSource + ?Sized> ContextSource for Arc<T> {
    type Schema = T::Schema;

    fn schema(&self) -> &Self::Schema {
        (**self).schema()
    }
}

/// Flags plus the borrowed schema context, read by renderers
pub struct SerializationContext<'a, S: ?Sized> {
    flags: SerializationFlags,
    schema: &'a S,
}

impl<'a, S: ?Sized> SerializationContext<'a, S> {
    /// Create a context with default flags
    pub fn new(schema: &'a S) -> Self {
        Self::with_flags(schema, SerializationFlags::default())
    }

    /// Create a context with explicit flags
    pub fn with_flags(schema: &'a S, flags: SerializationFlags) -> Self {
        Self { flags, schema }
    }

    /// Get the borrowed schema context
    pub fn schema(&self) -> &'a S {
        self.schema
    }

    /// Get the rendering flags
    pub fn flags(&self) -> SerializationFlags {
        self.flags
    }
}

impl<S: ?Sized> Clone for SerializationContext<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for SerializationContext<'_, S> {}

impl<S: ?Sized> Deref for SerializationContext<'_, S> {
    type Target = SerializationFlags;

    fn deref(&self) -> &Self::Target {
        &self.flags
    }
}

impl<S: ?Sized> DerefMut for SerializationContext<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.flags
    }
}

impl<S: ?Sized> std::fmt::Debug for SerializationContext<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializationContext")
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

/// Factory producing serialization contexts bound to one schema source
pub struct SerializationContextBuilder<'a, T: ContextSource + ?Sized> {
    source: &'a T,
    flags: SerializationFlags,
}

impl<'a, T: ContextSource + ?Sized> SerializationContextBuilder<'a, T> {
    /// Create a builder over a schema source
    pub fn new(source: &'a T) -> Self {
        Self {
            source,
            flags: SerializationFlags::default(),
        }
    }

    /// Use the given flags for every context built
    pub fn with_flags(mut self, flags: SerializationFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Build a context borrowing the source's schema
    pub fn build(&self) -> SerializationContext<'a, T::Schema> {
        SerializationContext::with_flags(self.source.schema(), self.flags)
    }
}
