//! Shared schema registry
//!
//! The registry owns the schema and is the only writer. Resolution passes
//! take a [`SchemaRegistry::snapshot`], an immutable `Arc<SchemaInfo>` that
//! later registrations never touch.

use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};
use parking_lot::RwLock;
use sqlorm_ast::{ObjectType, TableAlias};

use crate::{RelationInfo, SchemaError, SchemaInfo, TableInfo};

/// Schema owner publishing copy-on-write snapshots
#[derive(Clone, Default)]
pub struct SchemaRegistry {
    schema: Arc<RwLock<Arc<SchemaInfo>>>,
}

impl SchemaRegistry {
    /// Create a registry from an existing schema
    pub fn new(schema: SchemaInfo) -> Self {
        Self {
            schema: Arc::new(RwLock::new(Arc::new(schema))),
        }
    }

    /// Load table mappings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(Self::new(SchemaInfo::from_json(json)?))
    }

    /// Load table mappings from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        debug!("loading schema from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load table mappings from a file, detecting the format by extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_file(path),
            Some(ext) => Err(SchemaError::UnsupportedFile(format!(
                "Unsupported file extension: .{}. Expected .json",
                ext
            ))),
            None => Err(SchemaError::UnsupportedFile(
                "No file extension found. Expected .json".to_string(),
            )),
        }
    }

    /// Current schema; unaffected by later registrations
    pub fn snapshot(&self) -> Arc<SchemaInfo> {
        Arc::clone(&*self.schema.read())
    }

    /// Map an object type onto a table
    pub fn register_table(&self, table: TableInfo) -> Result<(), SchemaError> {
        let name = table.name.clone();
        let replaced = self.update(|schema| schema.add_table(table))?;
        if replaced.is_some() {
            warn!("table mapping for '{}' replaced", name);
        } else {
            debug!("registered table '{}'", name);
        }
        Ok(())
    }

    /// Register a table alias for a mapped object type
    pub fn register_alias(
        &self,
        alias: impl Into<TableAlias>,
        object: impl Into<ObjectType>,
    ) -> Result<(), SchemaError> {
        let alias = alias.into();
        let object = object.into();
        let name = alias.clone();
        let replaced = self.update(|schema| schema.add_alias(alias, object.clone()))?;
        match replaced {
            Some(previous) if previous != object => {
                warn!("alias '{}' moved from '{}' to '{}'", name, previous, object)
            }
            _ => debug!("registered alias '{}' for '{}'", name, object),
        }
        Ok(())
    }

    /// Register a named relation
    pub fn register_relation(&self, relation: RelationInfo) {
        let name = relation.name.clone();
        let mut guard = self.schema.write();
        if Arc::make_mut(&mut *guard).add_relation(relation).is_some() {
            warn!("relation '{}' replaced", name);
        } else {
            debug!("registered relation '{}'", name);
        }
    }

    // `f` must validate before inserting: a failed update leaves the schema unchanged.
    fn update<T>(
        &self,
        f: impl FnOnce(&mut SchemaInfo) -> Result<T, SchemaError>,
    ) -> Result<T, SchemaError> {
        let mut guard = self.schema.write();
        f(Arc::make_mut(&mut *guard))
    }
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let schema = self.schema.read();
        f.debug_struct("SchemaRegistry")
            .field("tables", &schema.tables().count())
            .field("relations", &schema.relations().count())
            .finish()
    }
}
