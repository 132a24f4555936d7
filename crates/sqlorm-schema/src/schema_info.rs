//! Schema snapshot describing mapped tables, table aliases and named relations

use indexmap::IndexMap;
use serde::Deserialize;
use sqlorm_ast::{Expression, ObjectType, RelationName, TableAlias};
use sqlorm_serialize::ContextSource;
use sqlorm_types::{ColumnDescriptor, SchemaContext, SemanticType};

use crate::SchemaError;

/// Mapped column of a table
pub type ColumnInfo = ColumnDescriptor;

/// Object type mapped onto a table
#[derive(Debug, Clone, PartialEq)]
pub struct TableInfo {
    /// Object type identity
    pub name: ObjectType,
    /// Mapped columns in declaration order
    pub columns: Vec<ColumnInfo>,
}

impl TableInfo {
    pub fn new(name: impl Into<ObjectType>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Append a column
    pub fn column(mut self, name: impl Into<String>, column_type: SemanticType) -> Self {
        self.columns.push(ColumnInfo::new(name, column_type));
        self
    }

    /// Get column by name
    pub fn get_column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    fn check_columns(&self) -> Result<(), SchemaError> {
        for (i, column) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|c| c.name == column.name) {
                return Err(SchemaError::DuplicateColumn {
                    table: self.name.to_string(),
                    column: column.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Named relation (common table expression or view) and its projection list
#[derive(Debug, Clone, PartialEq)]
pub struct RelationInfo {
    /// Relation identity
    pub name: RelationName,
    /// Internal projection list in column order
    pub expressions: Vec<Expression>,
}

impl RelationInfo {
    pub fn new(name: impl Into<RelationName>, expressions: Vec<Expression>) -> Self {
        Self {
            name: name.into(),
            expressions,
        }
    }
}

/// Finalized schema snapshot
///
/// Tables, aliases and relations keep their registration order.
#[derive(Debug, Clone, Default)]
pub struct SchemaInfo {
    tables: IndexMap<ObjectType, TableInfo>,
    aliases: IndexMap<TableAlias, ObjectType>,
    relations: IndexMap<RelationName, RelationInfo>,
}

impl SchemaInfo {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse table and alias mappings from JSON
    ///
    /// ```json
    /// {
    ///   "tables": [
    ///     { "name": "Person", "columns": [
    ///         { "name": "id", "type": "INTEGER" },
    ///         { "name": "nickname", "type": "TEXT", "nullable": true }
    ///     ] }
    ///   ],
    ///   "aliases": { "p": "Person" }
    /// }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let document: SchemaDocument = serde_json::from_str(json)?;

        let mut schema = Self::new();
        for table in document.tables {
            let columns = table.columns.into_iter().map(RawColumn::into_column).collect();
            schema.add_table(TableInfo {
                name: ObjectType::new(table.name),
                columns,
            })?;
        }
        for (alias, object) in document.aliases {
            schema.add_alias(TableAlias::new(alias), ObjectType::new(object))?;
        }
        Ok(schema)
    }

    /// Add a table, returning the mapping it replaced
    pub fn add_table(&mut self, table: TableInfo) -> Result<Option<TableInfo>, SchemaError> {
        table.check_columns()?;
        Ok(self.tables.insert(table.name.clone(), table))
    }

    /// Add a table alias, returning the object type it previously stood for
    pub fn add_alias(
        &mut self,
        alias: TableAlias,
        object: ObjectType,
    ) -> Result<Option<ObjectType>, SchemaError> {
        if !self.tables.contains_key(&object) {
            return Err(SchemaError::AliasTargetNotMapped {
                alias: alias.to_string(),
                object: object.to_string(),
            });
        }
        Ok(self.aliases.insert(alias, object))
    }

    /// Add a named relation, returning the one it replaced
    pub fn add_relation(&mut self, relation: RelationInfo) -> Option<RelationInfo> {
        self.relations.insert(relation.name.clone(), relation)
    }

    /// Get table by object type
    pub fn get_table(&self, object: &ObjectType) -> Option<&TableInfo> {
        self.tables.get(object)
    }

    /// Get relation by name
    pub fn get_relation(&self, relation: &RelationName) -> Option<&RelationInfo> {
        self.relations.get(relation)
    }

    /// Check if an object type is mapped
    pub fn has_table(&self, object: &ObjectType) -> bool {
        self.tables.contains_key(object)
    }

    /// Mapped tables in registration order
    pub fn tables(&self) -> impl Iterator<Item = &TableInfo> {
        self.tables.values()
    }

    /// Named relations in registration order
    pub fn relations(&self) -> impl Iterator<Item = &RelationInfo> {
        self.relations.values()
    }
}

impl SchemaContext for SchemaInfo {
    fn columns_of(&self, object: &ObjectType) -> Option<&[ColumnDescriptor]> {
        self.tables.get(object).map(|t| t.columns.as_slice())
    }

    fn relation_expressions(&self, relation: &RelationName) -> Option<&[Expression]> {
        self.relations.get(relation).map(|r| r.expressions.as_slice())
    }

    fn underlying_object_type(&self, alias: &TableAlias) -> Option<&ObjectType> {
        self.aliases.get(alias)
    }
}

impl ContextSource for SchemaInfo {
    type Schema = Self;

    fn schema(&self) -> &Self {
        self
    }
}

// === JSON Document ===

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaDocument {
    #[serde(default)]
    tables: Vec<RawTable>,
    #[serde(default)]
    aliases: IndexMap<String, String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTable {
    name: String,
    #[serde(default)]
    columns: Vec<RawColumn>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawColumn {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    nullable: bool,
}

impl RawColumn {
    fn into_column(self) -> ColumnInfo {
        let base = SemanticType::from_column_type(&self.type_name);
        let column_type = if self.nullable {
            SemanticType::nullable(base)
        } else {
            base
        };
        ColumnInfo::new(self.name, column_type)
    }
}
