//! Entity path mapping.
//!
//! The object query names values by entity paths such as `balance` or
//! `owner.name`. The mapping layer tells the compiler which column and
//! semantic type a field maps to, and which fields are relations leading to
//! another entity. [`PathBinder`] walks a dotted path through that metadata
//! and hands out table aliases, one per distinct relation prefix.

use crate::expression::{ExpressionError, ExpressionResult, PathRef};
use crate::types::SemanticType;
use anyhow::{Context, Result};
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// How one entity field maps to the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldMapping {
    Column {
        column: String,
        #[serde(rename = "type")]
        semantic_type: SemanticType,
    },
    /// Reference to another entity, reached through a join
    Relation { target: String },
}

/// Source of field mapping metadata
pub trait Mapping {
    /// Entity the query ranges over; its table gets alias 0
    fn root_entity(&self) -> &str;

    fn table(&self, entity: &str) -> Option<&str>;

    fn field(&self, entity: &str, name: &str) -> Option<&FieldMapping>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityMapping {
    pub table: String,
    #[serde(default)]
    pub fields: HashMap<String, FieldMapping>,
}

impl EntityMapping {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            fields: HashMap::new(),
        }
    }

    pub fn column(
        mut self,
        name: impl Into<String>,
        column: impl Into<String>,
        semantic_type: SemanticType,
    ) -> Self {
        self.fields.insert(
            name.into(),
            FieldMapping::Column {
                column: column.into(),
                semantic_type,
            },
        );
        self
    }

    pub fn relation(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.fields.insert(
            name.into(),
            FieldMapping::Relation {
                target: target.into(),
            },
        );
        self
    }
}

/// In-memory mapping, loadable from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaMapping {
    pub root: String,
    #[serde(default)]
    pub entities: HashMap<String, EntityMapping>,
}

impl SchemaMapping {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            entities: HashMap::new(),
        }
    }

    pub fn with_entity(mut self, name: impl Into<String>, entity: EntityMapping) -> Self {
        self.entities.insert(name.into(), entity);
        self
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse mapping")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read mapping {}", path.display()))?;
        Self::from_json_str(&text)
    }
}

impl Mapping for SchemaMapping {
    fn root_entity(&self) -> &str {
        &self.root
    }

    fn table(&self, entity: &str) -> Option<&str> {
        self.entities.get(entity).map(|e| e.table.as_str())
    }

    fn field(&self, entity: &str, name: &str) -> Option<&FieldMapping> {
        self.entities.get(entity)?.fields.get(name)
    }
}

/// Binds dotted entity paths to columns for one query.
///
/// Paths sharing a relation prefix share its alias, so `owner.name` and
/// `owner.email` both read from the same joined table.
pub struct PathBinder<'a> {
    mapping: &'a dyn Mapping,
    aliases: HashMap<String, u32>,
    tables: BTreeMap<u32, String>,
}

impl<'a> PathBinder<'a> {
    pub fn new(mapping: &'a dyn Mapping) -> Self {
        let mut tables = BTreeMap::new();
        if let Some(table) = mapping.table(mapping.root_entity()) {
            tables.insert(0, table.to_string());
        }
        Self {
            mapping,
            aliases: HashMap::new(),
            tables,
        }
    }

    pub fn bind(&mut self, path: &str) -> ExpressionResult<PathRef> {
        let unknown = || ExpressionError::UnknownPath {
            path: path.to_string(),
        };

        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(unknown());
        }

        let mapping = self.mapping;
        let mut entity = mapping.root_entity().to_string();
        let mut alias = 0;

        for (i, segment) in segments.iter().enumerate() {
            let last = i + 1 == segments.len();
            let field = mapping.field(&entity, segment).ok_or_else(unknown)?;

            match field {
                FieldMapping::Column {
                    column,
                    semantic_type,
                } if last => {
                    let mut bound =
                        PathRef::new(alias, column.clone(), semantic_type.clone()).with_path(path);
                    if alias != 0 {
                        bound = bound.via_join();
                    }
                    trace!("Bound path {} to alias {} column {}", path, alias, column);
                    return Ok(bound);
                }
                FieldMapping::Relation { target } if !last => {
                    let table = mapping.table(target).ok_or_else(unknown)?;
                    let prefix = segments[..=i].join(".");
                    alias = self.alias_for(prefix, table);
                    entity = target.clone();
                }
                // Columns cannot be traversed and relations are not values
                _ => return Err(unknown()),
            }
        }

        Err(unknown())
    }

    /// Tables referenced so far, by alias
    pub fn tables(&self) -> &BTreeMap<u32, String> {
        &self.tables
    }

    fn alias_for(&mut self, prefix: String, table: &str) -> u32 {
        if let Some(alias) = self.aliases.get(&prefix) {
            return *alias;
        }
        let alias = self.aliases.len() as u32 + 1;
        self.aliases.insert(prefix, alias);
        self.tables.insert(alias, table.to_string());
        alias
    }
}
