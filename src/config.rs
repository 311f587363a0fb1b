//! Compiler configuration.
//!
//! Describes the SQL dialect the renderer targets: placeholder syntax, table
//! alias naming and per-operator keyword overrides. Loaded from JSON, with
//! every field optional.

use crate::expression::NodeKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Positional placeholder syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderStyle {
    /// `?`
    #[default]
    Question,
    /// `$1`, `$2`, ...
    Numbered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub placeholder: PlaceholderStyle,
    /// Prefix of generated table aliases (`t` gives `t0`, `t1`, ...)
    pub alias_prefix: String,
    /// Operator keywords replacing the catalog defaults
    pub keywords: HashMap<NodeKind, String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            placeholder: PlaceholderStyle::Question,
            alias_prefix: "t".to_string(),
            keywords: HashMap::new(),
        }
    }
}

impl CompilerConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse compiler configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration {}", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn with_placeholder(mut self, placeholder: PlaceholderStyle) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn with_alias_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.alias_prefix = prefix.into();
        self
    }

    pub fn with_keyword(mut self, kind: NodeKind, keyword: impl Into<String>) -> Self {
        self.keywords.insert(kind, keyword.into());
        self
    }

    /// Keyword for an operator, falling back to the catalog default
    pub fn keyword<'s>(&'s self, kind: NodeKind, default: &'static str) -> &'s str {
        self.keywords
            .get(&kind)
            .map(String::as_str)
            .unwrap_or(default)
    }
}
