//! Per-render state.

use crate::config::{CompilerConfig, PlaceholderStyle};
use crate::expression::NodeKind;
use crate::render::fragment::{Piece, SqlFragment};
use crate::types::Value;

/// SQL text and the parameters bound to its placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSql {
    pub sql: String,
    pub params: Vec<Value>,
    pub requires_join: bool,
}

/// Mutable state threaded through a single tree walk.
///
/// A context belongs to exactly one render call and is consumed by
/// [`RenderContext::finish`].
pub struct RenderContext<'a> {
    config: &'a CompilerConfig,
    params: Vec<Value>,
    requires_join: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a CompilerConfig) -> Self {
        Self {
            config,
            params: Vec::new(),
            requires_join: false,
        }
    }

    pub fn config(&self) -> &'a CompilerConfig {
        self.config
    }

    /// Keyword for an operator, honouring dialect overrides
    pub fn keyword(&self, kind: NodeKind, default: &'static str) -> &'a str {
        self.config.keyword(kind, default)
    }

    /// Record that a rendered path needs an extra table join
    pub fn note_join(&mut self) {
        self.requires_join = true;
    }

    pub fn requires_join(&self) -> bool {
        self.requires_join
    }

    /// Flatten the root fragment into SQL text, moving its bound values into
    /// the parameter buffer in placeholder order
    pub fn finish(mut self, fragment: SqlFragment) -> RenderedSql {
        let mut sql = String::new();

        for piece in fragment.pieces() {
            match piece {
                Piece::Text(text) => sql.push_str(text),
                Piece::Param(value) => {
                    self.params.push(value.clone());
                    match self.config.placeholder {
                        PlaceholderStyle::Question => sql.push('?'),
                        PlaceholderStyle::Numbered => {
                            sql.push('$');
                            sql.push_str(&self.params.len().to_string());
                        }
                    }
                }
            }
        }

        RenderedSql {
            sql,
            params: self.params,
            requires_join: self.requires_join,
        }
    }
}
