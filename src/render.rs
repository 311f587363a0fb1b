//! Rendering of expression trees into SQL.
//!
//! This module provides:
//! - [`SqlFragment`]: SQL text with parameters embedded at their placeholders
//! - [`RenderContext`]: the per-render parameter buffer and join flag
//! - [`Compiler`]: type-checks a tree, then renders it into SQL text plus an
//!   ordered parameter list

pub mod context;
pub mod fragment;

pub use context::{RenderContext, RenderedSql};
pub use fragment::{Piece, SqlFragment};

use crate::config::CompilerConfig;
use crate::expression::{ExpressionResult, TypeChecker, ValueNode};
use crate::types::{SemanticType, Value};
use log::{debug, trace};
use serde::Serialize;

/// Output of compiling one expression tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledExpression {
    /// SQL fragment suitable for a WHERE or SELECT clause
    pub sql: String,
    /// Bound values matching the placeholders left to right
    pub params: Vec<Value>,
    pub result_type: SemanticType,
    pub requires_join: bool,
}

/// Compiles expression trees under one dialect configuration
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Type-check and render an expression
    pub fn compile(&self, tree: &ValueNode) -> ExpressionResult<CompiledExpression> {
        let result_type = TypeChecker::new().check(tree)?;
        Ok(self.render(tree, result_type))
    }

    /// Compile an expression used as a WHERE predicate
    pub fn compile_predicate(&self, tree: &ValueNode) -> ExpressionResult<CompiledExpression> {
        let result_type = TypeChecker::new().check_filter_predicate(tree)?;
        Ok(self.render(tree, result_type))
    }

    /// Compile an expression used in a SELECT list
    pub fn compile_projection(&self, tree: &ValueNode) -> ExpressionResult<CompiledExpression> {
        let result_type = TypeChecker::new().check_projection(tree)?;
        Ok(self.render(tree, result_type))
    }

    fn render(&self, tree: &ValueNode, result_type: SemanticType) -> CompiledExpression {
        let mut ctx = RenderContext::new(&self.config);
        let fragment = tree.render(&mut ctx);
        trace!("Rendered {} pieces", fragment.pieces().len());

        let rendered = ctx.finish(fragment);
        debug!(
            "Compiled {} to `{}` with {} parameters",
            tree.dispatch_id(),
            rendered.sql,
            rendered.params.len()
        );

        CompiledExpression {
            sql: rendered.sql,
            params: rendered.params,
            result_type,
            requires_join: rendered.requires_join,
        }
    }
}

/// Compile an expression with the default configuration
pub fn compile(tree: &ValueNode) -> ExpressionResult<CompiledExpression> {
    Compiler::default().compile(tree)
}

/// Whether any path in the tree needs an additional table join
pub fn requires_join(tree: &ValueNode) -> bool {
    tree.requires_join()
}
