//! Error types for expression compilation.

use crate::expression::NodeKind;
use crate::types::SemanticType;
use thiserror::Error;

/// Errors raised while building, binding or type-resolving an expression tree.
///
/// Every variant is raised before any SQL text is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Invalid expression tree at {kind}: {reason}")]
    InvalidTree { kind: NodeKind, reason: String },

    #[error("Type mismatch in {kind}: expected {expected}, got {}", format_types(.operands))]
    TypeMismatch {
        kind: NodeKind,
        operands: Vec<SemanticType>,
        expected: String,
    },

    #[error("Unsupported type {semantic_type} in {context}{}, operands {}", format_node(.kind), format_types(.operands))]
    UnsupportedType {
        /// Operator that needed the type, once known
        kind: Option<NodeKind>,
        semantic_type: SemanticType,
        operands: Vec<SemanticType>,
        context: String,
    },

    #[error("Unknown path: {path}")]
    UnknownPath { path: String },
}

impl ExpressionError {
    /// Dispatch identity of the offending node, when the error names one
    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            ExpressionError::InvalidTree { kind, .. } | ExpressionError::TypeMismatch { kind, .. } => {
                Some(*kind)
            }
            ExpressionError::UnsupportedType { kind, .. } => *kind,
            ExpressionError::UnknownPath { .. } => None,
        }
    }

    /// Attach the operator and its operand types to an error raised below it.
    ///
    /// Errors that already name a node are returned unchanged.
    pub fn at_node(self, node: NodeKind, operand_types: &[SemanticType]) -> Self {
        match self {
            ExpressionError::UnsupportedType {
                kind: None,
                semantic_type,
                context,
                ..
            } => ExpressionError::UnsupportedType {
                kind: Some(node),
                semantic_type,
                operands: operand_types.to_vec(),
                context,
            },
            other => other,
        }
    }
}

fn format_node(kind: &Option<NodeKind>) -> String {
    match kind {
        Some(kind) => format!(" at {}", kind),
        None => String::new(),
    }
}

fn format_types(types: &[SemanticType]) -> String {
    let names: Vec<&str> = types.iter().map(|t| t.as_str()).collect();
    format!("({})", names.join(", "))
}

/// Result type for expression operations
pub type ExpressionResult<T> = Result<T, ExpressionError>;
