//! Typed expression trees for query compilation.
//!
//! This module provides:
//! - The closed node catalog and its dispatch identities
//! - Unary and binary operators with their type rules and SQL layouts
//! - Type checking ahead of rendering
//! - Serializable tree documents built through the checked constructors

pub mod document;
pub mod error;
pub mod kind;
pub mod node;
pub mod operator;
pub mod type_checker;

pub use document::NodeDocument;
pub use error::{ExpressionError, ExpressionResult};
pub use kind::NodeKind;
pub use node::{BinaryNode, Literal, PathRef, UnaryNode, ValueNode};
pub use operator::{BinaryOperator, UnaryOperator};
pub use type_checker::{type_check_expression, validate_filter_predicate, TypeChecker};
