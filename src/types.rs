//! Semantic types and literal values.
//!
//! This module provides:
//! - The closed set of semantic types an expression can evaluate to
//! - Literal values bound into queries as parameters
//! - The promotion rules used by operators whose result type depends on
//!   their operands

pub mod resolver;
pub mod semantic;
pub mod value;

pub use resolver::TypeResolver;
pub use semantic::SemanticType;
pub use value::Value;
