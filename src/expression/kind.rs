//! Dispatch identities for expression nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog identity of a node variant.
///
/// Every literal, path and operator variant has exactly one entry. Analyses
/// such as join detection or aggregate detection branch on this value instead
/// of inspecting node contents.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Literal = 1,
    Path = 2,

    // Unary operators
    Sign = 10,
    Abs = 11,
    Sqrt = 12,
    Negate = 13,
    Not = 14,
    Lower = 15,
    Upper = 16,
    Trim = 17,
    Length = 18,
    IsNull = 19,
    IsNotNull = 20,

    // Aggregates
    Count = 30,
    Sum = 31,
    Avg = 32,
    Min = 33,
    Max = 34,

    // Binary operators
    Add = 50,
    Subtract = 51,
    Multiply = 52,
    Divide = 53,
    Mod = 54,
    Concat = 55,
    IndexOf = 56,
    Eq = 57,
    Ne = 58,
    Lt = 59,
    Le = 60,
    Gt = 61,
    Ge = 62,
    And = 63,
    Or = 64,
    Like = 65,
}

impl NodeKind {
    pub const ALL: [NodeKind; 34] = [
        NodeKind::Literal,
        NodeKind::Path,
        NodeKind::Sign,
        NodeKind::Abs,
        NodeKind::Sqrt,
        NodeKind::Negate,
        NodeKind::Not,
        NodeKind::Lower,
        NodeKind::Upper,
        NodeKind::Trim,
        NodeKind::Length,
        NodeKind::IsNull,
        NodeKind::IsNotNull,
        NodeKind::Count,
        NodeKind::Sum,
        NodeKind::Avg,
        NodeKind::Min,
        NodeKind::Max,
        NodeKind::Add,
        NodeKind::Subtract,
        NodeKind::Multiply,
        NodeKind::Divide,
        NodeKind::Mod,
        NodeKind::Concat,
        NodeKind::IndexOf,
        NodeKind::Eq,
        NodeKind::Ne,
        NodeKind::Lt,
        NodeKind::Le,
        NodeKind::Gt,
        NodeKind::Ge,
        NodeKind::And,
        NodeKind::Or,
        NodeKind::Like,
    ];

    /// Stable integer identity
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn is_aggregate(self) -> bool {
        matches!(
            self,
            NodeKind::Count | NodeKind::Sum | NodeKind::Avg | NodeKind::Min | NodeKind::Max
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Literal => "literal",
            NodeKind::Path => "path",
            NodeKind::Sign => "sign",
            NodeKind::Abs => "abs",
            NodeKind::Sqrt => "sqrt",
            NodeKind::Negate => "negate",
            NodeKind::Not => "not",
            NodeKind::Lower => "lower",
            NodeKind::Upper => "upper",
            NodeKind::Trim => "trim",
            NodeKind::Length => "length",
            NodeKind::IsNull => "is_null",
            NodeKind::IsNotNull => "is_not_null",
            NodeKind::Count => "count",
            NodeKind::Sum => "sum",
            NodeKind::Avg => "avg",
            NodeKind::Min => "min",
            NodeKind::Max => "max",
            NodeKind::Add => "add",
            NodeKind::Subtract => "subtract",
            NodeKind::Multiply => "multiply",
            NodeKind::Divide => "divide",
            NodeKind::Mod => "mod",
            NodeKind::Concat => "concat",
            NodeKind::IndexOf => "index_of",
            NodeKind::Eq => "eq",
            NodeKind::Ne => "ne",
            NodeKind::Lt => "lt",
            NodeKind::Le => "le",
            NodeKind::Gt => "gt",
            NodeKind::Ge => "ge",
            NodeKind::And => "and",
            NodeKind::Or => "or",
            NodeKind::Like => "like",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name(), self.code())
    }
}
