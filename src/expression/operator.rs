//! Operator catalog.
//!
//! Each operator carries its SQL keyword, its syntactic layout, its dispatch
//! identity and its type rule. Nodes hold an operator and dispatch to these
//! tables by `match`.

use crate::expression::{ExpressionError, ExpressionResult, NodeKind};
use crate::types::{SemanticType, TypeResolver};
use serde::{Deserialize, Serialize};

/// How a unary operator places its keyword around the operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryLayout {
    /// `KEYWORD(<operand>)`
    Function,
    /// `KEYWORD (<operand>)`
    Prefix,
    /// `<operand> KEYWORD`
    Postfix,
}

/// How a binary operator places its keyword around the operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryLayout {
    /// `(<left> KEYWORD <right>)`
    Infix,
    /// `<left> KEYWORD <right>`
    Comparison,
    /// `KEYWORD(<left>, <right>)`
    Function,
    /// `KEYWORD(<right> IN <left>)`; the second operand is written first
    Position,
}

/// Unary operators supported in expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOperator {
    // Numeric
    Sign,
    Abs,
    Sqrt,
    Negate,

    // Logical
    Not,

    // String
    Lower,
    Upper,
    Trim,
    Length,

    // NULL checks
    IsNull,
    IsNotNull,

    // Aggregates
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl UnaryOperator {
    pub fn kind(&self) -> NodeKind {
        match self {
            UnaryOperator::Sign => NodeKind::Sign,
            UnaryOperator::Abs => NodeKind::Abs,
            UnaryOperator::Sqrt => NodeKind::Sqrt,
            UnaryOperator::Negate => NodeKind::Negate,
            UnaryOperator::Not => NodeKind::Not,
            UnaryOperator::Lower => NodeKind::Lower,
            UnaryOperator::Upper => NodeKind::Upper,
            UnaryOperator::Trim => NodeKind::Trim,
            UnaryOperator::Length => NodeKind::Length,
            UnaryOperator::IsNull => NodeKind::IsNull,
            UnaryOperator::IsNotNull => NodeKind::IsNotNull,
            UnaryOperator::Count => NodeKind::Count,
            UnaryOperator::Sum => NodeKind::Sum,
            UnaryOperator::Avg => NodeKind::Avg,
            UnaryOperator::Min => NodeKind::Min,
            UnaryOperator::Max => NodeKind::Max,
        }
    }

    /// Default SQL keyword, before dialect overrides
    pub fn keyword(&self) -> &'static str {
        match self {
            UnaryOperator::Sign => "SIGN",
            UnaryOperator::Abs => "ABS",
            UnaryOperator::Sqrt => "SQRT",
            UnaryOperator::Negate => "-",
            UnaryOperator::Not => "NOT",
            UnaryOperator::Lower => "LOWER",
            UnaryOperator::Upper => "UPPER",
            UnaryOperator::Trim => "TRIM",
            UnaryOperator::Length => "LENGTH",
            UnaryOperator::IsNull => "IS NULL",
            UnaryOperator::IsNotNull => "IS NOT NULL",
            UnaryOperator::Count => "COUNT",
            UnaryOperator::Sum => "SUM",
            UnaryOperator::Avg => "AVG",
            UnaryOperator::Min => "MIN",
            UnaryOperator::Max => "MAX",
        }
    }

    pub fn layout(&self) -> UnaryLayout {
        match self {
            UnaryOperator::Not => UnaryLayout::Prefix,
            UnaryOperator::IsNull | UnaryOperator::IsNotNull => UnaryLayout::Postfix,
            _ => UnaryLayout::Function,
        }
    }

    /// Type hint handed down to the operand, given the hint this node received
    pub fn operand_hint(&self, hint: Option<&SemanticType>) -> Option<SemanticType> {
        match self {
            UnaryOperator::Abs | UnaryOperator::Negate | UnaryOperator::Min | UnaryOperator::Max => {
                hint.cloned()
            }
            UnaryOperator::Not => Some(SemanticType::Boolean),
            UnaryOperator::Lower
            | UnaryOperator::Upper
            | UnaryOperator::Trim
            | UnaryOperator::Length => Some(SemanticType::String),
            // The result type of these never depends on context
            UnaryOperator::Sign
            | UnaryOperator::Sqrt
            | UnaryOperator::IsNull
            | UnaryOperator::IsNotNull
            | UnaryOperator::Count
            | UnaryOperator::Sum
            | UnaryOperator::Avg => None,
        }
    }

    /// Get the output type of this operator given the operand type
    pub fn result_type(&self, operand: &SemanticType) -> ExpressionResult<SemanticType> {
        if !self.accepts(operand) {
            return Err(ExpressionError::TypeMismatch {
                kind: self.kind(),
                operands: vec![operand.clone()],
                expected: self.expected().to_string(),
            });
        }

        let result = match self {
            UnaryOperator::Sign => SemanticType::Integer,
            UnaryOperator::Abs | UnaryOperator::Negate => operand.clone(),
            UnaryOperator::Sqrt | UnaryOperator::Avg => SemanticType::Double,
            UnaryOperator::Not | UnaryOperator::IsNull | UnaryOperator::IsNotNull => {
                SemanticType::Boolean
            }
            UnaryOperator::Lower | UnaryOperator::Upper | UnaryOperator::Trim => {
                SemanticType::String
            }
            UnaryOperator::Length => SemanticType::Integer,
            UnaryOperator::Count => SemanticType::BigInt,
            UnaryOperator::Sum => TypeResolver::sum_type(operand)
                .map_err(|err| err.at_node(self.kind(), std::slice::from_ref(operand)))?,
            UnaryOperator::Min | UnaryOperator::Max => operand.clone(),
        };

        Ok(result)
    }

    fn accepts(&self, operand: &SemanticType) -> bool {
        if operand.is_untyped() {
            return true;
        }

        match self {
            UnaryOperator::Sign
            | UnaryOperator::Abs
            | UnaryOperator::Sqrt
            | UnaryOperator::Negate
            | UnaryOperator::Sum
            | UnaryOperator::Avg => operand.is_numeric(),
            UnaryOperator::Not => *operand == SemanticType::Boolean,
            UnaryOperator::Lower
            | UnaryOperator::Upper
            | UnaryOperator::Trim
            | UnaryOperator::Length => operand.is_textual(),
            UnaryOperator::IsNull | UnaryOperator::IsNotNull | UnaryOperator::Count => true,
            UnaryOperator::Min | UnaryOperator::Max => operand.is_supported(),
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            UnaryOperator::Sign
            | UnaryOperator::Abs
            | UnaryOperator::Sqrt
            | UnaryOperator::Negate
            | UnaryOperator::Sum
            | UnaryOperator::Avg => "numeric operand",
            UnaryOperator::Not => "boolean operand",
            UnaryOperator::Lower
            | UnaryOperator::Upper
            | UnaryOperator::Trim
            | UnaryOperator::Length => "string operand",
            UnaryOperator::IsNull | UnaryOperator::IsNotNull | UnaryOperator::Count => {
                "any operand"
            }
            UnaryOperator::Min | UnaryOperator::Max => "comparable operand",
        }
    }
}

/// Binary operators supported in expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Mod,

    // String
    Concat,
    IndexOf,

    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    // Logical
    And,
    Or,

    Like,
}

impl BinaryOperator {
    pub fn kind(&self) -> NodeKind {
        match self {
            BinaryOperator::Add => NodeKind::Add,
            BinaryOperator::Subtract => NodeKind::Subtract,
            BinaryOperator::Multiply => NodeKind::Multiply,
            BinaryOperator::Divide => NodeKind::Divide,
            BinaryOperator::Mod => NodeKind::Mod,
            BinaryOperator::Concat => NodeKind::Concat,
            BinaryOperator::IndexOf => NodeKind::IndexOf,
            BinaryOperator::Eq => NodeKind::Eq,
            BinaryOperator::Ne => NodeKind::Ne,
            BinaryOperator::Lt => NodeKind::Lt,
            BinaryOperator::Le => NodeKind::Le,
            BinaryOperator::Gt => NodeKind::Gt,
            BinaryOperator::Ge => NodeKind::Ge,
            BinaryOperator::And => NodeKind::And,
            BinaryOperator::Or => NodeKind::Or,
            BinaryOperator::Like => NodeKind::Like,
        }
    }

    /// Default SQL keyword, before dialect overrides
    pub fn keyword(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Mod => "MOD",
            BinaryOperator::Concat => "CONCAT",
            BinaryOperator::IndexOf => "POSITION",
            BinaryOperator::Eq => "=",
            BinaryOperator::Ne => "<>",
            BinaryOperator::Lt => "<",
            BinaryOperator::Le => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::Ge => ">=",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
            BinaryOperator::Like => "LIKE",
        }
    }

    pub fn layout(&self) -> BinaryLayout {
        match self {
            BinaryOperator::Add
            | BinaryOperator::Subtract
            | BinaryOperator::Multiply
            | BinaryOperator::Divide
            | BinaryOperator::And
            | BinaryOperator::Or => BinaryLayout::Infix,
            BinaryOperator::Mod | BinaryOperator::Concat => BinaryLayout::Function,
            BinaryOperator::IndexOf => BinaryLayout::Position,
            BinaryOperator::Eq
            | BinaryOperator::Ne
            | BinaryOperator::Lt
            | BinaryOperator::Le
            | BinaryOperator::Gt
            | BinaryOperator::Ge
            | BinaryOperator::Like => BinaryLayout::Comparison,
        }
    }

    /// Fixed hint for both operands; `None` means each operand is hinted with
    /// the other operand's type
    pub fn operand_hint(&self) -> Option<SemanticType> {
        match self {
            BinaryOperator::And | BinaryOperator::Or => Some(SemanticType::Boolean),
            BinaryOperator::Concat | BinaryOperator::IndexOf | BinaryOperator::Like => {
                Some(SemanticType::String)
            }
            _ => None,
        }
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Eq
                | BinaryOperator::Ne
                | BinaryOperator::Lt
                | BinaryOperator::Le
                | BinaryOperator::Gt
                | BinaryOperator::Ge
        )
    }

    /// Get the output type of this operator given the operand types
    pub fn result_type(
        &self,
        left: &SemanticType,
        right: &SemanticType,
    ) -> ExpressionResult<SemanticType> {
        let locate =
            |err: ExpressionError| err.at_node(self.kind(), &[left.clone(), right.clone()]);
        let accepts = |check: fn(&SemanticType) -> bool| {
            (left.is_untyped() || check(left)) && (right.is_untyped() || check(right))
        };

        let result = match self {
            BinaryOperator::Add
            | BinaryOperator::Subtract
            | BinaryOperator::Multiply
            | BinaryOperator::Divide
                if accepts(SemanticType::is_numeric) =>
            {
                Some(TypeResolver::promote(left, right).map_err(locate)?)
            }
            BinaryOperator::Mod if accepts(SemanticType::is_integral) => {
                Some(TypeResolver::promote(left, right).map_err(locate)?)
            }
            BinaryOperator::Concat if accepts(SemanticType::is_textual) => {
                Some(SemanticType::String)
            }
            BinaryOperator::IndexOf if accepts(SemanticType::is_textual) => {
                Some(SemanticType::Integer)
            }
            BinaryOperator::Like if accepts(SemanticType::is_textual) => {
                Some(SemanticType::Boolean)
            }
            BinaryOperator::And | BinaryOperator::Or
                if accepts(|t| *t == SemanticType::Boolean) =>
            {
                Some(SemanticType::Boolean)
            }
            op if op.is_comparison() => {
                if TypeResolver::comparable(left, right).map_err(locate)? {
                    Some(SemanticType::Boolean)
                } else {
                    None
                }
            }
            _ => None,
        };

        result.ok_or_else(|| ExpressionError::TypeMismatch {
            kind: self.kind(),
            operands: vec![left.clone(), right.clone()],
            expected: self.expected().to_string(),
        })
    }

    fn expected(&self) -> &'static str {
        match self {
            BinaryOperator::Add
            | BinaryOperator::Subtract
            | BinaryOperator::Multiply
            | BinaryOperator::Divide => "numeric operands",
            BinaryOperator::Mod => "integral operands",
            BinaryOperator::Concat | BinaryOperator::IndexOf | BinaryOperator::Like => {
                "string operands"
            }
            BinaryOperator::And | BinaryOperator::Or => "boolean operands",
            BinaryOperator::Eq
            | BinaryOperator::Ne
            | BinaryOperator::Lt
            | BinaryOperator::Le
            | BinaryOperator::Gt
            | BinaryOperator::Ge => "comparable operands",
        }
    }
}
