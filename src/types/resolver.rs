//! Type promotion rules.
//!
//! Operators whose result type depends on their operands (arithmetic,
//! aggregates, comparisons) ask the resolver to widen operand types. The
//! numeric lattice is: arbitrary-precision decimal dominates floating point,
//! which dominates integers; a big integer mixed with floating point widens
//! to decimal.

use crate::expression::{ExpressionError, ExpressionResult};
use crate::types::SemanticType;

/// Central registry of promotion rules
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeResolver;

impl TypeResolver {
    /// Promote two types to the most general type present among them.
    ///
    /// Total over every supported type; fails only for opaque host types.
    pub fn promote(left: &SemanticType, right: &SemanticType) -> ExpressionResult<SemanticType> {
        Self::ensure_supported(left)?;
        Self::ensure_supported(right)?;

        if left == right {
            return Ok(left.clone());
        }

        let promoted = match (left, right) {
            (SemanticType::Object, _) | (_, SemanticType::Object) => SemanticType::Object,
            (l, r) if l.is_numeric() && r.is_numeric() => Self::promote_numeric(l, r),

            // A number paired with anything else keeps the number
            (l, _) if l.is_numeric() => Self::widen_small(l),
            (_, r) if r.is_numeric() => Self::widen_small(r),

            (SemanticType::Char, SemanticType::String)
            | (SemanticType::String, SemanticType::Char) => SemanticType::String,

            (SemanticType::Date | SemanticType::Time, SemanticType::Timestamp)
            | (SemanticType::Timestamp, SemanticType::Date | SemanticType::Time) => {
                SemanticType::Timestamp
            }

            _ => SemanticType::Object,
        };

        Ok(promoted)
    }

    /// Check whether two types can meet in a comparison
    pub fn comparable(left: &SemanticType, right: &SemanticType) -> ExpressionResult<bool> {
        let promoted = Self::promote(left, right)?;

        if left.is_untyped() || right.is_untyped() || left == right {
            return Ok(true);
        }

        Ok((left.is_numeric() && right.is_numeric())
            || (left.is_textual() && right.is_textual())
            || (left.is_temporal() && right.is_temporal() && !promoted.is_untyped()))
    }

    /// Result type of a SUM over values of the given type
    pub fn sum_type(operand: &SemanticType) -> ExpressionResult<SemanticType> {
        Self::ensure_supported(operand)?;

        Ok(match operand {
            SemanticType::SmallInt | SemanticType::Integer | SemanticType::BigInt => {
                SemanticType::BigInt
            }
            SemanticType::Real | SemanticType::Double => SemanticType::Double,
            other => other.clone(),
        })
    }

    fn promote_numeric(left: &SemanticType, right: &SemanticType) -> SemanticType {
        let either = |ty: SemanticType| *left == ty || *right == ty;

        if either(SemanticType::Decimal) {
            SemanticType::Decimal
        } else if either(SemanticType::BigInteger) {
            if left.is_floating() || right.is_floating() {
                SemanticType::Decimal
            } else {
                SemanticType::BigInteger
            }
        } else if either(SemanticType::Double) {
            SemanticType::Double
        } else if either(SemanticType::Real) {
            SemanticType::Real
        } else if either(SemanticType::BigInt) {
            SemanticType::BigInt
        } else {
            SemanticType::Integer
        }
    }

    fn widen_small(ty: &SemanticType) -> SemanticType {
        match ty {
            SemanticType::SmallInt => SemanticType::Integer,
            other => other.clone(),
        }
    }

    fn ensure_supported(ty: &SemanticType) -> ExpressionResult<()> {
        if ty.is_supported() {
            Ok(())
        } else {
            Err(ExpressionError::UnsupportedType {
                kind: None,
                semantic_type: ty.clone(),
                operands: vec![ty.clone()],
                context: "type promotion".to_string(),
            })
        }
    }
}
