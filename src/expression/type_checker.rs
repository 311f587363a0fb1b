//! Type checking for expressions.
//!
//! Runs before rendering so a tree either resolves completely or is rejected
//! before any SQL text exists.

use crate::expression::{ExpressionError, ExpressionResult, ValueNode};
use crate::types::{SemanticType, TypeResolver};
use log::debug;

/// Type checker for expression trees
#[derive(Debug, Clone, Default)]
pub struct TypeChecker {
    /// Type expected by the clause the expression is placed in
    hint: Option<SemanticType>,
}

impl TypeChecker {
    pub fn new() -> Self {
        Self { hint: None }
    }

    /// Create a checker for an expression whose context expects `hint`
    pub fn with_hint(hint: SemanticType) -> Self {
        Self { hint: Some(hint) }
    }

    /// Type check an expression and return its output type
    pub fn check(&self, expr: &ValueNode) -> ExpressionResult<SemanticType> {
        let result = expr.resolve_type(self.hint.as_ref());
        match &result {
            Ok(ty) => debug!("Resolved {} to {}", expr.dispatch_id(), ty),
            Err(err) => debug!("Type resolution failed: {}", err),
        }
        result
    }

    /// Check if an expression is valid for use as a filter predicate
    pub fn check_filter_predicate(&self, expr: &ValueNode) -> ExpressionResult<SemanticType> {
        let output_type = self.check(expr)?;

        match output_type {
            SemanticType::Boolean | SemanticType::Object => Ok(output_type),
            other => Err(ExpressionError::TypeMismatch {
                kind: expr.dispatch_id(),
                operands: vec![other],
                expected: "boolean predicate".to_string(),
            }),
        }
    }

    /// Check if an expression is valid for use in a projection
    pub fn check_projection(&self, expr: &ValueNode) -> ExpressionResult<SemanticType> {
        // Any expression type is valid in a projection
        self.check(expr)
    }

    /// Check if two expressions have comparable types
    pub fn check_compatible(&self, expr1: &ValueNode, expr2: &ValueNode) -> ExpressionResult<()> {
        let type1 = self.check(expr1)?;
        let type2 = expr2.resolve_type(Some(&type1))?;

        if TypeResolver::comparable(&type1, &type2)? {
            Ok(())
        } else {
            Err(ExpressionError::TypeMismatch {
                kind: expr2.dispatch_id(),
                operands: vec![type1, type2],
                expected: "comparable operands".to_string(),
            })
        }
    }
}

/// Helper function to type check an expression
pub fn type_check_expression(expr: &ValueNode) -> ExpressionResult<SemanticType> {
    TypeChecker::new().check(expr)
}

/// Helper function to validate a filter predicate
pub fn validate_filter_predicate(expr: &ValueNode) -> ExpressionResult<()> {
    TypeChecker::new().check_filter_predicate(expr).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{NodeKind, PathRef};

    fn column(name: &str, ty: SemanticType) -> ValueNode {
        ValueNode::path(PathRef::new(0, name, ty))
    }

    #[test]
    fn test_filter_predicate_checking() {
        let checker = TypeChecker::new();

        let expr = ValueNode::gt(
            column("balance", SemanticType::Decimal),
            ValueNode::literal(5),
        );
        assert!(checker.check_filter_predicate(&expr).is_ok());

        // Direct boolean column
        let expr = column("active", SemanticType::Boolean);
        assert!(checker.check_filter_predicate(&expr).is_ok());

        // NULL is allowed in filters
        assert!(checker.check_filter_predicate(&ValueNode::null()).is_ok());

        // Non-boolean expression
        let expr = ValueNode::sign(column("balance", SemanticType::Decimal));
        assert!(matches!(
            checker.check_filter_predicate(&expr),
            Err(ExpressionError::TypeMismatch {
                kind: NodeKind::Sign,
                ..
            })
        ));
        assert!(validate_filter_predicate(&expr).is_err());
    }

    #[test]
    fn test_context_hint() {
        let checker = TypeChecker::with_hint(SemanticType::Timestamp);
        assert_eq!(
            checker.check(&ValueNode::null()).unwrap(),
            SemanticType::Timestamp
        );
        assert_eq!(
            type_check_expression(&ValueNode::null()).unwrap(),
            SemanticType::Object
        );
    }

    #[test]
    fn test_nested_failure_surfaces() {
        // (balance + name) > 0 fails on the inner addition
        let expr = ValueNode::gt(
            ValueNode::add_expr(
                column("balance", SemanticType::Decimal),
                column("name", SemanticType::String),
            ),
            ValueNode::literal(0),
        );
        let err = TypeChecker::new().check(&expr).unwrap_err();
        assert_eq!(err.kind(), Some(NodeKind::Add));
    }

    #[test]
    fn test_unsupported_type_surfaces() {
        let expr = ValueNode::eq(
            column("photo", SemanticType::Opaque("BLOB".to_string())),
            ValueNode::literal("x"),
        );
        assert!(matches!(
            type_check_expression(&expr),
            Err(ExpressionError::UnsupportedType { .. })
        ));

        // Null tests never promote, so opaque columns are fine there
        let expr = ValueNode::is_null(column("photo", SemanticType::Opaque("BLOB".to_string())));
        assert_eq!(
            type_check_expression(&expr).unwrap(),
            SemanticType::Boolean
        );
    }

    #[test]
    fn test_null_equality_on_unsupported_type() {
        let photo = || column("photo", SemanticType::Opaque("BLOB".to_string()));

        for expr in [
            ValueNode::eq(photo(), ValueNode::null()),
            ValueNode::ne(ValueNode::null(), photo()),
            ValueNode::is_null(photo()),
        ] {
            assert_eq!(
                type_check_expression(&expr).unwrap(),
                SemanticType::Boolean
            );
        }

        // Comparing against a value still needs promotion
        let err = type_check_expression(&ValueNode::eq(photo(), ValueNode::literal("x")))
            .unwrap_err();
        assert_eq!(err.kind(), Some(NodeKind::Eq));
        assert!(matches!(
            err,
            ExpressionError::UnsupportedType { ref operands, .. }
                if operands == &vec![
                    SemanticType::Opaque("BLOB".to_string()),
                    SemanticType::String,
                ]
        ));
    }

    #[test]
    fn test_type_compatibility() {
        let checker = TypeChecker::new();

        let expr1 = column("balance", SemanticType::Decimal);
        assert!(checker
            .check_compatible(&expr1, &ValueNode::literal(42))
            .is_ok());
        assert!(checker
            .check_compatible(&expr1, &column("name", SemanticType::String))
            .is_err());
        assert!(checker.check_compatible(&expr1, &ValueNode::null()).is_ok());
    }

    #[test]
    fn test_projection_accepts_any_type() {
        let expr = ValueNode::upper(column("name", SemanticType::String));
        assert_eq!(
            TypeChecker::new().check_projection(&expr).unwrap(),
            SemanticType::String
        );
    }
}
