//! Serializable expression documents.
//!
//! A [`NodeDocument`] is the wire form of an expression tree. Operands are
//! optional so that incomplete input can be represented and rejected through
//! the checked node constructors instead of failing inside the parser.

use crate::expression::{ExpressionResult, ValueNode};
use crate::expression::{BinaryOperator, UnaryOperator};
use crate::mapping::PathBinder;
use crate::types::Value;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeDocument {
    Literal(Value),
    /// Dotted entity path, bound through the mapping
    Path(String),
    Unary {
        op: UnaryOperator,
        #[serde(default)]
        operand: Option<Box<NodeDocument>>,
    },
    Binary {
        op: BinaryOperator,
        #[serde(default)]
        left: Option<Box<NodeDocument>>,
        #[serde(default)]
        right: Option<Box<NodeDocument>>,
    },
}

impl NodeDocument {
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn unary(op: UnaryOperator, operand: NodeDocument) -> Self {
        NodeDocument::Unary {
            op,
            operand: Some(Box::new(operand)),
        }
    }

    pub fn binary(op: BinaryOperator, left: NodeDocument, right: NodeDocument) -> Self {
        NodeDocument::Binary {
            op,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    /// Build a checked expression tree, binding paths as they are reached
    pub fn bind(self, binder: &mut PathBinder<'_>) -> ExpressionResult<ValueNode> {
        match self {
            NodeDocument::Literal(value) => Ok(ValueNode::literal(value)),
            NodeDocument::Path(path) => binder.bind(&path).map(ValueNode::path),
            NodeDocument::Unary { op, operand } => {
                let operand = bind_operand(operand, binder)?;
                ValueNode::try_unary_op(op, operand)
            }
            NodeDocument::Binary { op, left, right } => {
                let left = bind_operand(left, binder)?;
                let right = bind_operand(right, binder)?;
                ValueNode::try_binary_op(op, left, right)
            }
        }
    }
}

fn bind_operand(
    operand: Option<Box<NodeDocument>>,
    binder: &mut PathBinder<'_>,
) -> ExpressionResult<Option<ValueNode>> {
    operand.map(|doc| doc.bind(binder)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{ExpressionError, NodeKind};
    use crate::mapping::{EntityMapping, SchemaMapping};
    use crate::types::SemanticType;

    fn mapping() -> SchemaMapping {
        SchemaMapping::new("Account")
            .with_entity(
                "Account",
                EntityMapping::new("accounts")
                    .column("balance", "balance", SemanticType::Decimal)
                    .relation("owner", "Customer"),
            )
            .with_entity(
                "Customer",
                EntityMapping::new("customers").column("name", "full_name", SemanticType::String),
            )
    }

    #[test]
    fn test_parse_and_bind() {
        let doc = NodeDocument::from_json_str(
            r#"{ "binary": {
                "op": "gt",
                "left": { "unary": { "op": "sign", "operand": { "path": "balance" } } },
                "right": { "literal": { "int32": 0 } }
            } }"#,
        )
        .unwrap();

        let mapping = mapping();
        let mut binder = PathBinder::new(&mapping);
        let tree = doc.bind(&mut binder).unwrap();

        assert_eq!(tree.dispatch_id(), NodeKind::Gt);
        assert_eq!(tree.parameter_count(), 1);
        assert!(!tree.requires_join());
    }

    #[test]
    fn test_missing_operands() {
        let mapping = mapping();
        let mut binder = PathBinder::new(&mapping);

        let doc = NodeDocument::from_json_str(r#"{ "unary": { "op": "sign" } }"#).unwrap();
        assert_eq!(
            doc.bind(&mut binder).unwrap_err(),
            ExpressionError::InvalidTree {
                kind: NodeKind::Sign,
                reason: "missing operand".to_string(),
            }
        );

        let doc = NodeDocument::Binary {
            op: BinaryOperator::Add,
            left: Some(Box::new(NodeDocument::Path("balance".to_string()))),
            right: None,
        };
        assert!(matches!(
            doc.bind(&mut binder),
            Err(ExpressionError::InvalidTree {
                kind: NodeKind::Add,
                ..
            })
        ));
    }

    #[test]
    fn test_nested_missing_operand_surfaces() {
        let mapping = mapping();
        let mut binder = PathBinder::new(&mapping);

        let doc = NodeDocument::unary(
            UnaryOperator::Abs,
            NodeDocument::Unary {
                op: UnaryOperator::Negate,
                operand: None,
            },
        );
        let err = doc.bind(&mut binder).unwrap_err();
        assert_eq!(err.kind(), Some(NodeKind::Negate));
    }

    #[test]
    fn test_join_paths() {
        let mapping = mapping();
        let mut binder = PathBinder::new(&mapping);

        let doc = NodeDocument::unary(
            UnaryOperator::Upper,
            NodeDocument::Path("owner.name".to_string()),
        );
        let tree = doc.bind(&mut binder).unwrap();
        assert!(tree.requires_join());
        assert_eq!(binder.tables().len(), 2);

        let doc = NodeDocument::Path("owner.age".to_string());
        assert!(matches!(
            doc.bind(&mut binder),
            Err(ExpressionError::UnknownPath { .. })
        ));
    }

    #[test]
    fn test_document_serialization() {
        let doc = NodeDocument::binary(
            BinaryOperator::Eq,
            NodeDocument::Path("balance".to_string()),
            NodeDocument::Literal(Value::Null),
        );
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(NodeDocument::from_json_str(&json).unwrap(), doc);
        assert!(NodeDocument::from_json_str(r#"{ "unary": { "op": "cube" } }"#).is_err());
    }
}
