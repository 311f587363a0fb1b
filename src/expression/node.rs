//! Expression tree nodes.
//!
//! A [`ValueNode`] is one computable value in a query: a literal, a bound
//! entity path, or an operator over owned operands. Nodes are immutable once
//! built. Each one can
//! - resolve the semantic type it evaluates to,
//! - render itself as an SQL fragment,
//! - report its catalog identity for dispatch.

use crate::expression::operator::{BinaryLayout, UnaryLayout};
use crate::expression::{
    BinaryOperator, ExpressionError, ExpressionResult, NodeKind, UnaryOperator,
};
use crate::render::{RenderContext, SqlFragment};
use crate::types::{SemanticType, TypeResolver, Value};
use serde::{Deserialize, Serialize};

/// Literal value in an expression
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: Value,
}

impl Literal {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn null() -> Self {
        Self { value: Value::Null }
    }

    /// Resolve the literal's type, letting the context disambiguate
    /// untyped `NULL`, integer widths and date strings
    pub fn resolve_type(&self, hint: Option<&SemanticType>) -> ExpressionResult<SemanticType> {
        let own = match self.value.semantic_type() {
            Some(ty) => ty,
            None => return Ok(hint.cloned().unwrap_or(SemanticType::Object)),
        };

        match (hint, &self.value) {
            (Some(hint), Value::Int32(_) | Value::Int64(_)) if hint.is_numeric() => {
                TypeResolver::promote(&own, hint)
            }
            (Some(hint), Value::String(_)) if hint.is_temporal() => Ok(hint.clone()),
            (Some(SemanticType::Char), Value::String(s)) if s.chars().count() == 1 => {
                Ok(SemanticType::Char)
            }
            _ => Ok(own),
        }
    }

    fn render(&self) -> SqlFragment {
        match self.value {
            Value::Null => SqlFragment::text("NULL"),
            _ => SqlFragment::param(self.value.clone()),
        }
    }
}

/// Entity path bound by the mapping layer to a column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathRef {
    /// Dotted path as written in the object query
    pub path: String,
    /// Table alias index
    pub table: u32,
    pub column: String,
    pub semantic_type: SemanticType,
    /// Whether reaching this column needs an extra table join
    pub join_required: bool,
}

impl PathRef {
    pub fn new(table: u32, column: impl Into<String>, semantic_type: SemanticType) -> Self {
        let column = column.into();
        Self {
            path: column.clone(),
            table,
            column,
            semantic_type,
            join_required: false,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn via_join(mut self) -> Self {
        self.join_required = true;
        self
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> SqlFragment {
        if self.join_required {
            ctx.note_join();
        }
        SqlFragment::text(format!(
            "{}{}.{}",
            ctx.config().alias_prefix,
            self.table,
            self.column
        ))
    }
}

/// Operator node owning exactly one operand
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryNode {
    op: UnaryOperator,
    operand: Box<ValueNode>,
}

impl UnaryNode {
    /// Build a unary node, rejecting an absent operand
    pub fn new(op: UnaryOperator, operand: Option<ValueNode>) -> ExpressionResult<Self> {
        match operand {
            Some(operand) => Ok(Self {
                op,
                operand: Box::new(operand),
            }),
            None => Err(ExpressionError::InvalidTree {
                kind: op.kind(),
                reason: "missing operand".to_string(),
            }),
        }
    }

    pub fn op(&self) -> UnaryOperator {
        self.op
    }

    pub fn operand(&self) -> &ValueNode {
        &self.operand
    }

    fn resolve_type(&self, hint: Option<&SemanticType>) -> ExpressionResult<SemanticType> {
        let operand_hint = self.op.operand_hint(hint);
        let operand_type = self.operand.resolve_type(operand_hint.as_ref())?;
        self.op.result_type(&operand_type)
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> SqlFragment {
        let operand = self.operand.render(ctx);
        let keyword = ctx.keyword(self.op.kind(), self.op.keyword());

        let mut out = SqlFragment::new();
        match self.op.layout() {
            UnaryLayout::Function => {
                out.push_str(keyword);
                out.push_str("(");
                out.append(operand);
                out.push_str(")");
            }
            UnaryLayout::Prefix => {
                out.push_str(keyword);
                out.push_str(" (");
                out.append(operand);
                out.push_str(")");
            }
            UnaryLayout::Postfix => {
                out.append(operand);
                out.push_str(" ");
                out.push_str(keyword);
            }
        }
        out
    }
}

/// Operator node owning exactly two operands
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryNode {
    op: BinaryOperator,
    left: Box<ValueNode>,
    right: Box<ValueNode>,
}

impl BinaryNode {
    /// Build a binary node, rejecting absent operands
    pub fn new(
        op: BinaryOperator,
        left: Option<ValueNode>,
        right: Option<ValueNode>,
    ) -> ExpressionResult<Self> {
        match (left, right) {
            (Some(left), Some(right)) => Ok(Self {
                op,
                left: Box::new(left),
                right: Box::new(right),
            }),
            (None, _) => Err(ExpressionError::InvalidTree {
                kind: op.kind(),
                reason: "missing left operand".to_string(),
            }),
            (_, None) => Err(ExpressionError::InvalidTree {
                kind: op.kind(),
                reason: "missing right operand".to_string(),
            }),
        }
    }

    pub fn op(&self) -> BinaryOperator {
        self.op
    }

    pub fn left(&self) -> &ValueNode {
        &self.left
    }

    pub fn right(&self) -> &ValueNode {
        &self.right
    }

    fn resolve_type(&self, hint: Option<&SemanticType>) -> ExpressionResult<SemanticType> {
        // Typed like the null test it renders as; nothing is promoted
        if let Some((operand, test)) = self.null_test() {
            let operand_type = operand.resolve_type(None)?;
            return test.result_type(&operand_type);
        }

        let (left_type, right_type) = match self.op.operand_hint() {
            Some(fixed) => (
                self.left.resolve_type(Some(&fixed))?,
                self.right.resolve_type(Some(&fixed))?,
            ),
            None => {
                // Comparisons define their own context; arithmetic inherits it
                let context = if self.op.is_comparison() { None } else { hint };
                let left_alone = self.left.resolve_type(context)?;
                let right_alone = self.right.resolve_type(context)?;

                let left_type = if self.left.accepts_hint() {
                    self.left.resolve_type(Some(&right_alone))?
                } else {
                    left_alone.clone()
                };
                let right_type = if self.right.accepts_hint() {
                    self.right.resolve_type(Some(&left_alone))?
                } else {
                    right_alone
                };
                (left_type, right_type)
            }
        };

        self.op.result_type(&left_type, &right_type)
    }

    /// `x = NULL` and `x <> NULL` become null tests
    fn null_test(&self) -> Option<(&ValueNode, UnaryOperator)> {
        let other = if self.right.is_null_literal() {
            &self.left
        } else if self.left.is_null_literal() {
            &self.right
        } else {
            return None;
        };

        match self.op {
            BinaryOperator::Eq => Some((other, UnaryOperator::IsNull)),
            BinaryOperator::Ne => Some((other, UnaryOperator::IsNotNull)),
            _ => None,
        }
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> SqlFragment {
        if let Some((operand, test)) = self.null_test() {
            let mut out = operand.render(ctx);
            out.push_str(" ");
            out.push_str(ctx.keyword(test.kind(), test.keyword()));
            return out;
        }

        let left = self.left.render(ctx);
        let right = self.right.render(ctx);
        let keyword = ctx.keyword(self.op.kind(), self.op.keyword());

        let mut out = SqlFragment::new();
        match self.op.layout() {
            BinaryLayout::Infix => {
                out.push_str("(");
                out.append(left);
                out.push_str(" ");
                out.push_str(keyword);
                out.push_str(" ");
                out.append(right);
                out.push_str(")");
            }
            BinaryLayout::Comparison => {
                out.append(left);
                out.push_str(" ");
                out.push_str(keyword);
                out.push_str(" ");
                out.append(right);
            }
            BinaryLayout::Function => {
                out.push_str(keyword);
                out.push_str("(");
                out.append(left);
                out.push_str(", ");
                out.append(right);
                out.push_str(")");
            }
            BinaryLayout::Position => {
                out.push_str(keyword);
                out.push_str("(");
                out.append(right);
                out.push_str(" IN ");
                out.append(left);
                out.push_str(")");
            }
        }
        out
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq)]
pub enum ValueNode {
    /// Literal constant value
    Literal(Literal),

    /// Bound entity path
    Path(PathRef),

    /// Unary operation
    Unary(UnaryNode),

    /// Binary operation
    Binary(BinaryNode),
}

impl ValueNode {
    /// Get the semantic type this node evaluates to.
    ///
    /// The hint describes what the surrounding expression expects; nodes whose
    /// type never depends on context ignore it.
    pub fn resolve_type(&self, hint: Option<&SemanticType>) -> ExpressionResult<SemanticType> {
        match self {
            ValueNode::Literal(lit) => lit.resolve_type(hint),
            ValueNode::Path(path) => Ok(path.semantic_type.clone()),
            ValueNode::Unary(node) => node.resolve_type(hint),
            ValueNode::Binary(node) => node.resolve_type(hint),
        }
    }

    /// Render this node, and its operands, as an SQL fragment
    pub fn render(&self, ctx: &mut RenderContext<'_>) -> SqlFragment {
        match self {
            ValueNode::Literal(lit) => lit.render(),
            ValueNode::Path(path) => path.render(ctx),
            ValueNode::Unary(node) => node.render(ctx),
            ValueNode::Binary(node) => node.render(ctx),
        }
    }

    /// Catalog identity of this node
    pub fn dispatch_id(&self) -> NodeKind {
        match self {
            ValueNode::Literal(_) => NodeKind::Literal,
            ValueNode::Path(_) => NodeKind::Path,
            ValueNode::Unary(node) => node.op.kind(),
            ValueNode::Binary(node) => node.op.kind(),
        }
    }

    /// Direct operands, in tree order
    pub fn children(&self) -> Vec<&ValueNode> {
        match self {
            ValueNode::Literal(_) | ValueNode::Path(_) => vec![],
            ValueNode::Unary(node) => vec![node.operand()],
            ValueNode::Binary(node) => vec![node.left(), node.right()],
        }
    }

    /// Visit every node, parents before children
    pub fn walk<F>(&self, visit: &mut F)
    where
        F: FnMut(&ValueNode),
    {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Check whether any node in the tree satisfies the predicate
    pub fn any<F>(&self, predicate: &F) -> bool
    where
        F: Fn(&ValueNode) -> bool,
    {
        predicate(self) || self.children().into_iter().any(|child| child.any(predicate))
    }

    /// Check if this expression is a constant (contains no paths)
    pub fn is_constant(&self) -> bool {
        !self.any(&|node| node.dispatch_id() == NodeKind::Path)
    }

    pub fn has_aggregate(&self) -> bool {
        self.any(&|node| node.dispatch_id().is_aggregate())
    }

    /// Whether rendering this tree references a column behind a join
    pub fn requires_join(&self) -> bool {
        self.any(&|node| match node {
            ValueNode::Path(path) => path.join_required,
            ValueNode::Literal(_) | ValueNode::Unary(_) | ValueNode::Binary(_) => false,
        })
    }

    /// Number of bound parameters rendering will produce
    pub fn parameter_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |node| {
            if let ValueNode::Literal(lit) = node {
                if !lit.value.is_null() {
                    count += 1;
                }
            }
        });
        count
    }

    fn is_null_literal(&self) -> bool {
        matches!(self, ValueNode::Literal(lit) if lit.value.is_null())
    }

    /// Whether the node's type can be refined by a context hint
    fn accepts_hint(&self) -> bool {
        match self {
            ValueNode::Literal(_) => true,
            ValueNode::Unary(node) => {
                matches!(
                    node.op,
                    UnaryOperator::Abs
                        | UnaryOperator::Negate
                        | UnaryOperator::Min
                        | UnaryOperator::Max
                ) && node.operand.accepts_hint()
            }
            ValueNode::Path(_) | ValueNode::Binary(_) => false,
        }
    }
}

// Builders
impl ValueNode {
    /// Create a literal expression
    pub fn literal(value: impl Into<Value>) -> Self {
        ValueNode::Literal(Literal::new(value.into()))
    }

    pub fn null() -> Self {
        ValueNode::Literal(Literal::null())
    }

    /// Create a path expression
    pub fn path(path: PathRef) -> Self {
        ValueNode::Path(path)
    }

    /// Create a unary operation expression
    pub fn unary_op(op: UnaryOperator, operand: ValueNode) -> Self {
        ValueNode::Unary(UnaryNode {
            op,
            operand: Box::new(operand),
        })
    }

    /// Create a unary operation from a possibly absent operand
    pub fn try_unary_op(op: UnaryOperator, operand: Option<ValueNode>) -> ExpressionResult<Self> {
        UnaryNode::new(op, operand).map(ValueNode::Unary)
    }

    /// Create a binary operation expression
    pub fn binary_op(op: BinaryOperator, left: ValueNode, right: ValueNode) -> Self {
        ValueNode::Binary(BinaryNode {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Create a binary operation from possibly absent operands
    pub fn try_binary_op(
        op: BinaryOperator,
        left: Option<ValueNode>,
        right: Option<ValueNode>,
    ) -> ExpressionResult<Self> {
        BinaryNode::new(op, left, right).map(ValueNode::Binary)
    }

    pub fn sign(operand: ValueNode) -> Self {
        Self::unary_op(UnaryOperator::Sign, operand)
    }

    pub fn abs(operand: ValueNode) -> Self {
        Self::unary_op(UnaryOperator::Abs, operand)
    }

    pub fn sqrt(operand: ValueNode) -> Self {
        Self::unary_op(UnaryOperator::Sqrt, operand)
    }

    pub fn neg_expr(operand: ValueNode) -> Self {
        Self::unary_op(UnaryOperator::Negate, operand)
    }

    pub fn not_expr(operand: ValueNode) -> Self {
        Self::unary_op(UnaryOperator::Not, operand)
    }

    pub fn lower(operand: ValueNode) -> Self {
        Self::unary_op(UnaryOperator::Lower, operand)
    }

    pub fn upper(operand: ValueNode) -> Self {
        Self::unary_op(UnaryOperator::Upper, operand)
    }

    pub fn trim(operand: ValueNode) -> Self {
        Self::unary_op(UnaryOperator::Trim, operand)
    }

    pub fn length(operand: ValueNode) -> Self {
        Self::unary_op(UnaryOperator::Length, operand)
    }

    pub fn is_null(operand: ValueNode) -> Self {
        Self::unary_op(UnaryOperator::IsNull, operand)
    }

    pub fn is_not_null(operand: ValueNode) -> Self {
        Self::unary_op(UnaryOperator::IsNotNull, operand)
    }

    pub fn count(operand: ValueNode) -> Self {
        Self::unary_op(UnaryOperator::Count, operand)
    }

    pub fn sum(operand: ValueNode) -> Self {
        Self::unary_op(UnaryOperator::Sum, operand)
    }

    pub fn avg(operand: ValueNode) -> Self {
        Self::unary_op(UnaryOperator::Avg, operand)
    }

    pub fn min(operand: ValueNode) -> Self {
        Self::unary_op(UnaryOperator::Min, operand)
    }

    pub fn max(operand: ValueNode) -> Self {
        Self::unary_op(UnaryOperator::Max, operand)
    }

    pub fn add_expr(left: ValueNode, right: ValueNode) -> Self {
        Self::binary_op(BinaryOperator::Add, left, right)
    }

    pub fn sub_expr(left: ValueNode, right: ValueNode) -> Self {
        Self::binary_op(BinaryOperator::Subtract, left, right)
    }

    pub fn mul_expr(left: ValueNode, right: ValueNode) -> Self {
        Self::binary_op(BinaryOperator::Multiply, left, right)
    }

    pub fn div_expr(left: ValueNode, right: ValueNode) -> Self {
        Self::binary_op(BinaryOperator::Divide, left, right)
    }

    pub fn mod_expr(left: ValueNode, right: ValueNode) -> Self {
        Self::binary_op(BinaryOperator::Mod, left, right)
    }

    pub fn concat(left: ValueNode, right: ValueNode) -> Self {
        Self::binary_op(BinaryOperator::Concat, left, right)
    }

    /// Position of `needle` within `haystack`
    pub fn index_of(haystack: ValueNode, needle: ValueNode) -> Self {
        Self::binary_op(BinaryOperator::IndexOf, haystack, needle)
    }

    pub fn eq(left: ValueNode, right: ValueNode) -> Self {
        Self::binary_op(BinaryOperator::Eq, left, right)
    }

    pub fn ne(left: ValueNode, right: ValueNode) -> Self {
        Self::binary_op(BinaryOperator::Ne, left, right)
    }

    pub fn lt(left: ValueNode, right: ValueNode) -> Self {
        Self::binary_op(BinaryOperator::Lt, left, right)
    }

    pub fn le(left: ValueNode, right: ValueNode) -> Self {
        Self::binary_op(BinaryOperator::Le, left, right)
    }

    pub fn gt(left: ValueNode, right: ValueNode) -> Self {
        Self::binary_op(BinaryOperator::Gt, left, right)
    }

    pub fn ge(left: ValueNode, right: ValueNode) -> Self {
        Self::binary_op(BinaryOperator::Ge, left, right)
    }

    pub fn and(left: ValueNode, right: ValueNode) -> Self {
        Self::binary_op(BinaryOperator::And, left, right)
    }

    pub fn or(left: ValueNode, right: ValueNode) -> Self {
        Self::binary_op(BinaryOperator::Or, left, right)
    }

    pub fn like(left: ValueNode, right: ValueNode) -> Self {
        Self::binary_op(BinaryOperator::Like, left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompilerConfig;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn balance() -> ValueNode {
        ValueNode::path(PathRef::new(0, "balance", SemanticType::Decimal))
    }

    fn render(node: &ValueNode) -> (String, Vec<Value>) {
        let config = CompilerConfig::default();
        let mut ctx = RenderContext::new(&config);
        let fragment = node.render(&mut ctx);
        let rendered = ctx.finish(fragment);
        (rendered.sql, rendered.params)
    }

    #[test]
    fn test_literal_types() {
        let int = Literal::new(Value::Int32(42));
        assert_eq!(int.resolve_type(None).unwrap(), SemanticType::Integer);
        assert_eq!(
            int.resolve_type(Some(&SemanticType::Decimal)).unwrap(),
            SemanticType::Decimal
        );
        assert_eq!(
            int.resolve_type(Some(&SemanticType::String)).unwrap(),
            SemanticType::Integer
        );

        let null = Literal::null();
        assert_eq!(null.resolve_type(None).unwrap(), SemanticType::Object);
        assert_eq!(
            null.resolve_type(Some(&SemanticType::Date)).unwrap(),
            SemanticType::Date
        );

        let date_text = Literal::new(Value::from("2024-01-31"));
        assert_eq!(date_text.resolve_type(None).unwrap(), SemanticType::String);
        assert_eq!(
            date_text.resolve_type(Some(&SemanticType::Date)).unwrap(),
            SemanticType::Date
        );

        let letter = Literal::new(Value::from("x"));
        assert_eq!(
            letter.resolve_type(Some(&SemanticType::Char)).unwrap(),
            SemanticType::Char
        );

        let flag = Literal::new(Value::Boolean(true));
        assert_eq!(
            flag.resolve_type(Some(&SemanticType::Integer)).unwrap(),
            SemanticType::Boolean
        );
    }

    #[test]
    fn test_sign_over_literal() {
        let node = ValueNode::sign(ValueNode::literal(-5));

        assert_eq!(node.resolve_type(None).unwrap(), SemanticType::Integer);
        let (sql, params) = render(&node);
        assert_eq!(sql, "SIGN(?)");
        assert_eq!(params, vec![Value::Int32(-5)]);
    }

    #[test]
    fn test_sign_over_decimal_path() {
        let node = ValueNode::sign(balance());

        assert_eq!(node.resolve_type(None).unwrap(), SemanticType::Integer);
        assert_eq!(
            node.resolve_type(Some(&SemanticType::Decimal)).unwrap(),
            SemanticType::Integer
        );
        let (sql, params) = render(&node);
        assert_eq!(sql, "SIGN(t0.balance)");
        assert!(params.is_empty());
    }

    #[test]
    fn test_sign_rejects_string_operand() {
        let node = ValueNode::sign(ValueNode::literal("abc"));
        assert!(matches!(
            node.resolve_type(None),
            Err(ExpressionError::TypeMismatch {
                kind: NodeKind::Sign,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_operand() {
        let err = UnaryNode::new(UnaryOperator::Sign, None).unwrap_err();
        assert_eq!(
            err,
            ExpressionError::InvalidTree {
                kind: NodeKind::Sign,
                reason: "missing operand".to_string(),
            }
        );

        let err = ValueNode::try_binary_op(BinaryOperator::Add, Some(balance()), None).unwrap_err();
        assert!(matches!(
            err,
            ExpressionError::InvalidTree {
                kind: NodeKind::Add,
                ..
            }
        ));

        let node = ValueNode::try_unary_op(UnaryOperator::Abs, Some(balance())).unwrap();
        assert_eq!(node.dispatch_id(), NodeKind::Abs);
    }

    #[test]
    fn test_dispatch_id_is_stable() {
        let node = ValueNode::sign(balance());
        assert_eq!(node.dispatch_id(), node.dispatch_id());
        assert_eq!(node.dispatch_id(), NodeKind::Sign);
        assert_eq!(balance().dispatch_id(), NodeKind::Path);
        assert_eq!(ValueNode::null().dispatch_id(), NodeKind::Literal);
    }

    #[test]
    fn test_render_layouts() {
        let (sql, _) = render(&ValueNode::not_expr(ValueNode::gt(
            balance(),
            ValueNode::literal(0),
        )));
        assert_eq!(sql, "NOT (t0.balance > ?)");

        let (sql, _) = render(&ValueNode::is_null(balance()));
        assert_eq!(sql, "t0.balance IS NULL");

        let (sql, _) = render(&ValueNode::neg_expr(balance()));
        assert_eq!(sql, "-(t0.balance)");

        let (sql, _) = render(&ValueNode::mod_expr(ValueNode::literal(7), ValueNode::literal(2)));
        assert_eq!(sql, "MOD(?, ?)");

        let (sql, params) = render(&ValueNode::eq(balance(), ValueNode::null()));
        assert_eq!(sql, "t0.balance IS NULL");
        assert!(params.is_empty());

        let (sql, _) = render(&ValueNode::ne(ValueNode::null(), balance()));
        assert_eq!(sql, "t0.balance IS NOT NULL");

        let (sql, _) = render(&ValueNode::add_expr(balance(), ValueNode::null()));
        assert_eq!(sql, "(t0.balance + NULL)");
    }

    #[test]
    fn test_position_renders_needle_first() {
        let node = ValueNode::index_of(ValueNode::literal("haystack"), ValueNode::literal("st"));
        let (sql, params) = render(&node);

        assert_eq!(sql, "POSITION(? IN ?)");
        assert_eq!(params, vec![Value::from("st"), Value::from("haystack")]);
        assert_eq!(node.resolve_type(None).unwrap(), SemanticType::Integer);
    }

    #[test]
    fn test_binary_hints() {
        // NULL takes the other side's type
        let node = ValueNode::add_expr(ValueNode::null(), balance());
        assert_eq!(node.resolve_type(None).unwrap(), SemanticType::Decimal);

        // An integer literal widens to the column's type
        let node = ValueNode::add_expr(
            ValueNode::literal(1),
            ValueNode::path(PathRef::new(0, "count", SemanticType::BigInt)),
        );
        assert_eq!(node.resolve_type(None).unwrap(), SemanticType::BigInt);

        // A string compared to a date column is a date
        let node = ValueNode::lt(
            ValueNode::path(PathRef::new(0, "opened", SemanticType::Date)),
            ValueNode::literal("2024-01-01"),
        );
        assert_eq!(node.resolve_type(None).unwrap(), SemanticType::Boolean);

        let amount = Value::Decimal(Decimal::from_str("10.50").unwrap());
        let node = ValueNode::mul_expr(ValueNode::literal(amount), ValueNode::literal(2.0));
        assert_eq!(node.resolve_type(None).unwrap(), SemanticType::Decimal);
    }

    #[test]
    fn test_tree_queries() {
        let joined = ValueNode::path(
            PathRef::new(1, "name", SemanticType::String)
                .with_path("owner.name")
                .via_join(),
        );
        let tree = ValueNode::and(
            ValueNode::gt(ValueNode::sum(balance()), ValueNode::literal(100)),
            ValueNode::like(joined, ValueNode::literal("A%")),
        );

        assert!(tree.requires_join());
        assert!(tree.has_aggregate());
        assert!(!tree.is_constant());
        assert_eq!(tree.parameter_count(), 2);

        let mut kinds = Vec::new();
        tree.walk(&mut |node| kinds.push(node.dispatch_id()));
        assert_eq!(
            kinds,
            vec![
                NodeKind::And,
                NodeKind::Gt,
                NodeKind::Sum,
                NodeKind::Path,
                NodeKind::Literal,
                NodeKind::Like,
                NodeKind::Path,
                NodeKind::Literal,
            ]
        );

        let constant = ValueNode::add_expr(ValueNode::literal(1), ValueNode::null());
        assert!(constant.is_constant());
        assert!(!constant.requires_join());
        assert!(!constant.has_aggregate());
        assert_eq!(constant.parameter_count(), 1);
    }
}
