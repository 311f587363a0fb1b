//! SQL fragments with bound parameters.

use crate::types::Value;

/// One piece of rendered SQL
#[derive(Debug, Clone, PartialEq)]
pub enum Piece {
    Text(String),
    /// A positional placeholder and the value bound to it
    Param(Value),
}

/// Rendered SQL text whose parameters sit where their placeholders appear.
///
/// Fragments are only ever concatenated, so the order of parameters always
/// follows the order of placeholders in the text, whatever order the
/// operands were rendered in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SqlFragment {
    pieces: Vec<Piece>,
}

impl SqlFragment {
    pub fn new() -> Self {
        Self { pieces: Vec::new() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        let mut fragment = Self::new();
        fragment.push_str(&text.into());
        fragment
    }

    pub fn param(value: Value) -> Self {
        Self {
            pieces: vec![Piece::Param(value)],
        }
    }

    pub fn push_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.pieces.last_mut() {
            Some(Piece::Text(last)) => last.push_str(text),
            _ => self.pieces.push(Piece::Text(text.to_string())),
        }
    }

    pub fn push_param(&mut self, value: Value) {
        self.pieces.push(Piece::Param(value));
    }

    /// Append another fragment after this one
    pub fn append(&mut self, other: SqlFragment) {
        for piece in other.pieces {
            match piece {
                Piece::Text(text) => self.push_str(&text),
                Piece::Param(value) => self.push_param(value),
            }
        }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Bound values, left to right
    pub fn params(&self) -> impl Iterator<Item = &Value> {
        self.pieces.iter().filter_map(|piece| match piece {
            Piece::Param(value) => Some(value),
            Piece::Text(_) => None,
        })
    }

    pub fn param_count(&self) -> usize {
        self.params().count()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_pieces_merge() {
        let mut fragment = SqlFragment::text("SIGN");
        fragment.push_str("(");
        fragment.push_str("");
        assert_eq!(fragment.pieces(), &[Piece::Text("SIGN(".to_string())]);
        assert_eq!(fragment.param_count(), 0);
    }

    #[test]
    fn test_append_keeps_text_order() {
        let mut right = SqlFragment::param(Value::Int32(2));
        right.push_str(" IN ");
        right.append(SqlFragment::param(Value::Int32(1)));

        let mut out = SqlFragment::text("POSITION(");
        out.append(right);
        out.push_str(")");

        let params: Vec<&Value> = out.params().collect();
        assert_eq!(params, vec![&Value::Int32(2), &Value::Int32(1)]);
        assert_eq!(out.pieces().len(), 5);
        assert!(!out.is_empty());
        assert!(SqlFragment::new().is_empty());
    }
}
