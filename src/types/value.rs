//! Literal values carried by expression trees and bound as parameters.

use crate::types::SemanticType;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal values that can appear in a query and be bound as parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Null,
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    BigInteger(i128),
    Float64(f64),
    Decimal(Decimal),
    Char(char),
    String(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Get the intrinsic semantic type of this value
    pub fn semantic_type(&self) -> Option<SemanticType> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(SemanticType::Boolean),
            Value::Int32(_) => Some(SemanticType::Integer),
            Value::Int64(_) => Some(SemanticType::BigInt),
            Value::BigInteger(_) => Some(SemanticType::BigInteger),
            Value::Float64(_) => Some(SemanticType::Double),
            Value::Decimal(_) => Some(SemanticType::Decimal),
            Value::Char(_) => Some(SemanticType::Char),
            Value::String(_) => Some(SemanticType::String),
            Value::Date(_) => Some(SemanticType::Date),
            Value::Time(_) => Some(SemanticType::Time),
            Value::Timestamp(_) => Some(SemanticType::Timestamp),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Int32(n) => write!(f, "{}", n),
            Value::Int64(n) => write!(f, "{}", n),
            Value::BigInteger(n) => write!(f, "{}", n),
            Value::Float64(n) => write!(f, "{}", n),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::Char(c) => write!(f, "'{}'", c),
            Value::String(s) => write!(f, "'{}'", s),
            Value::Date(d) => write!(f, "DATE '{}'", d),
            Value::Time(t) => write!(f, "TIME '{}'", t),
            Value::Timestamp(ts) => write!(f, "TIMESTAMP '{}'", ts),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float64(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}
