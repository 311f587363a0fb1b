//! Semantic type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The SQL/host type category a node evaluates to.
///
/// Every variant except [`SemanticType::Opaque`] belongs to the set the type
/// resolver knows how to promote. `Object` is the untyped top, used for values
/// whose type cannot be determined from context (a bare `NULL`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    Boolean,
    SmallInt,
    Integer,
    BigInt,
    BigInteger,
    Real,
    Double,
    Decimal,
    Char,
    String,
    Date,
    Time,
    Timestamp,
    Object,

    /// Host type reported by the mapping layer that has no SQL promotion rule
    Opaque(String),
}

impl SemanticType {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SemanticType::SmallInt
                | SemanticType::Integer
                | SemanticType::BigInt
                | SemanticType::BigInteger
                | SemanticType::Real
                | SemanticType::Double
                | SemanticType::Decimal
        )
    }

    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            SemanticType::SmallInt
                | SemanticType::Integer
                | SemanticType::BigInt
                | SemanticType::BigInteger
        )
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, SemanticType::Real | SemanticType::Double)
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, SemanticType::Char | SemanticType::String)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            SemanticType::Date | SemanticType::Time | SemanticType::Timestamp
        )
    }

    /// Whether the type resolver has promotion rules for this type
    pub fn is_supported(&self) -> bool {
        !matches!(self, SemanticType::Opaque(_))
    }

    /// Untyped values are accepted wherever a category is required
    pub fn is_untyped(&self) -> bool {
        matches!(self, SemanticType::Object)
    }

    pub fn as_str(&self) -> &str {
        match self {
            SemanticType::Boolean => "BOOLEAN",
            SemanticType::SmallInt => "SMALLINT",
            SemanticType::Integer => "INTEGER",
            SemanticType::BigInt => "BIGINT",
            SemanticType::BigInteger => "BIGINTEGER",
            SemanticType::Real => "REAL",
            SemanticType::Double => "DOUBLE",
            SemanticType::Decimal => "DECIMAL",
            SemanticType::Char => "CHAR",
            SemanticType::String => "VARCHAR",
            SemanticType::Date => "DATE",
            SemanticType::Time => "TIME",
            SemanticType::Timestamp => "TIMESTAMP",
            SemanticType::Object => "OBJECT",
            SemanticType::Opaque(name) => name,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert!(SemanticType::Decimal.is_numeric());
        assert!(!SemanticType::Decimal.is_integral());
        assert!(SemanticType::BigInteger.is_integral());
        assert!(SemanticType::Real.is_floating());
        assert!(SemanticType::Char.is_textual());
        assert!(SemanticType::Timestamp.is_temporal());
        assert!(!SemanticType::Object.is_numeric());
        assert!(SemanticType::Object.is_untyped());

        assert!(SemanticType::Date.is_supported());
        assert!(!SemanticType::Opaque("BLOB".to_string()).is_supported());
    }

    #[test]
    fn test_display() {
        assert_eq!(SemanticType::String.to_string(), "VARCHAR");
        assert_eq!(SemanticType::Integer.to_string(), "INTEGER");
        assert_eq!(SemanticType::Opaque("BLOB".to_string()).to_string(), "BLOB");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&SemanticType::BigInteger).unwrap();
        assert_eq!(json, "\"big_integer\"");

        let parsed: SemanticType = serde_json::from_str("\"decimal\"").unwrap();
        assert_eq!(parsed, SemanticType::Decimal);

        let parsed: SemanticType = serde_json::from_str(r#"{"opaque":"BLOB"}"#).unwrap();
        assert_eq!(parsed, SemanticType::Opaque("BLOB".to_string()));
    }
}
