use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::ParsePrimitiveError;

/// The JSON shapes a leaf descriptor can be built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Primitive {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl Primitive {
    pub const ALL: [Primitive; 7] = [
        Primitive::Null,
        Primitive::Boolean,
        Primitive::Integer,
        Primitive::Number,
        Primitive::String,
        Primitive::Array,
        Primitive::Object,
    ];

    /// Classify a value. Numbers representable as `i64`/`u64` are integers.
    pub fn of(value: &Value) -> Primitive {
        match value {
            Value::Null => Primitive::Null,
            Value::Bool(_) => Primitive::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Primitive::Integer,
            Value::Number(_) => Primitive::Number,
            Value::String(_) => Primitive::String,
            Value::Array(_) => Primitive::Array,
            Value::Object(_) => Primitive::Object,
        }
    }

    /// `number` admits every JSON number; other kinds admit only themselves.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Primitive::Number => value.is_number(),
            other => *other == Primitive::of(value),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::Null => "null",
            Primitive::Boolean => "boolean",
            Primitive::Integer => "integer",
            Primitive::Number => "number",
            Primitive::String => "string",
            Primitive::Array => "array",
            Primitive::Object => "object",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Primitive {
    type Err = ParsePrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Primitive::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .or_else(|| match s {
                // common aliases
                "nil" | "none" => Some(Primitive::Null),
                "bool" => Some(Primitive::Boolean),
                "int" => Some(Primitive::Integer),
                "float" => Some(Primitive::Number),
                "hash" | "map" => Some(Primitive::Object),
                _ => None,
            })
            .ok_or_else(|| ParsePrimitiveError(s.to_string()))
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_integers_apart_from_floats() {
        assert_eq!(Primitive::of(&json!(5)), Primitive::Integer);
        assert_eq!(Primitive::of(&json!(u64::MAX)), Primitive::Integer);
        assert_eq!(Primitive::of(&json!(3.25)), Primitive::Number);
        assert_eq!(Primitive::of(&json!(5.0)), Primitive::Number);
    }

    #[test]
    fn number_matches_integers_but_not_the_reverse() {
        assert!(Primitive::Number.matches(&json!(5)));
        assert!(Primitive::Number.matches(&json!(2.5)));
        assert!(!Primitive::Integer.matches(&json!(2.5)));
        assert!(!Primitive::String.matches(&json!(null)));
    }

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("string".parse::<Primitive>().unwrap(), Primitive::String);
        assert_eq!("int".parse::<Primitive>().unwrap(), Primitive::Integer);
        assert_eq!("NULL".parse::<Primitive>().unwrap(), Primitive::Null);
        assert!("date".parse::<Primitive>().is_err());
    }
}
