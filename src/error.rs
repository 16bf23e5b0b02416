//! Rejections (expected, carried as values) and type errors (surfaced to callers).
use serde_json::Value;

use crate::logic::Rule;
use crate::types::Primitive;

/// Why a descriptor turned an input down.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("expected {expected}, got {actual}")]
    Primitive { expected: Primitive, actual: Primitive },

    #[error("{input} violates {rule}")]
    Constraint { input: Value, rule: Rule },

    #[error("cannot coerce {input} to {target}")]
    Coercion { input: Value, target: Primitive },

    /// Free-form reason, for leaf types that carry their own vocabulary.
    #[error("{0}")]
    Message(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
    /// `call_unsafe` on an input the descriptor rejects.
    #[error("{input} rejected by {type_name}: {source}")]
    Rejected {
        type_name: String,
        input: Value,
        #[source]
        source: Rejection,
    },

    /// `success` asked for an input the descriptor does not accept.
    /// This is a precondition violation by the caller, never a rejection.
    #[error("Invalid success value '{input}' for {description}")]
    InvalidSuccess { input: Value, description: String },
}

impl TypeError {
    pub fn rejected(type_name: impl Into<String>, input: &Value, source: Rejection) -> Self {
        TypeError::Rejected { type_name: type_name.into(), input: input.clone(), source }
    }

    /// True for errors a union may recover from by trying its next operand.
    pub fn is_rejection(&self) -> bool {
        matches!(self, TypeError::Rejected { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown primitive `{0}` (expected one of null, boolean, integer, number, string, array, object)")]
pub struct ParsePrimitiveError(pub String);
