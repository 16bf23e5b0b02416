//! Introspectable tree emitted by `Type::to_ast`.
//!
//! Wire form is JSON: a node is `[tag, [payload...]]`, plain data is the
//! JSON value itself, metadata is an object. Payloads only ever grow at the
//! end, so consumers may index positionally.
use std::fmt;

use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::Value;

use crate::types::Meta;

#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    Node(&'static str, Vec<Ast>),
    Value(Value),
    Meta(Meta),
}

impl Ast {
    pub fn node(tag: &'static str, payload: Vec<Ast>) -> Self {
        Ast::Node(tag, payload)
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Ast::Value(value.into())
    }

    /// The descriptor's meta, or an empty map when meta was not requested.
    pub fn meta_if(include_meta: bool, meta: &Meta) -> Self {
        if include_meta { Ast::Meta(meta.clone()) } else { Ast::Meta(Meta::new()) }
    }

    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Ast::Node(tag, _) => Some(*tag),
            _ => None,
        }
    }

    pub fn payload(&self) -> &[Ast] {
        match self {
            Ast::Node(_, payload) => payload,
            _ => &[],
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Ast::Node(tag, payload) => Value::Array(vec![
                Value::from(*tag),
                Value::Array(payload.iter().map(Ast::to_json).collect()),
            ]),
            Ast::Value(v) => v.clone(),
            Ast::Meta(m) => Value::Object(m.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
        }
    }
}

impl Serialize for Ast {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Ast::Node(tag, payload) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(tag)?;
                seq.serialize_element(payload)?;
                seq.end()
            }
            Ast::Value(v) => v.serialize(serializer),
            Ast::Meta(m) => m.serialize(serializer),
        }
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

// ------------------------------- Tests ------------------------------------ //
