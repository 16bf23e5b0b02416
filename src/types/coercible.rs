use std::any::Any;
use std::sync::Arc;

use serde_json::{Number, Value};

use super::{Constrained, Failure, Fallback, Meta, OnFailure, Outcome, Primitive, Type, TypeRef};
use crate::ast::Ast;
use crate::error::{Rejection, TypeError};
use crate::logic::Rule;

/// Converts loosely shaped input (typically strings from forms or query
/// strings) into a target primitive. The converted value is the output.
#[derive(Debug, Clone, PartialEq)]
pub struct Coercible {
    target: Primitive,
    meta: Meta,
}

impl Coercible {
    pub fn new(target: Primitive) -> Self {
        Self { target, meta: Meta::new() }
    }

    pub fn target(&self) -> Primitive {
        self.target
    }

    pub fn coerce(&self, input: &Value) -> Result<Value, Rejection> {
        if self.target.matches(input) {
            return Ok(input.clone());
        }
        let out = match (self.target, input) {
            (Primitive::Integer, Value::String(s)) => s.trim().parse::<i64>().ok().map(Value::from),
            (Primitive::Integer, Value::Number(n)) => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| Value::from(f as i64)),
            (Primitive::Number, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number),
            (Primitive::String, Value::Number(n)) => Some(Value::String(n.to_string())),
            (Primitive::String, Value::Bool(b)) => Some(Value::String(b.to_string())),
            (Primitive::Boolean, Value::String(s)) => match s.trim() {
                "true" | "1" => Some(Value::Bool(true)),
                "false" | "0" => Some(Value::Bool(false)),
                _ => None,
            },
            (Primitive::Null, Value::String(s)) if s.is_empty() => Some(Value::Null),
            _ => None,
        };
        out.ok_or_else(|| Rejection::Coercion { input: input.clone(), target: self.target })
    }
}

impl Type for Coercible {
    fn name(&self) -> String {
        format!("coercible.{}", self.target)
    }

    fn call_unsafe(&self, input: &Value) -> Result<Value, TypeError> {
        self.coerce(input).map_err(|e| TypeError::rejected(self.name(), input, e))
    }

    fn call_safe(&self, input: &Value, fallback: Option<Fallback<'_>>) -> Option<Value> {
        match self.coerce(input) {
            Ok(v) => Some(v),
            Err(_) => super::fall_back(input, fallback),
        }
    }

    fn try_call(&self, input: &Value, on_failure: Option<OnFailure<'_>>) -> Outcome {
        match self.coerce(input) {
            Ok(v) => Outcome::Success(v),
            Err(error) => super::fail(Failure { input: input.clone(), error }, on_failure),
        }
    }

    fn success(&self, input: &Value) -> Result<Outcome, TypeError> {
        Ok(Outcome::Success(input.clone()))
    }

    fn failure(&self, input: &Value, error: Rejection) -> Outcome {
        Outcome::failure(input, error)
    }

    fn is_primitive(&self, value: &Value) -> bool {
        self.target.matches(value)
    }

    fn meta(&self) -> &Meta {
        &self.meta
    }

    fn with_meta(&self, meta: Meta) -> TypeRef {
        Arc::new(Self { meta, ..self.clone() })
    }

    fn to_ast(&self, include_meta: bool) -> Ast {
        Ast::node("coercible", vec![
            Ast::value(self.target.as_str()),
            Ast::meta_if(include_meta, &self.meta),
        ])
    }

    fn constrained(self: Arc<Self>, rule: Rule) -> TypeRef {
        Arc::new(Constrained::new(self, rule))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_type(&self, other: &dyn Type) -> bool {
        super::same_as(self, other)
    }
}

// ------------------------------- Tests ------------------------------------ //
