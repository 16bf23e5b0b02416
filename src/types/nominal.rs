use std::any::Any;
use std::sync::Arc;

use serde_json::Value;

use super::{Constrained, Fallback, Meta, OnFailure, Outcome, Primitive, Type, TypeRef};
use crate::ast::Ast;
use crate::error::{Rejection, TypeError};
use crate::logic::Rule;

/// Accepts exactly the values of one primitive kind and passes them through.
#[derive(Debug, Clone, PartialEq)]
pub struct Nominal {
    primitive: Primitive,
    meta: Meta,
}

impl Nominal {
    pub fn new(primitive: Primitive) -> Self {
        Self { primitive, meta: Meta::new() }
    }

    pub fn primitive(&self) -> Primitive {
        self.primitive
    }

    fn check(&self, input: &Value) -> Result<(), Rejection> {
        if self.primitive.matches(input) {
            Ok(())
        } else {
            Err(Rejection::Primitive { expected: self.primitive, actual: Primitive::of(input) })
        }
    }
}

impl Type for Nominal {
    fn name(&self) -> String {
        self.primitive.to_string()
    }

    fn call_unsafe(&self, input: &Value) -> Result<Value, TypeError> {
        self.check(input)
            .map(|()| input.clone())
            .map_err(|e| TypeError::rejected(self.name(), input, e))
    }

    fn call_safe(&self, input: &Value, fallback: Option<Fallback<'_>>) -> Option<Value> {
        match self.check(input) {
            Ok(()) => Some(input.clone()),
            Err(_) => super::fall_back(input, fallback),
        }
    }

    fn try_call(&self, input: &Value, on_failure: Option<OnFailure<'_>>) -> Outcome {
        match self.check(input) {
            Ok(()) => Outcome::Success(input.clone()),
            Err(error) => super::fail(super::Failure { input: input.clone(), error }, on_failure),
        }
    }

    fn success(&self, input: &Value) -> Result<Outcome, TypeError> {
        Ok(Outcome::Success(input.clone()))
    }

    fn failure(&self, input: &Value, error: Rejection) -> Outcome {
        Outcome::failure(input, error)
    }

    fn is_primitive(&self, value: &Value) -> bool {
        self.primitive.matches(value)
    }

    fn meta(&self) -> &Meta {
        &self.meta
    }

    fn with_meta(&self, meta: Meta) -> TypeRef {
        Arc::new(Self { meta, ..self.clone() })
    }

    fn to_ast(&self, include_meta: bool) -> Ast {
        Ast::node("nominal", vec![
            Ast::value(self.primitive.as_str()),
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
