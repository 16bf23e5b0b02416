use std::any::Any;
use std::sync::Arc;

use serde_json::Value;

use super::{Failure, Fallback, Meta, OnFailure, Outcome, Type, TypeRef};
use crate::ast::Ast;
use crate::error::{Rejection, TypeError};
use crate::logic::Rule;

/// A descriptor narrowed by a rule. The rule is checked before the wrapped
/// type sees the input. Meta belongs to the wrapped type.
#[derive(Debug, Clone)]
pub struct Constrained {
    inner: TypeRef,
    rule: Rule,
}

impl PartialEq for Constrained {
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_type(&*other.inner) && self.rule == other.rule
    }
}

impl Constrained {
    pub fn new(inner: TypeRef, rule: Rule) -> Self {
        Self { inner, rule }
    }

    pub fn inner(&self) -> &TypeRef {
        &self.inner
    }

    fn check(&self, input: &Value) -> Result<(), Rejection> {
        if self.rule.call(input) {
            Ok(())
        } else {
            Err(Rejection::Constraint { input: input.clone(), rule: self.rule.clone() })
        }
    }
}

impl Type for Constrained {
    fn name(&self) -> String {
        self.inner.name()
    }

    fn call_unsafe(&self, input: &Value) -> Result<Value, TypeError> {
        self.check(input).map_err(|e| TypeError::rejected(self.name(), input, e))?;
        self.inner.call_unsafe(input)
    }

    fn call_safe(&self, input: &Value, fallback: Option<Fallback<'_>>) -> Option<Value> {
        match self.check(input) {
            Ok(()) => self.inner.call_safe(input, fallback),
            Err(_) => super::fall_back(input, fallback),
        }
    }

    fn try_call(&self, input: &Value, on_failure: Option<OnFailure<'_>>) -> Outcome {
        match self.check(input) {
            Ok(()) => self.inner.try_call(input, on_failure),
            Err(error) => super::fail(Failure { input: input.clone(), error }, on_failure),
        }
    }

    fn success(&self, input: &Value) -> Result<Outcome, TypeError> {
        self.inner.success(input)
    }

    fn failure(&self, input: &Value, error: Rejection) -> Outcome {
        self.inner.failure(input, error)
    }

    fn is_primitive(&self, value: &Value) -> bool {
        self.inner.is_primitive(value)
    }

    fn is_optional(&self) -> bool {
        self.inner.is_optional()
    }

    fn is_constrained(&self) -> bool {
        true
    }

    fn rule(&self) -> Option<Rule> {
        Some(self.rule.clone())
    }

    fn meta(&self) -> &Meta {
        self.inner.meta()
    }

    fn with_meta(&self, meta: Meta) -> TypeRef {
        Arc::new(Self::new(self.inner.with_meta(meta), self.rule.clone()))
    }

    fn to_ast(&self, include_meta: bool) -> Ast {
        Ast::node("constrained", vec![self.inner.to_ast(include_meta), self.rule.to_ast()])
    }

    /// Constraining twice conjoins the rules instead of nesting wrappers.
    fn constrained(self: Arc<Self>, rule: Rule) -> TypeRef {
        Arc::new(Self::new(self.inner.clone(), self.rule.clone() & rule))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_type(&self, other: &dyn Type) -> bool {
        super::same_as(self, other)
    }
}

// ------------------------------- Tests ------------------------------------ //
