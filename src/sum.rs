//! Union of two descriptors, tried left to right.
//!
//! Every operation consults `left` first and reaches `right` only after
//! `left` has been fully evaluated and rejected. Because a sum satisfies
//! the same contract as its operands, nested sums behave like one flat
//! disjunction: each level only forwards the caller's fallback.
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::ast::Ast;
use crate::builder;
use crate::error::{Rejection, TypeError};
use crate::logic::Rule;
use crate::types::{Constrained, Failure, Fallback, Meta, OnFailure, Options, Outcome, Type, TypeRef};

#[derive(Debug, Clone)]
pub struct Sum {
    left: TypeRef,
    right: TypeRef,
    options: Options,
    meta: Meta,
}

impl PartialEq for Sum {
    fn eq(&self, other: &Self) -> bool {
        self.left.eq_type(&*other.left)
            && self.right.eq_type(&*other.right)
            && self.options == other.options
            && self.meta == other.meta
    }
}

impl Sum {
    pub fn new(left: TypeRef, right: TypeRef) -> Self {
        Self::with_options(left, right, Options::new())
    }

    pub fn with_options(left: TypeRef, right: TypeRef, options: Options) -> Self {
        Self { left, right, options, meta: Meta::new() }
    }

    pub fn left(&self) -> &TypeRef {
        &self.left
    }

    pub fn right(&self) -> &TypeRef {
        &self.right
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Constraining an optional sum constrains the non-null branch and keeps
    /// the result optional; anything else is wrapped as a whole.
    fn constrain(&self, this: TypeRef, rule: Rule) -> TypeRef {
        if self.is_optional() {
            tracing::trace!(name = %self.name(), "constraining right branch of optional sum");
            builder::optional(self.right.clone().constrained(rule))
        } else {
            Arc::new(Constrained::new(this, rule))
        }
    }

    // the sole reason `left` or `right` turns the input down
    fn rejection_of(ty: &TypeRef, input: &Value) -> Rejection {
        match ty.try_call(input, None) {
            Outcome::Failure(f) => f.error,
            Outcome::Success(_) => Rejection::Message(format!("{input} is accepted by {}", ty.name())),
        }
    }
}

impl fmt::Display for Sum {
    /// Meta is left out: it affects equality, not presentation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sum<{}>", self.name())
    }
}

impl Type for Sum {
    fn name(&self) -> String {
        format!("{} | {}", self.left.name(), self.right.name())
    }

    fn call_unsafe(&self, input: &Value) -> Result<Value, TypeError> {
        match self.left.call_unsafe(input) {
            Err(e) if e.is_rejection() => {
                tracing::trace!(left = %self.left.name(), error = %e, "left rejected, trying right");
                self.right.call_unsafe(input)
            }
            other => other,
        }
    }

    fn call_safe(&self, input: &Value, fallback: Option<Fallback<'_>>) -> Option<Value> {
        self.left.call_safe(input, Some(&|input: &Value| self.right.call_safe(input, fallback)))
    }

    fn try_call(&self, input: &Value, on_failure: Option<OnFailure<'_>>) -> Outcome {
        self.left.try_call(input, Some(&|_: Failure| self.right.try_call(input, on_failure)))
    }

    fn success(&self, input: &Value) -> Result<Outcome, TypeError> {
        if self.left.is_valid(input) {
            self.left.success(input)
        } else if self.right.is_valid(input) {
            self.right.success(input)
        } else {
            Err(TypeError::InvalidSuccess { input: input.clone(), description: self.to_string() })
        }
    }

    /// The error argument is ignored; the failure is re-derived from the
    /// operand that rejects `input`, preferring `left`.
    fn failure(&self, input: &Value, _error: Rejection) -> Outcome {
        if !self.left.is_valid(input) {
            self.left.failure(input, Self::rejection_of(&self.left, input))
        } else {
            self.right.failure(input, Self::rejection_of(&self.right, input))
        }
    }

    fn is_primitive(&self, value: &Value) -> bool {
        self.left.is_primitive(value) || self.right.is_primitive(value)
    }

    fn is_optional(&self) -> bool {
        self.is_primitive(&Value::Null)
    }

    fn meta(&self) -> &Meta {
        &self.meta
    }

    fn with_meta(&self, meta: Meta) -> TypeRef {
        Arc::new(Self { meta, ..self.clone() })
    }

    fn to_ast(&self, include_meta: bool) -> Ast {
        Ast::node("sum", vec![
            self.left.to_ast(include_meta),
            self.right.to_ast(include_meta),
            Ast::meta_if(include_meta, &self.meta),
        ])
    }

    fn constrained(self: Arc<Self>, rule: Rule) -> TypeRef {
        self.constrain(self.clone(), rule)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_type(&self, other: &dyn Type) -> bool {
        crate::types::same_as(self, other)
    }
}

// ----------------------------- Constrained -------------------------------- //

/// A sum whose operands both carry rules. Exposes `left.rule | right.rule`
/// and otherwise behaves exactly like [`Sum`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConstrainedSum {
    sum: Sum,
}

impl ConstrainedSum {
    pub fn new(left: TypeRef, right: TypeRef) -> Self {
        Self { sum: Sum::new(left, right) }
    }

    pub fn with_options(left: TypeRef, right: TypeRef, options: Options) -> Self {
        Self { sum: Sum::with_options(left, right, options) }
    }

    pub fn as_sum(&self) -> &Sum {
        &self.sum
    }
}

impl fmt::Display for ConstrainedSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.sum, f)
    }
}

impl Type for ConstrainedSum {
    fn name(&self) -> String {
        self.sum.name()
    }

    fn call_unsafe(&self, input: &Value) -> Result<Value, TypeError> {
        self.sum.call_unsafe(input)
    }

    fn call_safe(&self, input: &Value, fallback: Option<Fallback<'_>>) -> Option<Value> {
        self.sum.call_safe(input, fallback)
    }

    fn try_call(&self, input: &Value, on_failure: Option<OnFailure<'_>>) -> Outcome {
        self.sum.try_call(input, on_failure)
    }

    fn success(&self, input: &Value) -> Result<Outcome, TypeError> {
        self.sum.success(input)
    }

    fn failure(&self, input: &Value, error: Rejection) -> Outcome {
        self.sum.failure(input, error)
    }

    fn is_valid(&self, input: &Value) -> bool {
        self.sum.is_valid(input)
    }

    fn is_primitive(&self, value: &Value) -> bool {
        self.sum.is_primitive(value)
    }

    fn is_optional(&self) -> bool {
        self.sum.is_optional()
    }

    fn is_constrained(&self) -> bool {
        true
    }

    /// `None` only if an operand was built without a rule, which `or` never does.
    fn rule(&self) -> Option<Rule> {
        Some(self.sum.left.rule()? | self.sum.right.rule()?)
    }

    fn meta(&self) -> &Meta {
        &self.sum.meta
    }

    fn with_meta(&self, meta: Meta) -> TypeRef {
        Arc::new(Self { sum: Sum { meta, ..self.sum.clone() } })
    }

    fn to_ast(&self, include_meta: bool) -> Ast {
        self.sum.to_ast(include_meta)
    }

    fn constrained(self: Arc<Self>, rule: Rule) -> TypeRef {
        self.sum.constrain(self.clone(), rule)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_type(&self, other: &dyn Type) -> bool {
        crate::types::same_as(self, other)
    }
}

// ------------------------------- Tests ------------------------------------ //
