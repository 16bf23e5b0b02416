//! The type contract shared by every descriptor (leaves, wrappers, unions).
//!
//! Inputs are JSON documents. A descriptor can be evaluated three ways:
//! - `call_unsafe`: rejection surfaces as a [`TypeError`].
//! - `call_safe`: rejection hands the input to a caller-supplied fallback.
//! - `try_call`: rejection is reported as an [`Outcome::Failure`] value.
//!
//! Descriptors are immutable after construction and shared as [`TypeRef`].
pub mod primitive;
pub mod nominal;
pub mod coercible;
pub mod constrained;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::ast::Ast;
use crate::error::{Rejection, TypeError};
use crate::logic::Rule;

pub use coercible::Coercible;
pub use constrained::Constrained;
pub use nominal::Nominal;
pub use primitive::Primitive;

/// Shared, read-only handle to a descriptor.
pub type TypeRef = Arc<dyn Type>;

/// User-attached metadata. Participates in equality, never in validation.
pub type Meta = IndexMap<String, Value>;

/// Opaque configuration bag, forwarded and compared but never interpreted.
pub type Options = IndexMap<String, Value>;

/// Invoked by `call_safe` with the rejected input. `None` from a fallback,
/// or no fallback at all, is the absence sentinel.
pub type Fallback<'a> = &'a dyn Fn(&Value) -> Option<Value>;

/// Invoked by `try_call` with the failure instead of returning it.
pub type OnFailure<'a> = &'a dyn Fn(Failure) -> Outcome;

#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub input: Value,
    pub error: Rejection,
}

/// Discriminated result of a trial.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Value),
    Failure(Failure),
}

impl Outcome {
    pub fn failure(input: &Value, error: Rejection) -> Self {
        Outcome::Failure(Failure { input: input.clone(), error })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Outcome::Success(v) => Some(v),
            Outcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&Rejection> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(f) => Some(&f.error),
        }
    }

    pub fn into_result(self) -> Result<Value, Failure> {
        match self {
            Outcome::Success(v) => Ok(v),
            Outcome::Failure(f) => Err(f),
        }
    }
}

pub trait Type: fmt::Debug + Send + Sync + 'static {
    fn name(&self) -> String;

    fn call_unsafe(&self, input: &Value) -> Result<Value, TypeError>;

    fn call_safe(&self, input: &Value, fallback: Option<Fallback<'_>>) -> Option<Value>;

    fn try_call(&self, input: &Value, on_failure: Option<OnFailure<'_>>) -> Outcome;

    /// Wrap an accepted input as a success. Asking for a success the
    /// descriptor would not produce is an [`TypeError::InvalidSuccess`].
    fn success(&self, input: &Value) -> Result<Outcome, TypeError>;

    fn failure(&self, input: &Value, error: Rejection) -> Outcome;

    fn is_valid(&self, input: &Value) -> bool {
        self.try_call(input, None).is_success()
    }

    /// Could `value` be one of this descriptor's primitive shapes?
    fn is_primitive(&self, value: &Value) -> bool;

    fn is_optional(&self) -> bool {
        false
    }

    fn is_constrained(&self) -> bool {
        false
    }

    /// The attached predicate; present whenever `is_constrained()` holds.
    fn rule(&self) -> Option<Rule> {
        None
    }

    fn meta(&self) -> &Meta;

    fn with_meta(&self, meta: Meta) -> TypeRef;

    fn to_ast(&self, include_meta: bool) -> Ast;

    /// Build a new, more restricted descriptor.
    fn constrained(self: Arc<Self>, rule: Rule) -> TypeRef;

    fn as_any(&self) -> &dyn Any;

    /// Dynamic equality; implement with [`same_as`].
    fn eq_type(&self, other: &dyn Type) -> bool;
}

impl PartialEq for dyn Type {
    fn eq(&self, other: &dyn Type) -> bool {
        self.eq_type(other)
    }
}

/// `eq_type` for concrete descriptors: equal iff `other` is the same
/// concrete type and compares equal.
pub fn same_as<T: Type + PartialEq>(this: &T, other: &dyn Type) -> bool {
    other.as_any().downcast_ref::<T>().is_some_and(|other| this == other)
}

/// Shared tail of every leaf `call_safe`.
pub(crate) fn fall_back(input: &Value, fallback: Option<Fallback<'_>>) -> Option<Value> {
    fallback.and_then(|f| f(input))
}

/// Shared tail of every leaf `try_call`.
pub(crate) fn fail(failure: Failure, on_failure: Option<OnFailure<'_>>) -> Outcome {
    match on_failure {
        Some(f) => f(failure),
        None => Outcome::Failure(failure),
    }
}
