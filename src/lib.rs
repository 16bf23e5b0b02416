//! Union ("sum") type combinator over JSON type descriptors.
//!
//! ```
//! use std::sync::Arc;
//! use json_sum::{builder, Nominal, Outcome, Primitive, Type, TypeRef};
//! use serde_json::json;
//!
//! let string: TypeRef = Arc::new(Nominal::new(Primitive::String));
//! let int: TypeRef = Arc::new(Nominal::new(Primitive::Integer));
//! let ty = builder::or(string, int);
//!
//! assert_eq!(ty.name(), "string | integer");
//! assert_eq!(ty.try_call(&json!(5), None), Outcome::Success(json!(5)));
//! assert!(ty.try_call(&json!(3.25), None).is_failure());
//! ```
pub mod ast;
pub mod builder;
pub mod error;
pub mod logic;
pub mod sum;
pub mod types;

pub use ast::Ast;
pub use error::{Rejection, TypeError};
pub use logic::{Predicate, Rule};
pub use sum::{ConstrainedSum, Sum};
pub use types::{
    Coercible, Constrained, Failure, Fallback, Meta, Nominal, OnFailure, Options, Outcome, Primitive, Type,
    TypeRef,
};
