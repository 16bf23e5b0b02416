//! Combining existing descriptors into new ones.
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::sum::{ConstrainedSum, Sum};
use crate::types::{Nominal, Primitive, TypeRef};

/// The shared `null` descriptor every optional type is built over.
static NULL: Lazy<TypeRef> = Lazy::new(|| -> TypeRef { Arc::new(Nominal::new(Primitive::Null)) });

pub fn null() -> TypeRef {
    NULL.clone()
}

/// `left | right`. When both sides carry rules the union exposes the OR of
/// them, so it is built as a [`ConstrainedSum`].
pub fn or(left: TypeRef, right: TypeRef) -> TypeRef {
    if left.is_constrained() && right.is_constrained() {
        Arc::new(ConstrainedSum::new(left, right))
    } else {
        Arc::new(Sum::new(left, right))
    }
}

/// `null | ty`.
pub fn optional(ty: TypeRef) -> TypeRef {
    or(null(), ty)
}

/// Left fold of `or`; `None` for an empty list.
pub fn any_of<I>(types: I) -> Option<TypeRef>
where
    I: IntoIterator<Item = TypeRef>,
{
    types.into_iter().reduce(or)
}

// ------------------------------- Tests ------------------------------------ //
