use std::fmt;

use ordered_float::OrderedFloat;
use regex::Regex;
use serde_json::Value;

use crate::ast::Ast;
use crate::types::Primitive;

/// A single named check. Predicates that do not apply to an input's shape
/// (e.g. `gt?` on a string) evaluate to false.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Type(Primitive),
    Gt(OrderedFloat<f64>),
    Gteq(OrderedFloat<f64>),
    Lt(OrderedFloat<f64>),
    Lteq(OrderedFloat<f64>),
    MinSize(usize),
    MaxSize(usize),
    Filled,
    Format(Pattern),
    IncludedIn(Vec<Value>),
}

/// Regex compared by source text.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_str() == other.0.as_str()
    }
}

impl Pattern {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Predicate {
    pub fn gt(n: f64) -> Self { Predicate::Gt(OrderedFloat(n)) }
    pub fn gteq(n: f64) -> Self { Predicate::Gteq(OrderedFloat(n)) }
    pub fn lt(n: f64) -> Self { Predicate::Lt(OrderedFloat(n)) }
    pub fn lteq(n: f64) -> Self { Predicate::Lteq(OrderedFloat(n)) }

    pub fn format(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Predicate::Format(Pattern(Regex::new(pattern)?)))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Predicate::Type(_) => "type?",
            Predicate::Gt(_) => "gt?",
            Predicate::Gteq(_) => "gteq?",
            Predicate::Lt(_) => "lt?",
            Predicate::Lteq(_) => "lteq?",
            Predicate::MinSize(_) => "min_size?",
            Predicate::MaxSize(_) => "max_size?",
            Predicate::Filled => "filled?",
            Predicate::Format(_) => "format?",
            Predicate::IncludedIn(_) => "included_in?",
        }
    }

    fn args(&self) -> Vec<Value> {
        match self {
            Predicate::Type(p) => vec![Value::from(p.as_str())],
            Predicate::Gt(n) | Predicate::Gteq(n) | Predicate::Lt(n) | Predicate::Lteq(n) => {
                vec![Value::from(n.0)]
            }
            Predicate::MinSize(n) | Predicate::MaxSize(n) => vec![Value::from(*n)],
            Predicate::Filled => Vec::new(),
            Predicate::Format(p) => vec![Value::from(p.as_str())],
            Predicate::IncludedIn(xs) => vec![Value::Array(xs.clone())],
        }
    }

    pub fn call(&self, input: &Value) -> bool {
        let num = || input.as_f64().map(OrderedFloat);
        match self {
            Predicate::Type(p) => p.matches(input),
            Predicate::Gt(n) => num().is_some_and(|x| x > *n),
            Predicate::Gteq(n) => num().is_some_and(|x| x >= *n),
            Predicate::Lt(n) => num().is_some_and(|x| x < *n),
            Predicate::Lteq(n) => num().is_some_and(|x| x <= *n),
            Predicate::MinSize(n) => size_of(input).is_some_and(|s| s >= *n),
            Predicate::MaxSize(n) => size_of(input).is_some_and(|s| s <= *n),
            Predicate::Filled => match input {
                Value::Null => false,
                other => size_of(other).is_none_or(|s| s > 0),
            },
            Predicate::Format(p) => input.as_str().is_some_and(|s| p.0.is_match(s)),
            Predicate::IncludedIn(xs) => xs.contains(input),
        }
    }

    pub fn to_ast(&self) -> Ast {
        Ast::node("predicate", vec![Ast::value(self.name()), Ast::Value(Value::Array(self.args()))])
    }
}

// strings count chars, not bytes
fn size_of(input: &Value) -> Option<usize> {
    match input {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(xs) => Some(xs.len()),
        Value::Object(m) => Some(m.len()),
        _ => None,
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Predicate::Gt(n) | Predicate::Gteq(n) | Predicate::Lt(n) | Predicate::Lteq(n) = self {
            return write!(f, "{}({})", self.name(), n);
        }
        let args = self.args();
        if args.is_empty() {
            return f.write_str(self.name());
        }
        let args: Vec<String> = args
            .iter()
            .map(|a| match a {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();
        write!(f, "{}({})", self.name(), args.join(", "))
    }
}

// ------------------------------- Tests ------------------------------------ //
