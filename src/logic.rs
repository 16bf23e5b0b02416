//! Boolean predicate rules attached to constrained descriptors.
//!
//! Rules are pure values: they compare structurally, render to the same AST
//! on every call, and can be combined with `|`, `&` and `!`.
pub mod predicate;

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use serde_json::Value;

use crate::ast::Ast;

pub use predicate::Predicate;

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Predicate(Predicate),
    And(Box<Rule>, Box<Rule>),
    Or(Box<Rule>, Box<Rule>),
    Not(Box<Rule>),
}

impl Rule {
    pub fn call(&self, input: &Value) -> bool {
        match self {
            Rule::Predicate(p) => p.call(input),
            Rule::And(l, r) => l.call(input) && r.call(input),
            Rule::Or(l, r) => l.call(input) || r.call(input),
            Rule::Not(r) => !r.call(input),
        }
    }

    pub fn to_ast(&self) -> Ast {
        match self {
            Rule::Predicate(p) => p.to_ast(),
            Rule::And(l, r) => Ast::node("and", vec![l.to_ast(), r.to_ast()]),
            Rule::Or(l, r) => Ast::node("or", vec![l.to_ast(), r.to_ast()]),
            Rule::Not(r) => Ast::node("not", vec![r.to_ast()]),
        }
    }
}

impl From<Predicate> for Rule {
    fn from(p: Predicate) -> Self {
        Rule::Predicate(p)
    }
}

impl BitOr for Rule {
    type Output = Rule;
    fn bitor(self, rhs: Rule) -> Rule {
        Rule::Or(Box::new(self), Box::new(rhs))
    }
}

impl BitAnd for Rule {
    type Output = Rule;
    fn bitand(self, rhs: Rule) -> Rule {
        Rule::And(Box::new(self), Box::new(rhs))
    }
}

impl Not for Rule {
    type Output = Rule;
    fn not(self) -> Rule {
        Rule::Not(Box::new(self))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Predicate(p) => write!(f, "{p}"),
            Rule::And(l, r) => write!(f, "({l} AND {r})"),
            Rule::Or(l, r) => write!(f, "({l} OR {r})"),
            Rule::Not(r) => write!(f, "NOT {r}"),
        }
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Primitive;
    use serde_json::json;

    fn gt(n: f64) -> Rule {
        Predicate::gt(n).into()
    }

    #[test]
    fn combinators_follow_boolean_logic() {
        let rule = gt(10.0) | Rule::from(Predicate::Type(Primitive::String));
        assert!(rule.call(&json!(11)));
        assert!(rule.call(&json!("x")));
        assert!(!rule.call(&json!(3)));

        let band = gt(1.0) & Rule::from(Predicate::lt(5.0));
        assert!(band.call(&json!(3)));
        assert!(!band.call(&json!(5)));

        assert!((!gt(1.0)).call(&json!(0)));
    }

    #[test]
    fn ast_nests_operators_over_predicates() {
        let rule = gt(5.0) | Rule::from(Predicate::MinSize(2));
        assert_eq!(
            rule.to_ast().to_json(),
            json!(["or", [
                ["predicate", ["gt?", [5.0]]],
                ["predicate", ["min_size?", [2]]]
            ]])
        );
    }

    #[test]
    fn display_is_infix() {
        let rule = gt(5.0) | !Rule::from(Predicate::Filled);
        assert_eq!(rule.to_string(), "(gt?(5) OR NOT filled?)");
    }
}
