//! Boolean criteria nodes.

use crate::criteria::case::In;
use crate::criteria::expr::Expr;
use crate::criteria::operator::{BooleanOperator, ComparisonOperator};
use std::fmt;

/// Escape character LIKE uses when none is given.
///
/// A single space: it never occurs as an escape in practice, so patterns
/// without an explicit escape behave as if unescaped.
pub const DEFAULT_ESCAPE: char = ' ';

/// Predicate payload
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateKind {
    /// Conjunction; empty means always true
    And(Vec<Predicate>),

    /// Disjunction; empty means always false
    Or(Vec<Predicate>),

    Not(Box<Predicate>),

    Comparison {
        op: ComparisonOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    IsNull {
        operand: Box<Expr>,
        negated: bool,
    },

    IsEmpty(Box<Expr>),

    IsMember {
        element: Box<Expr>,
        collection: Box<Expr>,
    },

    Like {
        string: Box<Expr>,
        pattern: Box<Expr>,
        escape: Box<Expr>,
    },

    In(In),

    /// Boolean-valued expression used as a condition
    Condition(Box<Expr>),
}

/// Boolean-valued node usable in WHERE and HAVING
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub(crate) alias: Option<String>,
    pub(crate) kind: PredicateKind,
}

impl Predicate {
    pub(crate) fn new(kind: PredicateKind) -> Self {
        Self { alias: None, kind }
    }

    /// Always-true predicate
    pub fn conjunction() -> Self {
        Self::new(PredicateKind::And(Vec::new()))
    }

    /// Always-false predicate
    pub fn disjunction() -> Self {
        Self::new(PredicateKind::Or(Vec::new()))
    }

    pub fn all(predicates: Vec<Predicate>) -> Self {
        Self::new(PredicateKind::And(predicates))
    }

    pub fn any(predicates: Vec<Predicate>) -> Self {
        Self::new(PredicateKind::Or(predicates))
    }

    /// Conjoin, flattening into an existing conjunction
    pub fn and(self, other: Predicate) -> Self {
        match self.kind {
            PredicateKind::And(mut children) if self.alias.is_none() => {
                children.push(other);
                Self::all(children)
            }
            kind => Self::all(vec![Self { kind, ..self }, other]),
        }
    }

    /// Disjoin, flattening into an existing disjunction
    pub fn or(self, other: Predicate) -> Self {
        match self.kind {
            PredicateKind::Or(mut children) if self.alias.is_none() => {
                children.push(other);
                Self::any(children)
            }
            kind => Self::any(vec![Self { kind, ..self }, other]),
        }
    }

    pub fn not(self) -> Self {
        Self::new(PredicateKind::Not(Box::new(self)))
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn kind(&self) -> &PredicateKind {
        &self.kind
    }

    pub fn operator(&self) -> BooleanOperator {
        match self.kind {
            PredicateKind::And(_) => BooleanOperator::And,
            PredicateKind::Or(_) => BooleanOperator::Or,
            PredicateKind::Not(_) => BooleanOperator::Not,
            _ => BooleanOperator::Leaf,
        }
    }

    /// Child predicates of a composite node
    pub fn children(&self) -> Vec<&Predicate> {
        match &self.kind {
            PredicateKind::And(children) | PredicateKind::Or(children) => {
                children.iter().collect()
            }
            PredicateKind::Not(inner) => vec![inner.as_ref()],
            _ => Vec::new(),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, children: &[Predicate], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", sep)?;
        }
        write!(f, "{}", child)?;
    }
    write!(f, ")")
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PredicateKind::And(children) if children.is_empty() => write!(f, "TRUE"),
            PredicateKind::Or(children) if children.is_empty() => write!(f, "FALSE"),
            PredicateKind::And(children) => write_joined(f, children, "AND"),
            PredicateKind::Or(children) => write_joined(f, children, "OR"),
            PredicateKind::Not(inner) => write!(f, "NOT {}", inner),
            PredicateKind::Comparison { op, left, right } => {
                write!(f, "{} {} {}", left, op.as_str(), right)
            }
            PredicateKind::IsNull { operand, negated } => {
                if *negated {
                    write!(f, "{} IS NOT NULL", operand)
                } else {
                    write!(f, "{} IS NULL", operand)
                }
            }
            PredicateKind::IsEmpty(collection) => write!(f, "{} IS EMPTY", collection),
            PredicateKind::IsMember {
                element,
                collection,
            } => write!(f, "{} MEMBER OF {}", element, collection),
            PredicateKind::Like {
                string,
                pattern,
                escape,
            } => write!(f, "{} LIKE {} ESCAPE {}", string, pattern, escape),
            PredicateKind::In(in_list) => write!(f, "{}", in_list),
            PredicateKind::Condition(expr) => write!(f, "{}", expr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(v: i32) -> Predicate {
        Predicate::new(PredicateKind::Comparison {
            op: ComparisonOperator::Equal,
            left: Box::new(Expr::from(v)),
            right: Box::new(Expr::from(v)),
        })
    }

    #[test]
    fn test_operator_kinds() {
        assert_eq!(leaf(1).operator(), BooleanOperator::Leaf);
        assert_eq!(leaf(1).and(leaf(2)).operator(), BooleanOperator::And);
        assert_eq!(leaf(1).or(leaf(2)).operator(), BooleanOperator::Or);
        assert_eq!(leaf(1).not().operator(), BooleanOperator::Not);
    }

    #[test]
    fn test_combinators_flatten() {
        let p = leaf(1).and(leaf(2)).and(leaf(3));
        assert_eq!(p.children().len(), 3);
        assert_eq!(p.to_string(), "(1 = 1 AND 2 = 2 AND 3 = 3)");

        let q = leaf(1).or(leaf(2)).and(leaf(3));
        assert_eq!(q.children().len(), 2);
        assert_eq!(q.children()[0].operator(), BooleanOperator::Or);

        // An aliased conjunction is kept as a unit
        let r = leaf(1).and(leaf(2)).with_alias("p").and(leaf(3));
        assert_eq!(r.children().len(), 2);
        assert_eq!(r.children()[0].alias(), Some("p"));
    }

    #[test]
    fn test_empty_composites() {
        assert_eq!(Predicate::conjunction().to_string(), "TRUE");
        assert_eq!(Predicate::disjunction().to_string(), "FALSE");
        assert!(Predicate::conjunction().children().is_empty());
    }
}
