//! Kernel boolean conditions.

use crate::kernel::value::Value;
use std::fmt;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
}

impl CompareOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Equal => "equal",
            CompareOp::NotEqual => "notEqual",
            CompareOp::GreaterThan => "greaterThan",
            CompareOp::GreaterThanEqual => "greaterThanEqual",
            CompareOp::LessThan => "lessThan",
            CompareOp::LessThanEqual => "lessThanEqual",
        }
    }
}

/// Kernel condition tree
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Condition that always holds
    Empty,

    And(Box<Expression>, Box<Expression>),

    Or(Box<Expression>, Box<Expression>),

    Not(Box<Expression>),

    Compare {
        op: CompareOp,
        left: Value,
        right: Value,
    },

    IsEmpty(Value),

    Contains {
        element: Value,
        collection: Value,
    },

    /// Pattern match with explicit wildcard and escape characters
    Matches {
        value: Value,
        pattern: Value,
        single: String,
        multi: String,
        escape: String,
    },

    BindVariable {
        variable: Value,
        path: Value,
    },

    /// Branch of a general CASE
    WhenCondition {
        condition: Box<Expression>,
        action: Value,
    },

    /// Branch of a simple CASE
    WhenScalar {
        scalar: Value,
        action: Value,
    },
}

impl Expression {
    /// Flatten nested ANDs into their operands, left to right
    pub fn conjuncts(&self) -> Vec<&Expression> {
        match self {
            Expression::And(left, right) => {
                let mut out = left.conjuncts();
                out.extend(right.conjuncts());
                out
            }
            other => vec![other],
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Empty => write!(f, "empty()"),
            Expression::And(left, right) => write!(f, "and({}, {})", left, right),
            Expression::Or(left, right) => write!(f, "or({}, {})", left, right),
            Expression::Not(inner) => write!(f, "not({})", inner),
            Expression::Compare { op, left, right } => {
                write!(f, "{}({}, {})", op.as_str(), left, right)
            }
            Expression::IsEmpty(value) => write!(f, "isEmpty({})", value),
            Expression::Contains {
                element,
                collection,
            } => write!(f, "contains({}, {})", element, collection),
            Expression::Matches {
                value,
                pattern,
                single,
                multi,
                escape,
            } => write!(
                f,
                "matches({}, {}, \"{}\", \"{}\", \"{}\")",
                value, pattern, single, multi, escape
            ),
            Expression::BindVariable { variable, path } => {
                write!(f, "bindVariable({}, {})", variable, path)
            }
            Expression::WhenCondition { condition, action } => {
                write!(f, "whenCondition({}, {})", condition, action)
            }
            Expression::WhenScalar { scalar, action } => {
                write!(f, "whenScalar({}, {})", scalar, action)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::value::ValueOp;

    #[test]
    fn test_conjuncts() {
        let expr = Expression::And(
            Box::new(Expression::And(
                Box::new(Expression::Empty),
                Box::new(Expression::IsEmpty(Value::new(ValueOp::This))),
            )),
            Box::new(Expression::Not(Box::new(Expression::Empty))),
        );

        let parts = expr.conjuncts();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], &Expression::Empty);
        assert!(matches!(parts[1], Expression::IsEmpty(_)));
        assert!(matches!(parts[2], Expression::Not(_)));

        assert_eq!(Expression::Empty.conjuncts().len(), 1);
    }

    #[test]
    fn test_display() {
        let expr = Expression::Compare {
            op: CompareOp::NotEqual,
            left: Value::new(ValueOp::This),
            right: Value::new(ValueOp::Null),
        };
        assert_eq!(expr.to_string(), "notEqual(this, null)");
        assert_eq!(
            Expression::Not(Box::new(Expression::Empty)).to_string(),
            "not(empty())"
        );
    }
}
