//! Criteria value nodes.

use crate::criteria::case::{Case, Coalesce, SimpleCase};
use crate::criteria::operator::{BinaryOperator, TrimSpec, UnaryOperator};
use crate::criteria::path::Path;
use crate::criteria::predicate::Predicate;
use crate::kernel::Temporal;
use crate::types::{Datum, ValueType};
use std::fmt;

/// Operator payload of a value node
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Literal domain value
    Constant(Datum),

    /// Entity or attribute reference
    Path(Path),

    Unary {
        op: UnaryOperator,
        operand: Box<Expr>,
    },

    Count {
        operand: Box<Expr>,
        distinct: bool,
    },

    Cast {
        operand: Box<Expr>,
        target: ValueType,
    },

    Binary {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Aggregate `sum(left)` or arithmetic `left + right`
    Sum {
        left: Box<Expr>,
        right: Option<Box<Expr>>,
    },

    /// 1-based `from`, optional `len`
    Substring {
        string: Box<Expr>,
        from: Option<Box<Expr>>,
        len: Option<Box<Expr>>,
    },

    Trim {
        string: Box<Expr>,
        character: Box<Expr>,
        spec: TrimSpec,
    },

    Current(Temporal),

    Coalesce(Coalesce),

    Case(Case),

    SimpleCase(SimpleCase),

    /// Predicate in value position
    Predicate(Predicate),
}

impl ExprKind {
    /// Short operator name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            ExprKind::Constant(_) => "constant",
            ExprKind::Path(_) => "path",
            ExprKind::Unary { op, .. } => op.as_str(),
            ExprKind::Count { .. } => "count",
            ExprKind::Cast { .. } => "cast",
            ExprKind::Binary { op, .. } => op.as_str(),
            ExprKind::Sum { .. } => "sum",
            ExprKind::Substring { .. } => "substring",
            ExprKind::Trim { .. } => "trim",
            ExprKind::Current(temporal) => temporal.as_str(),
            ExprKind::Coalesce(_) => "coalesce",
            ExprKind::Case(_) => "case",
            ExprKind::SimpleCase(_) => "simple case",
            ExprKind::Predicate(_) => "predicate",
        }
    }
}

/// Typed criteria value node.
///
/// `declared_type` is the declared result type. It is `None` only for untyped
/// case/coalesce nodes whose branches carry no type yet, and for NULL
/// constants.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub(crate) declared_type: Option<ValueType>,
    pub(crate) alias: Option<String>,
    pub(crate) kind: ExprKind,
}

impl Expr {
    pub(crate) fn new(declared_type: Option<ValueType>, kind: ExprKind) -> Self {
        Self {
            declared_type,
            alias: None,
            kind,
        }
    }

    /// Constant typed by the runtime type of its value
    pub fn constant(value: impl Into<Datum>) -> Self {
        let value = value.into();
        Self::new(value.value_type(), ExprKind::Constant(value))
    }

    /// Constant with an explicitly declared type
    pub fn typed_constant(declared_type: ValueType, value: impl Into<Datum>) -> Self {
        Self::new(Some(declared_type), ExprKind::Constant(value.into()))
    }

    /// NULL constant of unknown type
    pub fn null() -> Self {
        Self::new(None, ExprKind::Constant(Datum::Null))
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn declared_type(&self) -> Option<&ValueType> {
        self.declared_type.as_ref()
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    /// Literal value, if this node is a constant
    pub fn as_constant(&self) -> Option<&Datum> {
        match &self.kind {
            ExprKind::Constant(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match &self.kind {
            ExprKind::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_aggregate(&self) -> bool {
        match &self.kind {
            ExprKind::Count { .. } => true,
            ExprKind::Sum { right: None, .. } => true,
            ExprKind::Unary { op, .. } => matches!(
                op,
                UnaryOperator::Avg | UnaryOperator::Max | UnaryOperator::Min
            ),
            _ => false,
        }
    }
}

impl From<Datum> for Expr {
    fn from(value: Datum) -> Self {
        Expr::constant(value)
    }
}

macro_rules! constant_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Expr {
                fn from(value: $t) -> Self {
                    Expr::constant(value)
                }
            }
        )*
    };
}

constant_from!(bool, i32, i64, f64, char, &str, String);

impl From<Path> for Expr {
    fn from(path: Path) -> Self {
        let alias = path.alias().map(str::to_string);
        Self {
            declared_type: Some(path.value_type().clone()),
            alias,
            kind: ExprKind::Path(path),
        }
    }
}

impl From<&Path> for Expr {
    fn from(path: &Path) -> Self {
        Expr::from(path.clone())
    }
}

impl From<Predicate> for Expr {
    fn from(predicate: Predicate) -> Self {
        let alias = predicate.alias().map(str::to_string);
        Self {
            declared_type: Some(ValueType::Boolean),
            alias,
            kind: ExprKind::Predicate(predicate),
        }
    }
}

impl From<Case> for Expr {
    fn from(case: Case) -> Self {
        Self::new(case.result_type().cloned(), ExprKind::Case(case))
    }
}

impl From<SimpleCase> for Expr {
    fn from(case: SimpleCase) -> Self {
        Self::new(case.result_type().cloned(), ExprKind::SimpleCase(case))
    }
}

impl From<Coalesce> for Expr {
    fn from(coalesce: Coalesce) -> Self {
        Self::new(coalesce.result_type().cloned(), ExprKind::Coalesce(coalesce))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Constant(value) => write!(f, "{}", value),
            ExprKind::Path(path) => write!(f, "{}", path),
            ExprKind::Unary { op, operand } => write!(f, "{}({})", op.as_str(), operand),
            ExprKind::Count { operand, distinct } => {
                if *distinct {
                    write!(f, "count(distinct {})", operand)
                } else {
                    write!(f, "count({})", operand)
                }
            }
            ExprKind::Cast { operand, target } => write!(f, "cast({} as {})", operand, target),
            ExprKind::Binary { op, left, right } => {
                write!(f, "{}({}, {})", op.as_str(), left, right)
            }
            ExprKind::Sum { left, right } => match right {
                Some(right) => write!(f, "sum({}, {})", left, right),
                None => write!(f, "sum({})", left),
            },
            ExprKind::Substring { string, from, len } => {
                write!(f, "substring({}", string)?;
                if let Some(from) = from {
                    write!(f, ", {}", from)?;
                }
                if let Some(len) = len {
                    write!(f, ", {}", len)?;
                }
                write!(f, ")")
            }
            ExprKind::Trim {
                string,
                character,
                spec,
            } => write!(f, "trim({} {} from {})", spec.as_str(), character, string),
            ExprKind::Current(temporal) => write!(f, "{}()", temporal.as_str()),
            ExprKind::Coalesce(coalesce) => write!(f, "{}", coalesce),
            ExprKind::Case(case) => write!(f, "{}", case),
            ExprKind::SimpleCase(case) => write!(f, "{}", case),
            ExprKind::Predicate(predicate) => write!(f, "{}", predicate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_are_typed_by_value() {
        assert_eq!(Expr::from(-5).declared_type(), Some(&ValueType::Int32));
        assert_eq!(Expr::from(5i64).declared_type(), Some(&ValueType::Int64));
        assert_eq!(Expr::from("A").declared_type(), Some(&ValueType::String));
        assert_eq!(Expr::from('*').declared_type(), Some(&ValueType::Character));
        assert_eq!(Expr::from(true).declared_type(), Some(&ValueType::Boolean));
        assert_eq!(Expr::null().declared_type(), None);

        let declared = Expr::typed_constant(ValueType::Double, 3);
        assert_eq!(declared.declared_type(), Some(&ValueType::Double));
        assert_eq!(declared.as_constant(), Some(&Datum::Int32(3)));
    }

    #[test]
    fn test_alias() {
        let expr = Expr::from(1).with_alias("one");
        assert_eq!(expr.alias(), Some("one"));
        assert!(Expr::from(1).alias().is_none());
    }

    #[test]
    fn test_display() {
        let abs = Expr::new(
            Some(ValueType::Int32),
            ExprKind::Unary {
                op: UnaryOperator::Abs,
                operand: Box::new(Expr::from(-5)),
            },
        );
        assert_eq!(abs.to_string(), "abs(-5)");
        assert_eq!(abs.kind().name(), "abs");

        let trim = Expr::new(
            Some(ValueType::String),
            ExprKind::Trim {
                string: Box::new(Expr::from("  x ")),
                character: Box::new(Expr::from(' ')),
                spec: TrimSpec::Leading,
            },
        );
        assert_eq!(trim.to_string(), "trim(LEADING ' ' from \"  x \")");
    }

    #[test]
    fn test_is_aggregate() {
        let count = Expr::new(
            Some(ValueType::Int64),
            ExprKind::Count {
                operand: Box::new(Expr::from(1)),
                distinct: false,
            },
        );
        assert!(count.is_aggregate());

        let add = Expr::new(
            Some(ValueType::Int32),
            ExprKind::Sum {
                left: Box::new(Expr::from(1)),
                right: Some(Box::new(Expr::from(2))),
            },
        );
        assert!(!add.is_aggregate());
        assert!(!Expr::from(1).is_aggregate());
    }
}
