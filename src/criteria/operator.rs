//! Operator definitions for criteria expressions.

use crate::types::ValueType;

/// Single-operand functions whose result type follows from the operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Abs,
    Avg,
    Sqrt,
    Max,
    Min,
    Size,
}

impl UnaryOperator {
    /// Get the output type of this operator given the operand type
    pub fn output_type(&self, operand: Option<&ValueType>) -> Option<ValueType> {
        match self {
            UnaryOperator::Abs | UnaryOperator::Max | UnaryOperator::Min => operand.cloned(),
            UnaryOperator::Avg | UnaryOperator::Sqrt => Some(ValueType::Double),
            UnaryOperator::Size => Some(ValueType::Int32),
        }
    }

    /// Get the display string for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Abs => "abs",
            UnaryOperator::Avg => "avg",
            UnaryOperator::Sqrt => "sqrt",
            UnaryOperator::Max => "max",
            UnaryOperator::Min => "min",
            UnaryOperator::Size => "size",
        }
    }
}

/// Two-operand functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Concat,
    Product,
    Diff,
    Quotient,
    Mod,
}

impl BinaryOperator {
    /// Get the output type of this operator given the left operand type
    pub fn output_type(&self, left: Option<&ValueType>) -> Option<ValueType> {
        match self {
            BinaryOperator::Concat => Some(ValueType::String),
            BinaryOperator::Mod => Some(ValueType::Int32),
            BinaryOperator::Product
            | BinaryOperator::Diff
            | BinaryOperator::Quotient => left.cloned(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Concat => "concat",
            BinaryOperator::Product => "prod",
            BinaryOperator::Diff => "diff",
            BinaryOperator::Quotient => "quot",
            BinaryOperator::Mod => "mod",
        }
    }
}

/// Comparison predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
}

impl ComparisonOperator {
    /// Ordering comparisons need ordered operands; equality does not
    pub fn is_ordering(&self) -> bool {
        !matches!(self, ComparisonOperator::Equal | ComparisonOperator::NotEqual)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "=",
            ComparisonOperator::NotEqual => "<>",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::GreaterThanEqual => ">=",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::LessThanEqual => "<=",
        }
    }
}

/// Which end of a string TRIM removes characters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrimSpec {
    Leading,
    Trailing,
    #[default]
    Both,
}

impl TrimSpec {
    /// Kernel encoding: leading is `true`, trailing `false`, both absent
    pub fn to_kernel(&self) -> Option<bool> {
        match self {
            TrimSpec::Leading => Some(true),
            TrimSpec::Trailing => Some(false),
            TrimSpec::Both => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrimSpec::Leading => "LEADING",
            TrimSpec::Trailing => "TRAILING",
            TrimSpec::Both => "BOTH",
        }
    }
}

/// Shape of a predicate tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOperator {
    And,
    Or,
    Not,
    Leaf,
}
