//! Kernel scalar values.

use crate::kernel::expr::Expression;
use crate::types::{Datum, ValueType};
use std::fmt;

/// Kind tag a kernel literal is created with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Number,
    String,
    Boolean,
    Object,
}

/// Literal constant in the kernel AST
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: Datum,
    pub kind: LiteralKind,
}

/// Path rooted either at the candidate (`variable == None`) or at a bound
/// variable, followed by attribute segments
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathValue {
    pub variable: Option<String>,
    pub segments: Vec<String>,
}

/// Current date/time functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Temporal {
    Date,
    Time,
    Timestamp,
}

impl Temporal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Temporal::Date => "currentDate",
            Temporal::Time => "currentTime",
            Temporal::Timestamp => "currentTimestamp",
        }
    }
}

/// Single-operand kernel functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryFunction {
    Abs,
    Sqrt,
    Size,
    Sum,
    Avg,
    Max,
    Min,
    Count,
    Distinct,
}

impl UnaryFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryFunction::Abs => "abs",
            UnaryFunction::Sqrt => "sqrt",
            UnaryFunction::Size => "size",
            UnaryFunction::Sum => "sum",
            UnaryFunction::Avg => "avg",
            UnaryFunction::Max => "max",
            UnaryFunction::Min => "min",
            UnaryFunction::Count => "count",
            UnaryFunction::Distinct => "distinct",
        }
    }
}

/// Two-operand kernel functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryFunction {
    Add,
    Subtract,
    Multiply,
    Divide,
    Mod,
    Concat,
    Substring,
}

impl BinaryFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryFunction::Add => "add",
            BinaryFunction::Subtract => "subtract",
            BinaryFunction::Multiply => "multiply",
            BinaryFunction::Divide => "divide",
            BinaryFunction::Mod => "mod",
            BinaryFunction::Concat => "concat",
            BinaryFunction::Substring => "substring",
        }
    }
}

/// Kernel value payload
#[derive(Debug, Clone, PartialEq)]
pub enum ValueOp {
    Literal(Literal),

    /// The null sentinel
    Null,

    /// The candidate instance
    This,

    Path(PathValue),

    Variable {
        name: String,
        declared_type: ValueType,
    },

    /// Packed arguments for multi-argument functions such as substring
    ArgumentList(Vec<Value>),

    Unary {
        function: UnaryFunction,
        operand: Box<Value>,
    },

    Binary {
        function: BinaryFunction,
        left: Box<Value>,
        right: Box<Value>,
    },

    /// `leading`: `Some(true)` leading, `Some(false)` trailing, `None` both
    Trim {
        operand: Box<Value>,
        character: Box<Value>,
        leading: Option<bool>,
    },

    Cast {
        operand: Box<Value>,
        target: ValueType,
    },

    Current(Temporal),

    Coalesce(Vec<Value>),

    GeneralCase {
        whens: Vec<Expression>,
        otherwise: Box<Value>,
    },

    SimpleCase {
        operand: Box<Value>,
        whens: Vec<Expression>,
        otherwise: Box<Value>,
    },

    /// Boolean condition used in value position
    Condition(Box<Expression>),
}

/// Kernel value: payload plus the header every value carries
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub op: ValueOp,
    pub implicit_type: Option<ValueType>,
    pub alias: Option<String>,
    /// Entity the value is known to describe
    pub metadata: Option<String>,
}

impl Value {
    pub fn new(op: ValueOp) -> Self {
        Self {
            op,
            implicit_type: None,
            alias: None,
            metadata: None,
        }
    }

    pub fn set_implicit_type(&mut self, value_type: ValueType) {
        self.implicit_type = Some(value_type);
    }

    pub fn set_alias(&mut self, alias: impl Into<String>) {
        self.alias = Some(alias.into());
    }

    pub fn set_metadata(&mut self, entity: impl Into<String>) {
        self.metadata = Some(entity.into());
    }

    pub fn is_null(&self) -> bool {
        matches!(self.op, ValueOp::Null)
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match &self.op {
            ValueOp::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&PathValue> {
        match &self.op {
            ValueOp::Path(path) => Some(path),
            _ => None,
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.op {
            ValueOp::Literal(lit) => write!(f, "literal({})", lit.value),
            ValueOp::Null => write!(f, "null"),
            ValueOp::This => write!(f, "this"),
            ValueOp::Path(path) => {
                let mut parts: Vec<&str> = Vec::new();
                if let Some(var) = &path.variable {
                    parts.push(var);
                }
                parts.extend(path.segments.iter().map(String::as_str));
                if parts.is_empty() {
                    if let Some(entity) = &self.metadata {
                        parts.push(entity);
                    }
                }
                write!(f, "path({})", parts.join("."))
            }
            ValueOp::Variable { name, .. } => write!(f, "var({})", name),
            ValueOp::ArgumentList(args) => {
                write!(f, "args(")?;
                write_list(f, args)?;
                write!(f, ")")
            }
            ValueOp::Unary { function, operand } => {
                write!(f, "{}({})", function.as_str(), operand)
            }
            ValueOp::Binary {
                function,
                left,
                right,
            } => write!(f, "{}({}, {})", function.as_str(), left, right),
            ValueOp::Trim {
                operand,
                character,
                leading,
            } => match leading {
                Some(leading) => write!(f, "trim({}, {}, {})", operand, character, leading),
                None => write!(f, "trim({}, {}, null)", operand, character),
            },
            ValueOp::Cast { operand, target } => write!(f, "cast({}, {})", operand, target),
            ValueOp::Current(temporal) => write!(f, "{}()", temporal.as_str()),
            ValueOp::Coalesce(values) => {
                write!(f, "coalesce(")?;
                write_list(f, values)?;
                write!(f, ")")
            }
            ValueOp::GeneralCase { whens, otherwise } => {
                write!(f, "case(")?;
                write_list(f, whens)?;
                write!(f, ", else {})", otherwise)
            }
            ValueOp::SimpleCase {
                operand,
                whens,
                otherwise,
            } => {
                write!(f, "case({}, ", operand)?;
                write_list(f, whens)?;
                write!(f, ", else {})", otherwise)
            }
            ValueOp::Condition(expr) => write!(f, "condition({})", expr),
        }
    }
}
