//! Reference factory that materializes the kernel AST directly.

use crate::kernel::error::{KernelError, KernelResult};
use crate::kernel::expr::{CompareOp, Expression};
use crate::kernel::factory::ExpressionFactory;
use crate::kernel::value::{
    BinaryFunction, Literal, LiteralKind, PathValue, Temporal, UnaryFunction, Value, ValueOp,
};
use crate::types::{Datum, ValueType};

/// Stateless factory producing fresh `Value`/`Expression` nodes on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct AstFactory;

impl AstFactory {
    pub fn new() -> Self {
        Self
    }

    fn unary(&self, function: UnaryFunction, operand: Value) -> KernelResult<Value> {
        Ok(Value::new(ValueOp::Unary {
            function,
            operand: Box::new(operand),
        }))
    }

    fn binary(&self, function: BinaryFunction, left: Value, right: Value) -> KernelResult<Value> {
        Ok(Value::new(ValueOp::Binary {
            function,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    fn compare(&self, op: CompareOp, left: Value, right: Value) -> KernelResult<Expression> {
        Ok(Expression::Compare { op, left, right })
    }
}

impl ExpressionFactory for AstFactory {
    fn new_literal(&self, value: Datum, kind: LiteralKind) -> KernelResult<Value> {
        Ok(Value::new(ValueOp::Literal(Literal { value, kind })))
    }

    fn new_path(&self) -> KernelResult<Value> {
        Ok(Value::new(ValueOp::Path(PathValue::default())))
    }

    fn new_path_from(&self, variable: Value) -> KernelResult<Value> {
        match variable.op {
            ValueOp::Variable { name, declared_type } => {
                let mut path = Value::new(ValueOp::Path(PathValue {
                    variable: Some(name),
                    segments: Vec::new(),
                }));
                if let ValueType::Entity(entity) = declared_type {
                    path.set_metadata(entity);
                }
                Ok(path)
            }
            other => Err(KernelError::invalid_operand(
                "new_path_from",
                format!("expected a variable, got {}", Value::new(other)),
            )),
        }
    }

    fn traverse(&self, path: Value, attribute: &str) -> KernelResult<Value> {
        match path.op {
            ValueOp::Path(mut inner) => {
                inner.segments.push(attribute.to_string());
                Ok(Value::new(ValueOp::Path(inner)))
            }
            other => Err(KernelError::invalid_operand(
                "traverse",
                format!("expected a path, got {}", Value::new(other)),
            )),
        }
    }

    fn new_bound_variable(&self, name: &str, declared_type: ValueType) -> KernelResult<Value> {
        Ok(Value::new(ValueOp::Variable {
            name: name.to_string(),
            declared_type,
        }))
    }

    fn bind_variable(&self, variable: Value, path: Value) -> KernelResult<Expression> {
        if !matches!(variable.op, ValueOp::Variable { .. }) {
            return Err(KernelError::invalid_operand(
                "bind_variable",
                format!("expected a variable, got {}", variable),
            ));
        }
        Ok(Expression::BindVariable { variable, path })
    }

    fn new_argument_list(&self, first: Value, second: Value) -> KernelResult<Value> {
        Ok(Value::new(ValueOp::ArgumentList(vec![first, second])))
    }

    fn get_this(&self) -> KernelResult<Value> {
        Ok(Value::new(ValueOp::This))
    }

    fn get_null(&self) -> KernelResult<Value> {
        Ok(Value::new(ValueOp::Null))
    }

    fn abs(&self, value: Value) -> KernelResult<Value> {
        self.unary(UnaryFunction::Abs, value)
    }

    fn add(&self, left: Value, right: Value) -> KernelResult<Value> {
        self.binary(BinaryFunction::Add, left, right)
    }

    fn subtract(&self, left: Value, right: Value) -> KernelResult<Value> {
        self.binary(BinaryFunction::Subtract, left, right)
    }

    fn multiply(&self, left: Value, right: Value) -> KernelResult<Value> {
        self.binary(BinaryFunction::Multiply, left, right)
    }

    fn divide(&self, left: Value, right: Value) -> KernelResult<Value> {
        self.binary(BinaryFunction::Divide, left, right)
    }

    fn modulo(&self, left: Value, right: Value) -> KernelResult<Value> {
        self.binary(BinaryFunction::Mod, left, right)
    }

    fn sum(&self, value: Value) -> KernelResult<Value> {
        self.unary(UnaryFunction::Sum, value)
    }

    fn avg(&self, value: Value) -> KernelResult<Value> {
        self.unary(UnaryFunction::Avg, value)
    }

    fn max(&self, value: Value) -> KernelResult<Value> {
        self.unary(UnaryFunction::Max, value)
    }

    fn min(&self, value: Value) -> KernelResult<Value> {
        self.unary(UnaryFunction::Min, value)
    }

    fn count(&self, value: Value) -> KernelResult<Value> {
        self.unary(UnaryFunction::Count, value)
    }

    fn sqrt(&self, value: Value) -> KernelResult<Value> {
        self.unary(UnaryFunction::Sqrt, value)
    }

    fn size(&self, value: Value) -> KernelResult<Value> {
        self.unary(UnaryFunction::Size, value)
    }

    fn concat(&self, left: Value, right: Value) -> KernelResult<Value> {
        self.binary(BinaryFunction::Concat, left, right)
    }

    fn substring(&self, value: Value, args: Value) -> KernelResult<Value> {
        self.binary(BinaryFunction::Substring, value, args)
    }

    fn trim(&self, value: Value, character: Value, leading: Option<bool>) -> KernelResult<Value> {
        Ok(Value::new(ValueOp::Trim {
            operand: Box::new(value),
            character: Box::new(character),
            leading,
        }))
    }

    fn matches(
        &self,
        value: Value,
        pattern: Value,
        single: &str,
        multi: &str,
        escape: &str,
    ) -> KernelResult<Expression> {
        Ok(Expression::Matches {
            value,
            pattern,
            single: single.to_string(),
            multi: multi.to_string(),
            escape: escape.to_string(),
        })
    }

    fn cast(&self, value: Value, target: ValueType) -> KernelResult<Value> {
        Ok(Value::new(ValueOp::Cast {
            operand: Box::new(value),
            target,
        }))
    }

    fn get_current_date(&self) -> KernelResult<Value> {
        Ok(Value::new(ValueOp::Current(Temporal::Date)))
    }

    fn get_current_time(&self) -> KernelResult<Value> {
        Ok(Value::new(ValueOp::Current(Temporal::Time)))
    }

    fn get_current_timestamp(&self) -> KernelResult<Value> {
        Ok(Value::new(ValueOp::Current(Temporal::Timestamp)))
    }

    fn empty_expression(&self) -> KernelResult<Expression> {
        Ok(Expression::Empty)
    }

    fn equal(&self, left: Value, right: Value) -> KernelResult<Expression> {
        self.compare(CompareOp::Equal, left, right)
    }

    fn not_equal(&self, left: Value, right: Value) -> KernelResult<Expression> {
        self.compare(CompareOp::NotEqual, left, right)
    }

    fn greater_than(&self, left: Value, right: Value) -> KernelResult<Expression> {
        self.compare(CompareOp::GreaterThan, left, right)
    }

    fn greater_than_equal(&self, left: Value, right: Value) -> KernelResult<Expression> {
        self.compare(CompareOp::GreaterThanEqual, left, right)
    }

    fn less_than(&self, left: Value, right: Value) -> KernelResult<Expression> {
        self.compare(CompareOp::LessThan, left, right)
    }

    fn less_than_equal(&self, left: Value, right: Value) -> KernelResult<Expression> {
        self.compare(CompareOp::LessThanEqual, left, right)
    }

    fn and(&self, left: Expression, right: Expression) -> KernelResult<Expression> {
        Ok(Expression::And(Box::new(left), Box::new(right)))
    }

    fn or(&self, left: Expression, right: Expression) -> KernelResult<Expression> {
        Ok(Expression::Or(Box::new(left), Box::new(right)))
    }

    fn not(&self, expr: Expression) -> KernelResult<Expression> {
        Ok(Expression::Not(Box::new(expr)))
    }

    fn is_empty(&self, collection: Value) -> KernelResult<Expression> {
        Ok(Expression::IsEmpty(collection))
    }

    fn contains(&self, element: Value, collection: Value) -> KernelResult<Expression> {
        Ok(Expression::Contains {
            element,
            collection,
        })
    }

    fn condition_value(&self, expr: Expression) -> KernelResult<Value> {
        Ok(Value::new(ValueOp::Condition(Box::new(expr))))
    }

    fn coalesce_expression(&self, values: Vec<Value>) -> KernelResult<Value> {
        Ok(Value::new(ValueOp::Coalesce(values)))
    }

    fn general_case_expression(
        &self,
        whens: Vec<Expression>,
        otherwise: Value,
    ) -> KernelResult<Value> {
        Ok(Value::new(ValueOp::GeneralCase {
            whens,
            otherwise: Box::new(otherwise),
        }))
    }

    fn simple_case_expression(
        &self,
        operand: Value,
        whens: Vec<Expression>,
        otherwise: Value,
    ) -> KernelResult<Value> {
        Ok(Value::new(ValueOp::SimpleCase {
            operand: Box::new(operand),
            whens,
            otherwise: Box::new(otherwise),
        }))
    }

    fn when_condition(&self, condition: Expression, action: Value) -> KernelResult<Expression> {
        Ok(Expression::WhenCondition {
            condition: Box::new(condition),
            action,
        })
    }

    fn when_scalar(&self, scalar: Value, action: Value) -> KernelResult<Expression> {
        Ok(Expression::WhenScalar { scalar, action })
    }

    fn distinct(&self, value: Value) -> KernelResult<Value> {
        self.unary(UnaryFunction::Distinct, value)
    }
}
