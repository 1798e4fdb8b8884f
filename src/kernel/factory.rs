//! The expression factory capability consumed by criteria lowering.

use crate::kernel::error::{KernelError, KernelResult};
use crate::kernel::expr::Expression;
use crate::kernel::value::{LiteralKind, Value};
use crate::types::{Datum, ValueType};

fn unsupported<T>(operator: &str) -> KernelResult<T> {
    Err(KernelError::unsupported(operator))
}

/// Materializes kernel values and conditions.
///
/// Every operation defaults to `KernelError::Unsupported`, so a factory only
/// implements what its planner can realize. Lowering propagates the error
/// verbatim when it needs a missing operation.
#[allow(unused_variables)]
pub trait ExpressionFactory {
    // Leaves

    fn new_literal(&self, value: Datum, kind: LiteralKind) -> KernelResult<Value> {
        unsupported("new_literal")
    }

    /// Path rooted at the candidate instance
    fn new_path(&self) -> KernelResult<Value> {
        unsupported("new_path")
    }

    /// Path rooted at a bound variable
    fn new_path_from(&self, variable: Value) -> KernelResult<Value> {
        unsupported("new_path_from")
    }

    /// Extend a path with an attribute segment
    fn traverse(&self, path: Value, attribute: &str) -> KernelResult<Value> {
        unsupported("traverse")
    }

    fn new_bound_variable(&self, name: &str, declared_type: ValueType) -> KernelResult<Value> {
        unsupported("new_bound_variable")
    }

    fn bind_variable(&self, variable: Value, path: Value) -> KernelResult<Expression> {
        unsupported("bind_variable")
    }

    fn new_argument_list(&self, first: Value, second: Value) -> KernelResult<Value> {
        unsupported("new_argument_list")
    }

    fn get_this(&self) -> KernelResult<Value> {
        unsupported("get_this")
    }

    fn get_null(&self) -> KernelResult<Value> {
        unsupported("get_null")
    }

    // Arithmetic and aggregates

    fn abs(&self, value: Value) -> KernelResult<Value> {
        unsupported("abs")
    }

    fn add(&self, left: Value, right: Value) -> KernelResult<Value> {
        unsupported("add")
    }

    fn subtract(&self, left: Value, right: Value) -> KernelResult<Value> {
        unsupported("subtract")
    }

    fn multiply(&self, left: Value, right: Value) -> KernelResult<Value> {
        unsupported("multiply")
    }

    fn divide(&self, left: Value, right: Value) -> KernelResult<Value> {
        unsupported("divide")
    }

    fn modulo(&self, left: Value, right: Value) -> KernelResult<Value> {
        unsupported("mod")
    }

    fn sum(&self, value: Value) -> KernelResult<Value> {
        unsupported("sum")
    }

    fn avg(&self, value: Value) -> KernelResult<Value> {
        unsupported("avg")
    }

    fn max(&self, value: Value) -> KernelResult<Value> {
        unsupported("max")
    }

    fn min(&self, value: Value) -> KernelResult<Value> {
        unsupported("min")
    }

    fn count(&self, value: Value) -> KernelResult<Value> {
        unsupported("count")
    }

    fn sqrt(&self, value: Value) -> KernelResult<Value> {
        unsupported("sqrt")
    }

    fn size(&self, value: Value) -> KernelResult<Value> {
        unsupported("size")
    }

    // Strings and conversion

    fn concat(&self, left: Value, right: Value) -> KernelResult<Value> {
        unsupported("concat")
    }

    /// `args` is either a single start value or an argument list of start
    /// and end
    fn substring(&self, value: Value, args: Value) -> KernelResult<Value> {
        unsupported("substring")
    }

    /// `leading`: `Some(true)` leading, `Some(false)` trailing, `None` both
    fn trim(&self, value: Value, character: Value, leading: Option<bool>) -> KernelResult<Value> {
        unsupported("trim")
    }

    fn matches(
        &self,
        value: Value,
        pattern: Value,
        single: &str,
        multi: &str,
        escape: &str,
    ) -> KernelResult<Expression> {
        unsupported("matches")
    }

    fn cast(&self, value: Value, target: ValueType) -> KernelResult<Value> {
        unsupported("cast")
    }

    // Date and time

    fn get_current_date(&self) -> KernelResult<Value> {
        unsupported("get_current_date")
    }

    fn get_current_time(&self) -> KernelResult<Value> {
        unsupported("get_current_time")
    }

    fn get_current_timestamp(&self) -> KernelResult<Value> {
        unsupported("get_current_timestamp")
    }

    // Conditions

    /// The condition that always holds
    fn empty_expression(&self) -> KernelResult<Expression> {
        unsupported("empty_expression")
    }

    fn equal(&self, left: Value, right: Value) -> KernelResult<Expression> {
        unsupported("equal")
    }

    fn not_equal(&self, left: Value, right: Value) -> KernelResult<Expression> {
        unsupported("not_equal")
    }

    fn greater_than(&self, left: Value, right: Value) -> KernelResult<Expression> {
        unsupported("greater_than")
    }

    fn greater_than_equal(&self, left: Value, right: Value) -> KernelResult<Expression> {
        unsupported("greater_than_equal")
    }

    fn less_than(&self, left: Value, right: Value) -> KernelResult<Expression> {
        unsupported("less_than")
    }

    fn less_than_equal(&self, left: Value, right: Value) -> KernelResult<Expression> {
        unsupported("less_than_equal")
    }

    fn and(&self, left: Expression, right: Expression) -> KernelResult<Expression> {
        unsupported("and")
    }

    fn or(&self, left: Expression, right: Expression) -> KernelResult<Expression> {
        unsupported("or")
    }

    fn not(&self, expr: Expression) -> KernelResult<Expression> {
        unsupported("not")
    }

    fn is_empty(&self, collection: Value) -> KernelResult<Expression> {
        unsupported("is_empty")
    }

    fn contains(&self, element: Value, collection: Value) -> KernelResult<Expression> {
        unsupported("contains")
    }

    /// A condition used where a value is expected
    fn condition_value(&self, expr: Expression) -> KernelResult<Value> {
        unsupported("condition_value")
    }

    // Control flow

    fn coalesce_expression(&self, values: Vec<Value>) -> KernelResult<Value> {
        unsupported("coalesce_expression")
    }

    fn general_case_expression(
        &self,
        whens: Vec<Expression>,
        otherwise: Value,
    ) -> KernelResult<Value> {
        unsupported("general_case_expression")
    }

    fn simple_case_expression(
        &self,
        operand: Value,
        whens: Vec<Expression>,
        otherwise: Value,
    ) -> KernelResult<Value> {
        unsupported("simple_case_expression")
    }

    fn when_condition(&self, condition: Expression, action: Value) -> KernelResult<Expression> {
        unsupported("when_condition")
    }

    fn when_scalar(&self, scalar: Value, action: Value) -> KernelResult<Expression> {
        unsupported("when_scalar")
    }

    // Modifiers

    fn distinct(&self, value: Value) -> KernelResult<Value> {
        unsupported("distinct")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LiteralsOnly;

    impl ExpressionFactory for LiteralsOnly {
        fn new_literal(&self, value: Datum, kind: LiteralKind) -> KernelResult<Value> {
            crate::kernel::AstFactory.new_literal(value, kind)
        }
    }

    #[test]
    fn test_default_operations_are_unsupported() {
        let factory = LiteralsOnly;

        let lit = factory
            .new_literal(Datum::Int32(1), LiteralKind::Number)
            .unwrap();
        assert!(lit.as_literal().is_some());

        assert_eq!(
            factory.abs(lit.clone()).unwrap_err(),
            KernelError::unsupported("abs")
        );
        assert_eq!(
            factory.modulo(lit.clone(), lit).unwrap_err(),
            KernelError::unsupported("mod")
        );
        assert_eq!(
            factory.empty_expression().unwrap_err(),
            KernelError::unsupported("empty_expression")
        );
    }
}
