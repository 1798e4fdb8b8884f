//! JPQL substring argument conversion shared by every query front end.
//!
//! JPQL positions are 1-based and take a length; the kernel substring takes
//! a 0-based start and an exclusive end.

use crate::kernel::error::KernelResult;
use crate::kernel::factory::ExpressionFactory;
use crate::kernel::value::{LiteralKind, Value};
use crate::types::Datum;

/// Build `substring(string, start[, end])` from JPQL `from` and `len`.
///
/// When both positions are numeric literals the offsets are folded into new
/// literals; otherwise the arithmetic is emitted. A missing `from` means the
/// first character.
pub fn convert_substring_arguments<F: ExpressionFactory + ?Sized>(
    factory: &F,
    string: Value,
    from: Option<Value>,
    len: Option<Value>,
) -> KernelResult<Value> {
    let from = match from {
        Some(from) => from,
        None => factory.new_literal(Datum::Int64(1), LiteralKind::Number)?,
    };

    let folded = match (literal_i64(&from), len.as_ref().map(literal_i64)) {
        (Some(jpql_start), None) => jpql_start.checked_sub(1).map(|start| (start, None)),
        (Some(jpql_start), Some(Some(length))) => jpql_start
            .checked_sub(1)
            .and_then(|start| start.checked_add(length).map(|end| (start, Some(end)))),
        _ => None,
    };

    // Offsets that overflow i64 are left to the arithmetic form
    let (start, end) = match folded {
        Some((start_index, end_index)) => {
            let start = factory.new_literal(Datum::Int64(start_index), LiteralKind::Number)?;
            let end = match end_index {
                Some(end_index) => {
                    Some(factory.new_literal(Datum::Int64(end_index), LiteralKind::Number)?)
                }
                None => None,
            };
            (start, end)
        }
        None => {
            let start = factory.subtract(from.clone(), one(factory)?)?;
            let end = match len {
                Some(len) => {
                    let offset = factory.subtract(from, one(factory)?)?;
                    Some(factory.add(len, offset)?)
                }
                None => None,
            };
            (start, end)
        }
    };

    match end {
        Some(end) => {
            let args = factory.new_argument_list(start, end)?;
            factory.substring(string, args)
        }
        None => factory.substring(string, start),
    }
}

fn one<F: ExpressionFactory + ?Sized>(factory: &F) -> KernelResult<Value> {
    factory.new_literal(Datum::Int64(1), LiteralKind::Number)
}

fn literal_i64(value: &Value) -> Option<i64> {
    value.as_literal().and_then(|lit| lit.value.as_i64())
}
