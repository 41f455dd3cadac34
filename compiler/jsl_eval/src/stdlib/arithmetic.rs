//! Arithmetic, comparison and logic words.
//!
//! Binary words pop the right operand first, then the left: `a b -` is
//! `a - b`.

use super::NativeCall;
use crate::errors::{EvalErrorKind, EvalResult};
use crate::value::Value;

fn invalid_operands(op: &'static str, left: &Value, right: &Value) -> EvalErrorKind {
    EvalErrorKind::InvalidOperands {
        op,
        left: left.describe(),
        right: right.describe(),
    }
}

fn pop_pair(call: &mut NativeCall<'_>) -> EvalResult<(Value, Value)> {
    let right = call.pop()?;
    let left = call.pop()?;
    Ok((left, right))
}

fn numeric(call: &mut NativeCall<'_>, op: &'static str, apply: fn(f64, f64) -> f64) -> EvalResult<()> {
    let (left, right) = pop_pair(call)?;
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => {
            call.push(apply(a, b));
            Ok(())
        }
        _ => Err(call.fail(invalid_operands(op, &left, &right))),
    }
}

/// Adds numbers; concatenates when either side is a string.
pub(super) fn add(call: &mut NativeCall<'_>) -> EvalResult<()> {
    let (left, right) = pop_pair(call)?;
    if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
        call.push(format!("{left}{right}"));
        return Ok(());
    }
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => {
            call.push(a + b);
            Ok(())
        }
        _ => Err(call.fail(invalid_operands("+", &left, &right))),
    }
}

pub(super) fn sub(call: &mut NativeCall<'_>) -> EvalResult<()> {
    numeric(call, "-", |a, b| a - b)
}

pub(super) fn mul(call: &mut NativeCall<'_>) -> EvalResult<()> {
    numeric(call, "*", |a, b| a * b)
}

pub(super) fn div(call: &mut NativeCall<'_>) -> EvalResult<()> {
    numeric(call, "/", |a, b| a / b)
}

/// Remainder takes the sign of the dividend.
pub(super) fn rem(call: &mut NativeCall<'_>) -> EvalResult<()> {
    numeric(call, "%", |a, b| a % b)
}

fn compare(call: &mut NativeCall<'_>, op: &'static str, greater: bool) -> EvalResult<()> {
    let (left, right) = pop_pair(call)?;
    let result = match (&left, &right) {
        (Value::Str(a), Value::Str(b)) => {
            if greater {
                a > b
            } else {
                a < b
            }
        }
        _ => match (left.as_number(), right.as_number()) {
            (Some(a), Some(b)) => {
                if greater {
                    a > b
                } else {
                    a < b
                }
            }
            _ => return Err(call.fail(invalid_operands(op, &left, &right))),
        },
    };
    call.push(result);
    Ok(())
}

pub(super) fn gt(call: &mut NativeCall<'_>) -> EvalResult<()> {
    compare(call, ">", true)
}

pub(super) fn lt(call: &mut NativeCall<'_>) -> EvalResult<()> {
    compare(call, "<", false)
}

pub(super) fn eq(call: &mut NativeCall<'_>) -> EvalResult<()> {
    let (left, right) = pop_pair(call)?;
    call.push(left.strict_eq(&right));
    Ok(())
}

pub(super) fn ne(call: &mut NativeCall<'_>) -> EvalResult<()> {
    let (left, right) = pop_pair(call)?;
    call.push(!left.strict_eq(&right));
    Ok(())
}

/// Short-circuit style selection: the left operand if it is falsy, otherwise
/// the right one.
pub(super) fn and(call: &mut NativeCall<'_>) -> EvalResult<()> {
    let (left, right) = pop_pair(call)?;
    call.push(if left.is_truthy() { right } else { left });
    Ok(())
}

/// The left operand if it is truthy, otherwise the right one.
pub(super) fn or(call: &mut NativeCall<'_>) -> EvalResult<()> {
    let (left, right) = pop_pair(call)?;
    call.push(if left.is_truthy() { left } else { right });
    Ok(())
}
