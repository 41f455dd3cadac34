//! Conversion and inspection words.

use super::NativeCall;
use crate::errors::{EvalErrorKind, EvalResult};
use crate::value::{parse_number, Value};

pub(super) fn as_string(call: &mut NativeCall<'_>) -> EvalResult<()> {
    let value = call.pop()?;
    call.push(value.to_string());
    Ok(())
}

/// Numbers pass through, booleans become 0/1, strings must hold a number
/// literal (surrounding whitespace allowed).
pub(super) fn as_number(call: &mut NativeCall<'_>) -> EvalResult<()> {
    let value = call.pop()?;
    let number = match &value {
        Value::Str(text) => parse_number(text.trim()),
        other => other.as_number(),
    };
    match number {
        Some(n) => {
            call.push(n);
            Ok(())
        }
        None => Err(call.fail(EvalErrorKind::ConversionError {
            value: value.describe(),
        })),
    }
}

pub(super) fn type_of(call: &mut NativeCall<'_>) -> EvalResult<()> {
    let value = call.pop()?;
    call.push(value.type_name());
    Ok(())
}

pub(super) fn dup(call: &mut NativeCall<'_>) -> EvalResult<()> {
    let value = call.pop()?;
    call.push(value.clone());
    call.push(value);
    Ok(())
}
