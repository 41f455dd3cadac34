//! List and sequence words.
//!
//! `push` and `pop` mutate the list in place; every name bound to the same
//! list observes the change.

use super::NativeCall;
use crate::errors::{EvalErrorKind, EvalResult};
use crate::value::Value;

/// `list value push`: appends and leaves the list on the stack.
pub(super) fn push(call: &mut NativeCall<'_>) -> EvalResult<()> {
    let item = call.pop()?;
    let target = call.pop()?;
    let Value::List(list) = &target else {
        return Err(call.fail(EvalErrorKind::NotAList {
            op: "push",
            value: target.describe(),
        }));
    };
    list.push(item);
    call.push(target);
    Ok(())
}

/// `list pop`: removes and pushes the last element.
pub(super) fn pop(call: &mut NativeCall<'_>) -> EvalResult<()> {
    let target = call.pop()?;
    let Value::List(list) = &target else {
        return Err(call.fail(EvalErrorKind::NotAList {
            op: "pop",
            value: target.describe(),
        }));
    };
    let item = list.pop().ok_or_else(|| {
        call.fail(EvalErrorKind::EmptyList {
            value: target.describe(),
        })
    })?;
    call.push(item);
    Ok(())
}

/// `sequence i index`: element `i` of a list, or character `i` of a string.
/// Negative indices count from the end.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub(super) fn index(call: &mut NativeCall<'_>) -> EvalResult<()> {
    let index = call.pop()?;
    let target = call.pop()?;

    let position = match index {
        Value::Number(n) if n.fract() == 0.0 && n.abs() <= 2f64.powi(53) => n as i64,
        other => {
            return Err(call.fail(EvalErrorKind::InvalidIndex {
                value: other.describe(),
            }))
        }
    };
    let len = match &target {
        Value::List(list) => list.len(),
        Value::Str(text) => text.chars().count(),
        other => {
            return Err(call.fail(EvalErrorKind::NotIndexable {
                value: other.describe(),
            }))
        }
    };

    let resolved = if position < 0 {
        len as i64 + position
    } else {
        position
    };
    if resolved < 0 || resolved >= len as i64 {
        return Err(call.fail(EvalErrorKind::IndexOutOfBounds {
            index: position,
            len,
            value: target.describe(),
        }));
    }
    let resolved = resolved as usize;

    let element = match &target {
        Value::List(list) => list.get(resolved),
        Value::Str(text) => text.chars().nth(resolved).map(|c| Value::from(c.to_string())),
        _ => None,
    };
    match element {
        Some(element) => {
            call.push(element);
            Ok(())
        }
        None => Err(call.fail(EvalErrorKind::IndexOutOfBounds {
            index: position,
            len,
            value: target.describe(),
        })),
    }
}

/// Length of a list, or of a string in characters.
pub(super) fn len(call: &mut NativeCall<'_>) -> EvalResult<()> {
    let target = call.pop()?;
    let len = match &target {
        Value::List(list) => list.len(),
        Value::Str(text) => text.chars().count(),
        other => {
            return Err(call.fail(EvalErrorKind::NoLength {
                value: other.describe(),
            }))
        }
    };
    #[allow(clippy::cast_precision_loss)]
    let len = len as f64;
    call.push(len);
    Ok(())
}
