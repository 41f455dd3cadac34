//! Output, input and control words.

use super::NativeCall;
use crate::errors::{EvalErrorKind, EvalResult, Unwind};

/// Prints the top value. An empty stack prints `undefined`.
pub(super) fn print(call: &mut NativeCall<'_>) -> EvalResult<()> {
    let text = call
        .try_pop()
        .map_or_else(|| "undefined".to_string(), |value| value.to_string());
    call.host.print.println(&text);
    Ok(())
}

/// `... n printm`: prints `n` values on one line, most recently pushed first.
pub(super) fn printm(call: &mut NativeCall<'_>) -> EvalResult<()> {
    let count = call.pop_count("printm")?;
    let mut parts = Vec::with_capacity(count);
    for _ in 0..count {
        parts.push(call.pop()?.to_string());
    }
    call.host.print.println(&parts.join(" "));
    Ok(())
}

/// `... "template" fmt`: fills each `{}` with successive popped values.
pub(super) fn fmt(call: &mut NativeCall<'_>) -> EvalResult<()> {
    let template = call.pop()?.to_string();
    let slots = count_occurrences(&template, "{}");
    let mut fills = Vec::with_capacity(slots);
    for _ in 0..slots {
        fills.push(call.pop()?.to_string());
    }

    let mut fills = fills.into_iter();
    let mut out = String::with_capacity(template.len());
    for (i, piece) in template.split("{}").enumerate() {
        if i > 0 {
            out.extend(fills.next());
        }
        out.push_str(piece);
    }
    call.push(out);
    Ok(())
}

/// Non-overlapping occurrences of `needle` in `haystack`.
pub(crate) fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

pub(super) fn input(call: &mut NativeCall<'_>) -> EvalResult<()> {
    let line = call
        .host
        .input
        .request_input(None)
        .ok_or_else(|| call.fail(EvalErrorKind::InputUnavailable))?;
    call.push(line);
    Ok(())
}

/// Like `input`, showing the popped value as a prompt.
pub(super) fn inputm(call: &mut NativeCall<'_>) -> EvalResult<()> {
    let prompt = call.pop()?.to_string();
    let line = call
        .host
        .input
        .request_input(Some(&prompt))
        .ok_or_else(|| call.fail(EvalErrorKind::InputUnavailable))?;
    call.push(line);
    Ok(())
}

/// Raises a catchable error whose message is the popped value's text.
pub(super) fn throw(call: &mut NativeCall<'_>) -> EvalResult<()> {
    let message = call.pop()?.to_string();
    Err(call.fail(EvalErrorKind::Thrown { message }))
}

/// Ends the whole run. Not an error, and `try` does not intercept it.
pub(super) fn bye(_call: &mut NativeCall<'_>) -> EvalResult<()> {
    Err(Unwind::Exit)
}
