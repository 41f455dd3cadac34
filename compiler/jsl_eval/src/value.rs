//! Runtime values.
//!
//! [`Value`] is a closed sum type: every builtin matches on it exhaustively
//! instead of probing capabilities at runtime.
//!
//! # Sharing
//!
//! Scalars and strings are copied freely (strings are `Rc<str>`, so a copy is
//! a reference-count bump). Lists are shared by reference through
//! [`ListRef`]: cloning a list value, binding it to a second name, or handing
//! it to a callee whose environment is a clone of the caller's all see the
//! same underlying sequence, and `push`/`pop` mutate it in place.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::context::Origin;
use crate::errors::EvalResult;
use crate::stdlib::NativeCall;

/// A host-provided builtin.
pub type NativeFnPtr = fn(&mut NativeCall<'_>) -> EvalResult<()>;

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    /// Double-precision number.
    Number(f64),
    /// Immutable text.
    Str(Rc<str>),
    /// Boolean.
    Bool(bool),
    /// Mutable sequence shared by reference.
    List(ListRef),
    /// Function defined in JSL with `func`.
    Function(Rc<JslFunc>),
    /// Builtin implemented by the host.
    Native(NativeFn),
}

impl Value {
    pub fn str(text: impl Into<Rc<str>>) -> Self {
        Value::Str(text.into())
    }

    /// A new list holding `items`.
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(ListRef::new(items))
    }

    /// Type name reported by the `type` builtin and in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::List(_) => "list",
            Value::Function(_) => "function",
            Value::Native(_) => "builtin",
        }
    }

    /// `false`, `0`, `NaN` and `""` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
            Value::List(_) | Value::Function(_) | Value::Native(_) => true,
        }
    }

    /// Numeric view for arithmetic: numbers as-is, booleans as 0/1.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Str(_) | Value::List(_) | Value::Function(_) | Value::Native(_) => None,
        }
    }

    /// Value and type, for error messages: `"abc" (string)`, `1,2 (list)`.
    pub fn describe(&self) -> String {
        match self {
            Value::Str(s) => format!("\"{s}\" (string)"),
            Value::List(list) if list.is_empty() => "[] (list)".to_string(),
            other => format!("{other} ({})", other.type_name()),
        }
    }

    /// Strict equality: same kind and same value, or same reference for
    /// lists and functions.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::List(a), Value::List(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_eq(other)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s.into())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, &mut Vec::new())
    }
}

/// Lists render as their elements joined with `,`. A list reached again while
/// it is being rendered renders as nothing, so cyclic lists terminate.
fn write_value(
    f: &mut fmt::Formatter<'_>,
    value: &Value,
    open: &mut Vec<*const RefCell<Vec<Value>>>,
) -> fmt::Result {
    match value {
        Value::Number(n) => f.write_str(&format_number(*n)),
        Value::Str(s) => f.write_str(s),
        Value::Bool(b) => write!(f, "{b}"),
        Value::List(list) => {
            let ptr = list.as_ptr();
            if open.contains(&ptr) {
                return Ok(());
            }
            open.push(ptr);
            for (i, item) in list.borrow().iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write_value(f, item, open)?;
            }
            open.pop();
            Ok(())
        }
        Value::Function(func) => write!(f, "<func {}/{}>", func.name, func.arity),
        Value::Native(native) => write!(f, "<builtin {}>", native.name),
    }
}

/// Render a number the way the language prints it.
///
/// Integral values print without a fraction, `-0` prints `0`, and the
/// non-finite values print `NaN`, `Infinity` and `-Infinity`. Magnitudes of
/// `1e21` and above, or below `1e-6`, print in exponent form (`1e+21`,
/// `1.5e-7`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        (if n > 0.0 { "Infinity" } else { "-Infinity" }).to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let text = format!("{n:e}");
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        }
    } else if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}

/// Parse a token as a number, if it is one.
///
/// Accepts signed decimal integers and floats (with exponent, leading or
/// trailing dot), `Infinity` with an optional sign, and unsigned `0x`, `0o`
/// and `0b` literals. `NaN` and `inf` are not numbers.
pub fn parse_number(token: &str) -> Option<f64> {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    if unsigned == "Infinity" {
        return Some(if token.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    if unsigned.len() == token.len() {
        for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
            if let Some(digits) = token.strip_prefix(prefix) {
                return parse_radix(digits, radix);
            }
        }
    }

    let well_formed = !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !well_formed {
        return None;
    }
    token.parse::<f64>().ok()
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// Reference-shared list storage.
///
/// Cloning a `ListRef` clones the reference, never the elements.
#[derive(Clone, Default)]
pub struct ListRef(Rc<RefCell<Vec<Value>>>);

impl ListRef {
    pub fn new(items: Vec<Value>) -> Self {
        ListRef(Rc::new(RefCell::new(items)))
    }

    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    pub fn pop(&self) -> Option<Value> {
        self.0.borrow_mut().pop()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Copy of the current elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// Whether both handles point at the same list.
    pub fn ptr_eq(&self, other: &ListRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn as_ptr(&self) -> *const RefCell<Vec<Value>> {
        Rc::as_ptr(&self.0)
    }
}

impl fmt::Debug for ListRef {
    // Elements are not printed: a list may contain itself.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListRef").field("len", &self.len()).finish()
    }
}

/// A function defined in JSL.
///
/// There is no captured environment: a call runs the body against a fresh
/// copy of the caller's environment at call time.
#[derive(Debug)]
pub struct JslFunc {
    pub name: String,
    /// Number of values popped from the caller's stack into `$1..$N`.
    pub arity: usize,
    /// Lines strictly between `func` and its `end`.
    pub body: Rc<[String]>,
    /// Line of the first body line within `origin`, for stack traces.
    pub first_line: usize,
    pub origin: Origin,
}

/// A builtin implemented in Rust.
#[derive(Clone, Copy)]
pub struct NativeFn {
    pub name: &'static str,
    pub func: NativeFnPtr,
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NativeFn").field(&self.name).finish()
    }
}
