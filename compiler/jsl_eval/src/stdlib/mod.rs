//! Builtin words.
//!
//! Natives are plain function pointers taking a [`NativeCall`]: the caller's
//! location, the current evaluation stack and the [`Host`] I/O hooks. They
//! pop their operands, push at most one result, and report failures through
//! [`NativeCall::fail`] so the error is pinned to the calling token.
//!
//! A few words (`front`, `back`, `not`, `max`, `min`) are written in JSL
//! itself; see [`prelude`].

mod arithmetic;
mod io;
mod lists;
pub mod prelude;
mod values;

use crate::context::Context;
use crate::environment::Environment;
use crate::errors::{EvalErrorKind, EvalResult, Unwind};
use crate::input::SharedInputProvider;
use crate::print_handler::SharedPrintHandler;
use crate::stack::EvalStack;
use crate::value::{NativeFn, NativeFnPtr, Value};

/// I/O hooks the embedding application supplies.
#[derive(Clone)]
pub struct Host {
    pub print: SharedPrintHandler,
    pub input: SharedInputProvider,
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host").finish_non_exhaustive()
    }
}

/// Everything a native builtin may touch.
pub struct NativeCall<'a> {
    /// Location of the token that invoked the builtin.
    pub context: &'a Context,
    pub stack: &'a mut EvalStack,
    pub host: &'a Host,
}

impl NativeCall<'_> {
    /// Pop an operand, failing with a stack underflow.
    pub fn pop(&mut self) -> EvalResult<Value> {
        self.stack.pop().map_err(|kind| self.fail(kind))
    }

    pub fn try_pop(&mut self) -> Option<Value> {
        self.stack.try_pop()
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.stack.push(value.into());
    }

    /// Build an error at the caller's location.
    pub fn fail(&self, kind: EvalErrorKind) -> Unwind {
        Unwind::error(kind, self.context.clone())
    }

    /// Pop a count operand: a non-negative integer.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(crate) fn pop_count(&mut self, op: &'static str) -> EvalResult<usize> {
        let value = self.pop()?;
        match value {
            Value::Number(n) if n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) => {
                Ok(n as usize)
            }
            other => Err(self.fail(EvalErrorKind::InvalidCount {
                op,
                value: other.describe(),
            })),
        }
    }
}

const NATIVES: &[(&str, NativeFnPtr)] = &[
    // arithmetic and comparison
    ("+", arithmetic::add),
    ("-", arithmetic::sub),
    ("*", arithmetic::mul),
    ("/", arithmetic::div),
    ("%", arithmetic::rem),
    (">", arithmetic::gt),
    ("<", arithmetic::lt),
    ("==", arithmetic::eq),
    ("!=", arithmetic::ne),
    ("&&", arithmetic::and),
    ("||", arithmetic::or),
    // values
    ("asString", values::as_string),
    ("asNumber", values::as_number),
    ("type", values::type_of),
    ("dup", values::dup),
    // lists
    ("push", lists::push),
    ("pop", lists::pop),
    ("index", lists::index),
    ("len", lists::len),
    // io and control
    ("print", io::print),
    ("printm", io::printm),
    ("fmt", io::fmt),
    ("input", io::input),
    ("inputm", io::inputm),
    ("throw", io::throw),
    ("bye", io::bye),
];

/// Bind every native builtin into `env`.
pub fn register_natives(env: &mut Environment) {
    for &(name, func) in NATIVES {
        env.insert(name, Value::Native(NativeFn { name, func }));
    }
}

/// The environment every program starts from: natives plus the prelude.
pub fn standard_environment() -> Environment {
    let mut env = Environment::new();
    register_natives(&mut env);
    prelude::register(&mut env);
    env
}
