//! JSL Eval - execution engine for the JSL scripting language.
//!
//! JSL programs are line-oriented: each line is a statement (`var`, `set`,
//! `if`, `func`, `try`, ...) or a postfix expression evaluated on a small
//! value stack, e.g. `"he" 3 dupeStr print`.
//!
//! # Architecture
//!
//! - `expr`: tokenizer and postfix evaluator
//! - `blocks`: pairs block keywords into jump tables before a block runs
//! - `interpreter`: the statement loop, function calls and `try`
//! - `stdlib`: native builtins and the JSL-written prelude
//! - `Context`: location chain used for error messages and stack traces
//! - `Environment`: flat name-to-value bindings, copied per call
//!
//! Evaluation stops early with an [`Unwind`]: a catchable [`EvalError`],
//! a requested exit, or a call depth overflow.

pub mod blocks;
mod context;
mod environment;
pub mod errors;
pub mod expr;
mod input;
pub mod interpreter;
mod print_handler;
mod stack;
pub mod stdlib;
mod value;

pub use blocks::{check_structure, resolve_blocks, JumpTables};
pub use context::{Context, Origin};
pub use environment::{is_valid_identifier, Environment};
pub use errors::{BlockKind, EvalError, EvalErrorKind, EvalResult, Unwind};
pub use expr::{tokenize, Token, TokenKind};
pub use input::{no_input, InputProvider, NoInput, ScriptedInput, SharedInputProvider};
pub use interpreter::{CallMode, Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use jsl_stack::ensure_sufficient_stack;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler,
};
pub use stack::EvalStack;
pub use stdlib::{standard_environment, Host, NativeCall};
pub use value::{format_number, parse_number, JslFunc, ListRef, NativeFn, NativeFnPtr, Value};
