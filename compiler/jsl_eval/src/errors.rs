//! Error and unwind types for the engine.
//!
//! Evaluation can stop early for three unrelated reasons, modelled by
//! [`Unwind`]:
//!
//! - [`Unwind::Error`]: a language-level failure ([`EvalError`]). This is the
//!   only case a `try` block intercepts.
//! - [`Unwind::Exit`]: the `bye` builtin asked to end the run. Not an error.
//! - [`Unwind::CallDepthExceeded`]: runaway recursion hit the configured call
//!   depth. Resource exhaustion, never catchable.
//!
//! `EvalErrorKind` carries structured data for each failure; its `Display`
//! produces the message text that appears after the location prefix.

use std::fmt;

use crate::context::Context;

/// Result of evaluating something that may unwind.
pub type EvalResult<T> = Result<T, Unwind>;

/// Kind of structured block, used in block-structure diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    If,
    Func,
    Try,
    Comment,
}

impl BlockKind {
    /// Human-readable name used in messages.
    pub fn describe(self) -> &'static str {
        match self {
            BlockKind::If => "if statement",
            BlockKind::Func => "function",
            BlockKind::Try => "try block",
            BlockKind::Comment => "block comment",
        }
    }

    /// Line that must close a block of this kind.
    pub fn closer(self) -> &'static str {
        match self {
            BlockKind::Comment => "*/",
            BlockKind::If | BlockKind::Func | BlockKind::Try => "end",
        }
    }
}

/// Typed error category.
///
/// Values that appear in messages are stored pre-rendered (see
/// `Value::describe`) so the kind stays independent of the value model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Evaluation stack
    StackUnderflow,
    ExcessStackValues,

    // Tokens
    UnknownWord {
        word: String,
    },
    MalformedLiteral {
        literal: String,
    },

    // Statements
    MalformedStatement {
        expected: &'static str,
    },
    EmptyIdentifier,
    InvalidIdentifier {
        name: String,
    },
    AlreadyDefined {
        name: String,
    },
    Undefined {
        action: &'static str,
        name: String,
    },
    NoValue {
        name: String,
    },
    EmptyCondition,
    EmptyFunctionName,
    InvalidArity {
        arity: String,
    },
    ReturnOutsideFunction,

    // Builtins
    InvalidOperands {
        op: &'static str,
        left: String,
        right: String,
    },
    ConversionError {
        value: String,
    },
    NotAList {
        op: &'static str,
        value: String,
    },
    NotIndexable {
        value: String,
    },
    NoLength {
        value: String,
    },
    InvalidIndex {
        value: String,
    },
    IndexOutOfBounds {
        index: i64,
        len: usize,
        value: String,
    },
    EmptyList {
        value: String,
    },
    InvalidCount {
        op: &'static str,
        value: String,
    },
    InputUnavailable,
    Thrown {
        message: String,
    },

    // Block structure
    UnexpectedKeyword {
        keyword: &'static str,
        outside: &'static str,
    },
    DuplicateClause {
        keyword: &'static str,
        block: BlockKind,
    },
    UnclosedBlock {
        block: BlockKind,
    },
    TryWithoutCatch,
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Evaluation stack
            Self::StackUnderflow => write!(f, "stack underflow"),
            Self::ExcessStackValues => write!(
                f,
                "evaluation stack has more than one value at the end of the expression"
            ),

            // Tokens
            Self::UnknownWord { word } => write!(f, "unknown word '{word}'"),
            Self::MalformedLiteral { literal } => {
                write!(f, "unterminated string literal '{literal}'")
            }

            // Statements
            Self::MalformedStatement { expected } => write!(f, "expected '{expected}'"),
            Self::EmptyIdentifier => write!(f, "identifiers cannot be empty"),
            Self::InvalidIdentifier { name } => write!(f, "invalid identifier '{name}'"),
            Self::AlreadyDefined { name } => write!(
                f,
                "cannot create variable '{name}' as it already exists"
            ),
            Self::Undefined { action, name } => {
                write!(f, "cannot {action} variable '{name}' as it doesn't exist")
            }
            Self::NoValue { name } => {
                write!(f, "expression assigned to '{name}' produced no value")
            }
            Self::EmptyCondition => write!(f, "if conditions cannot be empty"),
            Self::EmptyFunctionName => write!(f, "function names cannot be empty"),
            Self::InvalidArity { arity } => write!(
                f,
                "'{arity}' is not a valid amount of arguments (it must be an integer greater than or equal to 0)"
            ),
            Self::ReturnOutsideFunction => write!(f, "cannot return outside of function"),

            // Builtins
            Self::InvalidOperands { op, left, right } => {
                write!(f, "cannot apply '{op}' to {left} and {right}")
            }
            Self::ConversionError { value } => {
                write!(f, "cannot convert {value} into a number")
            }
            Self::NotAList { op, value } => write!(f, "'{op}' expects a list, got {value}"),
            Self::NotIndexable { value } => write!(f, "cannot index into {value}"),
            Self::NoLength { value } => write!(f, "cannot take the length of {value}"),
            Self::InvalidIndex { value } => write!(f, "index must be an integer, got {value}"),
            Self::IndexOutOfBounds { index, len, value } => {
                write!(f, "index {index} out of bounds for {value} of length {len}")
            }
            Self::EmptyList { value } => write!(f, "cannot pop from {value} as it is empty"),
            Self::InvalidCount { op, value } => write!(
                f,
                "'{op}' expects a non-negative integer count, got {value}"
            ),
            Self::InputUnavailable => write!(f, "no input available"),
            Self::Thrown { message } => f.write_str(message),

            // Block structure
            Self::UnexpectedKeyword { keyword, outside } => {
                write!(f, "unexpected '{keyword}' outside of {outside}")
            }
            Self::DuplicateClause { keyword, block } => {
                write!(f, "duplicate '{keyword}' in {}", block.describe())
            }
            Self::UnclosedBlock { block } => write!(
                f,
                "expected '{}' to close {}",
                block.closer(),
                block.describe()
            ),
            Self::TryWithoutCatch => write!(f, "try-catch blocks must always have a catch"),
        }
    }
}

/// A catchable language-level failure pinned to a location chain.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub context: Context,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind, context: Context) -> Self {
        EvalError { kind, context }
    }

    /// The full rendered error: location, message and stack trace.
    pub fn message(&self) -> String {
        self.context.format(Some(&self.kind.to_string()))
    }

    /// The message without location prefix or stack trace.
    ///
    /// This is the first line of [`message`](Self::message) with the leading
    /// `error on line L[, col C]: ` removed, and is what `catch NAME` binds.
    pub fn primary_message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for EvalError {}

/// Why evaluation stopped before completing normally.
#[derive(Debug, thiserror::Error)]
pub enum Unwind {
    /// Language-level failure; intercepted by `try`.
    #[error(transparent)]
    Error(#[from] EvalError),
    /// Deliberate termination requested by `bye`.
    #[error("exit requested")]
    Exit,
    /// Nested calls exceeded the configured limit.
    #[error("maximum call depth exceeded (limit: {limit})")]
    CallDepthExceeded { limit: usize },
}

impl Unwind {
    /// Build an [`Unwind::Error`] at `context`.
    pub fn error(kind: EvalErrorKind, context: Context) -> Self {
        Unwind::Error(EvalError::new(kind, context))
    }

    /// Whether `try` may intercept this unwind.
    pub fn is_catchable(&self) -> bool {
        matches!(self, Unwind::Error(_))
    }
}
