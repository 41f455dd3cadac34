//! The evaluation stack.
//!
//! One [`EvalStack`] exists per expression evaluation and is dropped when the
//! expression finishes; stacks are never shared between expressions.

use crate::errors::EvalErrorKind;
use crate::value::Value;

/// LIFO value container with underflow detection.
#[derive(Debug, Default)]
pub struct EvalStack {
    values: Vec<Value>,
}

impl EvalStack {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Remove the top value, failing with `StackUnderflow` when empty.
    #[inline]
    pub fn pop(&mut self) -> Result<Value, EvalErrorKind> {
        self.values.pop().ok_or(EvalErrorKind::StackUnderflow)
    }

    /// Remove the top value, if any.
    #[inline]
    pub fn try_pop(&mut self) -> Option<Value> {
        self.values.pop()
    }

    /// Look at the top value, failing with `StackUnderflow` when empty.
    #[inline]
    pub fn peek(&self) -> Result<&Value, EvalErrorKind> {
        self.values.last().ok_or(EvalErrorKind::StackUnderflow)
    }

    /// Look at the top value, if any.
    #[inline]
    pub fn try_peek(&self) -> Option<&Value> {
        self.values.last()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }
}
