//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use super::{Interpreter, Machine, DEFAULT_MAX_CALL_DEPTH};
use crate::environment::Environment;
use crate::input::{no_input, SharedInputProvider};
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::stdlib::{standard_environment, Host};

/// Builder for creating Interpreter instances.
///
/// Everything is optional: by default the interpreter starts from the
/// standard environment, prints to stdout, has no input source and allows
/// [`DEFAULT_MAX_CALL_DEPTH`] nested calls.
pub struct InterpreterBuilder {
    env: Option<Environment>,
    print_handler: Option<SharedPrintHandler>,
    input_provider: Option<SharedInputProvider>,
    max_call_depth: usize,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            env: None,
            print_handler: None,
            input_provider: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Start from `env` instead of the standard environment.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Set the print handler for `print` and `printm`.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set the input source for `input` and `inputm`.
    #[must_use]
    pub fn input_provider(mut self, provider: SharedInputProvider) -> Self {
        self.input_provider = Some(provider);
        self
    }

    /// Limit on nested function calls and `try` bodies.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter {
        let host = Host {
            print: self.print_handler.unwrap_or_else(stdout_handler),
            input: self.input_provider.unwrap_or_else(no_input),
        };
        Interpreter {
            globals: self.env.unwrap_or_else(standard_environment),
            machine: Machine::new(host, self.max_call_depth),
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
