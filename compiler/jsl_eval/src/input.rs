//! Input capability.
//!
//! The `input` and `inputm` builtins ask an [`InputProvider`] for a line of
//! text. The engine ships providers that never touch the terminal; the `jsl`
//! binary supplies one backed by stdin.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

/// Source of interactive input.
pub trait InputProvider: Send + Sync {
    /// Ask for one line of input, optionally showing `prompt`.
    ///
    /// `None` means no input is available (end of input, or the host has no
    /// way to ask).
    fn request_input(&self, prompt: Option<&str>) -> Option<String>;
}

/// Shared input provider handle.
pub type SharedInputProvider = Arc<dyn InputProvider>;

/// Provider with no input at all.
#[derive(Debug, Default)]
pub struct NoInput;

impl InputProvider for NoInput {
    fn request_input(&self, _prompt: Option<&str>) -> Option<String> {
        None
    }
}

/// Provider that answers from a fixed queue and records every prompt.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<Option<String>>>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedInput {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, in order.
    pub fn prompts(&self) -> Vec<Option<String>> {
        self.prompts.lock().clone()
    }
}

impl InputProvider for ScriptedInput {
    fn request_input(&self, prompt: Option<&str>) -> Option<String> {
        self.prompts.lock().push(prompt.map(str::to_string));
        self.answers.lock().pop_front()
    }
}

/// Create a provider with no input.
pub fn no_input() -> SharedInputProvider {
    Arc::new(NoInput)
}
