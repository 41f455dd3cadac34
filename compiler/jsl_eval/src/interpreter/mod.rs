//! The interpreter loop.
//!
//! A program, a function body and a `try` body are all run the same way: the
//! lines are resolved into jump tables (see [`crate::blocks`]), then executed
//! one statement at a time against an [`Environment`] owned by that
//! invocation.
//!
//! # Control flow
//!
//! Statements return a [`Flow`]: continue with the next line, resume after a
//! given line, or leave the block with a `return` value. Leaving the taken
//! branch of an `if` or the `catch` clause of a `try` is handled with a
//! one-shot [`Skip`] registered for the line where that branch ends. Arriving
//! at that line consumes the skip, optionally restores a shadowed binding,
//! and resumes after the block's `end`.
//!
//! # Nesting
//!
//! Function calls and `try` bodies recurse into [`Machine::run_block`].
//! Both go through [`Machine::enter`], which counts call depth against the
//! configured limit and grows the native stack when needed.

mod builder;
mod function_call;
mod statements;

use std::rc::Rc;

use jsl_stack::{ensure_sufficient_stack, remaining_stack};
use rustc_hash::FxHashMap;

use crate::blocks::{resolve_blocks, JumpTables};
use crate::context::{Context, Origin};
use crate::environment::Environment;
use crate::errors::{EvalResult, Unwind};
use crate::expr::tokenize;
use crate::print_handler::SharedPrintHandler;
use crate::stdlib::Host;
use crate::value::Value;

pub use builder::InterpreterBuilder;

/// Call depth allowed before evaluation stops with
/// [`Unwind::CallDepthExceeded`].
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// What kind of block a loop invocation runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallMode {
    /// The program itself.
    TopLevel,
    /// Body of a `func`; `return` is allowed.
    FunctionBody,
    /// Body of a `try`.
    TryBody,
}

/// Per-run state shared by every nested block: host hooks and call depth.
#[derive(Debug)]
pub struct Machine {
    pub(crate) host: Host,
    max_call_depth: usize,
    depth: usize,
}

/// Binding to put back when a skip fires.
#[derive(Debug)]
struct Restore {
    name: String,
    previous: Option<Value>,
}

impl Restore {
    fn apply(self, env: &mut Environment) {
        match self.previous {
            Some(value) => {
                env.insert(self.name, value);
            }
            None => {
                env.remove(&self.name);
            }
        }
    }
}

/// One-shot jump registered for the line that ends a taken branch.
#[derive(Debug)]
struct Skip {
    resume_after: usize,
    restore: Option<Restore>,
}

/// Outcome of one statement.
#[derive(Debug)]
enum Flow {
    Next,
    /// Continue with the line after this index.
    ResumeAfter(usize),
    Return(Option<Value>),
}

/// State of one loop invocation.
struct Block<'src> {
    lines: Vec<&'src str>,
    jumps: JumpTables,
    skips: FxHashMap<usize, Skip>,
    parent: Option<Rc<Context>>,
    mode: CallMode,
    /// Line of `lines[0]`, counted through `origin`.
    base: usize,
    origin: Origin,
}

impl Block<'_> {
    /// Frame for a statement-level error on line `ln`.
    fn context(&self, ln: usize) -> Context {
        Context::at(self.base + ln, self.parent.clone()).within(self.origin)
    }

    /// Put back every `catch` binding still in force, innermost first.
    fn restore_pending(&mut self, env: &mut Environment) {
        let mut pending: Vec<(usize, Skip)> = self.skips.drain().collect();
        pending.sort_unstable_by_key(|&(line, _)| line);
        for (_, skip) in pending {
            if let Some(restore) = skip.restore {
                restore.apply(env);
            }
        }
    }
}

impl Machine {
    pub fn new(host: Host, max_call_depth: usize) -> Self {
        Machine {
            host,
            max_call_depth,
            depth: 0,
        }
    }

    /// Current nesting of function calls and `try` bodies.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Run `f` one level deeper, failing if the depth limit is reached.
    fn enter<R>(&mut self, f: impl FnOnce(&mut Self) -> EvalResult<R>) -> EvalResult<R> {
        if self.depth >= self.max_call_depth {
            tracing::debug!(
                limit = self.max_call_depth,
                remaining_stack = ?remaining_stack(),
                "call depth exceeded"
            );
            return Err(Unwind::CallDepthExceeded {
                limit: self.max_call_depth,
            });
        }
        self.depth += 1;
        tracing::trace!(depth = self.depth, remaining_stack = ?remaining_stack(), "enter");
        let result = ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
        result
    }

    /// Execute `source` against `env`.
    ///
    /// `parent` becomes the parent frame of every error raised here, and
    /// `base` is the line of `source[0]` within `origin`. Returns the value of a
    /// `return` statement, if one ran.
    pub(crate) fn run_block<S: AsRef<str>>(
        &mut self,
        source: &[S],
        env: &mut Environment,
        parent: Option<Rc<Context>>,
        mode: CallMode,
        base: usize,
        origin: Origin,
    ) -> EvalResult<Option<Value>> {
        let mut lines: Vec<&str> = source.iter().map(|line| line.as_ref().trim()).collect();
        let jumps = resolve_blocks(&mut lines).map_err(|err| {
            Unwind::error(
                err.kind,
                Context::at(base + err.line, parent.clone()).within(origin),
            )
        })?;
        let mut block = Block {
            lines,
            jumps,
            skips: FxHashMap::default(),
            parent,
            mode,
            base,
            origin,
        };

        let mut ln = 0;
        while ln < block.lines.len() {
            if let Some(skip) = block.skips.remove(&ln) {
                if let Some(restore) = skip.restore {
                    restore.apply(env);
                }
                ln = skip.resume_after + 1;
                continue;
            }

            let line = block.lines[ln];
            if line.is_empty() || line.starts_with(';') {
                ln += 1;
                continue;
            }

            tracing::trace!(line = base + ln + 1, statement = line, "statement");
            let flow = match self.exec_statement(&mut block, env, ln, line) {
                Ok(flow) => flow,
                Err(unwind) => {
                    block.restore_pending(env);
                    return Err(unwind);
                }
            };
            match flow {
                Flow::Next => ln += 1,
                Flow::ResumeAfter(target) => ln = target + 1,
                Flow::Return(value) => return Ok(value),
            }
        }
        Ok(None)
    }
}

/// A JSL interpreter with its global environment.
///
/// Globals persist across [`run`](Self::run) and [`eval`](Self::eval) calls,
/// so a host can run a program and then inspect or extend what it defined.
///
/// ```
/// use jsl_eval::{buffer_handler, Interpreter};
///
/// let output = buffer_handler();
/// let mut interpreter = Interpreter::builder()
///     .print_handler(output.clone())
///     .build();
/// interpreter.run("var greeting = \"hello world\"").unwrap();
/// interpreter.run("greeting print").unwrap();
/// assert_eq!(output.get_output(), "hello world\n");
/// ```
#[derive(Debug)]
pub struct Interpreter {
    globals: Environment,
    machine: Machine,
}

impl Interpreter {
    /// Interpreter with the standard environment, printing to stdout and
    /// without an input source.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Run a whole program against the globals.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self, source: &str) -> EvalResult<()> {
        let lines: Vec<&str> = source.lines().collect();
        self.machine
            .run_block(
                &lines,
                &mut self.globals,
                None,
                CallMode::TopLevel,
                0,
                Origin::Program,
            )?;
        Ok(())
    }

    /// Evaluate one expression against the globals.
    pub fn eval(&mut self, expression: &str) -> EvalResult<Option<Value>> {
        let mut ctx = Context::new(0, Some(1), None);
        let tokens = tokenize(expression).map_err(|err| {
            ctx.column = Some(err.column);
            Unwind::error(err.kind, ctx.clone())
        })?;
        self.machine.eval_tokens(&tokens, &self.globals, &mut ctx)
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    pub fn globals_mut(&mut self) -> &mut Environment {
        &mut self.globals
    }

    /// Look up a global binding.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.machine.host.print
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
