use std::sync::Arc;

use jsl_eval::stdlib::register_natives;
use jsl_eval::{
    stdout_handler, Environment, EvalResult, Interpreter, SharedInputProvider,
    SharedPrintHandler, DEFAULT_MAX_CALL_DEPTH,
};

use super::{read_file, report};
use crate::StdinInput;

/// Options accepted by `jsl run`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Nested call limit before the run is aborted.
    pub max_call_depth: usize,
    /// Register `front`, `back`, `not`, `max` and `min`.
    pub prelude: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            prelude: true,
        }
    }
}

/// Split `run` arguments into the file path and options.
///
/// Accepts `--max-depth=N` and `--no-prelude` in any position. Exactly one
/// positional argument (the file) is required.
pub fn parse_run_options(args: &[String]) -> Result<(String, RunOptions), String> {
    let mut options = RunOptions::default();
    let mut path = None;

    for arg in args {
        if let Some(depth) = arg.strip_prefix("--max-depth=") {
            options.max_call_depth = match depth.parse::<usize>() {
                Ok(depth) if depth > 0 => depth,
                _ => return Err(format!("invalid --max-depth value '{depth}'")),
            };
        } else if arg == "--no-prelude" {
            options.prelude = false;
        } else if arg.starts_with("--") {
            return Err(format!("unknown option '{arg}'"));
        } else if path.is_some() {
            return Err(format!("unexpected argument '{arg}'"));
        } else {
            path = Some(arg.clone());
        }
    }

    path.map(|path| (path, options))
        .ok_or_else(|| "missing file argument".to_string())
}

/// Run `source` with the given options and host capabilities.
pub fn run_source(
    source: &str,
    options: &RunOptions,
    print: SharedPrintHandler,
    input: SharedInputProvider,
) -> EvalResult<()> {
    let mut builder = Interpreter::builder()
        .print_handler(print)
        .input_provider(input)
        .max_call_depth(options.max_call_depth);
    if !options.prelude {
        let mut env = Environment::new();
        register_natives(&mut env);
        builder = builder.env(env);
    }
    builder.build().run(source)
}

/// `jsl run <file>`: execute a program against stdout and stdin.
pub fn run_file(path: &str, options: &RunOptions) -> i32 {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(code) => return code,
    };
    tracing::debug!(path, ?options, "running program");
    let result = run_source(&source, options, stdout_handler(), Arc::new(StdinInput));
    report(&result)
}
