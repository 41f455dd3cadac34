//! Command handlers for the `jsl` CLI.
//!
//! Each submodule implements one command. Handlers return the process exit
//! code instead of exiting, so `main` stays the only place that terminates.

use jsl_eval::{EvalResult, Unwind};

mod check;
mod eval;
mod run;

pub use check::check_file;
pub use eval::eval_expression;
pub use run::{parse_run_options, run_file, run_source, RunOptions};

/// Exit code for a program that finished or called `bye`.
pub const EXIT_OK: i32 = 0;
/// Exit code for an uncaught language error or unreadable input.
pub const EXIT_ERROR: i32 = 1;
/// Exit code for a call depth overflow.
pub const EXIT_FATAL: i32 = 2;

/// Read a file, or report the failure on stderr.
pub fn read_file(path: &str) -> Result<String, i32> {
    std::fs::read_to_string(path).map_err(|e| {
        eprintln!("error reading '{path}': {e}");
        EXIT_ERROR
    })
}

/// Map how a run stopped onto an exit code.
pub fn exit_code(result: &EvalResult<()>) -> i32 {
    match result {
        Ok(()) | Err(Unwind::Exit) => EXIT_OK,
        Err(Unwind::Error(_)) => EXIT_ERROR,
        Err(Unwind::CallDepthExceeded { .. }) => EXIT_FATAL,
    }
}

/// Print the reason a run stopped, if it is worth reporting, and return the
/// matching exit code.
pub fn report(result: &EvalResult<()>) -> i32 {
    match result {
        Ok(()) | Err(Unwind::Exit) => {}
        Err(Unwind::Error(err)) => eprintln!("{err}"),
        Err(fatal @ Unwind::CallDepthExceeded { .. }) => eprintln!("fatal: {fatal}"),
    }
    exit_code(result)
}
