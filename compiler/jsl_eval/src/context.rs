//! Location records for stack traces.
//!
//! A [`Context`] names one position in the program (line and, inside an
//! expression, column). Descending into an expression, a function body or a
//! `try` block creates a child context whose parent is the caller's position,
//! so an error carries the whole chain and can render a synthetic stack trace:
//!
//! ```text
//! error on line 4, col 9: stack underflow
//! stacktrace:
//! error on line 12, col 7
//! ```
//!
//! Lines inside a prelude function count from the top of its body and say so:
//! `error in prelude 'front' on line 4, col 17`.

use std::fmt::Write;
use std::rc::Rc;

/// The text a frame's line number counts through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Origin {
    /// The program being run.
    #[default]
    Program,
    /// The body of the named prelude function.
    Prelude(&'static str),
}

/// One frame of the location chain.
///
/// Contexts are immutable once shared: parents are held through `Rc` and never
/// modified. Only the evaluator's own working frame is mutated, to advance the
/// column while it consumes tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Context {
    /// Zero-based line within `origin`. Rendered one-based.
    pub line: usize,
    /// One-based column within the line, when known.
    pub column: Option<usize>,
    /// The frame that descended into this one.
    pub parent: Option<Rc<Context>>,
    pub origin: Origin,
}

impl Context {
    pub fn new(line: usize, column: Option<usize>, parent: Option<Rc<Context>>) -> Self {
        Context {
            line,
            column,
            parent,
            origin: Origin::Program,
        }
    }

    /// This frame, with its line counted through `origin`.
    #[must_use]
    pub fn within(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// Outermost frame of a run: line 0, no column, no parent.
    pub fn root() -> Self {
        Context::new(0, None, None)
    }

    /// Frame for `line` with no column, below `parent`.
    pub fn at(line: usize, parent: Option<Rc<Context>>) -> Self {
        Context::new(line, None, parent)
    }

    /// Freeze a copy of this frame so children can point at it.
    pub fn snapshot(&self) -> Rc<Context> {
        Rc::new(self.clone())
    }

    /// Number of frames in the chain, this one included.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut parent = self.parent.as_deref();
        while let Some(frame) = parent {
            depth += 1;
            parent = frame.parent.as_deref();
        }
        depth
    }

    /// Render this frame and every parent beneath it.
    ///
    /// Only the innermost frame carries `message`. Walks the chain once.
    pub fn format(&self, message: Option<&str>) -> String {
        let mut out = String::new();
        self.write_frame(&mut out, message);
        let mut parent = self.parent.as_deref();
        while let Some(frame) = parent {
            out.push_str("\nstacktrace:\n");
            frame.write_frame(&mut out, None);
            parent = frame.parent.as_deref();
        }
        out
    }

    fn write_frame(&self, out: &mut String, message: Option<&str>) {
        // Writing into a String cannot fail.
        let _ = match self.origin {
            Origin::Program => write!(out, "error on line {}", self.line + 1),
            Origin::Prelude(name) => {
                write!(out, "error in prelude '{name}' on line {}", self.line + 1)
            }
        };
        if let Some(column) = self.column {
            let _ = write!(out, ", col {column}");
        }
        if let Some(message) = message {
            out.push_str(": ");
            out.push_str(message);
        }
    }
}

impl Drop for Context {
    // Unlink uniquely owned parents iteratively; deep recursion builds chains
    // as long as the call depth limit.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(frame) = next {
            match Rc::try_unwrap(frame) {
                Ok(mut owned) => next = owned.parent.take(),
                Err(_) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests;
