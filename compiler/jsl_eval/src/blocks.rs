//! Block structure resolution.
//!
//! Before a block of lines runs, one pass pairs every `if`, `func` and `try`
//! with its `else`/`catch` and `end`, and blanks out block comments. The
//! interpreter loop then jumps through the resulting [`JumpTables`] instead of
//! scanning for matching keywords at run time.
//!
//! Lines are expected to be trimmed. Keywords are recognised by prefix:
//!
//! | Line                  | Effect                         |
//! |-----------------------|--------------------------------|
//! | `if` / `if ...`       | opens an if statement          |
//! | `func` / `func ...`   | opens a function               |
//! | `try`                 | opens a try block              |
//! | `else`                | clause of the innermost if     |
//! | `catch` / `catch ...` | clause of the innermost try    |
//! | `end`                 | closes the innermost block     |
//! | `/* ...`              | opens a (nestable) comment     |
//! | `... */`              | closes the innermost comment   |

use rustc_hash::FxHashMap;

use crate::context::Context;
use crate::errors::{BlockKind, EvalError, EvalErrorKind};

/// Line-index pairings for one block of lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JumpTables {
    /// `if` line to its `else` line.
    pub if_else: FxHashMap<usize, usize>,
    /// `if` line to its `end` line.
    pub if_end: FxHashMap<usize, usize>,
    /// `else` line to the `end` of its if statement.
    pub else_end: FxHashMap<usize, usize>,
    /// `func` line to its `end` line.
    pub func_end: FxHashMap<usize, usize>,
    /// `try` line to its `catch` line.
    pub try_catch: FxHashMap<usize, usize>,
    /// `catch` line to the `end` of its try block.
    pub catch_end: FxHashMap<usize, usize>,
}

/// A structural error at a zero-based line index.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockError {
    pub line: usize,
    pub kind: EvalErrorKind,
}

impl BlockError {
    fn new(line: usize, kind: EvalErrorKind) -> Self {
        BlockError { line, kind }
    }
}

#[derive(Clone, Copy, Debug)]
enum Open {
    If { line: usize, else_line: Option<usize> },
    Func { line: usize },
    Try { line: usize, catch_line: Option<usize> },
    Comment { line: usize },
}

impl Open {
    fn line(self) -> usize {
        match self {
            Open::If { line, .. }
            | Open::Func { line }
            | Open::Try { line, .. }
            | Open::Comment { line } => line,
        }
    }

    fn kind(self) -> BlockKind {
        match self {
            Open::If { .. } => BlockKind::If,
            Open::Func { .. } => BlockKind::Func,
            Open::Try { .. } => BlockKind::Try,
            Open::Comment { .. } => BlockKind::Comment,
        }
    }
}

fn opens_comment(line: &str) -> bool {
    line.starts_with("/*")
}

fn closes_comment(line: &str) -> bool {
    line.ends_with("*/")
}

/// `keyword` alone or followed by a space.
fn opens_with(line: &str, keyword: &str) -> bool {
    line.strip_prefix(keyword)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(' '))
}

fn is_catch(line: &str) -> bool {
    opens_with(line, "catch")
}

/// Pair block keywords in `lines` and blank out comment lines in place.
///
/// Fails on the first structural problem: a clause or `end` with nothing to
/// attach to, a duplicate `else`/`catch`, a `try` closed without `catch`, or
/// a block still open at the end of the lines (reported at its opening line).
#[tracing::instrument(level = "trace", skip_all, fields(lines = lines.len()))]
pub fn resolve_blocks(lines: &mut [&str]) -> Result<JumpTables, BlockError> {
    let mut tables = JumpTables::default();
    let mut open: Vec<Open> = Vec::new();

    for index in 0..lines.len() {
        let line: &str = lines[index];
        let line = line.trim();
        let in_comment = matches!(open.last(), Some(Open::Comment { .. }));

        // A line that opens and closes a comment by itself.
        if opens_comment(line) && line.len() >= 4 && closes_comment(line) {
            if !in_comment {
                lines[index] = "";
            }
            continue;
        }
        if opens_comment(line) {
            open.push(Open::Comment { line: index });
            continue;
        }
        if closes_comment(line) {
            let Some(Open::Comment { line: start }) = open.last().copied() else {
                return Err(BlockError::new(
                    index,
                    EvalErrorKind::UnexpectedKeyword {
                        keyword: "*/",
                        outside: "a block comment",
                    },
                ));
            };
            open.pop();
            if !matches!(open.last(), Some(Open::Comment { .. })) {
                for blanked in &mut lines[start..=index] {
                    *blanked = "";
                }
            }
            continue;
        }
        if in_comment {
            continue;
        }

        if opens_with(line, "if") {
            open.push(Open::If {
                line: index,
                else_line: None,
            });
        } else if opens_with(line, "func") {
            open.push(Open::Func { line: index });
        } else if line == "try" {
            open.push(Open::Try {
                line: index,
                catch_line: None,
            });
        } else if line == "else" {
            match open.last_mut() {
                Some(Open::If {
                    else_line: else_line @ None,
                    ..
                }) => *else_line = Some(index),
                Some(Open::If { .. }) => {
                    return Err(BlockError::new(
                        index,
                        EvalErrorKind::DuplicateClause {
                            keyword: "else",
                            block: BlockKind::If,
                        },
                    ));
                }
                _ => {
                    return Err(BlockError::new(
                        index,
                        EvalErrorKind::UnexpectedKeyword {
                            keyword: "else",
                            outside: "if statement",
                        },
                    ));
                }
            }
        } else if is_catch(line) {
            match open.last_mut() {
                Some(Open::Try {
                    catch_line: catch_line @ None,
                    ..
                }) => *catch_line = Some(index),
                Some(Open::Try { .. }) => {
                    return Err(BlockError::new(
                        index,
                        EvalErrorKind::DuplicateClause {
                            keyword: "catch",
                            block: BlockKind::Try,
                        },
                    ));
                }
                _ => {
                    return Err(BlockError::new(
                        index,
                        EvalErrorKind::UnexpectedKeyword {
                            keyword: "catch",
                            outside: "try block",
                        },
                    ));
                }
            }
        } else if line == "end" {
            match open.pop() {
                Some(Open::If { line, else_line }) => {
                    tables.if_end.insert(line, index);
                    if let Some(else_line) = else_line {
                        tables.if_else.insert(line, else_line);
                        tables.else_end.insert(else_line, index);
                    }
                }
                Some(Open::Func { line }) => {
                    tables.func_end.insert(line, index);
                }
                Some(Open::Try {
                    line,
                    catch_line: Some(catch_line),
                }) => {
                    tables.try_catch.insert(line, catch_line);
                    tables.catch_end.insert(catch_line, index);
                }
                Some(Open::Try {
                    catch_line: None, ..
                }) => {
                    return Err(BlockError::new(index, EvalErrorKind::TryWithoutCatch));
                }
                // Comment lines never reach here.
                Some(Open::Comment { .. }) | None => {
                    return Err(BlockError::new(
                        index,
                        EvalErrorKind::UnexpectedKeyword {
                            keyword: "end",
                            outside: "a block",
                        },
                    ));
                }
            }
        }
    }

    if let Some(unclosed) = open.pop() {
        return Err(BlockError::new(
            unclosed.line(),
            EvalErrorKind::UnclosedBlock {
                block: unclosed.kind(),
            },
        ));
    }
    Ok(tables)
}

/// Check the block structure of a whole program without running it.
pub fn check_structure(source: &str) -> Result<JumpTables, EvalError> {
    let mut lines: Vec<&str> = source.lines().map(str::trim).collect();
    resolve_blocks(&mut lines)
        .map_err(|err| EvalError::new(err.kind, Context::at(err.line, None)))
}

#[cfg(test)]
mod tests;
