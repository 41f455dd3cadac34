//! Statement dispatch for the interpreter loop.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::{Block, CallMode, Flow, Machine, Restore, Skip};
use crate::environment::{is_valid_identifier, Environment};
use crate::errors::{BlockKind, EvalErrorKind, EvalResult, Unwind};
use crate::value::{parse_number, JslFunc, Value};

/// Which assignment statement is being run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Assign {
    /// `var`: the name must not exist yet.
    Declare,
    /// `set`: the name must already exist.
    Update,
}

impl Assign {
    fn keyword(self) -> &'static str {
        match self {
            Assign::Declare => "var",
            Assign::Update => "set",
        }
    }

    fn usage(self) -> &'static str {
        match self {
            Assign::Declare => "var [ident] = [expression]",
            Assign::Update => "set [ident] = [expression]",
        }
    }
}

/// One-based column just past `words`, each followed by a single space.
fn column_after(words: &[&str]) -> usize {
    words.iter().map(|w| w.chars().count() + 1).sum::<usize>() + 1
}

/// Text after `keyword` when `line` is that keyword alone or followed by a
/// space.
pub(crate) fn keyword_rest<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix(' ')
    }
}

fn block_error(block: &Block<'_>, ln: usize, kind: EvalErrorKind) -> Unwind {
    Unwind::error(kind, block.context(ln))
}

/// Matching line from a jump table. Every opener has an entry once
/// resolution succeeded; a missing one is reported as an unclosed block.
fn jump(
    block: &Block<'_>,
    table: &FxHashMap<usize, usize>,
    ln: usize,
    kind: BlockKind,
) -> EvalResult<usize> {
    table
        .get(&ln)
        .copied()
        .ok_or_else(|| block_error(block, ln, EvalErrorKind::UnclosedBlock { block: kind }))
}

impl Machine {
    pub(super) fn exec_statement(
        &mut self,
        block: &mut Block<'_>,
        env: &mut Environment,
        ln: usize,
        line: &str,
    ) -> EvalResult<Flow> {
        if let Some(rest) = keyword_rest(line, "var") {
            self.exec_assign(block, env, ln, rest, Assign::Declare)
        } else if let Some(rest) = keyword_rest(line, "set") {
            self.exec_assign(block, env, ln, rest, Assign::Update)
        } else if let Some(rest) = keyword_rest(line, "if") {
            self.exec_if(block, env, ln, rest)
        } else if let Some(rest) = keyword_rest(line, "func") {
            exec_func(block, env, ln, rest)
        } else if keyword_rest(line, "return").is_some() {
            self.exec_return(block, env, ln, line)
        } else if let Some(rest) = keyword_rest(line, "rem") {
            exec_rem(block, env, ln, rest)
        } else if line == "try" {
            self.exec_try(block, env, ln)
        } else if line == "else" || line == "end" || line == "catch" || line.starts_with("catch ") {
            // Reached only by falling through; the jump tables do the work.
            Ok(Flow::Next)
        } else {
            self.eval_text(line, 1, env, block.context(ln))?;
            Ok(Flow::Next)
        }
    }

    fn exec_assign(
        &mut self,
        block: &Block<'_>,
        env: &mut Environment,
        ln: usize,
        rest: &str,
        assign: Assign,
    ) -> EvalResult<Flow> {
        let pieces: Vec<&str> = rest.split(' ').collect();
        if pieces.get(1) != Some(&"=") {
            return Err(block_error(
                block,
                ln,
                EvalErrorKind::MalformedStatement {
                    expected: assign.usage(),
                },
            ));
        }
        let name = pieces[0];
        if name.is_empty() {
            return Err(block_error(block, ln, EvalErrorKind::EmptyIdentifier));
        }
        if !is_valid_identifier(name) {
            return Err(block_error(
                block,
                ln,
                EvalErrorKind::InvalidIdentifier {
                    name: name.to_string(),
                },
            ));
        }
        match (assign, env.contains(name)) {
            (Assign::Declare, true) => {
                return Err(block_error(
                    block,
                    ln,
                    EvalErrorKind::AlreadyDefined {
                        name: name.to_string(),
                    },
                ));
            }
            (Assign::Update, false) => {
                return Err(block_error(
                    block,
                    ln,
                    EvalErrorKind::Undefined {
                        action: "set",
                        name: name.to_string(),
                    },
                ));
            }
            _ => {}
        }

        let column = column_after(&[assign.keyword(), pieces[0], pieces[1]]);
        let expression = pieces[2..].join(" ");
        let value = self
            .eval_text(&expression, column, env, block.context(ln))?
            .ok_or_else(|| {
                block_error(
                    block,
                    ln,
                    EvalErrorKind::NoValue {
                        name: name.to_string(),
                    },
                )
            })?;
        env.insert(name, value);
        Ok(Flow::Next)
    }

    fn exec_if(
        &mut self,
        block: &mut Block<'_>,
        env: &mut Environment,
        ln: usize,
        condition: &str,
    ) -> EvalResult<Flow> {
        if condition.trim().is_empty() {
            return Err(block_error(block, ln, EvalErrorKind::EmptyCondition));
        }
        let end = jump(block, &block.jumps.if_end, ln, BlockKind::If)?;
        let else_line = block.jumps.if_else.get(&ln).copied();

        let value = self.eval_text(condition, 4, env, block.context(ln))?;
        let truthy = value.as_ref().is_some_and(Value::is_truthy);

        if truthy {
            if let Some(else_line) = else_line {
                block.skips.insert(
                    else_line,
                    Skip {
                        resume_after: end,
                        restore: None,
                    },
                );
            }
            Ok(Flow::Next)
        } else {
            Ok(Flow::ResumeAfter(else_line.unwrap_or(end)))
        }
    }

    fn exec_return(
        &mut self,
        block: &Block<'_>,
        env: &Environment,
        ln: usize,
        line: &str,
    ) -> EvalResult<Flow> {
        if block.mode != CallMode::FunctionBody {
            return Err(block_error(block, ln, EvalErrorKind::ReturnOutsideFunction));
        }
        let expression = line.strip_prefix("return").unwrap_or_default().trim_start();
        if expression.is_empty() {
            return Ok(Flow::Return(None));
        }
        let column = line.len() - expression.len() + 1;
        let value = self.eval_text(expression, column, env, block.context(ln))?;
        Ok(Flow::Return(value))
    }

    /// Runs the try body against a copy of `env`. A caught error binds its
    /// message to the `catch` name for the duration of the catch clause.
    fn exec_try(&mut self, block: &mut Block<'_>, env: &mut Environment, ln: usize) -> EvalResult<Flow> {
        let catch_line = jump(block, &block.jumps.try_catch, ln, BlockKind::Try)?;
        let end = jump(block, &block.jumps.catch_end, catch_line, BlockKind::Try)?;

        let mut try_env = env.clone();
        let parent = block.context(ln).snapshot();
        let body = &block.lines[ln + 1..catch_line];
        let first_line = block.base + ln + 1;
        let result = tracing::debug_span!("try", line = first_line).in_scope(|| {
            self.enter(|machine| {
                machine.run_block(
                    body,
                    &mut try_env,
                    Some(parent),
                    CallMode::TryBody,
                    first_line,
                    block.origin,
                )
            })
        });

        let err = match result {
            Ok(_) => return Ok(Flow::ResumeAfter(end)),
            Err(Unwind::Error(err)) => err,
            Err(unwind) => return Err(unwind),
        };
        tracing::debug!(line = block.base + ln + 1, error = %err.primary_message(), "caught");

        let name = block.lines[catch_line]
            .strip_prefix("catch")
            .unwrap_or_default()
            .trim();
        if name.is_empty() {
            return Ok(Flow::ResumeAfter(end));
        }
        if !is_valid_identifier(name) {
            return Err(block_error(
                block,
                catch_line,
                EvalErrorKind::InvalidIdentifier {
                    name: name.to_string(),
                },
            ));
        }

        let previous = env.insert(name, Value::str(err.primary_message()));
        block.skips.insert(
            end,
            Skip {
                resume_after: end,
                restore: Some(Restore {
                    name: name.to_string(),
                    previous,
                }),
            },
        );
        Ok(Flow::ResumeAfter(catch_line))
    }
}

fn exec_func(block: &Block<'_>, env: &mut Environment, ln: usize, rest: &str) -> EvalResult<Flow> {
    let info = rest.trim();
    if info.is_empty() {
        return Err(block_error(block, ln, EvalErrorKind::EmptyFunctionName));
    }
    let pieces: Vec<&str> = info.split(' ').map(str::trim).collect();
    if pieces.len() > 2 {
        return Err(block_error(
            block,
            ln,
            EvalErrorKind::MalformedStatement {
                expected: "func [name] [argument count]",
            },
        ));
    }
    let name = pieces[0];
    if !is_valid_identifier(name) {
        return Err(block_error(
            block,
            ln,
            EvalErrorKind::InvalidIdentifier {
                name: name.to_string(),
            },
        ));
    }
    let arity = match pieces.get(1) {
        None => 0,
        Some(text) => parse_arity(text).ok_or_else(|| {
            block_error(
                block,
                ln,
                EvalErrorKind::InvalidArity {
                    arity: (*text).to_string(),
                },
            )
        })?,
    };

    let end = jump(block, &block.jumps.func_end, ln, BlockKind::Func)?;
    let body: Rc<[String]> = block.lines[ln + 1..end]
        .iter()
        .map(|line| (*line).to_string())
        .collect();
    let func = JslFunc {
        name: name.to_string(),
        arity,
        body,
        first_line: block.base + ln + 1,
        origin: block.origin,
    };
    tracing::trace!(name, arity, "function defined");
    env.insert(name, Value::Function(Rc::new(func)));
    Ok(Flow::ResumeAfter(end))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_arity(text: &str) -> Option<usize> {
    let n = parse_number(text)?;
    (n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX)).then_some(n as usize)
}

fn exec_rem(block: &Block<'_>, env: &mut Environment, ln: usize, rest: &str) -> EvalResult<Flow> {
    let name = rest.trim();
    if name.is_empty() {
        return Err(block_error(block, ln, EvalErrorKind::EmptyIdentifier));
    }
    if env.remove(name).is_none() {
        return Err(block_error(
            block,
            ln,
            EvalErrorKind::Undefined {
                action: "remove",
                name: name.to_string(),
            },
        ));
    }
    Ok(Flow::Next)
}
