//! Postfix expression tokenizing and evaluation.
//!
//! An expression is split on single spaces. A run of pieces from one starting
//! with `"` to one ending with `"` is merged back (with its spaces) into a
//! single string literal. Tokens are then evaluated left to right against a
//! fresh [`EvalStack`]; at the end the stack must hold at most one value,
//! which is the expression's result.

use std::rc::Rc;

use crate::context::Context;
use crate::environment::Environment;
use crate::errors::{EvalErrorKind, EvalResult, Unwind};
use crate::interpreter::Machine;
use crate::stack::EvalStack;
use crate::stdlib::NativeCall;
use crate::value::{parse_number, Value};

/// One token of a postfix expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    /// One-based column of the token's first character.
    pub column: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// Bare word: number, keyword or identifier. May be empty.
    Word(&'a str),
    /// String literal with its quotes removed.
    Literal(String),
}

/// Failure to tokenize: an unterminated string literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenizeError {
    pub kind: EvalErrorKind,
    pub column: usize,
}

/// Tokenize a raw expression line.
pub fn tokenize(line: &str) -> Result<Vec<Token<'_>>, TokenizeError> {
    tokenize_pieces(line.split(' '), 1)
}

/// Tokenize pre-split pieces that were separated by single spaces.
///
/// `column` is the one-based column of the first piece, so that statements
/// can tokenize the expression part of a line and still report columns
/// relative to the whole line.
pub fn tokenize_pieces<'a, I>(pieces: I, column: usize) -> Result<Vec<Token<'a>>, TokenizeError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut tokens = Vec::new();
    let mut column = column;
    // Literal being accumulated and the column it started at.
    let mut open: Option<(String, usize)> = None;

    for piece in pieces {
        let start = column;
        column += piece.chars().count() + 1;

        if let Some((mut literal, literal_start)) = open.take() {
            literal.push(' ');
            if let Some(body) = piece.strip_suffix('"') {
                literal.push_str(body);
                tokens.push(Token {
                    kind: TokenKind::Literal(literal),
                    column: literal_start,
                });
            } else {
                literal.push_str(piece);
                open = Some((literal, literal_start));
            }
        } else if let Some(rest) = piece.strip_prefix('"') {
            match rest.strip_suffix('"') {
                Some(body) => tokens.push(Token {
                    kind: TokenKind::Literal(body.to_string()),
                    column: start,
                }),
                None => open = Some((rest.to_string(), start)),
            }
        } else {
            tokens.push(Token {
                kind: TokenKind::Word(piece.trim()),
                column: start,
            });
        }
    }

    match open {
        Some((literal, literal_start)) => Err(TokenizeError {
            kind: EvalErrorKind::MalformedLiteral {
                literal: format!("\"{literal}"),
            },
            column: literal_start,
        }),
        None => Ok(tokens),
    }
}

impl Machine {
    /// Evaluate tokens against `env`.
    ///
    /// `ctx` is the expression's own frame; its column follows the token
    /// being evaluated so errors point at it. Returns the single value left
    /// on the stack, if any.
    pub(crate) fn eval_tokens(
        &mut self,
        tokens: &[Token<'_>],
        env: &Environment,
        ctx: &mut Context,
    ) -> EvalResult<Option<Value>> {
        let mut stack = EvalStack::new();
        let mut literal_mode = false;

        for token in tokens {
            ctx.column = Some(token.column);
            let word = match &token.kind {
                TokenKind::Literal(text) => {
                    stack.push(Value::str(text.as_str()));
                    continue;
                }
                TokenKind::Word(word) => *word,
            };

            if word.is_empty() {
                continue;
            } else if let Some(n) = parse_number(word) {
                stack.push(Value::Number(n));
            } else if word == "[]" {
                stack.push(Value::list(Vec::new()));
            } else if word == "lit" {
                literal_mode = true;
            } else if word == "true" || word == "false" {
                stack.push(Value::Bool(word == "true"));
            } else if let Some(value) = env.get(word) {
                if literal_mode {
                    literal_mode = false;
                    stack.push(value.clone());
                    continue;
                }
                match value {
                    Value::Native(native) => {
                        let mut call = NativeCall {
                            context: ctx,
                            stack: &mut stack,
                            host: &self.host,
                        };
                        (native.func)(&mut call)?;
                    }
                    Value::Function(func) => {
                        let func = Rc::clone(func);
                        if let Some(result) = self.call_function(&func, &mut stack, env, ctx)? {
                            stack.push(result);
                        }
                    }
                    other => stack.push(other.clone()),
                }
            } else {
                return Err(Unwind::error(
                    EvalErrorKind::UnknownWord {
                        word: word.to_string(),
                    },
                    ctx.clone(),
                ));
            }
        }

        if stack.len() > 1 {
            return Err(Unwind::error(EvalErrorKind::ExcessStackValues, ctx.clone()));
        }
        Ok(stack.try_pop())
    }

    /// Tokenize and evaluate `text`, whose first character sits at `column`
    /// of the statement frame `at`.
    pub(crate) fn eval_text(
        &mut self,
        text: &str,
        column: usize,
        env: &Environment,
        at: Context,
    ) -> EvalResult<Option<Value>> {
        let mut ctx = at;
        ctx.column = Some(column);
        let tokens = tokenize_pieces(text.split(' '), column).map_err(|err| {
            ctx.column = Some(err.column);
            Unwind::error(err.kind, ctx.clone())
        })?;
        self.eval_tokens(&tokens, env, &mut ctx)
    }
}

#[cfg(test)]
mod tests;
