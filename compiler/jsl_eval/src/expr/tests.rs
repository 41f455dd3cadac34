use super::*;
use pretty_assertions::assert_eq;

fn word(text: &str, column: usize) -> Token<'_> {
    Token {
        kind: TokenKind::Word(text),
        column,
    }
}

fn literal(text: &str, column: usize) -> Token<'static> {
    Token {
        kind: TokenKind::Literal(text.to_string()),
        column,
    }
}

#[test]
fn words_carry_their_columns() {
    assert_eq!(
        tokenize("1 2 +").unwrap(),
        vec![word("1", 1), word("2", 3), word("+", 5)]
    );
}

#[test]
fn quoted_runs_merge_into_one_literal() {
    assert_eq!(
        tokenize("\"hello big world\" print").unwrap(),
        vec![literal("hello big world", 1), word("print", 19)]
    );
}

#[test]
fn literal_keeps_inner_spacing() {
    assert_eq!(
        tokenize("\"a  b\"").unwrap(),
        vec![literal("a  b", 1)]
    );
}

#[test]
fn lone_quotes_form_a_space_literal() {
    assert_eq!(tokenize("\" \"").unwrap(), vec![literal(" ", 1)]);
    assert_eq!(tokenize("\"\"").unwrap(), vec![literal("", 1)]);
}

#[test]
fn literal_that_looks_like_a_number_stays_text() {
    assert_eq!(tokenize("\"5\"").unwrap(), vec![literal("5", 1)]);
}

#[test]
fn repeated_spaces_produce_empty_words() {
    assert_eq!(
        tokenize("1  2").unwrap(),
        vec![word("1", 1), word("", 3), word("2", 4)]
    );
}

#[test]
fn unterminated_literal_is_malformed() {
    let err = tokenize("1 \"abc def").unwrap_err();
    assert_eq!(err.column, 3);
    assert_eq!(
        err.kind,
        EvalErrorKind::MalformedLiteral {
            literal: "\"abc def".to_string()
        }
    );
}

#[test]
fn pieces_start_at_the_given_column() {
    let tokens = tokenize_pieces("x 1 +".split(' '), 9).unwrap();
    assert_eq!(tokens, vec![word("x", 9), word("1", 11), word("+", 13)]);
}

#[test]
fn columns_count_characters() {
    let tokens = tokenize("\"héllo\" x").unwrap();
    assert_eq!(tokens[1], word("x", 9));
}
