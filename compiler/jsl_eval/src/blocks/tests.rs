use super::*;
use pretty_assertions::assert_eq;

fn resolve(source: &str) -> (Vec<String>, Result<JumpTables, BlockError>) {
    let mut lines: Vec<&str> = source.lines().map(str::trim).collect();
    let result = resolve_blocks(&mut lines);
    (lines.into_iter().map(str::to_string).collect(), result)
}

fn pairs(map: &FxHashMap<usize, usize>) -> Vec<(usize, usize)> {
    let mut pairs: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    pairs.sort_unstable();
    pairs
}

#[test]
fn if_else_end_are_paired() {
    let (_, tables) = resolve("if x\n1\nelse\n2\nend");
    let tables = tables.unwrap();
    assert_eq!(pairs(&tables.if_else), vec![(0, 2)]);
    assert_eq!(pairs(&tables.if_end), vec![(0, 4)]);
    assert_eq!(pairs(&tables.else_end), vec![(2, 4)]);
}

#[test]
fn nested_blocks_pair_innermost_first() {
    let source = "func f 1\nif $1\ntry\nx\ncatch e\nend\nend\nend";
    let tables = resolve(source).1.unwrap();
    assert_eq!(pairs(&tables.func_end), vec![(0, 7)]);
    assert_eq!(pairs(&tables.if_end), vec![(1, 6)]);
    assert_eq!(pairs(&tables.try_catch), vec![(2, 4)]);
    assert_eq!(pairs(&tables.catch_end), vec![(4, 5)]);
    assert!(tables.if_else.is_empty());
}

#[test]
fn bare_catch_is_a_clause() {
    let tables = resolve("try\nx\ncatch\nend").1.unwrap();
    assert_eq!(pairs(&tables.try_catch), vec![(0, 2)]);
}

#[test]
fn block_comments_are_blanked() {
    let (lines, tables) = resolve("1\n/* start\nif x\n*/\n2");
    tables.unwrap();
    assert_eq!(lines, vec!["1", "", "", "", "2"]);
}

#[test]
fn single_line_comment_is_blanked() {
    let (lines, tables) = resolve("/* note */\n1");
    tables.unwrap();
    assert_eq!(lines, vec!["", "1"]);
}

#[test]
fn nested_comments_blank_up_to_outer_close() {
    let (lines, tables) = resolve("/*\n/*\ninner\n*/\nstill comment\n*/\nend_of_test");
    tables.unwrap();
    assert_eq!(lines, vec!["", "", "", "", "", "", "end_of_test"]);
}

#[test]
fn stray_end_is_rejected() {
    let err = resolve("1\nend").1.unwrap_err();
    assert_eq!(err.line, 1);
    assert_eq!(
        err.kind,
        EvalErrorKind::UnexpectedKeyword {
            keyword: "end",
            outside: "a block"
        }
    );
}

#[test]
fn else_outside_if_is_rejected() {
    let err = resolve("try\nelse\ncatch\nend").1.unwrap_err();
    assert_eq!(err.line, 1);
    assert_eq!(err.kind.to_string(), "unexpected 'else' outside of if statement");
}

#[test]
fn catch_outside_try_is_rejected() {
    let err = resolve("catch e").1.unwrap_err();
    assert_eq!(err.kind.to_string(), "unexpected 'catch' outside of try block");
}

#[test]
fn comment_close_without_open_is_rejected() {
    let err = resolve("1\n*/").1.unwrap_err();
    assert_eq!(err.line, 1);
    assert_eq!(
        err.kind.to_string(),
        "unexpected '*/' outside of a block comment"
    );
}

#[test]
fn duplicate_clauses_are_rejected() {
    let err = resolve("if x\nelse\nelse\nend").1.unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.kind.to_string(), "duplicate 'else' in if statement");

    let err = resolve("try\ncatch\ncatch e\nend").1.unwrap_err();
    assert_eq!(err.kind.to_string(), "duplicate 'catch' in try block");
}

#[test]
fn try_needs_catch() {
    let err = resolve("try\nx\nend").1.unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.kind, EvalErrorKind::TryWithoutCatch);
}

#[test]
fn unclosed_block_reports_opening_line() {
    let err = resolve("1\nfunc f 0\nreturn 1").1.unwrap_err();
    assert_eq!(err.line, 1);
    assert_eq!(err.kind.to_string(), "expected 'end' to close function");

    let err = resolve("/* never closed\n1").1.unwrap_err();
    assert_eq!(err.line, 0);
    assert_eq!(err.kind.to_string(), "expected '*/' to close block comment");
}

#[test]
fn keywords_inside_comments_are_ignored() {
    let tables = resolve("/*\nend\nelse\ncatch\n*/").1.unwrap();
    assert_eq!(tables, JumpTables::default());
}

#[test]
fn check_structure_reports_one_based_lines() {
    let err = check_structure("1\n2\nend").unwrap_err();
    assert_eq!(err.message(), "error on line 3: unexpected 'end' outside of a block");
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    /// Nested if/else blocks with a plain statement for leaves.
    #[derive(Clone, Debug)]
    enum Node {
        Stmt,
        If { then: Vec<Node>, other: Option<Vec<Node>> },
    }

    fn node() -> impl Strategy<Value = Node> {
        let leaf = Just(Node::Stmt);
        leaf.prop_recursive(4, 32, 4, |inner| {
            (
                prop::collection::vec(inner.clone(), 0..4),
                prop::option::of(prop::collection::vec(inner, 0..4)),
            )
                .prop_map(|(then, other)| Node::If { then, other })
        })
    }

    /// Renders `node`, recording the expected pairings as it goes.
    fn render(node: &Node, lines: &mut Vec<&'static str>, expected: &mut JumpTables) {
        match node {
            Node::Stmt => lines.push("1 print"),
            Node::If { then, other } => {
                let start = lines.len();
                lines.push("if x");
                for child in then {
                    render(child, lines, expected);
                }
                let else_line = other.as_ref().map(|body| {
                    let at = lines.len();
                    lines.push("else");
                    for child in body {
                        render(child, lines, expected);
                    }
                    at
                });
                let end = lines.len();
                lines.push("end");
                expected.if_end.insert(start, end);
                if let Some(else_line) = else_line {
                    expected.if_else.insert(start, else_line);
                    expected.else_end.insert(else_line, end);
                }
            }
        }
    }

    proptest! {
        #[test]
        fn well_formed_if_nesting_resolves(nodes in prop::collection::vec(node(), 0..6)) {
            let mut lines = Vec::new();
            let mut expected = JumpTables::default();
            for node in &nodes {
                render(node, &mut lines, &mut expected);
            }
            let tables = resolve_blocks(&mut lines).unwrap();
            prop_assert_eq!(tables, expected);
        }

        #[test]
        fn dropping_an_end_is_always_reported(nodes in prop::collection::vec(node(), 1..6)) {
            let mut lines = Vec::new();
            let mut expected = JumpTables::default();
            for node in &nodes {
                render(node, &mut lines, &mut expected);
            }
            prop_assume!(lines.contains(&"end"));
            if let Some(last_end) = lines.iter().rposition(|l| *l == "end") {
                lines.remove(last_end);
            }
            prop_assert!(resolve_blocks(&mut lines).is_err());
        }
    }
}
