//! Whole-program behaviour through the public API.

use std::sync::Arc;

use jsl_eval::{buffer_handler, EvalError, Interpreter, ScriptedInput, Unwind, Value};
use pretty_assertions::assert_eq;

struct Run {
    output: String,
    result: Result<(), Unwind>,
}

fn run(source: &str) -> Run {
    let output = buffer_handler();
    let mut interpreter = Interpreter::builder().print_handler(output.clone()).build();
    let result = interpreter.run(source);
    Run {
        output: output.get_output(),
        result,
    }
}

fn run_ok(source: &str) -> String {
    let run = run(source);
    match run.result {
        Ok(()) => run.output,
        Err(err) => panic!("program failed: {err}"),
    }
}

fn run_err(source: &str) -> EvalError {
    match run(source).result {
        Err(Unwind::Error(err)) => err,
        other => panic!("expected a language error, got {other:?}"),
    }
}

#[test]
fn expression_samples() {
    let mut interpreter = Interpreter::builder().print_handler(buffer_handler()).build();
    assert_eq!(interpreter.eval("3 4 +").unwrap(), Some(Value::from(7.0)));
    assert_eq!(interpreter.eval("\"a\" \"b\" +").unwrap(), Some(Value::from("ab")));
    assert_eq!(interpreter.eval("5 0 ==").unwrap(), Some(Value::from(false)));
    assert_eq!(
        interpreter.eval("[] 1 push 2 push 0 index").unwrap(),
        Some(Value::from(1.0))
    );
}

#[test]
fn dupe_str_recurses() {
    let source = r#"
func dupeStr 2
if $1 0 ==
return ""
end
return $2 $2 $1 1 - dupeStr +
end
"he" 3 dupeStr print
"#;
    assert_eq!(run_ok(source), "hehehe\n");
}

#[test]
fn arguments_bind_nearest_operand_first() {
    let source = r#"
func show 3
$1 print
$3 $2 $1 3 printm
end
"a" "b" "c" show
"#;
    assert_eq!(run_ok(source), "c\nc b a\n");
}

#[test]
fn too_few_arguments_underflow() {
    let source = "func pair 2\nreturn $1 $2 +\nend\n1 pair";
    let err = run_err(source);
    assert_eq!(err.primary_message(), "stack underflow");
}

#[test]
fn catch_binds_message_then_unbinds() {
    let source = r#"
try
"boom" throw
catch e
e print
end
e print
"#;
    let run = run(source);
    assert_eq!(run.output, "boom\n");
    let Err(Unwind::Error(err)) = run.result else {
        panic!("expected `e` to be unbound after the catch block");
    };
    assert_eq!(err.primary_message(), "unknown word 'e'");
}

#[test]
fn catch_restores_prior_binding() {
    let source = r#"
var e = 1
try
"boom" throw
catch e
e print
end
e print
"#;
    assert_eq!(run_ok(source), "boom\n1\n");
}

#[test]
fn bye_inside_try_ends_the_run() {
    let source = r#"
"start" print
try
bye
catch e
"caught" print
end
"after" print
"#;
    let run = run(source);
    assert!(matches!(run.result, Err(Unwind::Exit)));
    assert_eq!(run.output, "start\n");
}

#[test]
fn bye_inside_function_ends_the_run() {
    let source = "func quit\nbye\nend\ntry\nquit\ncatch\nend\n\"after\" print";
    let run = run(source);
    assert!(matches!(run.result, Err(Unwind::Exit)));
    assert_eq!(run.output, "");
}

#[test]
fn var_rem_var_rebinds() {
    let source = "var x = 1\nrem x\nvar x = 2\nx print";
    assert_eq!(run_ok(source), "2\n");

    let err = run_err("var x = 1\nvar x = 1");
    assert_eq!(
        err.primary_message(),
        "cannot create variable 'x' as it already exists"
    );
}

#[test]
fn lists_are_shared_by_reference() {
    let source = "var a = []\nvar b = a\na 1 push\nb len print\nb 0 index print";
    assert_eq!(run_ok(source), "1\n1\n");
}

#[test]
fn callee_mutation_of_list_is_visible() {
    let source = r#"
func fill 1
$1 "x" push
$1 "y" push
end
var items = []
items fill
items print
"#;
    assert_eq!(run_ok(source), "x,y\n");
}

#[test]
fn functions_see_caller_environment_at_call_time() {
    let source = r#"
func greet 0
name print
end
var name = "first"
greet
set name = "second"
greet
"#;
    assert_eq!(run_ok(source), "first\nsecond\n");
}

#[test]
fn trace_follows_nested_calls() {
    let source = "\
func inner 0
nope
end
func outer 0
inner
end
outer";
    let err = run_err(source);
    assert_eq!(
        err.message(),
        "error on line 2, col 1: unknown word 'nope'\n\
         stacktrace:\n\
         error on line 5, col 1\n\
         stacktrace:\n\
         error on line 7, col 1"
    );
}

#[test]
fn prelude_frames_do_not_claim_program_lines() {
    let err = run_err("var xs = []\nxs back print");
    assert_eq!(
        err.message(),
        "error in prelude 'back' on line 4, col 16: \
         back: index -1 out of bounds for [] (list) of length 0\n\
         stacktrace:\n\
         error on line 2, col 4"
    );
}

#[test]
fn deep_recursion_within_the_limit() {
    let source = r#"
func count 1
if $1 0 ==
return 0
end
return $1 1 - count 1 +
end
3000 count print
"#;
    assert_eq!(run_ok(source), "3000\n");
}

#[test]
fn runaway_recursion_is_fatal_and_uncatchable() {
    let output = buffer_handler();
    let mut interpreter = Interpreter::builder()
        .print_handler(output.clone())
        .max_call_depth(200)
        .build();
    let source = "func forever 0\nforever\nend\ntry\nforever\ncatch e\n\"caught\" print\nend";
    let result = interpreter.run(source);
    assert!(matches!(result, Err(Unwind::CallDepthExceeded { limit: 200 })));
    assert_eq!(output.get_output(), "");
}

#[test]
fn interactive_input() {
    let input = Arc::new(ScriptedInput::new(["Ada"]));
    let output = buffer_handler();
    let mut interpreter = Interpreter::builder()
        .print_handler(output.clone())
        .input_provider(input.clone())
        .build();
    let source = "var who = \"name: \" inputm\nwho \"hello {}\" fmt print";
    interpreter.run(source).unwrap();
    assert_eq!(output.get_output(), "hello Ada\n");
    assert_eq!(input.prompts(), vec![Some("name: ".to_string())]);
}

#[test]
fn prelude_functions_are_shadowable() {
    let source = "func max 2\nreturn \"mine\"\nend\n1 2 max print";
    assert_eq!(run_ok(source), "mine\n");
}
