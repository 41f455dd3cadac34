use std::sync::Arc;

use jsl_eval::Interpreter;

use super::report;
use crate::StdinInput;

/// `jsl eval "<expr>"`: evaluate one expression and print its value.
pub fn eval_expression(expression: &str) -> i32 {
    let mut interpreter = Interpreter::builder()
        .input_provider(Arc::new(StdinInput))
        .build();
    let result = interpreter.eval(expression).map(|value| {
        if let Some(value) = value {
            println!("{value}");
        }
    });
    report(&result)
}
