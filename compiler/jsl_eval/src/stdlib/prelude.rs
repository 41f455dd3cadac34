//! Builtins written in JSL.
//!
//! These are registered as ordinary [`JslFunc`] values, so they are called,
//! traced and shadowed exactly like user functions.

use std::rc::Rc;

use crate::context::Origin;
use crate::environment::Environment;
use crate::value::{JslFunc, Value};

/// Name, arity and body of each prelude function.
pub const PRELUDE: &[(&str, usize, &str)] = &[
    (
        "front",
        1,
        r#"try
$1 0 index
catch err
"front: " err + throw
end
return $1 0 index"#,
    ),
    (
        "back",
        1,
        r#"try
$1 -1 index
catch err
"back: " err + throw
end
return $1 -1 index"#,
    ),
    (
        "not",
        1,
        "if $1
return false
end
return true",
    ),
    (
        "max",
        2,
        "if $1 $2 >
return $1
end
return $2",
    ),
    (
        "min",
        2,
        "if $1 $2 <
return $1
end
return $2",
    ),
];

/// The prelude functions as values, in definition order.
pub fn functions() -> impl Iterator<Item = JslFunc> {
    PRELUDE.iter().map(|&(name, arity, body)| JslFunc {
        name: name.to_string(),
        arity,
        body: body.lines().map(str::to_string).collect::<Rc<[String]>>(),
        first_line: 0,
        origin: Origin::Prelude(name),
    })
}

/// Bind every prelude function into `env`.
pub fn register(env: &mut Environment) {
    for func in functions() {
        let name = func.name.clone();
        env.insert(name, Value::Function(Rc::new(func)));
    }
}
