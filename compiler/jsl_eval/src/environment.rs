//! Variable environments.
//!
//! Each interpreter-loop invocation owns one [`Environment`]. Function calls
//! and `try` bodies run against a clone of the caller's environment: the clone
//! is shallow, so list values stay shared while every binding change stays
//! local to the clone.

use rustc_hash::FxHashMap;

use crate::value::Value;

/// Mapping from identifier to value.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    bindings: FxHashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a binding.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Bind `name`, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.bindings.insert(name.into(), value)
    }

    /// Remove `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.bindings.remove(name)
    }

    /// Bind positional arguments: the first element becomes `$1`.
    pub fn bind_arguments(&mut self, args: impl IntoIterator<Item = Value>) {
        for (i, value) in args.into_iter().enumerate() {
            self.bindings.insert(format!("${}", i + 1), value);
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bound names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }
}

/// Whether `name` may be declared by a program.
///
/// Only ASCII letters, digits and `_` are allowed, which also keeps user code
/// out of the reserved `$` and `@` prefixes.
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_isolates_bindings() {
        let mut outer = Environment::new();
        outer.insert("x", Value::from(1.0));

        let mut inner = outer.clone();
        inner.insert("x", Value::from(2.0));
        inner.insert("y", Value::from(3.0));

        assert_eq!(outer.get("x"), Some(&Value::from(1.0)));
        assert!(!outer.contains("y"));
    }

    #[test]
    fn clone_shares_lists() {
        let mut outer = Environment::new();
        outer.insert("xs", Value::list(Vec::new()));
        let inner = outer.clone();

        if let Some(Value::List(list)) = inner.get("xs") {
            list.push(Value::from(5.0));
        }
        let Some(Value::List(list)) = outer.get("xs") else {
            panic!("xs should be a list");
        };
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn arguments_bind_from_one() {
        let mut env = Environment::new();
        env.bind_arguments([Value::from("first"), Value::from("second")]);
        assert_eq!(env.get("$1"), Some(&Value::from("first")));
        assert_eq!(env.get("$2"), Some(&Value::from("second")));
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn identifier_rules() {
        assert!(is_valid_identifier("snake_case_1"));
        assert!(is_valid_identifier("X"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("$1"));
        assert!(!is_valid_identifier("@x"));
        assert!(!is_valid_identifier("a-b"));
    }

    #[test]
    fn remove_returns_previous_value() {
        let mut env = Environment::new();
        env.insert("x", Value::from(true));
        assert_eq!(env.remove("x"), Some(Value::from(true)));
        assert_eq!(env.remove("x"), None);
        assert!(env.is_empty());
    }
}
