//! Built-in functions for the Ember interpreter.
//!
//! A fixed name-to-function table consulted when an identifier is not bound
//! in any scope.

use tracing::trace;

use crate::error::{Result, RuntimeError};
use crate::object::{Builtin, BuiltinFunction, Object};

static BUILTINS: &[(&str, BuiltinFunction)] = &[
    ("len", builtin_len),
    ("first", builtin_first),
    ("last", builtin_last),
    ("rest", builtin_rest),
    ("push", builtin_push),
    ("print", builtin_print),
    ("puts", builtin_print),
];

/// Find a builtin by name
pub fn lookup(name: &str) -> Option<Object> {
    BUILTINS
        .iter()
        .find(|(builtin_name, _)| *builtin_name == name)
        .map(|&(name, function)| {
            trace!(name, "resolved builtin");
            Object::Builtin(Builtin { name, function })
        })
}

/// Names of every builtin, in registration order
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|(name, _)| *name)
}

fn check_arity(args: &[Object], want: usize) -> Result<()> {
    if args.len() == want {
        Ok(())
    } else {
        Err(RuntimeError::wrong_argument_count(args.len(), want))
    }
}

fn array_argument<'a>(builtin: &'static str, arg: &'a Object) -> Result<&'a [Object]> {
    match arg {
        Object::Array(elements) => Ok(elements.as_slice()),
        other => Err(RuntimeError::expected_array(builtin, other.type_name())),
    }
}

// Collection functions

fn builtin_len(args: &[Object]) -> Result<Object> {
    check_arity(args, 1)?;
    let length = match &args[0] {
        Object::String(value) => value.chars().count(),
        Object::Array(elements) => elements.len(),
        Object::Hash(pairs) => pairs.len(),
        other => return Err(RuntimeError::unsupported_argument("len", other.type_name())),
    };
    Ok(Object::Integer(length as i64))
}

fn builtin_first(args: &[Object]) -> Result<Object> {
    check_arity(args, 1)?;
    let elements = array_argument("first", &args[0])?;
    Ok(elements.first().cloned().unwrap_or(Object::Null))
}

fn builtin_last(args: &[Object]) -> Result<Object> {
    check_arity(args, 1)?;
    let elements = array_argument("last", &args[0])?;
    Ok(elements.last().cloned().unwrap_or(Object::Null))
}

fn builtin_rest(args: &[Object]) -> Result<Object> {
    check_arity(args, 1)?;
    let elements = array_argument("rest", &args[0])?;
    match elements.split_first() {
        Some((_, rest)) => Ok(Object::array(rest.to_vec())),
        None => Ok(Object::Null),
    }
}

/// Returns a new array; the argument is left untouched
fn builtin_push(args: &[Object]) -> Result<Object> {
    check_arity(args, 2)?;
    let elements = array_argument("push", &args[0])?;

    let mut pushed = Vec::with_capacity(elements.len() + 1);
    pushed.extend_from_slice(elements);
    pushed.push(args[1].clone());
    Ok(Object::array(pushed))
}

// I/O functions

fn builtin_print(args: &[Object]) -> Result<Object> {
    for arg in args {
        println!("{arg}");
    }
    Ok(Object::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[Object]) -> Result<Object> {
        match lookup(name) {
            Some(Object::Builtin(builtin)) => (builtin.function)(args),
            other => panic!("expected builtin {name}, got {other:?}"),
        }
    }

    #[test]
    fn test_registry() {
        let names: Vec<&str> = names().collect();
        assert_eq!(
            names,
            vec!["len", "first", "last", "rest", "push", "print", "puts"]
        );
        assert!(lookup("nope").is_none());
    }

    #[test]
    fn test_len_counts_code_points() {
        assert_eq!(
            call("len", &[Object::String("héllo".into())]),
            Ok(Object::Integer(5))
        );
    }

    #[test]
    fn test_push_leaves_original_untouched() {
        let original = Object::array(vec![Object::Integer(1)]);
        let pushed = call("push", &[original.clone(), Object::Integer(2)]);

        assert_eq!(
            pushed,
            Ok(Object::array(vec![Object::Integer(1), Object::Integer(2)]))
        );
        assert_eq!(original, Object::array(vec![Object::Integer(1)]));
    }

    #[test]
    fn test_first_requires_array() {
        let err = call("first", &[Object::Integer(1)]).unwrap_err();
        assert_eq!(err.to_string(), "argument to `first` must be ARRAY, got INTEGER");
    }

    #[test]
    fn test_empty_array_edges() {
        let empty = Object::array(vec![]);
        assert_eq!(call("first", &[empty.clone()]), Ok(Object::Null));
        assert_eq!(call("last", &[empty.clone()]), Ok(Object::Null));
        assert_eq!(call("rest", &[empty]), Ok(Object::Null));
    }
}
