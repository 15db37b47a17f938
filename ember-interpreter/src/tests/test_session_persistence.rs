use pretty_assertions::assert_eq;

use crate::environment::Environment;
use crate::evaluator;
use crate::object::Object;
use crate::test_harness::{InterpreterSession, SessionError};

#[test]
fn test_bindings_persist_between_evaluations() {
    let mut session = InterpreterSession::new();

    session.evaluate("let a = 5;").unwrap();
    session.evaluate("let double = fn(x) { x * 2 };").unwrap();
    session.assert_evaluates_to_integer("double(a)", 10).unwrap();
}

#[test]
fn test_let_produces_no_value() {
    let mut session = InterpreterSession::new();

    assert_eq!(session.execute("let a = 1;").unwrap(), None);
    assert_eq!(session.execute("").unwrap(), None);
    assert_eq!(session.execute("a").unwrap(), Some(Object::Integer(1)));
    session.assert_evaluates_to_null("let b = 2;").unwrap();
}

#[test]
fn test_define_variable_and_listing() {
    let mut session = InterpreterSession::new();

    session.define_variable("zeta", Object::Integer(26));
    session.evaluate("let alpha = true;").unwrap();

    let names: Vec<String> = session
        .variables()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["alpha".to_string(), "zeta".to_string()]);
    session.assert_evaluates_to_integer("zeta", 26).unwrap();
}

#[test]
fn test_reset_clears_bindings() {
    let mut session = InterpreterSession::new();

    session.evaluate("let a = 1;").unwrap();
    session.reset();

    assert!(session.variables().is_empty());
    session
        .assert_evaluates_to_inspect("a", "Error:identifier not found: a")
        .unwrap();
}

#[test]
fn test_parse_errors_are_reported_not_evaluated() {
    let mut session = InterpreterSession::new();

    let error = session.evaluate("let x 5; let b = 2;").unwrap_err();
    assert!(matches!(error, SessionError::Parse { .. }));
    assert_eq!(
        error.parse_messages(),
        vec!["expected next token to be =, got INT instead".to_string()]
    );
    assert!(session.variables().is_empty());
}

#[test]
fn test_evaluation_is_repeatable_in_fresh_environments() {
    let program = ember_parser::parse_program(
        "let counter = fn(n) { if (n > 0) { counter(n - 1) } else { \"done\" } }; [counter(3), len(\"abc\")]",
    )
    .unwrap();

    let first = evaluator::eval(&program, &Environment::new());
    let second = evaluator::eval(&program, &Environment::new());

    assert_eq!(first.inspect(), r#"["done", 3]"#);
    assert_eq!(first.inspect(), second.inspect());
}

#[test]
fn test_evaluate_from_string() {
    let result = crate::evaluate_from_string("let x = 3; x * x").unwrap();
    assert_eq!(result, Object::Integer(9));
}
