use crate::test_harness::InterpreterSession;

#[test]
fn test_len() {
    let mut session = InterpreterSession::new();

    session.assert_evaluates_to_integer(r#"len("")"#, 0).unwrap();
    session.assert_evaluates_to_integer(r#"len("four")"#, 4).unwrap();
    session
        .assert_evaluates_to_integer(r#"len("hello world")"#, 11)
        .unwrap();
    session.assert_evaluates_to_integer(r#"len("日本語")"#, 3).unwrap();
    session.assert_evaluates_to_integer("len([1, 2, 3])", 3).unwrap();
    session.assert_evaluates_to_integer("len([])", 0).unwrap();
    session
        .assert_evaluates_to_integer(r#"len({"a": 1, "b": 2})"#, 2)
        .unwrap();
}

#[test]
fn test_len_rejects_bad_arguments() {
    let mut session = InterpreterSession::new();

    session
        .assert_evaluates_to_inspect(
            "len(1)",
            "Error:argument to `len` not supported, got INTEGER",
        )
        .unwrap();
    session
        .assert_evaluates_to_inspect(
            r#"len("one", "two")"#,
            "Error:wrong number of arguments. got=2, want=1",
        )
        .unwrap();
}

#[test]
fn test_first_last_rest() {
    let mut session = InterpreterSession::new();

    session.assert_evaluates_to_integer("first([1, 2, 3])", 1).unwrap();
    session.assert_evaluates_to_integer("last([1, 2, 3])", 3).unwrap();
    session
        .assert_evaluates_to_inspect("rest([1, 2, 3])", "[2, 3]")
        .unwrap();
    session
        .assert_evaluates_to_inspect("rest(rest(rest([1, 2, 3])))", "[]")
        .unwrap();
    session.assert_evaluates_to_null("first([])").unwrap();
    session.assert_evaluates_to_null("last([])").unwrap();
    session.assert_evaluates_to_null("rest([])").unwrap();
    session
        .assert_evaluates_to_inspect("first(1)", "Error:argument to `first` must be ARRAY, got INTEGER")
        .unwrap();
    session
        .assert_evaluates_to_inspect(
            r#"last("abc")"#,
            "Error:argument to `last` must be ARRAY, got STRING",
        )
        .unwrap();
}

#[test]
fn test_push_returns_new_array() {
    let mut session = InterpreterSession::new();

    session
        .assert_evaluates_to_inspect("let a = [1]; let b = push(a, 2); [a, b]", "[[1], [1, 2]]")
        .unwrap();
    session
        .assert_evaluates_to_inspect("push([], 1)", "[1]")
        .unwrap();
    session
        .assert_evaluates_to_inspect(
            "push(1, 1)",
            "Error:argument to `push` must be ARRAY, got INTEGER",
        )
        .unwrap();
    session
        .assert_evaluates_to_inspect(
            "push([1])",
            "Error:wrong number of arguments. got=1, want=2",
        )
        .unwrap();
}

#[test]
fn test_print_returns_null() {
    let mut session = InterpreterSession::new();

    session.assert_evaluates_to_null(r#"print("hello", 1)"#).unwrap();
    session.assert_evaluates_to_null("puts()").unwrap();
}

#[test]
fn test_builtin_values() {
    let mut session = InterpreterSession::new();

    session
        .assert_evaluates_to_inspect("len", "builtin function")
        .unwrap();
    session
        .assert_evaluates_to_integer("let size = len; size([1, 2])", 2)
        .unwrap();
}

#[test]
fn test_bindings_shadow_builtins() {
    let mut session = InterpreterSession::new();

    session
        .assert_evaluates_to_integer("let len = fn(x) { 42 }; len([1])", 42)
        .unwrap();
}
