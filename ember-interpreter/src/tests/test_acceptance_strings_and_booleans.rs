use crate::test_harness::InterpreterSession;

#[test]
fn test_boolean_expressions() {
    let mut session = InterpreterSession::new();

    let cases = [
        ("true", true),
        ("false", false),
        ("true == true", true),
        ("false == false", true),
        ("true == false", false),
        ("true != false", true),
        ("(1 < 2) == true", true),
        ("(1 < 2) == false", false),
        ("(1 > 2) == false", true),
    ];

    for (input, expected) in cases {
        session.assert_evaluates_to_boolean(input, expected).unwrap();
    }
}

#[test]
fn test_bang_operator_uses_truthiness() {
    let mut session = InterpreterSession::new();

    let cases = [
        ("!true", false),
        ("!false", true),
        ("!5", false),
        ("!0", false),
        ("!!true", true),
        ("!!5", true),
        ("!\"\"", false),
        ("!if (false) { 1 }", true),
    ];

    for (input, expected) in cases {
        session.assert_evaluates_to_boolean(input, expected).unwrap();
    }
}

#[test]
fn test_string_literals_and_escapes() {
    let mut session = InterpreterSession::new();

    session
        .assert_evaluates_to_string("\"Hello World!\"", "Hello World!")
        .unwrap();
    session
        .assert_evaluates_to_string(r#""tab\there""#, "tab\there")
        .unwrap();
    session
        .assert_evaluates_to_inspect(r#""quoted""#, "\"quoted\"")
        .unwrap();
}

#[test]
fn test_string_concatenation() {
    let mut session = InterpreterSession::new();

    session
        .assert_evaluates_to_string(r#""Hello" + " " + "World!""#, "Hello World!")
        .unwrap();
}

#[test]
fn test_string_comparisons() {
    let mut session = InterpreterSession::new();

    let cases = [
        (r#""a" == "a""#, true),
        (r#""a" != "a""#, false),
        (r#""a" < "b""#, true),
        (r#""b" > "a""#, true),
        (r#""abc" <= "abd""#, true),
        (r#""b" >= "c""#, false),
    ];

    for (input, expected) in cases {
        session.assert_evaluates_to_boolean(input, expected).unwrap();
    }
}

#[test]
fn test_null_equality() {
    let mut session = InterpreterSession::new();

    session
        .assert_evaluates_to_boolean("if (false) { 1 } == if (false) { 2 }", true)
        .unwrap();
}
