use crate::test_harness::InterpreterSession;

#[test]
fn test_if_else_expressions() {
    let mut session = InterpreterSession::new();

    session.assert_evaluates_to_integer("if (true) { 10 }", 10).unwrap();
    session.assert_evaluates_to_null("if (false) { 10 }").unwrap();
    session.assert_evaluates_to_integer("if (1) { 10 }", 10).unwrap();
    session.assert_evaluates_to_integer("if (0) { 10 }", 10).unwrap();
    session.assert_evaluates_to_integer("if (1 < 2) { 10 }", 10).unwrap();
    session.assert_evaluates_to_null("if (1 > 2) { 10 }").unwrap();
    session
        .assert_evaluates_to_integer("if (1 > 2) { 10 } else { 20 }", 20)
        .unwrap();
    session
        .assert_evaluates_to_integer("if (1 < 2) { 10 } else { 20 }", 10)
        .unwrap();
    session
        .assert_evaluates_to_integer("if 1 < 2 { 10 } else { 20 }", 10)
        .unwrap();
}

#[test]
fn test_empty_branch_is_null() {
    let mut session = InterpreterSession::new();

    session.assert_evaluates_to_null("if (true) { }").unwrap();
    session.assert_evaluates_to_null("if (true) { let a = 1; }").unwrap();
}

#[test]
fn test_return_statements() {
    let mut session = InterpreterSession::new();

    let cases = [
        ("return 10;", 10),
        ("return 10; 9;", 10),
        ("return 2 * 5; 9;", 10),
        ("9; return 2 * 5; 9;", 10),
        ("if (10 > 1) { return 10; }", 10),
        (
            "if (10 > 1) { if (10 > 1) { return 10; } return 1; }",
            10,
        ),
        ("{ return 3; } 4;", 3),
    ];

    for (input, expected) in cases {
        session.assert_evaluates_to_integer(input, expected).unwrap();
    }
}

#[test]
fn test_return_inside_function_stops_at_call_boundary() {
    let mut session = InterpreterSession::new();

    session
        .assert_evaluates_to_integer(
            "let f = fn(x) { if (x > 5) { return x; } return 0; }; f(10) + f(1);",
            10,
        )
        .unwrap();
    session
        .assert_evaluates_to_integer(
            "let g = fn() { let inner = fn() { return 1; }; inner(); 2 }; g();",
            2,
        )
        .unwrap();
}

#[test]
fn test_statement_block_shares_scope() {
    let mut session = InterpreterSession::new();

    session
        .assert_evaluates_to_integer("{ let inside = 4; } inside * 2", 8)
        .unwrap();
}

#[test]
fn test_return_inside_nested_expression_leaves_function() {
    let mut session = InterpreterSession::new();

    session
        .assert_evaluates_to_integer(
            "let f = fn() { let a = [if (true) { return 1 }]; 2 }; f()",
            1,
        )
        .unwrap();
    session
        .assert_evaluates_to_integer(
            "let g = fn(x) { let h = {\"k\": if (x) { return 10 } else { 0 }}; 20 }; g(true) + g(false)",
            30,
        )
        .unwrap();
    session
        .assert_evaluates_to_integer("let k = fn() { len([if (true) { return 7 }]) }; k()", 7)
        .unwrap();
}

#[test]
fn test_return_is_never_stored_as_a_value() {
    let mut session = InterpreterSession::new();

    session
        .assert_evaluates_to_integer("let a = [if (true) { return 1 }]; a[0] + 1", 1)
        .unwrap();
    session
        .assert_evaluates_to_inspect("a", "Error:identifier not found: a")
        .unwrap();
    session
        .assert_evaluates_to_integer("1 + if (true) { return 2 }", 2)
        .unwrap();
}
