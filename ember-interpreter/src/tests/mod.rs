//! Acceptance tests for the Ember interpreter
//!
//! Each module drives source text through the full lexer → parser →
//! evaluator pipeline via [`InterpreterSession`](crate::InterpreterSession).

pub mod test_acceptance_builtins;
pub mod test_acceptance_control_flow;
pub mod test_acceptance_strings_and_booleans;
pub mod test_session_persistence;
