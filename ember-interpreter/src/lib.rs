//! Ember Interpreter
//!
//! Tree-walking evaluator for programs produced by `ember-parser`.
//!
//! The pieces, leaves first:
//! - [`object`]: runtime values and hash keys
//! - [`environment`]: chained lexical scopes shared by closures
//! - [`builtins`]: the fixed table of native functions
//! - [`evaluator`]: `eval(program, env) -> Object`
//! - [`test_harness`]: a persistent session used by the REPL and tests

pub mod builtins;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod object;
pub mod test_harness;

// Include tests directory with all test modules
#[cfg(test)]
#[path = "tests/mod.rs"]
pub mod tests;

// Re-export public API
pub use environment::Environment;
pub use error::RuntimeError;
pub use evaluator::{eval, eval_program};
pub use object::{Builtin, BuiltinFunction, Function, HashKey, HashPair, Object};
pub use test_harness::{InterpreterSession, SessionError};

/// Parse and evaluate `source` in a fresh global environment
///
/// Convenience for one-shot evaluation; parse errors are returned as the
/// session error carrying every message.
pub fn evaluate_from_string(source: &str) -> Result<Object, SessionError> {
    InterpreterSession::new().evaluate(source)
}
