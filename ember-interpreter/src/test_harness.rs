//! Interpreter session for the Ember interpreter
//!
//! A session runs source text through lexer, parser and evaluator against one
//! persistent global environment, so bindings survive between evaluations the
//! way they do in the REPL. It also offers assertion helpers for tests.

use ember_parser::{parse_program_with_diagnostics, DiagnosticCollector};
use miette::Diagnostic;
use thiserror::Error;

use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::evaluator;
use crate::object::Object;

/// Errors that can occur during session operations
#[derive(Debug, Error, Diagnostic)]
pub enum SessionError {
    #[error("parse failed with {} error(s)", .diagnostics.error_count())]
    #[diagnostic(code(ember::session::parse))]
    Parse { diagnostics: DiagnosticCollector },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("Assertion failed: expected {expected}, but got {actual}")]
    AssertionFailed { expected: String, actual: String },

    #[error("Type error: expected {expected_type}, got {actual_type}")]
    TypeError {
        expected_type: String,
        actual_type: String,
    },
}

impl SessionError {
    /// Parse error messages, one per error; empty for other kinds
    pub fn parse_messages(&self) -> Vec<String> {
        match self {
            SessionError::Parse { diagnostics } => diagnostics.messages(),
            _ => Vec::new(),
        }
    }
}

/// Interpreter session with a persistent global environment
#[derive(Debug, Default)]
pub struct InterpreterSession {
    env: Environment,
}

impl InterpreterSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and evaluate, keeping runtime faults as typed errors
    ///
    /// Returns `Ok(None)` when the input produced no value (for example when
    /// it ends with a `let`).
    pub fn execute(&mut self, source: &str) -> Result<Option<Object>, SessionError> {
        let (program, diagnostics) = parse_program_with_diagnostics(source);
        if diagnostics.has_errors() {
            return Err(SessionError::Parse { diagnostics });
        }

        Ok(evaluator::eval_program(&program, &self.env)?)
    }

    /// Parse and evaluate; runtime faults come back as [`Object::Error`]
    pub fn evaluate(&mut self, source: &str) -> Result<Object, SessionError> {
        match self.execute(source) {
            Ok(value) => Ok(value.unwrap_or(Object::Null)),
            Err(SessionError::Runtime(error)) => Ok(Object::Error(error.to_string())),
            Err(error) => Err(error),
        }
    }

    /// Bind a variable in the global scope
    pub fn define_variable(&mut self, name: &str, value: Object) {
        self.env.set(name, value);
    }

    /// Global bindings, sorted by name
    pub fn variables(&self) -> Vec<(String, Object)> {
        self.env.local_bindings()
    }

    /// Discard every binding by starting a fresh global environment
    pub fn reset(&mut self) {
        self.env = Environment::new();
    }

    /// Execute code and assert it evaluates to a specific integer value
    pub fn assert_evaluates_to_integer(
        &mut self,
        source: &str,
        expected: i64,
    ) -> Result<(), SessionError> {
        let result = self.evaluate(source)?;

        match result {
            Object::Integer(value) if value == expected => Ok(()),
            Object::Integer(value) => Err(SessionError::AssertionFailed {
                expected: expected.to_string(),
                actual: value.to_string(),
            }),
            _ => Err(type_error("INTEGER", &result)),
        }
    }

    /// Execute code and assert it evaluates to a specific boolean value
    pub fn assert_evaluates_to_boolean(
        &mut self,
        source: &str,
        expected: bool,
    ) -> Result<(), SessionError> {
        let result = self.evaluate(source)?;

        match result {
            Object::Boolean(value) if value == expected => Ok(()),
            Object::Boolean(value) => Err(SessionError::AssertionFailed {
                expected: expected.to_string(),
                actual: value.to_string(),
            }),
            _ => Err(type_error("BOOLEAN", &result)),
        }
    }

    /// Execute code and assert it evaluates to a specific string value
    pub fn assert_evaluates_to_string(
        &mut self,
        source: &str,
        expected: &str,
    ) -> Result<(), SessionError> {
        let result = self.evaluate(source)?;

        match result {
            Object::String(ref value) if value == expected => Ok(()),
            Object::String(value) => Err(SessionError::AssertionFailed {
                expected: expected.to_string(),
                actual: value,
            }),
            _ => Err(type_error("STRING", &result)),
        }
    }

    /// Execute code and assert it evaluates to `null`
    pub fn assert_evaluates_to_null(&mut self, source: &str) -> Result<(), SessionError> {
        let result = self.evaluate(source)?;

        match result {
            Object::Null => Ok(()),
            _ => Err(type_error("NULL", &result)),
        }
    }

    /// Execute code and compare the result's inspection text
    pub fn assert_evaluates_to_inspect(
        &mut self,
        source: &str,
        expected: &str,
    ) -> Result<(), SessionError> {
        let actual = self.evaluate(source)?.inspect();

        if actual == expected {
            Ok(())
        } else {
            Err(SessionError::AssertionFailed {
                expected: expected.to_string(),
                actual,
            })
        }
    }
}

fn type_error(expected_type: &str, actual: &Object) -> SessionError {
    SessionError::TypeError {
        expected_type: expected_type.to_string(),
        actual_type: format!("{} ({})", actual.type_name(), actual.inspect()),
    }
}
