//! Runtime error types for the Ember interpreter.
//!
//! A [`RuntimeError`] is the typed form of an `Error` object: the evaluator
//! propagates it with `?`, and the public evaluation entry point turns it into
//! [`Object::Error`](crate::Object::Error) carrying the `Display` text.

use ember_parser::Span;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Runtime errors that can occur during evaluation
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("identifier not found: {name}")]
    #[diagnostic(
        code(ember::runtime::identifier_not_found),
        help("Bind the name with `let` before using it")
    )]
    IdentifierNotFound {
        name: String,
        #[label("not found in scope")]
        span: Option<SourceSpan>,
    },

    #[error("unknown operator:{operator}{operand}")]
    #[diagnostic(code(ember::runtime::unknown_prefix_operator))]
    UnknownPrefixOperator {
        operator: &'static str,
        operand: &'static str,
        #[label("unsupported operand")]
        span: Option<SourceSpan>,
    },

    #[error("type not match:{left} {operator} {right}")]
    #[diagnostic(
        code(ember::runtime::type_mismatch),
        help("Both operands must have the same type")
    )]
    TypeMismatch {
        left: &'static str,
        operator: &'static str,
        right: &'static str,
        #[label("mismatched operands")]
        span: Option<SourceSpan>,
    },

    #[error("unknown operator:{left} {operator} {right}")]
    #[diagnostic(code(ember::runtime::unknown_infix_operator))]
    UnknownInfixOperator {
        left: &'static str,
        operator: &'static str,
        right: &'static str,
        #[label("operator not defined for these operands")]
        span: Option<SourceSpan>,
    },

    #[error("not a function:{found}")]
    #[diagnostic(code(ember::runtime::not_a_function))]
    NotAFunction {
        found: &'static str,
        #[label("called here")]
        span: Option<SourceSpan>,
    },

    #[error("unusable as hash key: {found}")]
    #[diagnostic(
        code(ember::runtime::unusable_hash_key),
        help("Only INTEGER, BOOLEAN and STRING values can be hash keys")
    )]
    UnusableHashKey {
        found: &'static str,
        #[label("not hashable")]
        span: Option<SourceSpan>,
    },

    #[error("index operator not supported: {left}[{index}]")]
    #[diagnostic(code(ember::runtime::index_not_supported))]
    IndexNotSupported {
        left: &'static str,
        index: &'static str,
        #[label("cannot index")]
        span: Option<SourceSpan>,
    },

    #[error("division by zero")]
    #[diagnostic(code(ember::runtime::division_by_zero))]
    DivisionByZero {
        #[label("divisor is zero")]
        span: Option<SourceSpan>,
    },

    #[error("wrong number of arguments. got={got}, want={want}")]
    #[diagnostic(code(ember::runtime::wrong_argument_count))]
    WrongArgumentCount {
        got: usize,
        want: usize,
        #[label("in this call")]
        span: Option<SourceSpan>,
    },

    #[error("argument to `{builtin}` not supported, got {found}")]
    #[diagnostic(code(ember::runtime::unsupported_argument))]
    UnsupportedArgument {
        builtin: &'static str,
        found: &'static str,
        #[label("in this call")]
        span: Option<SourceSpan>,
    },

    #[error("argument to `{builtin}` must be ARRAY, got {found}")]
    #[diagnostic(code(ember::runtime::expected_array))]
    ExpectedArray {
        builtin: &'static str,
        found: &'static str,
        #[label("in this call")]
        span: Option<SourceSpan>,
    },
}

impl RuntimeError {
    pub fn identifier_not_found(name: &str, span: Span) -> Self {
        Self::IdentifierNotFound {
            name: name.to_string(),
            span: Some(span.into()),
        }
    }

    pub fn unknown_prefix_operator(operator: &'static str, operand: &'static str, span: Span) -> Self {
        Self::UnknownPrefixOperator {
            operator,
            operand,
            span: Some(span.into()),
        }
    }

    pub fn type_mismatch(
        left: &'static str,
        operator: &'static str,
        right: &'static str,
        span: Span,
    ) -> Self {
        Self::TypeMismatch {
            left,
            operator,
            right,
            span: Some(span.into()),
        }
    }

    pub fn unknown_infix_operator(
        left: &'static str,
        operator: &'static str,
        right: &'static str,
        span: Span,
    ) -> Self {
        Self::UnknownInfixOperator {
            left,
            operator,
            right,
            span: Some(span.into()),
        }
    }

    pub fn not_a_function(found: &'static str, span: Span) -> Self {
        Self::NotAFunction {
            found,
            span: Some(span.into()),
        }
    }

    pub fn unusable_hash_key(found: &'static str, span: Span) -> Self {
        Self::UnusableHashKey {
            found,
            span: Some(span.into()),
        }
    }

    pub fn index_not_supported(left: &'static str, index: &'static str, span: Span) -> Self {
        Self::IndexNotSupported {
            left,
            index,
            span: Some(span.into()),
        }
    }

    pub fn division_by_zero(span: Span) -> Self {
        Self::DivisionByZero {
            span: Some(span.into()),
        }
    }

    // Builtin errors carry no span; the call site adds one via `with_span`

    pub fn wrong_argument_count(got: usize, want: usize) -> Self {
        Self::WrongArgumentCount {
            got,
            want,
            span: None,
        }
    }

    pub fn unsupported_argument(builtin: &'static str, found: &'static str) -> Self {
        Self::UnsupportedArgument {
            builtin,
            found,
            span: None,
        }
    }

    pub fn expected_array(builtin: &'static str, found: &'static str) -> Self {
        Self::ExpectedArray {
            builtin,
            found,
            span: None,
        }
    }

    /// Source location of the failure, if known
    pub fn span(&self) -> Option<SourceSpan> {
        match self {
            Self::IdentifierNotFound { span, .. }
            | Self::UnknownPrefixOperator { span, .. }
            | Self::TypeMismatch { span, .. }
            | Self::UnknownInfixOperator { span, .. }
            | Self::NotAFunction { span, .. }
            | Self::UnusableHashKey { span, .. }
            | Self::IndexNotSupported { span, .. }
            | Self::DivisionByZero { span }
            | Self::WrongArgumentCount { span, .. }
            | Self::UnsupportedArgument { span, .. }
            | Self::ExpectedArray { span, .. } => *span,
        }
    }

    /// Attach a location unless one is already recorded
    pub fn with_span(mut self, location: Span) -> Self {
        let slot = match &mut self {
            Self::IdentifierNotFound { span, .. }
            | Self::UnknownPrefixOperator { span, .. }
            | Self::TypeMismatch { span, .. }
            | Self::UnknownInfixOperator { span, .. }
            | Self::NotAFunction { span, .. }
            | Self::UnusableHashKey { span, .. }
            | Self::IndexNotSupported { span, .. }
            | Self::DivisionByZero { span }
            | Self::WrongArgumentCount { span, .. }
            | Self::UnsupportedArgument { span, .. }
            | Self::ExpectedArray { span, .. } => span,
        };
        if slot.is_none() {
            *slot = Some(location.into());
        }
        self
    }
}

/// Type alias for interpreter results
pub type Result<T> = std::result::Result<T, RuntimeError>;
