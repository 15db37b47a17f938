// Ember Parser Error Handling
// Accumulated parse errors with miette integration

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::token::{Span, Token, TokenKind};

/// A single parse error
///
/// The `Display` text is the user-facing message; the span points at the
/// offending token for report rendering.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {found} instead")]
    #[diagnostic(
        code(ember::parse::unexpected_token),
        help("Expected {expected} here")
    )]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        #[label("found {found}")]
        span: SourceSpan,
    },

    #[error("no prefix parse function for {token} found")]
    #[diagnostic(
        code(ember::parse::no_prefix_parse),
        help("This token cannot start an expression")
    )]
    NoPrefixParse {
        token: TokenKind,
        #[label("unexpected {token}")]
        span: SourceSpan,
    },

    #[error("could not parse \"{literal}\" as integer")]
    #[diagnostic(
        code(ember::parse::invalid_integer),
        help("Integer literals are decimal, 0x, 0o or 0b digits (with optional `_` separators) within the 64-bit signed range")
    )]
    InvalidInteger {
        literal: String,
        #[label("invalid integer")]
        span: SourceSpan,
    },
}

impl ParseError {
    pub fn unexpected_token(expected: TokenKind, found: &Token) -> Self {
        ParseError::UnexpectedToken {
            expected,
            found: found.kind,
            span: found.span.into(),
        }
    }

    pub fn no_prefix_parse(token: &Token) -> Self {
        ParseError::NoPrefixParse {
            token: token.kind,
            span: token.span.into(),
        }
    }

    pub fn invalid_integer(literal: impl Into<String>, span: Span) -> Self {
        ParseError::InvalidInteger {
            literal: literal.into(),
            span: span.into(),
        }
    }

    /// Source span of the offending token
    pub fn span(&self) -> SourceSpan {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::NoPrefixParse { span, .. }
            | ParseError::InvalidInteger { span, .. } => *span,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
