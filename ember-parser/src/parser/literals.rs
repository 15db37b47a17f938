// Literal parsing functions for the Ember parser
// Handles integer, string and boolean literals

use super::Parser;
use crate::ast::*;
use crate::error::*;
use crate::token::TokenKind;

impl Parser<'_> {
    pub(super) fn parse_integer_literal(&mut self) -> ParseResult<Expression> {
        let token = self.current.clone();
        let value = parse_integer_text(&token.literal)
            .ok_or_else(|| ParseError::invalid_integer(&token.literal, token.span))?;

        Ok(Expression::Integer(IntegerLiteral { token, value }))
    }

    pub(super) fn parse_string_literal(&mut self) -> Expression {
        Expression::String(StringLiteral {
            token: self.current.clone(),
            value: self.current.literal.clone(),
        })
    }

    pub(super) fn parse_boolean_literal(&mut self) -> Expression {
        Expression::Boolean(BooleanLiteral {
            token: self.current.clone(),
            value: self.current_is(TokenKind::True),
        })
    }
}

/// Decode an INT token's text
///
/// Accepts decimal, `0x`, `0o` and `0b` forms with single `_` separators
/// between digits. A leading `0` alone does not select octal.
/// Returns `None` for malformed text or values outside the `i64` range.
pub(crate) fn parse_integer_text(literal: &str) -> Option<i64> {
    let (digits, radix) = match literal.get(..2) {
        Some("0x" | "0X") => (&literal[2..], 16),
        Some("0o" | "0O") => (&literal[2..], 8),
        Some("0b" | "0B") => (&literal[2..], 2),
        _ => (literal, 10),
    };

    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return None;
    }

    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    i64::from_str_radix(&cleaned, radix).ok()
}
