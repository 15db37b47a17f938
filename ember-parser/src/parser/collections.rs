// Collection parsing functions for the Ember parser
// Handles array and hash literals and the shared expression-list parser

use crate::ast::*;
use crate::error::*;
use crate::parser::{Parser, Precedence};
use crate::token::TokenKind;

impl Parser<'_> {
    pub(super) fn parse_array_literal(&mut self) -> ParseResult<Expression> {
        let token = self.current.clone();
        let elements = self.parse_expression_list(TokenKind::RBracket)?;

        Ok(Expression::Array(ArrayLiteral { token, elements }))
    }

    /// `{ <key>: <value>, ... }`, a trailing comma is tolerated
    pub(super) fn parse_hash_literal(&mut self) -> ParseResult<Expression> {
        let token = self.current.clone();
        let mut pairs = Vec::new();

        while !self.peek_is(TokenKind::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            self.expect_peek(TokenKind::Colon)?;
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));

            if !self.peek_is(TokenKind::RBrace) {
                self.expect_peek(TokenKind::Comma)?;
            }
        }

        self.expect_peek(TokenKind::RBrace)?;
        Ok(Expression::Hash(HashLiteral { token, pairs }))
    }

    /// Comma-separated expressions terminated by `end`
    ///
    /// The current token is the opening delimiter; on success the closing
    /// delimiter is current.
    pub(super) fn parse_expression_list(&mut self, end: TokenKind) -> ParseResult<Vec<Expression>> {
        let mut list = Vec::new();

        if self.peek_is(end) {
            self.next_token();
            return Ok(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end)?;
        Ok(list)
    }
}
