// Control flow parsing module
// Handles if expressions and brace-delimited blocks

use crate::ast::*;
use crate::error::*;
use crate::parser::{Parser, Precedence};
use crate::token::TokenKind;

impl Parser<'_> {
    /// `if <condition> { ... } else { ... }`; parentheses around the condition are optional
    pub(crate) fn parse_if_expression(&mut self) -> ParseResult<Expression> {
        let token = self.current.clone();

        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block_statement();

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();
            self.expect_peek(TokenKind::LBrace)?;
            Some(self.parse_block_statement())
        } else {
            None
        };

        Ok(Expression::If(IfExpression {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    /// Parse statements up to the matching `}` (or end of input)
    ///
    /// Expects the current token to be the opening `{` and leaves the closing
    /// `}` as the current token. Failed statements inside the block are
    /// recorded and skipped like at top level.
    pub(crate) fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.current.clone();
        let mut statements = Vec::new();

        self.next_token();
        while !self.current_is(TokenKind::RBrace) && !self.current_is(TokenKind::Eof) {
            if let Some(statement) = self.parse_statement_recovering() {
                statements.push(statement);
            }
            self.next_token();
        }

        BlockStatement { token, statements }
    }
}
