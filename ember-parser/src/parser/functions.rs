// Function parsing module
// Handles function literals, parameter lists and calls

use std::rc::Rc;

use crate::ast::*;
use crate::error::*;
use crate::parser::Parser;
use crate::token::TokenKind;

impl Parser<'_> {
    pub(crate) fn parse_function_literal(&mut self) -> ParseResult<Expression> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_function_parameters()?;

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement();

        Ok(Expression::Function(Rc::new(FunctionLiteral {
            token,
            parameters,
            body,
        })))
    }

    fn parse_function_parameters(&mut self) -> ParseResult<Vec<Identifier>> {
        let mut parameters = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Ok(parameters);
        }

        self.expect_peek(TokenKind::Ident)?;
        parameters.push(self.current_identifier());

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.expect_peek(TokenKind::Ident)?;
            parameters.push(self.current_identifier());
        }

        self.expect_peek(TokenKind::RParen)?;
        Ok(parameters)
    }

    pub(crate) fn parse_call_expression(&mut self, function: Expression) -> ParseResult<Expression> {
        let token = self.current.clone();
        let arguments = self.parse_expression_list(TokenKind::RParen)?;

        Ok(Expression::Call(CallExpression {
            token,
            function: Box::new(function),
            arguments,
        }))
    }
}
