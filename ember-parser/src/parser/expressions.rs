// Expression parsing module
// Precedence table, prefix/infix dispatch and the Pratt loop

use crate::ast::*;
use crate::error::*;
use crate::parser::Parser;
use crate::token::TokenKind;

/// Binding strength of infix operators, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    /// `==` `!=`
    Equals,
    /// `<` `>` `<=` `>=`
    Compare,
    /// `+` `-`
    Sum,
    /// `*` `/`
    Product,
    /// unary `-` `!` `+`
    Prefix,
    /// `f(x)` and `a[i]`
    Call,
}

impl Precedence {
    pub fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
            TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => {
                Precedence::Compare
            }
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
            TokenKind::LParen | TokenKind::LBracket => Precedence::Call,
            _ => Precedence::Lowest,
        }
    }
}

fn infix_operator(kind: TokenKind) -> Option<InfixOperator> {
    Some(match kind {
        TokenKind::Plus => InfixOperator::Add,
        TokenKind::Minus => InfixOperator::Subtract,
        TokenKind::Asterisk => InfixOperator::Multiply,
        TokenKind::Slash => InfixOperator::Divide,
        TokenKind::Lt => InfixOperator::Less,
        TokenKind::Gt => InfixOperator::Greater,
        TokenKind::LtEq => InfixOperator::LessEqual,
        TokenKind::GtEq => InfixOperator::GreaterEqual,
        TokenKind::Eq => InfixOperator::Equal,
        TokenKind::NotEq => InfixOperator::NotEqual,
        _ => return None,
    })
}

fn prefix_operator(kind: TokenKind) -> Option<PrefixOperator> {
    Some(match kind {
        TokenKind::Bang => PrefixOperator::Bang,
        TokenKind::Minus => PrefixOperator::Minus,
        TokenKind::Plus => PrefixOperator::Plus,
        _ => return None,
    })
}

impl Parser<'_> {
    /// Parse an expression whose infix operators all bind tighter than `precedence`
    pub(crate) fn parse_expression(&mut self, precedence: Precedence) -> ParseResult<Expression> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            self.next_token();
            left = self.parse_infix(left)?;
        }

        Ok(left)
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek.kind)
    }

    fn current_precedence(&self) -> Precedence {
        Precedence::of(self.current.kind)
    }

    fn parse_prefix(&mut self) -> ParseResult<Expression> {
        match self.current.kind {
            TokenKind::Ident => Ok(Expression::Identifier(self.current_identifier())),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::String => Ok(self.parse_string_literal()),
            TokenKind::True | TokenKind::False => Ok(self.parse_boolean_literal()),
            TokenKind::Bang | TokenKind::Minus | TokenKind::Plus => self.parse_prefix_expression(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_hash_literal(),
            _ => Err(ParseError::no_prefix_parse(&self.current)),
        }
    }

    fn parse_infix(&mut self, left: Expression) -> ParseResult<Expression> {
        match self.current.kind {
            TokenKind::LParen => self.parse_call_expression(left),
            TokenKind::LBracket => self.parse_index_expression(left),
            _ => self.parse_infix_expression(left),
        }
    }

    fn parse_prefix_expression(&mut self) -> ParseResult<Expression> {
        let token = self.current.clone();
        let operator =
            prefix_operator(token.kind).ok_or_else(|| ParseError::no_prefix_parse(&token))?;

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Ok(Expression::Prefix(PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> ParseResult<Expression> {
        let token = self.current.clone();
        let operator =
            infix_operator(token.kind).ok_or_else(|| ParseError::no_prefix_parse(&token))?;
        let precedence = self.current_precedence();

        self.next_token();
        let right = self.parse_expression(precedence)?;

        Ok(Expression::Infix(InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> ParseResult<Expression> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Ok(expression)
    }

    fn parse_index_expression(&mut self, left: Expression) -> ParseResult<Expression> {
        let token = self.current.clone();

        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RBracket)?;

        Ok(Expression::Index(IndexExpression {
            token,
            left: Box::new(left),
            index: Box::new(index),
        }))
    }
}
