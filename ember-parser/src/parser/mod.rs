// Ember Parser
// Recursive-descent statement parser with Pratt expression parsing

mod collections;
mod control_flow;
mod expressions;
mod functions;
mod literals;

pub use expressions::Precedence;

use tracing::{debug, trace};

use crate::ast::*;
use crate::error::*;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Builds a [`Program`] from a token stream
///
/// The parser always holds the current token and one token of lookahead.
/// Errors never abort parsing: a statement that fails to parse is dropped and
/// its error recorded, then parsing resumes after the failure point (and its
/// `;`, if that is the next token). Callers must
/// check [`Parser::errors`] before trusting the returned program.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            errors: Vec::new(),
        }
    }

    pub fn from_source(input: &'a str) -> Self {
        Self::new(Lexer::new(input))
    }

    /// Parse statements until end of input
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.current_is(TokenKind::Eof) {
            if let Some(statement) = self.parse_statement_recovering() {
                program.statements.push(statement);
            }
            self.next_token();
        }

        debug!(
            statements = program.statements.len(),
            errors = self.errors.len(),
            "parsed program"
        );
        program
    }

    /// Errors accumulated so far, in source order
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    fn parse_statement_recovering(&mut self) -> Option<Statement> {
        match self.parse_statement() {
            Ok(statement) => Some(statement),
            Err(error) => {
                trace!(%error, "dropping statement");
                self.skip_semicolon();
                self.errors.push(error);
                None
            }
        }
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.current.kind {
            TokenKind::Let => self.parse_let_statement().map(Statement::Let),
            TokenKind::Return => self.parse_return_statement().map(Statement::Return),
            TokenKind::LBrace => Ok(Statement::Block(self.parse_block_statement())),
            _ => self
                .parse_expression_statement()
                .map(Statement::Expression),
        }
    }

    fn parse_let_statement(&mut self) -> ParseResult<LetStatement> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::Ident)?;
        let name = self.current_identifier();

        self.expect_peek(TokenKind::Assign)?;
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        self.skip_semicolon();
        Ok(LetStatement { token, name, value })
    }

    fn parse_return_statement(&mut self) -> ParseResult<ReturnStatement> {
        let token = self.current.clone();

        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        self.skip_semicolon();
        Ok(ReturnStatement { token, value })
    }

    fn parse_expression_statement(&mut self) -> ParseResult<ExpressionStatement> {
        let token = self.current.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;

        self.skip_semicolon();
        Ok(ExpressionStatement { token, expression })
    }

    // Token movement

    fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    fn current_is(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    /// Advance only if the lookahead has the expected kind
    fn expect_peek(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.peek_is(kind) {
            self.next_token();
            Ok(())
        } else {
            Err(ParseError::unexpected_token(kind, &self.peek))
        }
    }

    fn skip_semicolon(&mut self) {
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
    }

    fn current_identifier(&self) -> Identifier {
        Identifier {
            token: self.current.clone(),
            name: self.current.literal.clone(),
        }
    }
}
