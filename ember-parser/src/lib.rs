// Ember Parser Library
// Hand-written lexer and Pratt parser for the Ember language

pub mod ast;
pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::*;
pub use diagnostics::DiagnosticCollector;
pub use error::*;
pub use lexer::Lexer;
pub use parser::{Parser, Precedence};
pub use token::{Span, Token, TokenKind};

/// Parse a whole program, returning every error if any occurred
pub fn parse_program(input: &str) -> Result<Program, Vec<ParseError>> {
    let mut parser = Parser::from_source(input);
    let program = parser.parse_program();
    let errors = parser.into_errors();

    if errors.is_empty() {
        Ok(program)
    } else {
        Err(errors)
    }
}

/// Parse a program and keep the errors alongside the source for reporting
pub fn parse_program_with_diagnostics(input: &str) -> (Program, DiagnosticCollector) {
    let mut parser = Parser::from_source(input);
    let program = parser.parse_program();

    let mut diagnostics = DiagnosticCollector::new(input);
    diagnostics.add_errors(parser.into_errors());

    (program, diagnostics)
}
