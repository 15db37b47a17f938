// Ember Lexer
// Single-pass, code-point aware scanner with one character of lookahead

use std::iter::Peekable;
use std::str::CharIndices;

use crate::token::{Span, Token, TokenKind};

/// Converts source text into a stream of tokens
///
/// Characters are drawn from a forward-only sequence of `(byte offset, char)`
/// pairs, so multi-byte identifiers are handled without re-scanning. Once the
/// input is exhausted every call to [`Lexer::next_token`] returns `EOF`.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: usize,
    column: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Scan and return the next token
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let (line, column) = (self.line, self.column);
        let Some((start, ch)) = self.bump() else {
            let end = self.input.len();
            return Token::eof(Span::new(end, end, line, column));
        };

        let kind = match ch {
            '=' => self.either('=', TokenKind::Eq, TokenKind::Assign),
            '!' => self.either('=', TokenKind::NotEq, TokenKind::Bang),
            '<' => self.either('=', TokenKind::LtEq, TokenKind::Lt),
            '>' => self.either('=', TokenKind::GtEq, TokenKind::Gt),
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '"' => return self.read_string(start, line, column),
            c if c.is_ascii_digit() => {
                // A digit run swallows any identifier characters that follow it,
                // so `0x1f` and `12abc` are each a single INT token.
                self.eat_while(is_identifier_char);
                TokenKind::Int
            }
            c if is_identifier_start(c) => {
                self.eat_while(is_identifier_char);
                let end = self.offset();
                TokenKind::lookup_ident(&self.input[start..end])
            }
            _ => TokenKind::Illegal,
        };

        let end = self.offset();
        Token::new(
            kind,
            &self.input[start..end],
            Span::new(start, end, line, column),
        )
    }

    /// Scan the whole input, including the trailing `EOF` token
    pub fn tokenize(input: &'a str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = token.is(TokenKind::Eof);
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    fn read_string(&mut self, start: usize, line: usize, column: usize) -> Token {
        let mut value = String::new();
        loop {
            match self.bump() {
                Some((_, '"')) => {
                    let end = self.offset();
                    return Token::new(
                        TokenKind::String,
                        value,
                        Span::new(start, end, line, column),
                    );
                }
                Some((_, '\\')) => match self.bump() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, 'r')) => value.push('\r'),
                    Some((_, other)) => value.push(other),
                    None => break,
                },
                Some((_, c)) => value.push(c),
                None => break,
            }
        }

        // Unterminated string
        let end = self.input.len();
        Token::new(
            TokenKind::Illegal,
            &self.input[start..end],
            Span::new(start, end, line, column),
        )
    }

    fn skip_whitespace(&mut self) {
        self.eat_while(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
    }

    fn either(&mut self, next: char, matched: TokenKind, otherwise: TokenKind) -> TokenKind {
        if self.peek() == Some(next) {
            self.bump();
            matched
        } else {
            otherwise
        }
    }

    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.bump();
        }
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if let Some((_, ch)) = next {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        next
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, ch)| ch)
    }

    fn offset(&mut self) -> usize {
        self.chars
            .peek()
            .map_or(self.input.len(), |&(offset, _)| offset)
    }
}

/// Yields tokens up to, but not including, `EOF`
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.is(TokenKind::Eof) {
            self.finished = true;
            None
        } else {
            Some(token)
        }
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || !ch.is_ascii()
}

fn is_identifier_char(ch: char) -> bool {
    is_identifier_start(ch) || ch.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind, TokenKind::Ident);
        for _ in 0..3 {
            assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        }
    }

    #[test]
    fn test_two_character_operators() {
        assert_eq!(
            kinds("== != = ! <= >= < >"),
            vec![
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::Assign,
                TokenKind::Bang,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_line_and_column_tracking() {
        let tokens = Lexer::tokenize("let\n  x");
        assert_eq!((tokens[0].span.line, tokens[0].span.column), (1, 1));
        assert_eq!((tokens[1].span.line, tokens[1].span.column), (2, 3));
        assert_eq!(tokens[1].span.start, 6);
    }

    #[test]
    fn test_unterminated_string_is_illegal() {
        let tokens = Lexer::tokenize("\"abc");
        assert_eq!(tokens[0].kind, TokenKind::Illegal);
        assert_eq!(tokens[0].literal, "\"abc");
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn test_iterator_stops_before_eof() {
        let tokens: Vec<Token> = Lexer::new("1 + 2").collect();
        assert_eq!(tokens.len(), 3);
    }
}
