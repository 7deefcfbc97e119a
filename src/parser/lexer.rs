//! Token stream consumed by the parser

use super::error::{ParseError, ParseResult};
use super::tokenizer::{Spanned, Token};
use std::mem;

/// Token stream with single-token lookahead
#[derive(Debug)]
pub struct TokenStream {
    tokens: Vec<Spanned<Token>>,
    position: usize,
}

impl TokenStream {
    /// Create a new token stream
    pub fn new(tokens: Vec<Spanned<Token>>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Peek at the current token without consuming
    pub fn peek(&self) -> Option<&Spanned<Token>> {
        self.tokens.get(self.position)
    }

    /// Consume and return the current token
    pub fn next(&mut self) -> Option<Spanned<Token>> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Check if we're at the end of the stream
    pub fn is_eof(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Expect a token of the same kind as `expected`, consuming it
    pub fn expect(&mut self, expected: &Token) -> ParseResult<Spanned<Token>> {
        match self.peek() {
            Some(token) if tokens_match(&token.value, expected) => Ok(self.next().unwrap()),
            Some(token) => Err(ParseError::UnexpectedToken {
                token: token.value.to_string(),
                position: token.position,
            }),
            None => Err(ParseError::UnexpectedEof),
        }
    }
}

/// Kind-level token comparison: literal and identifier payloads are
/// ignored, punctuation matches exactly.
fn tokens_match(token: &Token, expected: &Token) -> bool {
    mem::discriminant(token) == mem::discriminant(expected)
}
