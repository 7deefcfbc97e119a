//! Tokenizer for translation expressions

use super::error::{ParseError, ParseResult};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit1},
    combinator::{map, opt, recognize},
    sequence::{delimited, pair},
};
use std::fmt;

/// Token types in the expression language
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Integer literal; widens to float at the parse boundary
    Integer(i64),
    /// Float literal
    Decimal(f64),
    /// Single- or double-quoted string literal
    String(String),
    /// Identifier: a variable or function name
    Identifier(String),

    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `^`
    Power,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Integer(i) => write!(f, "{i}"),
            Token::Decimal(d) => write!(f, "{d}"),
            Token::String(s) => write!(f, "{s:?}"),
            Token::Identifier(name) => write!(f, "{name}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Multiply => write!(f, "*"),
            Token::Divide => write!(f, "/"),
            Token::Power => write!(f, "^"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
        }
    }
}

/// A token together with its byte offset in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    /// The wrapped value
    pub value: T,
    /// Byte offset of the first character
    pub position: usize,
}

/// Check if a character can start an identifier
pub fn is_identifier_start(c: char) -> bool {
    unicode_xid::UnicodeXID::is_xid_start(c) || c == '_'
}

/// Check if a character can continue an identifier
pub fn is_identifier_continue(c: char) -> bool {
    unicode_xid::UnicodeXID::is_xid_continue(c)
}

/// Tokenize an expression string.
///
/// Whitespace between tokens is skipped; an empty result means the input
/// was empty or all whitespace.
pub fn tokenize(input: &str) -> ParseResult<Vec<Spanned<Token>>> {
    let mut tokens = Vec::new();
    let mut rest = input;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        let position = input.len() - rest.len();
        match token(rest) {
            Ok((next, value)) => {
                tokens.push(Spanned { value, position });
                rest = next;
            }
            Err(_) => {
                // A lone quote means the closing delimiter never arrived.
                return Err(if rest.starts_with('\'') || rest.starts_with('"') {
                    ParseError::UnclosedString { position }
                } else {
                    ParseError::InvalidCharacter {
                        character: rest.chars().next().unwrap(),
                        position,
                    }
                });
            }
        }
    }
    Ok(tokens)
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((
        token_number,
        token_string,
        token_identifier,
        token_single_char,
    ))
    .parse(input)
}

fn token_number(input: &str) -> IResult<&str, Token> {
    let (rest, text) = recognize(pair(digit1, opt(pair(char('.'), digit1)))).parse(input)?;
    let token = if text.contains('.') {
        Token::Decimal(text.parse().expect("digits with one dot parse as f64"))
    } else {
        match text.parse::<i64>() {
            Ok(i) => Token::Integer(i),
            // Digit runs beyond the i64 range still lex, as floats.
            Err(_) => Token::Decimal(text.parse().expect("digit run parses as f64")),
        }
    };
    Ok((rest, token))
}

fn token_string(input: &str) -> IResult<&str, Token> {
    let single = delimited(char('\''), take_while(|c| c != '\''), char('\''));
    let double = delimited(char('"'), take_while(|c| c != '"'), char('"'));
    map(alt((single, double)), |s: &str| Token::String(s.to_string())).parse(input)
}

fn token_identifier(input: &str) -> IResult<&str, Token> {
    let (rest, ident) = recognize(pair(
        take_while1(is_identifier_start),
        take_while(is_identifier_continue),
    ))
    .parse(input)?;
    Ok((rest, Token::Identifier(ident.to_string())))
}

fn token_single_char(input: &str) -> IResult<&str, Token> {
    alt((
        map(char('+'), |_| Token::Plus),
        map(char('-'), |_| Token::Minus),
        map(char('*'), |_| Token::Multiply),
        map(char('/'), |_| Token::Divide),
        map(char('^'), |_| Token::Power),
        map(char('('), |_| Token::LeftParen),
        map(char(')'), |_| Token::RightParen),
        map(char(','), |_| Token::Comma),
    ))
    .parse(input)
}
