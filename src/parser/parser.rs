//! Recursive-descent parser over the token stream

use super::error::{ParseError, ParseResult};
use super::lexer::TokenStream;
use super::tokenizer::{Token, tokenize};
use crate::ast::{BinaryOperator, ExpressionNode, LiteralValue};

/// Parse a translation expression string into an AST.
///
/// Fails on empty input, unterminated strings, mismatched brackets,
/// unexpected tokens, and trailing input.
pub fn parse_expression(input: &str) -> ParseResult<ExpressionNode> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::EmptyExpression);
    }
    let mut stream = TokenStream::new(tokens);
    let expression = parse_expr(&mut stream)?;
    if let Some(trailing) = stream.peek() {
        return Err(ParseError::TrailingInput {
            token: trailing.value.to_string(),
            position: trailing.position,
        });
    }
    Ok(expression)
}

/// Expression := Term { ("+"|"-") Term }*
fn parse_expr(stream: &mut TokenStream) -> ParseResult<ExpressionNode> {
    let mut left = parse_term(stream)?;

    while let Some(token) = stream.peek() {
        let op = match token.value {
            Token::Plus => BinaryOperator::Add,
            Token::Minus => BinaryOperator::Subtract,
            _ => break,
        };
        stream.next();
        let right = parse_term(stream)?;
        left = ExpressionNode::binary_op(op, left, right);
    }

    Ok(left)
}

/// Term := Factor { ("*"|"/") Factor }*
fn parse_term(stream: &mut TokenStream) -> ParseResult<ExpressionNode> {
    let mut left = parse_factor(stream)?;

    while let Some(token) = stream.peek() {
        let op = match token.value {
            Token::Multiply => BinaryOperator::Multiply,
            Token::Divide => BinaryOperator::Divide,
            _ => break,
        };
        stream.next();
        let right = parse_factor(stream)?;
        left = ExpressionNode::binary_op(op, left, right);
    }

    Ok(left)
}

/// Factor := Value [ "^" Value ]
///
/// The exponent is a single Value, so exponents do not chain without
/// parentheses.
fn parse_factor(stream: &mut TokenStream) -> ParseResult<ExpressionNode> {
    let base = parse_value(stream)?;

    if let Some(token) = stream.peek() {
        if token.value == Token::Power {
            stream.next();
            let exponent = parse_value(stream)?;
            return Ok(ExpressionNode::binary_op(
                BinaryOperator::Power,
                base,
                exponent,
            ));
        }
    }

    Ok(base)
}

/// Value := Number | String | Function | Variable | "(" Expression ")"
fn parse_value(stream: &mut TokenStream) -> ParseResult<ExpressionNode> {
    let Some(token) = stream.next() else {
        return Err(ParseError::UnexpectedEof);
    };

    match token.value {
        Token::Integer(i) => Ok(ExpressionNode::literal(LiteralValue::Number(i as f64))),
        Token::Decimal(d) => Ok(ExpressionNode::literal(LiteralValue::Number(d))),
        Token::String(s) => Ok(ExpressionNode::literal(LiteralValue::String(s))),

        Token::Identifier(name) => {
            if matches!(stream.peek(), Some(next) if next.value == Token::LeftParen) {
                stream.next();
                let args = parse_argument_list(stream)?;
                stream.expect(&Token::RightParen)?;
                Ok(ExpressionNode::function_call(name, args))
            } else {
                Ok(ExpressionNode::identifier(name))
            }
        }

        Token::LeftParen => {
            let expression = parse_expr(stream)?;
            stream.expect(&Token::RightParen)?;
            Ok(expression)
        }

        other => Err(ParseError::UnexpectedToken {
            token: other.to_string(),
            position: token.position,
        }),
    }
}

/// Comma-separated argument list, possibly empty
fn parse_argument_list(stream: &mut TokenStream) -> ParseResult<Vec<ExpressionNode>> {
    let mut args = Vec::new();

    if matches!(stream.peek(), Some(token) if token.value == Token::RightParen) {
        return Ok(args);
    }

    args.push(parse_expr(stream)?);
    while matches!(stream.peek(), Some(token) if token.value == Token::Comma) {
        stream.next();
        args.push(parse_expr(stream)?);
    }

    Ok(args)
}
