use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Ast, AstNode, NodeId},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::ParseResult,
        value::core::Value,
    },
};

/// Parses one leaf or one call head with everything it owns.
///
/// The head token becomes a node. If it is a function definition or a `!`
/// call, every following token up to the next `Dedent` is parsed recursively
/// and appended to the head's `next` chain. An `EndOfInput` reached this way
/// is consumed and appended too, so a statement can run unterminated into
/// the end of the file. Any other token is returned as a lone leaf and the
/// rest of the stream is left to the caller.
///
/// # Returns
/// The head of the parsed chain and its last node.
///
/// # Errors
/// Propagates `ParseError::LiteralTooLarge` for oversized numbers.
pub fn parse_one<I>(tokens: &mut Peekable<I>, ast: &mut Ast) -> ParseResult<(NodeId, NodeId)>
    where I: Iterator<Item = Token>
{
    let Some(token) = tokens.next() else {
        return Err(ParseError::EmptyTokenStream);
    };

    let is_call_head = matches!(token.kind, TokenKind::FunctionDef | TokenKind::Call);
    let head = ast.push(build_node(token)?);

    if !is_call_head {
        return Ok((head, head));
    }

    let mut tail = head;
    while let Some(next) = tokens.peek() {
        match next.kind {
            TokenKind::Dedent => break,
            TokenKind::EndOfInput => {
                if let Some(end) = tokens.next() {
                    let end = ast.push(build_node(end)?);
                    ast.link_next(tail, end);
                    tail = end;
                }
                break;
            },
            _ => {
                let (argument, argument_tail) = parse_one(tokens, ast)?;
                ast.link_next(tail, argument);
                tail = argument_tail;
            },
        }
    }

    Ok((head, tail))
}

/// Builds an unlinked node from a token, resolving literal values.
fn build_node(token: Token) -> ParseResult<AstNode> {
    let literal = match token.kind {
        TokenKind::Number => {
            let digits = token.text.as_deref().unwrap_or_default();
            let n = digits.parse::<i64>()
                          .map_err(|_| ParseError::LiteralTooLarge { line: token.line })?;
            Some(Value::Num(n))
        },
        TokenKind::String => Some(Value::from(token.text.clone().unwrap_or_default())),
        _ => None,
    };

    Ok(AstNode::new(token.kind.into(),
                    token.text.map(Rc::from),
                    literal,
                    token.indent_level,
                    token.line))
}
