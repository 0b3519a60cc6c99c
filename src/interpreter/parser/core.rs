use std::iter::Peekable;

use tracing::debug;

use crate::{
    ast::Ast,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::statement::parse_one,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a token sequence into a flattened program tree.
///
/// Each top-level statement is parsed with [`parse_one`] and linked as a
/// sibling under the synthetic program root. Exactly one `Dedent` terminator
/// is discarded after every statement. Indentation does not nest the tree;
/// the indent level stamped on every node is left for the evaluator to
/// interpret.
///
/// # Errors
/// - `ParseError::EmptyTokenStream` if `tokens` is empty.
/// - `ParseError::RootHasNext` if the program root ends up with a `next`
///   chain.
/// - Any error raised while building a node, such as an oversized literal.
///
/// # Example
/// ```
/// use lair::interpreter::{lexer::tokenize, parser::core::parse};
///
/// let source = "id x\n  : x\n! println ! id 7";
/// let ast = parse(tokenize(source).unwrap()).unwrap();
///
/// assert_eq!(ast.statements().count(), 2);
/// ```
pub fn parse(tokens: Vec<Token>) -> ParseResult<Ast> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyTokenStream);
    }

    let mut ast = Ast::new();
    let mut tokens = tokens.into_iter().peekable();
    let mut last = None;

    skip_terminator(&mut tokens);

    while let Some(token) = tokens.peek() {
        if token.kind == TokenKind::EndOfInput {
            tokens.next();
            break;
        }

        let (statement, _) = parse_one(&mut tokens, &mut ast)?;
        ast.link_statement(last, statement);
        last = Some(statement);

        skip_terminator(&mut tokens);
    }

    if ast[ast.root()].next.is_some() {
        return Err(ParseError::RootHasNext);
    }

    debug!(statements = ast.statements().count(), nodes = ast.len(), "parsed program");
    Ok(ast)
}

/// Discards the `Dedent` that closes a top-level statement, if it is next.
fn skip_terminator<I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = Token>
{
    if tokens.peek().is_some_and(|t| t.kind == TokenKind::Dedent) {
        tokens.next();
    }
}
