use lair::{
    error::ParseError,
    interpreter::lexer::{Token, TokenKind, tokenize},
};
use pretty_assertions::assert_eq;

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn quoted_string_with_spaces_is_one_token() {
    let tokens = tokenize("  ! print \"a b\"").unwrap();

    assert_eq!(kinds(&tokens),
               vec![TokenKind::Indent,
                    TokenKind::Call,
                    TokenKind::Atom,
                    TokenKind::String,
                    TokenKind::EndOfInput]);
    assert_eq!(tokens[0].indent_level, 2);
    assert_eq!(tokens[3].text.as_deref(), Some("a b"));
}

#[test]
fn dedent_is_emitted_for_every_column_zero_line() {
    let tokens = tokenize("! println 1\n! println 2\n\n! println 3").unwrap();
    let dedents = tokens.iter().filter(|t| t.kind == TokenKind::Dedent).count();

    assert_eq!(dedents, 3);
}

#[test]
fn tokens_carry_line_and_indent() {
    let tokens = tokenize("f x\n\n    : x").unwrap();
    let ret = tokens.iter().find(|t| t.kind == TokenKind::Return).unwrap();

    assert_eq!(ret.line, 3);
    assert_eq!(ret.indent_level, 4);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndOfInput));
}

#[test]
fn definitions_and_parameters() {
    let tokens = tokenize("add a b\n  : + a b").unwrap();

    assert_eq!(kinds(&tokens),
               vec![TokenKind::Dedent,
                    TokenKind::FunctionDef,
                    TokenKind::FunctionArg,
                    TokenKind::FunctionArg,
                    TokenKind::Indent,
                    TokenKind::Return,
                    TokenKind::Operator,
                    TokenKind::Atom,
                    TokenKind::Atom,
                    TokenKind::EndOfInput]);
}

#[test]
fn generic_classification() {
    let tokens = tokenize("  ? = x 10 % - \"s\" 1a").unwrap();

    assert_eq!(kinds(&tokens),
               vec![TokenKind::Indent,
                    TokenKind::If,
                    TokenKind::Operator,
                    TokenKind::Atom,
                    TokenKind::Number,
                    TokenKind::Operator,
                    TokenKind::Operator,
                    TokenKind::String,
                    TokenKind::Atom,
                    TokenKind::EndOfInput]);
}

#[test]
fn comments_end_the_line() {
    let tokens = tokenize("# heading\n! println 1 # note \"unterminated").unwrap();

    assert_eq!(kinds(&tokens),
               vec![TokenKind::Dedent,
                    TokenKind::Call,
                    TokenKind::Atom,
                    TokenKind::Number,
                    TokenKind::EndOfInput]);
}

#[test]
fn escapes_are_expanded() {
    let tokens = tokenize("! println \"a\\tb\\nc\\\\d\"").unwrap();

    assert_eq!(tokens[3].text.as_deref(), Some("a\tb\nc\\\\d"));
}

#[test]
fn carriage_returns_are_dropped() {
    let tokens = tokenize("! println 1\r\n! println 2\r\n").unwrap();

    assert_eq!(tokens[3].text.as_deref(), Some("1"));
    assert_eq!(tokens[7].text.as_deref(), Some("2"));
}

#[test]
fn unterminated_string_is_error() {
    let err = tokenize("! println 1\n! println \"a b").unwrap_err();

    assert!(matches!(err, ParseError::UnterminatedString { line: 2 }));
}

#[test]
fn lone_quote_is_unterminated() {
    assert!(matches!(tokenize("! println \""),
                     Err(ParseError::UnterminatedString { line: 1 })));
}

#[test]
fn parameter_shadowing_is_error() {
    assert!(matches!(tokenize("f x x"), Err(ParseError::Shadow { ref name, line: 1 }) if name == "x"));
    assert!(matches!(tokenize("f f"), Err(ParseError::Shadow { ref name, line: 1 }) if name == "f"));
}

#[test]
fn parameter_names_are_scoped_per_definition() {
    assert!(tokenize("f x\n  : x\ng x\n  : x").is_ok());
}
