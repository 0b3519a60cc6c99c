use lair::{
    ast::NodeKind,
    error::ParseError,
    interpreter::{lexer::tokenize, parser::core::parse, value::core::Value},
};
use pretty_assertions::assert_eq;

#[test]
fn statements_hang_off_the_root() {
    let ast = parse(tokenize("f x\n  : x\n! println f 1\n! println 2").unwrap()).unwrap();
    let kinds: Vec<NodeKind> = ast.statements().map(|id| ast[id].kind).collect();

    assert_eq!(kinds, vec![NodeKind::FunctionDef, NodeKind::Call, NodeKind::Call]);
    assert_eq!(ast[ast.root()].next, None);
}

#[test]
fn definition_body_is_one_flat_chain() {
    let ast = parse(tokenize("f x\n  ? x\n    : 1\n  : 2").unwrap()).unwrap();
    let def = ast.statements().next().unwrap();
    let chain: Vec<(NodeKind, usize)> =
        ast.chain(def).map(|id| (ast[id].kind, ast[id].indent_level)).collect();

    assert_eq!(chain,
               vec![(NodeKind::FunctionDef, 0),
                    (NodeKind::FunctionArg, 0),
                    (NodeKind::Indent, 2),
                    (NodeKind::If, 2),
                    (NodeKind::Atom, 2),
                    (NodeKind::Indent, 4),
                    (NodeKind::Return, 4),
                    (NodeKind::Literal, 4),
                    (NodeKind::Indent, 2),
                    (NodeKind::Return, 2),
                    (NodeKind::Literal, 2),
                    (NodeKind::EndOfInput, 0)]);
}

#[test]
fn only_the_last_statement_reaches_end_of_input() {
    let ast = parse(tokenize("! println 1\n! println 2").unwrap()).unwrap();
    let ends: Vec<bool> = ast.statements()
                             .map(|s| ast.chain(s).any(|id| ast[id].kind == NodeKind::EndOfInput))
                             .collect();

    assert_eq!(ends, vec![false, true]);
}

#[test]
fn chains_link_back() {
    let ast = parse(tokenize("! println + 1 2").unwrap()).unwrap();
    let statement = ast.statements().next().unwrap();

    for id in ast.chain(statement) {
        if let Some(next) = ast[id].next {
            assert_eq!(ast[next].prev, Some(id));
        }
    }
}

#[test]
fn literals_are_resolved() {
    let ast = parse(tokenize("! println + 40 \"two\"").unwrap()).unwrap();
    let statement = ast.statements().next().unwrap();
    let literals: Vec<Value> = ast.chain(statement).filter_map(|id| ast[id].literal.clone()).collect();

    assert_eq!(literals, vec![Value::Num(40), Value::from("two")]);
}

#[test]
fn empty_program_has_no_statements() {
    let ast = parse(tokenize("").unwrap()).unwrap();

    assert!(ast.is_empty());
    assert_eq!(ast.statements().count(), 0);
}

#[test]
fn empty_token_stream_is_error() {
    assert!(matches!(parse(Vec::new()), Err(ParseError::EmptyTokenStream)));
}

#[test]
fn oversized_literal_is_error() {
    let tokens = tokenize("! println 9223372036854775808").unwrap();

    assert!(matches!(parse(tokens), Err(ParseError::LiteralTooLarge { line: 1 })));
}
