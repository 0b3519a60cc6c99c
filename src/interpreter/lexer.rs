use std::fmt;

use logos::Logos;
use tracing::{debug, trace};

use crate::error::ParseError;

/// The classification of a token.
///
/// The tokenizer decides the kind of most tokens from the kind of the token
/// before it, so the same text can produce different kinds depending on
/// where it appears on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// The name of a function being defined (first token of a column-zero
    /// line).
    FunctionDef,
    /// A positional parameter name following a definition.
    FunctionArg,
    /// `!`
    Call,
    /// One of `+`, `-`, `=`, `%`.
    Operator,
    /// `:`
    Return,
    /// `?`
    If,
    /// Synthetic marker before the first token of an indented line.
    Indent,
    /// Synthetic marker before the first token of a column-zero line.
    Dedent,
    /// A double-quoted string literal.
    String,
    /// An all-digit integer literal.
    Number,
    /// A bare identifier, resolved at evaluation time.
    Atom,
    /// Synthetic marker after the last line.
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FunctionDef => "FUNCTION_DEF",
            Self::FunctionArg => "FUNCTION_ARG",
            Self::Call => "CALL",
            Self::Operator => "OPERATOR",
            Self::Return => "RETURN",
            Self::If => "IF",
            Self::Indent => "INDENT",
            Self::Dedent => "DEDENT",
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::Atom => "ATOM",
            Self::EndOfInput => "END_OF_INPUT",
        };
        write!(f, "{name}")
    }
}

/// A classified token.
///
/// `text` is `None` for the synthetic markers. For strings it holds the
/// unescaped contents without the surrounding quotes. Every token carries
/// the indentation and the 1-based line number of the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The classification of the token.
    pub kind:         TokenKind,
    /// The token's text, if any.
    pub text:         Option<String>,
    /// Number of leading spaces of the token's line.
    pub indent_level: usize,
    /// Source line the token was read from.
    pub line:         usize,
}

impl Token {
    const fn marker(kind: TokenKind, indent_level: usize, line: usize) -> Self {
        Self { kind,
               text: None,
               indent_level,
               line }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{:>4}:{:<3} {} {text:?}", self.line, self.indent_level, self.kind),
            None => write!(f, "{:>4}:{:<3} {}", self.line, self.indent_level, self.kind),
        }
    }
}

/// The shapes a single space-delimited fragment can take.
///
/// Only used to classify one fragment at a time; a fragment whose first
/// lexeme does not span all of it is an atom.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
enum Lexeme {
    /// `:`
    #[token(":")]
    Return,
    /// `!`
    #[token("!")]
    Call,
    /// `?`
    #[token("?")]
    If,
    /// `+`, `-`, `=` and `%`
    #[token("+")]
    #[token("-")]
    #[token("=")]
    #[token("%")]
    Operator,
    /// Anything wrapped in double quotes.
    #[regex(r#""[^\n]*""#, allow_greedy = true)]
    Str,
    /// `42`
    #[regex(r"[0-9]+")]
    Number,
}

impl From<Lexeme> for TokenKind {
    fn from(lexeme: Lexeme) -> Self {
        match lexeme {
            Lexeme::Return => Self::Return,
            Lexeme::Call => Self::Call,
            Lexeme::If => Self::If,
            Lexeme::Operator => Self::Operator,
            Lexeme::Str => Self::String,
            Lexeme::Number => Self::Number,
        }
    }
}

/// Classifies a single fragment without looking at its neighbours.
///
/// # Example
/// ```
/// use lair::interpreter::lexer::{TokenKind, classify};
///
/// assert_eq!(classify(":"), TokenKind::Return);
/// assert_eq!(classify("%"), TokenKind::Operator);
/// assert_eq!(classify("\"hi\""), TokenKind::String);
/// assert_eq!(classify("123"), TokenKind::Number);
/// assert_eq!(classify("12a"), TokenKind::Atom);
/// assert_eq!(classify("::"), TokenKind::Atom);
/// ```
#[must_use]
pub fn classify(fragment: &str) -> TokenKind {
    let mut lexer = Lexeme::lexer(fragment);

    match lexer.next() {
        Some(Ok(lexeme)) if lexer.span().len() == fragment.len() => lexeme.into(),
        _ => TokenKind::Atom,
    }
}

/// Converts source text into a sequence of classified tokens.
///
/// Lines are processed one at a time and split on ASCII spaces. Every
/// non-empty line is preceded by a marker: `Indent` (carrying the number of
/// leading spaces) when it starts with spaces, `Dedent` when it starts at
/// column zero. A `Dedent` is emitted for every column-zero line, even when
/// the previous line was at column zero too. A fragment starting with `#`
/// ends the line. An `EndOfInput` token closes the sequence.
///
/// Tokens are classified by the kind of the token before them:
/// - after a definition or a parameter: a parameter;
/// - after `Dedent`: `Call` for `!`, otherwise a function definition;
/// - anywhere else: by the fragment's own shape (see [`classify`]), with
///   string literals containing spaces reassembled from several fragments.
///
/// # Errors
/// - `ParseError::Shadow` if a parameter repeats its function's name or an
///   earlier parameter.
/// - `ParseError::UnterminatedString` if a string literal does not close on
///   its own line.
///
/// # Example
/// ```
/// use lair::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("double x\n  : + x x").unwrap();
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Dedent,
///                 TokenKind::FunctionDef,
///                 TokenKind::FunctionArg,
///                 TokenKind::Indent,
///                 TokenKind::Return,
///                 TokenKind::Operator,
///                 TokenKind::Atom,
///                 TokenKind::Atom,
///                 TokenKind::EndOfInput]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut in_scope: Vec<String> = Vec::new();
    let mut last_line = 0;

    for (index, raw) in source.split('\n').enumerate() {
        let line = index + 1;
        last_line = line;

        let content = raw.trim_end_matches('\r');
        let fragments: Vec<&str> = content.split(' ').filter(|f| !f.is_empty()).collect();

        if fragments.first().is_none_or(|f| f.starts_with('#')) {
            continue;
        }

        let indent = content.len() - content.trim_start_matches(' ').len();
        let marker = if indent > 0 { TokenKind::Indent } else { TokenKind::Dedent };
        tokens.push(Token::marker(marker, indent, line));

        let mut cursor = 0;
        while cursor < fragments.len() {
            let fragment = fragments[cursor];
            cursor += 1;

            if fragment.starts_with('#') {
                break;
            }

            let previous = tokens.last().map_or(TokenKind::Dedent, |t| t.kind);

            let (kind, text) = match previous {
                TokenKind::FunctionDef | TokenKind::FunctionArg => {
                    if in_scope.iter().any(|name| name == fragment) {
                        return Err(ParseError::Shadow { name: fragment.to_string(),
                                                        line });
                    }
                    in_scope.push(fragment.to_string());
                    (TokenKind::FunctionArg, fragment.to_string())
                },
                TokenKind::Dedent if fragment == "!" => (TokenKind::Call, fragment.to_string()),
                TokenKind::Dedent => {
                    in_scope.clear();
                    in_scope.push(fragment.to_string());
                    (TokenKind::FunctionDef, fragment.to_string())
                },
                _ => {
                    let mut joined = fragment.to_string();
                    if opens_string(fragment) {
                        loop {
                            let Some(next) = fragments.get(cursor) else {
                                return Err(ParseError::UnterminatedString { line });
                            };
                            cursor += 1;
                            joined.push(' ');
                            joined.push_str(next);
                            if next.ends_with('"') {
                                break;
                            }
                        }
                    }

                    match classify(&joined) {
                        TokenKind::String => {
                            (TokenKind::String, unescape(&joined[1..joined.len() - 1]))
                        },
                        kind => (kind, joined),
                    }
                },
            };

            trace!(line, %kind, text = %text, "token");
            tokens.push(Token { kind,
                                text: Some(text),
                                indent_level: indent,
                                line });
        }
    }

    tokens.push(Token::marker(TokenKind::EndOfInput, 0, last_line));
    debug!(count = tokens.len(), "tokenized source");

    Ok(tokens)
}

/// Returns `true` if `fragment` starts a string literal that continues past
/// the next space.
fn opens_string(fragment: &str) -> bool {
    fragment.starts_with('"') && (fragment.len() == 1 || !fragment.ends_with('"'))
}

/// Replaces the `\n`, `\r` and `\t` escape sequences with the characters
/// they stand for. Any other backslash is kept as written.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            },
            None => out.push('\\'),
        }
    }
    out
}
