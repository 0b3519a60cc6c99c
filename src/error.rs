use thiserror::Error;

/// Parsing errors.
///
/// Defines all error types that can occur while tokenizing and parsing
/// source code: unterminated strings, shadowed parameter names, oversized
/// literals and violations of the tree's structural invariants.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: unresolved
/// atoms, unknown callees, arity and type mismatches, overflow and duplicate
/// names.
pub mod runtime_error;
/// Syntax errors.
///
/// Structurally invalid control flow that is only detected while the
/// evaluator walks the tree, such as a conditional with no block after it.
pub mod syntax_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use syntax_error::SyntaxError;

/// The three kinds of error the interpreter can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed token or tree structure.
    Parse,
    /// Structurally invalid control flow.
    Syntax,
    /// Anything that goes wrong while evaluating.
    Runtime,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse => write!(f, "ERR_PARSE"),
            Self::Syntax => write!(f, "ERR_SYNTAX"),
            Self::Runtime => write!(f, "ERR_RUNTIME"),
        }
    }
}

/// Any error raised while executing a program.
///
/// The first error raised aborts the run and is handed back to the caller
/// of [`crate::execute`] or [`crate::run`]; there is no recovery inside the
/// language.
#[derive(Debug, Error)]
pub enum LairError {
    /// Raised by the tokenizer or the parser.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Raised by the evaluator for invalid control flow.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// Raised by the evaluator or a builtin.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl LairError {
    /// Returns which kind of error this is.
    ///
    /// # Example
    /// ```
    /// use lair::error::{ErrorKind, LairError, RuntimeError};
    ///
    /// let err = LairError::from(RuntimeError::UndefinedAtom { name: "x".to_string(),
    ///                                                         line: 3, });
    /// assert_eq!(err.kind(), ErrorKind::Runtime);
    /// assert_eq!(err.to_string(), "Error on line 3: Atom 'x' is undefined.");
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) => ErrorKind::Parse,
            Self::Syntax(_) => ErrorKind::Syntax,
            Self::Runtime(_) => ErrorKind::Runtime,
        }
    }
}
