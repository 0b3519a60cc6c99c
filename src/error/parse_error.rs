use thiserror::Error;

#[derive(Debug, Error)]
/// Represents all errors that can occur during tokenizing or parsing.
pub enum ParseError {
    /// A string literal was opened but never closed on the same line.
    #[error("Error on line {line}: String literal has no closing '\"'.")]
    UnterminatedString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A parameter reuses the name of its function or of an earlier
    /// parameter.
    #[error("Error on line {line}: Parameter '{name}' shadows a name already in scope.")]
    Shadow {
        /// The shadowing parameter name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric literal does not fit into a 64-bit integer.
    #[error("Error on line {line}: Literal is too large.")]
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The parser was handed no tokens at all.
    #[error("Error: Cannot parse an empty token stream.")]
    EmptyTokenStream,
    /// The synthetic program root was linked through `next`, which only call
    /// heads may use.
    #[error("Error: Program root must not have a next chain.")]
    RootHasNext,
}
