use thiserror::Error;

#[derive(Debug, Error)]
/// Represents control-flow errors detected while walking the tree.
pub enum SyntaxError {
    /// A conditional was not followed by a deeper indented block.
    #[error("Error on line {line}: Conditional has no indented block after it.")]
    IfWithoutBlock {
        /// The source line of the conditional.
        line: usize,
    },
    /// The input ended where an expression was required.
    #[error("Error on line {line}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A construct appeared where only an expression may stand.
    #[error("Error on line {line}: Unexpected {found} in expression position.")]
    UnexpectedNode {
        /// Description of the node that was found.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
}
