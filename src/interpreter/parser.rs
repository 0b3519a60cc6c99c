/// The parse driver.
///
/// Builds the program root and links each top-level statement under it,
/// consuming the block terminator that follows every statement.
pub mod core;

/// Statement and call-head parsing.
///
/// Turns a run of tokens into a leaf node or a call head followed by its
/// `next` chain of arguments.
pub mod statement;
