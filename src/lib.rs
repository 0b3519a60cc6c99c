//! # lair
//!
//! lair is an interpreter for a small, indentation-sensitive scripting
//! language written in Rust. Every call is written in prefix form, functions
//! are defined at column zero and their bodies are indented below them.
//! Programs are tokenized, flattened into a linked tree and evaluated
//! against a chain of scopes.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::{self, Write};

use crate::{
    error::LairError,
    interpreter::{
        evaluator::core::Context, lexer::tokenize, parser::core::parse, value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the arena-backed tree the parser builds. Statements
/// are not nested: a call head links every node of its statement into one
/// `next` chain and each node carries the indentation of its line, which the
/// evaluator uses to find blocks.
///
/// # Responsibilities
/// - Defines node kinds and the node record shared by heads and leaves.
/// - Stores nodes in an arena addressed by `NodeId`.
/// - Iterates over statements and `next` chains.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during tokenizing,
/// parsing, or evaluating code. Every error belongs to one of three kinds
/// (parse, syntax, runtime) and carries the source line where one is known.
///
/// # Responsibilities
/// - Defines error enums for all failure modes.
/// - Attaches line numbers and detailed messages for context.
/// - Unifies the phases under `LairError`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together tokenizing, parsing, evaluation and value
/// representations to provide a complete runtime for lair programs.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, evaluator and value types.
/// - Provides entry points for each phase.
pub mod interpreter;
/// General-purpose data structures.
///
/// # Responsibilities
/// - Provides the ternary search tree map used for every scope.
pub mod util;

/// Runs a program and writes its output to `out`.
///
/// The source is tokenized, parsed and evaluated statement by statement.
/// The first error stops the run.
///
/// # Returns
/// The value of the last top-level statement, if it produced one.
///
/// # Errors
/// The first parse, syntax or runtime error raised.
///
/// # Examples
/// ```
/// use lair::{interpreter::value::core::Value, run};
///
/// let source = "double x\n  : + x x\n! println ! double 21";
/// let mut out = Vec::new();
/// let last = run(source, &mut out).unwrap();
///
/// assert_eq!(String::from_utf8(out).unwrap(), "42\n");
/// assert_eq!(last, Some(Value::Num(42)));
///
/// // 'y' is never bound.
/// assert!(run("! println y", &mut Vec::<u8>::new()).is_err());
/// ```
pub fn run<W: Write>(source: &str, out: W) -> Result<Option<Value>, LairError> {
    let tokens = tokenize(source)?;
    let ast = parse(tokens)?;
    let mut context = Context::new(&ast, out)?;

    context.run()
}

/// Runs a program, writing its output to standard output.
///
/// # Errors
/// The first parse, syntax or runtime error raised.
///
/// # Examples
/// ```
/// use lair::execute;
///
/// assert!(execute("! x : + 2 2").is_ok());
/// assert!(execute("! x : \"unterminated").is_err());
/// ```
pub fn execute(source: &str) -> Result<(), LairError> {
    run(source, io::stdout().lock()).map(|_| ())
}
