/// The evaluator module executes the program tree.
///
/// The evaluator walks the flattened tree produced by the parser, keeps the
/// chain of scopes, resolves atoms at run time, calls builtins and user
/// functions and runs conditionals. It is the core execution engine of the
/// interpreter.
///
/// # Responsibilities
/// - Evaluates statements and prefix-call expressions.
/// - Manages environments and their lifetimes.
/// - Reports runtime and control-flow errors.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The tokenizer reads the source one line at a time, splits it on spaces
/// and classifies every fragment based on the token before it. Synthetic
/// markers record where lines start and how deeply they are indented.
///
/// # Responsibilities
/// - Converts source text into classified tokens with line and indent
///   information.
/// - Reassembles string literals that contain spaces.
/// - Reports unterminated strings and shadowed parameter names.
pub mod lexer;
/// The parser module builds the program tree from tokens.
///
/// The parser does not nest blocks. It links the tokens of every top-level
/// statement into one chain, leaving the indentation stamped on each node
/// for the evaluator to interpret.
///
/// # Responsibilities
/// - Builds nodes and resolves literal values.
/// - Links call heads to their arguments and statements to each other.
/// - Checks the structural invariants of the program root.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum and the canonical booleans.
/// - Renders values for `str`, `print` and `println`.
pub mod value;
