/// Arithmetic, comparison and conversion builtins.
///
/// Contains `+`, `-`, `=` and `str`.
pub mod builtin;
/// The builtin table.
///
/// Declares every native function with its arity and registers them into
/// the root environment.
pub mod core;
/// The `print` and `println` builtins.
///
/// Write a rendered value to the program output.
pub mod print;
