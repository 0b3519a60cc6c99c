/// Core evaluation logic and the block walk.
///
/// Contains the evaluation `Context`, the top-level statement loop, the
/// block walk and expression dispatch.
pub mod core;

/// Environments and name resolution.
///
/// Defines the scope frames, their lookup order and their teardown.
pub mod environment;

/// Function calls and assignments.
///
/// Gathers arguments, calls builtins and user functions and binds names.
pub mod call;

/// Conditional evaluation.
///
/// Runs or skips the indented block that follows a `?`.
pub mod conditional;

/// Builtin functions.
///
/// The fixed table of native functions registered into the root
/// environment.
pub mod function;

/// Utility functions for evaluation.
///
/// Provides argument checks shared by the builtins.
pub mod utils;
