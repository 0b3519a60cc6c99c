/// Ternary search tree map.
///
/// This module provides `TstMap`, the string-keyed map that backs every
/// scope of the interpreter. Keys are walked one byte at a time through a
/// tree whose nodes branch three ways (less, equal, greater). Inserting an
/// existing key fails instead of overwriting, and teardown is iterative with
/// an optional per-value cleanup callback.
pub mod tst;
