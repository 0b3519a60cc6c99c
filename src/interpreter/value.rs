/// Runtime values.
///
/// Defines `Value`, the canonical `TRUE` and `FALSE` singletons and the
/// textual rendering shared by `str`, `print` and `println`.
pub mod core;
