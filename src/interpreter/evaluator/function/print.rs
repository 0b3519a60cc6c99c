use std::io::Write;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{function::core::BuiltinResult, utils::check_arity},
        value::core::{Value, render},
    },
};

/// Writes a value to the program output and returns it unchanged.
///
/// Accepts exactly one argument, which may be absent. The value is
/// formatted with [`render`]; no newline is added.
///
/// # Parameters
/// - `args`: Slice containing one argument.
/// - `line`: Line number for error reporting.
/// - `out`: The program output.
///
/// # Errors
/// `RuntimeError::Output` if writing fails.
///
/// # Example
/// ```
/// use lair::interpreter::{evaluator::function::print::print, value::core::Value};
///
/// let mut out = Vec::new();
/// let result = print(&[Some(Value::Num(42))], 1, &mut out).unwrap();
///
/// assert_eq!(result, Some(Value::Num(42)));
/// assert_eq!(out, b"42");
/// ```
pub fn print(args: &[Option<Value>], line: usize, out: &mut dyn Write) -> BuiltinResult {
    check_arity("print", args, 1, line)?;

    write!(out, "{}", render(args[0].as_ref())).map_err(|source| RuntimeError::Output { source,
                                                                                      line })?;
    Ok(args[0].clone())
}

/// Like [`print`], followed by a newline.
///
/// # Example
/// ```
/// use lair::interpreter::{evaluator::function::print::println, value::core::Value};
///
/// let mut out = Vec::new();
/// println(&[Some(Value::from("hi"))], 1, &mut out).unwrap();
/// println(&[None], 2, &mut out).unwrap();
///
/// assert_eq!(String::from_utf8(out).unwrap(), "hi\n(null)\n");
/// ```
pub fn println(args: &[Option<Value>], line: usize, out: &mut dyn Write) -> BuiltinResult {
    check_arity("println", args, 1, line)?;

    writeln!(out, "{}", render(args[0].as_ref())).map_err(|source| RuntimeError::Output { source,
                                                                                        line })?;
    Ok(args[0].clone())
}
