use std::io::Write;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            function::core::BuiltinResult,
            utils::{check_arity, operand_mismatch, present},
        },
        value::core::{Value, render},
    },
};

/// Adds two numbers or concatenates two strings.
///
/// # Parameters
/// - `args`: Two operands of the same kind.
/// - `line`: Line number for error reporting.
///
/// # Errors
/// - `RuntimeError::Overflow` if the sum does not fit into 64 bits.
/// - `RuntimeError::TypeError` for absent operands or mixed kinds.
///
/// # Example
/// ```
/// use lair::interpreter::{evaluator::function::builtin::plus, value::core::Value};
///
/// let mut out = Vec::new();
/// let sum = plus(&[Some(Value::Num(40)), Some(Value::Num(2))], 1, &mut out).unwrap();
/// let joined = plus(&[Some(Value::from("foo")), Some(Value::from("bar"))], 1, &mut out).unwrap();
///
/// assert_eq!(sum, Some(Value::Num(42)));
/// assert_eq!(joined, Some(Value::from("foobar")));
/// ```
pub fn plus(args: &[Option<Value>], line: usize, _out: &mut dyn Write) -> BuiltinResult {
    check_arity("+", args, 2, line)?;
    let lhs = present("+", &args[0], line)?;
    let rhs = present("+", &args[1], line)?;

    match (lhs, rhs) {
        (Value::Num(a), Value::Num(b)) => {
            let sum = a.checked_add(*b).ok_or(RuntimeError::Overflow { line })?;
            Ok(Some(Value::Num(sum)))
        },
        (Value::Str(a), Value::Str(b)) => Ok(Some(Value::from(format!("{a}{b}")))),
        _ => Err(operand_mismatch("+", lhs, rhs, line)),
    }
}

/// Subtracts the second number from the first.
///
/// # Errors
/// - `RuntimeError::Overflow` if the difference does not fit into 64 bits.
/// - `RuntimeError::TypeError` unless both operands are numbers.
pub fn minus(args: &[Option<Value>], line: usize, _out: &mut dyn Write) -> BuiltinResult {
    check_arity("-", args, 2, line)?;
    let lhs = present("-", &args[0], line)?;
    let rhs = present("-", &args[1], line)?;

    match (lhs, rhs) {
        (Value::Num(a), Value::Num(b)) => {
            let difference = a.checked_sub(*b).ok_or(RuntimeError::Overflow { line })?;
            Ok(Some(Value::Num(difference)))
        },
        _ => Err(operand_mismatch("-", lhs, rhs, line)),
    }
}

/// Compares two values of the same kind.
///
/// Numbers compare by value, booleans by identity, functions by name.
/// Strings are compared as NUL-terminated byte strings, limited to the sum
/// of both lengths; see [`bounded_eq`].
///
/// # Returns
/// The canonical `true` or `false`.
///
/// # Errors
/// `RuntimeError::TypeError` for absent operands or operands of different
/// kinds.
///
/// # Example
/// ```
/// use lair::interpreter::{evaluator::function::builtin::equals, value::core::Value};
///
/// let mut out = Vec::new();
/// let same = equals(&[Some(Value::Num(7)), Some(Value::Num(7))], 1, &mut out).unwrap();
/// let different = equals(&[Some(Value::from("a")), Some(Value::from("b"))], 1, &mut out).unwrap();
///
/// assert!(same.is_some_and(|v| v.is_true()));
/// assert!(different.is_some_and(|v| v.is_false()));
/// assert!(equals(&[Some(Value::Num(1)), Some(Value::from("1"))], 1, &mut out).is_err());
/// ```
pub fn equals(args: &[Option<Value>], line: usize, _out: &mut dyn Write) -> BuiltinResult {
    check_arity("=", args, 2, line)?;
    let lhs = present("=", &args[0], line)?;
    let rhs = present("=", &args[1], line)?;

    let equal = match (lhs, rhs) {
        (Value::Num(a), Value::Num(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => std::ptr::eq(*a, *b),
        (Value::Str(a), Value::Str(b)) => bounded_eq(a.as_bytes(), b.as_bytes(), a.len() + b.len()),
        (Value::Function(a), Value::Function(b)) => a == b,
        _ => return Err(operand_mismatch("=", lhs, rhs, line)),
    };

    Ok(Some(Value::canonical(equal)))
}

/// Compares two byte strings as if both were NUL-terminated, looking at no
/// more than `bound` bytes.
///
/// Bytes past the end of a slice read as NUL. The comparison stops at the
/// first difference or at the first NUL both sides share, so anything after
/// an embedded NUL is ignored.
///
/// # Example
/// ```
/// use lair::interpreter::evaluator::function::builtin::bounded_eq;
///
/// assert!(bounded_eq(b"abc", b"abc", 6));
/// assert!(!bounded_eq(b"abc", b"abcd", 7));
/// assert!(bounded_eq(b"a\0x", b"a\0y", 6));
/// assert!(bounded_eq(b"", b"", 0));
/// ```
#[must_use]
pub fn bounded_eq(a: &[u8], b: &[u8], bound: usize) -> bool {
    for i in 0..bound {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        if x != y {
            return false;
        }
        if x == 0 {
            return true;
        }
    }
    true
}

/// Renders any value, including the absent one, as a string.
///
/// Named `str_fn` so it does not shadow the `str` primitive.
///
/// # Example
/// ```
/// use lair::interpreter::{evaluator::function::builtin::str_fn, value::core::Value};
///
/// let mut out = Vec::new();
///
/// assert_eq!(str_fn(&[Some(Value::Num(42))], 1, &mut out).unwrap(), Some(Value::from("42")));
/// assert_eq!(str_fn(&[None], 1, &mut out).unwrap(), Some(Value::from("(null)")));
/// ```
pub fn str_fn(args: &[Option<Value>], line: usize, _out: &mut dyn Write) -> BuiltinResult {
    check_arity("str", args, 1, line)?;

    Ok(Some(Value::from(render(args[0].as_ref()))))
}
