use crate::{error::RuntimeError, interpreter::value::core::Value};

/// Checks that a builtin received exactly `expected` arguments.
///
/// # Errors
/// `RuntimeError::ArgumentCountMismatch` if the count differs.
pub fn check_arity<T>(name: &str,
                      args: &[T],
                      expected: usize,
                      line: usize)
                      -> Result<(), RuntimeError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                  expected,
                                                  found: args.len(),
                                                  line })
    }
}

/// Returns the argument's value, rejecting the absent value.
///
/// # Errors
/// `RuntimeError::TypeError` if `arg` is absent.
///
/// # Example
/// ```
/// use lair::interpreter::{evaluator::utils::present, value::core::Value};
///
/// assert_eq!(present("-", &Some(Value::Num(1)), 1).unwrap(), &Value::Num(1));
/// assert!(present("-", &None, 1).is_err());
/// ```
pub fn present<'v>(name: &str,
                   arg: &'v Option<Value>,
                   line: usize)
                   -> Result<&'v Value, RuntimeError> {
    arg.as_ref()
       .ok_or_else(|| RuntimeError::TypeError { details: format!("'{name}' received (null)"),
                                                line })
}

/// Builds the error for two operands of kinds an operator cannot combine.
#[must_use]
pub fn operand_mismatch(name: &str, lhs: &Value, rhs: &Value, line: usize) -> RuntimeError {
    RuntimeError::TypeError { details: format!("'{name}' cannot combine {} and {}",
                                               lhs.type_name(),
                                               rhs.type_name()),
                              line }
}
