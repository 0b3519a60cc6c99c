use std::{fmt, io::Write};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            environment::Environment,
            function::{builtin, print},
        },
        value::core::Value,
    },
};

/// Result type returned by builtins.
pub type BuiltinResult = Result<Option<Value>, RuntimeError>;

/// Type alias for builtin function handlers.
///
/// A builtin receives its evaluated arguments (any of which may be the
/// absent value), the line of the call and the program output.
pub type BuiltinFn = fn(&[Option<Value>], usize, &mut dyn Write) -> BuiltinResult;

/// A native function as stored in the root environment.
#[derive(Clone, Copy)]
pub struct Builtin {
    /// The name the function is called by.
    pub name:  &'static str,
    /// Exact number of arguments the function consumes.
    pub arity: usize,
    /// The implementation.
    pub func:  BuiltinFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the exact arity,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BUILTIN_TABLE` (static table registered into the root environment),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static BUILTIN_TABLE: &[Builtin] = &[
            $(
                Builtin { name: $name, arity: $arity, func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "+"       => { arity: 2, func: builtin::plus },
    "-"       => { arity: 2, func: builtin::minus },
    "="       => { arity: 2, func: builtin::equals },
    "str"     => { arity: 1, func: builtin::str_fn },
    "print"   => { arity: 1, func: print::print },
    "println" => { arity: 1, func: print::println },
}

/// Registers every builtin into `env`.
///
/// # Errors
/// `RuntimeError::BuiltinRegistration` if a name is registered twice.
///
/// # Example
/// ```
/// use lair::interpreter::evaluator::{
///     environment::Environment,
///     function::core::{BUILTIN_FUNCTIONS, register_builtins},
/// };
///
/// let mut env = Environment::default();
/// register_builtins(&mut env).unwrap();
///
/// assert_eq!(env.builtins.len(), BUILTIN_FUNCTIONS.len());
/// assert!(register_builtins(&mut env).is_err());
/// ```
pub fn register_builtins(env: &mut Environment) -> Result<(), RuntimeError> {
    for builtin in BUILTIN_TABLE {
        env.builtins
           .insert(builtin.name, *builtin)
           .map_err(|_| RuntimeError::BuiltinRegistration { name: builtin.name.to_string() })?;
    }
    Ok(())
}
