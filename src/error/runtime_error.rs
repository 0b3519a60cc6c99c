use thiserror::Error;

#[derive(Debug, Error)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// An atom resolved to nothing in the whole scope chain.
    #[error("Error on line {line}: Atom '{name}' is undefined.")]
    UndefinedAtom {
        /// The name of the atom.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call target resolved to nothing in the whole scope chain.
    #[error("Error on line {line}: No such function '{name}'.")]
    NoSuchFunction {
        /// The name of the callee.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call ran out of arguments before its arity was satisfied.
    #[error("Error on line {line}: '{name}' takes {expected} argument(s) but {found} were given.")]
    ArgumentCountMismatch {
        /// The name of the callee.
        name:     String,
        /// The arity of the callee.
        expected: usize,
        /// The number of arguments found.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A value had an unexpected or incompatible type.
    #[error("Error on line {line}: Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Integer arithmetic overflowed.
    #[error("Error on line {line}: Integer overflow while trying to compute result.")]
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A function with this name is already defined.
    #[error("Error on line {line}: Function '{name}' is already defined.")]
    FunctionAlreadyDefined {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A user function tried to take the name of a builtin.
    #[error("Error on line {line}: Cannot redefine builtin function '{name}'.")]
    BuiltinFunctionRedefinition {
        /// The name of the builtin.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The name is already bound in the current scope.
    #[error("Error on line {line}: '{name}' is already bound in this scope.")]
    AlreadyBound {
        /// The bound name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Too many user function calls were active at once.
    #[error("Error on line {line}: Maximum call depth of {limit} exceeded.")]
    RecursionLimit {
        /// The maximum call depth.
        limit: usize,
        /// The source line of the call that went too deep.
        line:  usize,
    },
    /// A builtin could not be registered into the root environment.
    #[error("Error: Could not register builtin '{name}'.")]
    BuiltinRegistration {
        /// The name of the builtin.
        name: String,
    },
    /// Writing program output failed.
    #[error("Error on line {line}: Could not write output: {source}.")]
    Output {
        /// The underlying I/O error.
        source: std::io::Error,
        /// The source line where the error occurred.
        line:   usize,
    },
}
