use std::{fmt, rc::Rc};

/// A boolean that can only exist as one of the two canonical singletons.
///
/// The field is private, so no code outside this module can build a new
/// instance; every `Value::Bool` points at [`TRUE`] or [`FALSE`].
#[derive(Debug, PartialEq, Eq)]
pub struct Boolean {
    value: bool,
}

/// The one and only true value.
pub static TRUE: Boolean = Boolean { value: true };
/// The one and only false value.
pub static FALSE: Boolean = Boolean { value: false };

impl Boolean {
    /// The payload of the singleton.
    #[must_use]
    pub const fn get(&self) -> bool {
        self.value
    }
}

/// Represents a runtime value in the interpreter.
///
/// Values are produced by literals, builtins and user functions and stored
/// in bindings. An absent value (a call that returned nothing) is modelled
/// as `None` wherever a value may be missing.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Num(i64),
    /// An immutable string.
    Str(Rc<str>),
    /// A reference to one of the canonical booleans.
    Bool(&'static Boolean),
    /// A reference to a function by name.
    Function(Rc<str>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Num(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(Rc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(Rc::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::canonical(v)
    }
}

impl Value {
    /// Returns the canonical boolean for `b`.
    ///
    /// # Example
    /// ```
    /// use lair::interpreter::value::core::Value;
    ///
    /// assert!(Value::canonical(1 + 1 == 2).is_true());
    /// assert!(Value::canonical(false).is_false());
    /// ```
    #[must_use]
    pub fn canonical(b: bool) -> Self {
        if b { Self::Bool(&TRUE) } else { Self::Bool(&FALSE) }
    }

    /// Returns `true` only if this value is the canonical `TRUE` singleton.
    ///
    /// The check is by identity; this is the only truthiness test the
    /// evaluator uses.
    #[must_use]
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Bool(b) if std::ptr::eq(*b, &TRUE))
    }

    /// Returns `true` only if this value is the canonical `FALSE` singleton.
    #[must_use]
    pub fn is_false(&self) -> bool {
        matches!(self, Self::Bool(b) if std::ptr::eq(*b, &FALSE))
    }

    /// A short, lowercase name of the value's kind, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Num(_) => "number",
            Self::Str(_) => "string",
            Self::Bool(_) => "bool",
            Self::Function(_) => "function",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "<bool: {}>", b.get()),
            Self::Function(name) => write!(f, "<function: {name}>"),
        }
    }
}

/// Renders a possibly absent value the way `print` shows it.
///
/// # Example
/// ```
/// use lair::interpreter::value::core::{Value, render};
///
/// assert_eq!(render(Some(&Value::Num(42))), "42");
/// assert_eq!(render(None), "(null)");
/// ```
#[must_use]
pub fn render(value: Option<&Value>) -> String {
    value.map_or_else(|| "(null)".to_string(), ToString::to_string)
}
