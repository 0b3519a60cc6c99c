use std::{io::Write, rc::Rc};

use tracing::trace;

use crate::{
    ast::NodeId,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::core::{Builtin, register_builtins},
        },
        value::core::Value,
    },
    util::tst::TstMap,
};

/// Index of an environment on the context's scope stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvId(usize);

/// The root environment. It exists for the whole run.
pub const ROOT: EnvId = EnvId(0);

/// One frame of the scope chain.
///
/// Builtins, user functions and plain bindings live in three separate maps.
/// Names are looked up in that order in every frame before moving on to the
/// parent.
#[derive(Debug, Default)]
pub struct Environment {
    /// The enclosing frame, `None` for the root.
    pub parent:              Option<EnvId>,
    /// Native functions. Only the root has any.
    pub builtins:            TstMap<Builtin>,
    /// User functions, mapped to their definition node.
    pub functions:           TstMap<NodeId>,
    /// Names bound with `:` or as parameters. A binding may hold the absent
    /// value.
    pub bindings:            TstMap<Option<Value>>,
    /// Name of the function this frame was created for.
    pub current_function:    Option<Rc<str>>,
    /// Set by `:` and cleared at the start of every line.
    pub currently_returning: bool,
}

/// What a name resolved to.
#[derive(Debug, Clone)]
pub enum Resolved {
    /// A native function.
    Builtin(Builtin),
    /// A user function and the frame it was found in.
    Function {
        /// The definition node.
        def:   NodeId,
        /// The frame holding the definition.
        scope: EnvId,
    },
    /// A bound value.
    Binding(Option<Value>),
}

impl Environment {
    /// Creates an empty frame whose lookups fall back to `parent`.
    #[must_use]
    pub fn with_parent(parent: Option<EnvId>, function: Option<Rc<str>>) -> Self {
        Self { parent,
               current_function: function,
               ..Self::default() }
    }

    /// Creates the root frame: every builtin plus the `true` and `false`
    /// bindings.
    ///
    /// # Errors
    /// `RuntimeError::BuiltinRegistration` if a builtin or boolean name is
    /// taken twice.
    pub fn standard() -> Result<Self, RuntimeError> {
        let mut env = Self::default();
        register_builtins(&mut env)?;

        for (name, value) in [("true", true), ("false", false)] {
            env.bindings
               .insert(name, Some(Value::canonical(value)))
               .map_err(|_| RuntimeError::BuiltinRegistration { name: name.to_string() })?;
        }

        trace!(builtins = env.builtins.len(), "root environment ready");
        Ok(env)
    }

    /// Looks `name` up in this frame only.
    fn lookup(&self, name: &str, here: EnvId) -> Option<Resolved> {
        if let Some(builtin) = self.builtins.get(name) {
            return Some(Resolved::Builtin(*builtin));
        }
        if let Some(def) = self.functions.get(name) {
            return Some(Resolved::Function { def:   *def,
                                             scope: here, });
        }
        self.bindings.get(name).cloned().map(Resolved::Binding)
    }

    /// Frees the frame's maps.
    ///
    /// # Returns
    /// The number of entries released.
    pub fn teardown(self) -> usize {
        let Self { builtins,
                   functions,
                   bindings,
                   .. } = self;

        builtins.destroy_with(drop) + functions.destroy_with(drop) + bindings.destroy_with(drop)
    }
}

impl<W: Write> Context<'_, W> {
    /// Resolves `name` by walking the scope chain outward from `env`.
    ///
    /// Each frame is searched for a builtin, then a user function, then a
    /// binding. Lookup never changes any state.
    ///
    /// # Returns
    /// What the name refers to, or `None` if no frame knows it.
    pub(crate) fn resolve(&self, name: &str, env: EnvId) -> Option<Resolved> {
        let mut current = Some(env);

        while let Some(id) = current {
            let frame = self.scope(id);
            if let Some(found) = frame.lookup(name, id) {
                return Some(found);
            }
            current = frame.parent;
        }
        None
    }

    /// Binds `name` to `value` in `env`.
    ///
    /// # Errors
    /// `RuntimeError::AlreadyBound` if `env` already has a binding for the
    /// name. Bindings are never overwritten.
    pub(crate) fn bind(&mut self,
                       env: EnvId,
                       name: &str,
                       value: Option<Value>,
                       line: usize)
                       -> EvalResult<()> {
        self.scope_mut(env)
            .bindings
            .insert(name, value)
            .map_err(|_| RuntimeError::AlreadyBound { name: name.to_string(),
                                                      line })?;
        trace!(name, line, "bound name");
        Ok(())
    }

    /// Pushes a fresh frame for a call to `function`, chained to `parent`.
    pub(crate) fn push_scope(&mut self, parent: EnvId, function: Option<Rc<str>>) -> EnvId {
        self.scopes.push(Environment::with_parent(Some(parent), function));
        trace!(depth = self.scopes.len(), "pushed scope");
        EnvId(self.scopes.len() - 1)
    }

    /// Pops and tears down the innermost frame. The root is never popped.
    pub(crate) fn pop_scope(&mut self) {
        if self.scopes.len() <= 1 {
            return;
        }
        if let Some(frame) = self.scopes.pop() {
            let function = frame.current_function.clone();
            let released = frame.teardown();
            trace!(function = function.as_deref(), released, "popped scope");
        }
    }

    pub(crate) fn scope(&self, env: EnvId) -> &Environment {
        &self.scopes[env.0]
    }

    pub(crate) fn scope_mut(&mut self, env: EnvId) -> &mut Environment {
        &mut self.scopes[env.0]
    }
}
