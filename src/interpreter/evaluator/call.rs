use std::io::Write;

use tracing::{debug, trace};

use crate::{
    ast::{NodeId, NodeKind},
    error::{RuntimeError, SyntaxError},
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Step, describe},
            environment::{EnvId, Resolved},
            function::core::Builtin,
        },
        value::core::Value,
    },
};

/// Deepest nesting of user function calls before a run is aborted.
pub const MAX_CALL_DEPTH: usize = 5_000;

/// Stack left before a call grows the stack.
const RED_ZONE: usize = 128 * 1024;

/// Stack added whenever a call grows the stack.
const STACK_PER_CALL: usize = 1024 * 1024;

impl<W: Write> Context<'_, W> {
    /// Evaluates a `!` call.
    ///
    /// The node after the `!` names the callee. An atom followed by `:` is
    /// an assignment instead, which lets a top-level line bind a name.
    ///
    /// # Errors
    /// - `SyntaxError::UnexpectedEndOfInput` if nothing follows the `!`.
    /// - `RuntimeError::NoSuchFunction` if the callee is not a name.
    pub(crate) fn eval_call(&mut self, id: NodeId, env: EnvId) -> EvalResult<Step> {
        let ast = self.ast;
        let node = &ast[id];

        let target = match node.next {
            Some(target) if !ast[target].is_boundary() => target,
            _ => return Err(SyntaxError::UnexpectedEndOfInput { line: node.line }.into()),
        };

        match ast[target].kind {
            NodeKind::Atom if self.followed_by_return(target) => self.assign(target, env),
            NodeKind::Atom | NodeKind::Operator => self.call(target, env),
            kind => Err(RuntimeError::NoSuchFunction { name: describe(kind),
                                                       line: ast[target].line, }.into()),
        }
    }

    /// Calls the function named by the node `callee`.
    ///
    /// # Errors
    /// `RuntimeError::NoSuchFunction` if the name resolves to nothing.
    pub(crate) fn call(&mut self, callee: NodeId, env: EnvId) -> EvalResult<Step> {
        let ast = self.ast;
        let node = &ast[callee];

        match self.resolve(node.name(), env) {
            Some(resolved) => self.invoke(resolved, callee, env),
            None => Err(RuntimeError::NoSuchFunction { name: node.name().to_string(),
                                                       line: node.line, }.into()),
        }
    }

    /// Invokes whatever `callee` resolved to.
    ///
    /// A binding used as a callee simply yields its value and consumes no
    /// arguments.
    pub(crate) fn invoke(&mut self,
                         resolved: Resolved,
                         callee: NodeId,
                         env: EnvId)
                         -> EvalResult<Step> {
        match resolved {
            Resolved::Builtin(builtin) => self.call_builtin(builtin, callee, env),
            Resolved::Function { def, scope } => self.call_user(def, scope, callee, env),
            Resolved::Binding(value) => Ok((value, self.ast[callee].next)),
        }
    }

    /// Binds the atom at `atom` to the value of the expression after its `:`.
    ///
    /// The binding is made in `env`. The `:` of an assignment does not mark
    /// the environment as returning.
    ///
    /// # Returns
    /// The bound value and the node after the expression.
    ///
    /// # Errors
    /// `RuntimeError::AlreadyBound` if the name is already bound in `env`.
    pub(crate) fn assign(&mut self, atom: NodeId, env: EnvId) -> EvalResult<Step> {
        let ast = self.ast;
        let node = &ast[atom];

        let Some(colon) = node.next else {
            return Err(SyntaxError::UnexpectedEndOfInput { line: node.line }.into());
        };
        let (value, rest) = self.eval_operand(colon, env)?;
        self.bind(env, node.name(), value.clone(), node.line)?;

        Ok((value, rest))
    }

    /// Evaluates exactly `arity` argument expressions starting at `start`.
    ///
    /// Arguments are evaluated left to right in `env`. Each one is a full
    /// prefix expression and may itself consume further nodes.
    ///
    /// # Returns
    /// The argument values and the node after the last argument.
    ///
    /// # Errors
    /// `RuntimeError::ArgumentCountMismatch` if the line ends before all
    /// arguments were found.
    fn collect_arguments(&mut self,
                         name: &str,
                         arity: usize,
                         start: Option<NodeId>,
                         line: usize,
                         env: EnvId)
                         -> EvalResult<(Vec<Option<Value>>, Option<NodeId>)> {
        let ast = self.ast;
        let mut args = Vec::with_capacity(arity);
        let mut cursor = start;

        while args.len() < arity {
            let id = match cursor {
                Some(id) if !ast[id].is_boundary() => id,
                _ => {
                    return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                                     expected: arity,
                                                                     found: args.len(),
                                                                     line }.into());
                },
            };
            let (value, rest) = self.eval_expr(id, env)?;
            args.push(value);
            cursor = rest;
        }

        Ok((args, cursor))
    }

    /// Calls a native function.
    fn call_builtin(&mut self, builtin: Builtin, callee: NodeId, env: EnvId) -> EvalResult<Step> {
        let ast = self.ast;
        let node = &ast[callee];

        let (args, rest) =
            self.collect_arguments(builtin.name, builtin.arity, node.next, node.line, env)?;
        trace!(builtin = builtin.name, line = node.line, "calling builtin");

        let value = (builtin.func)(&args, node.line, &mut self.out)?;
        Ok((value, rest))
    }

    /// Calls a user function.
    ///
    /// The parameters are the `FunctionArg` nodes right after the definition
    /// head and the body starts after them. A function without parameters
    /// runs directly in the frame that holds its definition. Otherwise the
    /// arguments are evaluated in the caller's frame and bound in a new
    /// frame whose parent is the defining frame; that frame is torn down
    /// when the call returns, even if the body failed.
    ///
    /// # Parameters
    /// - `def`: The definition node.
    /// - `scope`: The frame holding the definition.
    /// - `callee`: The node naming the function at the call site.
    /// - `env`: The caller's frame.
    ///
    /// # Errors
    /// `RuntimeError::RecursionLimit` if more than [`MAX_CALL_DEPTH`] user
    /// calls are active.
    fn call_user(&mut self,
                 def: NodeId,
                 scope: EnvId,
                 callee: NodeId,
                 env: EnvId)
                 -> EvalResult<Step> {
        let ast = self.ast;
        let head = &ast[def];
        let node = &ast[callee];

        let params: Vec<NodeId> = head.next
                                      .map(|first| ast.chain(first))
                                      .into_iter()
                                      .flatten()
                                      .take_while(|id| ast[*id].kind == NodeKind::FunctionArg)
                                      .collect();
        let body = params.last().map_or(head.next, |last| ast[*last].next);

        let (args, rest) =
            self.collect_arguments(head.name(), params.len(), node.next, node.line, env)?;
        if self.depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::RecursionLimit { limit: MAX_CALL_DEPTH,
                                                      line:  node.line, }.into());
        }
        debug!(function = head.name(), arity = params.len(), line = node.line, "calling function");

        self.depth += 1;
        let value = stacker::maybe_grow(RED_ZONE, STACK_PER_CALL, || {
            self.run_body(def, scope, body, &params, args)
        });
        self.depth -= 1;

        Ok((value?, rest))
    }

    /// Runs the body of the user function `def` with `args` bound to
    /// `params`.
    fn run_body(&mut self,
                def: NodeId,
                scope: EnvId,
                body: Option<NodeId>,
                params: &[NodeId],
                args: Vec<Option<Value>>)
                -> EvalResult<Option<Value>> {
        let ast = self.ast;
        let head = &ast[def];
        let floor = Some(head.indent_level);

        if params.is_empty() {
            let saved = self.scope(scope).currently_returning;
            let value = self.eval_block(body, floor, scope);
            self.scope_mut(scope).currently_returning = saved;
            value
        } else {
            let frame = self.push_scope(scope, head.text.clone());
            let value = self.bind_parameters(frame, params, args)
                            .and_then(|()| self.eval_block(body, floor, frame));
            self.pop_scope();
            value
        }
    }

    /// Binds every parameter to its argument in `frame`.
    fn bind_parameters(&mut self,
                       frame: EnvId,
                       params: &[NodeId],
                       args: Vec<Option<Value>>)
                       -> EvalResult<()> {
        let ast = self.ast;
        for (param, arg) in params.iter().zip(args) {
            self.bind(frame, ast[*param].name(), arg, ast[*param].line)?;
        }
        Ok(())
    }
}
