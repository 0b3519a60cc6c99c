use std::{io::Write, rc::Rc};

use tracing::{debug, trace};

use crate::{
    ast::{Ast, NodeId, NodeKind},
    error::{LairError, RuntimeError, SyntaxError},
    interpreter::{
        evaluator::{
            conditional::Branch,
            environment::{EnvId, Environment, ROOT, Resolved},
        },
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or the first
/// error raised while running the program.
pub type EvalResult<T> = Result<T, LairError>;

/// The outcome of evaluating one expression: its value (if any) and the
/// node the walk continues from.
pub type Step = (Option<Value>, Option<NodeId>);

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the tree being run, the stack of
/// environments and the sink that `print` and `println` write to.
///
/// ## Usage
///
/// A `Context` runs one parsed program. The root environment (index 0) is
/// created with the builtins and the two booleans and lives as long as the
/// context. Every call to a user function with parameters pushes a child
/// environment that is torn down when the call returns.
///
/// # Example
/// ```
/// use lair::interpreter::{
///     evaluator::core::Context, lexer::tokenize, parser::core::parse, value::core::Value,
/// };
///
/// let ast = parse(tokenize("! + 2 3").unwrap()).unwrap();
/// let mut out = Vec::new();
/// let mut context = Context::new(&ast, &mut out).unwrap();
///
/// assert_eq!(context.run().unwrap(), Some(Value::Num(5)));
/// ```
pub struct Context<'a, W: Write> {
    /// The program being run.
    pub(crate) ast:    &'a Ast,
    /// All live environments. Index 0 is the root.
    pub(crate) scopes: Vec<Environment>,
    /// Program output.
    pub(crate) out:    W,
    /// Number of user function calls currently running.
    pub(crate) depth:  usize,
}

impl<'a, W: Write> Context<'a, W> {
    /// Creates a context for `ast` with a freshly populated root environment.
    ///
    /// # Errors
    /// `RuntimeError::BuiltinRegistration` if the builtin table holds a
    /// duplicate name.
    pub fn new(ast: &'a Ast, out: W) -> EvalResult<Self> {
        Ok(Self { ast,
                  scopes: vec![Environment::standard()?],
                  out,
                  depth: 0 })
    }

    /// Runs every top-level statement in order.
    ///
    /// Function definitions are registered in the root environment; any
    /// other statement is evaluated there. The root's returning flag is
    /// reset after every statement, so a `:` at top level only ends the
    /// statement it appears in.
    ///
    /// # Returns
    /// The value of the last top-level statement.
    ///
    /// # Errors
    /// The first error raised by any statement. Nothing after it is run.
    pub fn run(&mut self) -> EvalResult<Option<Value>> {
        let ast = self.ast;
        let mut result = None;
        let mut line = 0;

        for statement in ast.statements() {
            line = ast[statement].line;
            result = if ast[statement].kind == NodeKind::FunctionDef {
                Some(self.define_function(statement)?)
            } else {
                self.eval_block(Some(statement), None, ROOT)?
            };
            self.scope_mut(ROOT).currently_returning = false;
        }

        self.out
            .flush()
            .map_err(|source| RuntimeError::Output { source, line })?;
        Ok(result)
    }

    /// Registers a top-level function definition under its name.
    ///
    /// # Errors
    /// - `RuntimeError::BuiltinFunctionRedefinition` if a builtin has the
    ///   same name.
    /// - `RuntimeError::FunctionAlreadyDefined` if the name was defined
    ///   before.
    fn define_function(&mut self, def: NodeId) -> EvalResult<Value> {
        let ast = self.ast;
        let node = &ast[def];
        let name = node.name();

        if self.scope(ROOT).builtins.contains_key(name) {
            return Err(RuntimeError::BuiltinFunctionRedefinition { name: name.to_string(),
                                                                   line: node.line, }.into());
        }
        self.scope_mut(ROOT)
            .functions
            .insert(name, def)
            .map_err(|_| RuntimeError::FunctionAlreadyDefined { name: name.to_string(),
                                                                line: node.line, })?;

        debug!(function = name, line = node.line, "defined function");
        Ok(Value::Function(Rc::from(name)))
    }

    /// Walks a run of statements starting at `start`.
    ///
    /// Every statement is evaluated with [`Self::eval_expr`] and the walk
    /// continues from the node the statement stopped at. An `Indent` starts
    /// a new line: it clears the environment's returning flag, or ends the
    /// block if it is not deeper than `floor`. The block also ends at the end
    /// of the chain, at `EndOfInput`, after a statement that set the
    /// returning flag and after a conditional whose block was taken.
    ///
    /// # Parameters
    /// - `start`: First node of the block.
    /// - `floor`: Indentation the block must stay deeper than, or `None` for
    ///   a top-level statement.
    /// - `env`: Environment the block runs in.
    ///
    /// # Returns
    /// The value of the last statement that ran.
    pub(crate) fn eval_block(&mut self,
                             start: Option<NodeId>,
                             floor: Option<usize>,
                             env: EnvId)
                             -> EvalResult<Option<Value>> {
        let ast = self.ast;
        let mut cursor = start;
        let mut last = None;

        while let Some(id) = cursor {
            let node = &ast[id];

            match node.kind {
                NodeKind::EndOfInput => break,
                NodeKind::Indent => {
                    if floor.is_some_and(|floor| node.indent_level <= floor) {
                        break;
                    }
                    self.scope_mut(env).currently_returning = false;
                    cursor = node.next;
                },
                NodeKind::If => match self.eval_conditional(id, env)? {
                    Branch::Taken(value) => return Ok(value),
                    Branch::Skipped(landing) => cursor = Some(landing),
                },
                _ => {
                    let (value, rest) = self.eval_expr(id, env)?;
                    last = value;
                    if self.scope(env).currently_returning {
                        trace!(line = node.line, "returning from block");
                        return Ok(last);
                    }
                    cursor = rest;
                },
            }
        }

        Ok(last)
    }

    /// Evaluates the expression starting at `id`.
    ///
    /// Literals evaluate to themselves. Atoms are resolved through the scope
    /// chain: functions are called, bindings yield their value. An atom
    /// followed by `:` is an assignment. `!` and operators call the function
    /// they name. `:` evaluates its operand and marks the environment as
    /// returning.
    ///
    /// # Returns
    /// The value of the expression and the node after it.
    ///
    /// # Errors
    /// - `RuntimeError::UndefinedAtom` for atoms that resolve to nothing.
    /// - `SyntaxError::UnexpectedNode` for nodes that cannot stand in
    ///   expression position.
    /// - Anything raised by a call.
    pub(crate) fn eval_expr(&mut self, id: NodeId, env: EnvId) -> EvalResult<Step> {
        let ast = self.ast;
        let node = &ast[id];

        match node.kind {
            NodeKind::Literal => Ok((node.literal.clone(), node.next)),
            NodeKind::Atom => {
                if self.followed_by_return(id) {
                    return self.assign(id, env);
                }
                match self.resolve(node.name(), env) {
                    Some(Resolved::Binding(value)) => Ok((value, node.next)),
                    Some(resolved) => self.invoke(resolved, id, env),
                    None => Err(RuntimeError::UndefinedAtom { name: node.name().to_string(),
                                                              line: node.line, }.into()),
                }
            },
            NodeKind::Operator => self.call(id, env),
            NodeKind::Call => self.eval_call(id, env),
            NodeKind::Return => {
                let step = self.eval_operand(id, env)?;
                self.scope_mut(env).currently_returning = true;
                Ok(step)
            },
            NodeKind::Root
            | NodeKind::FunctionDef
            | NodeKind::FunctionArg
            | NodeKind::If
            | NodeKind::Indent
            | NodeKind::EndOfInput => {
                Err(SyntaxError::UnexpectedNode { found: describe(node.kind),
                                                  line:  node.line, }.into())
            },
        }
    }

    /// Evaluates the expression that follows `id` on its line.
    ///
    /// # Errors
    /// `SyntaxError::UnexpectedEndOfInput` if the line ends right after `id`.
    pub(crate) fn eval_operand(&mut self, id: NodeId, env: EnvId) -> EvalResult<Step> {
        let ast = self.ast;
        match ast[id].next {
            Some(operand) if !ast[operand].is_boundary() => self.eval_expr(operand, env),
            _ => Err(SyntaxError::UnexpectedEndOfInput { line: ast[id].line }.into()),
        }
    }

    /// Returns `true` if the node after `id` is a `:`.
    pub(crate) fn followed_by_return(&self, id: NodeId) -> bool {
        self.ast[id].next
                    .is_some_and(|next| self.ast[next].kind == NodeKind::Return)
    }
}

/// Describes a node kind for error messages.
pub(crate) fn describe(kind: NodeKind) -> String {
    let name = match kind {
        NodeKind::Root => "program root",
        NodeKind::FunctionDef => "function definition",
        NodeKind::FunctionArg => "parameter",
        NodeKind::Call => "'!'",
        NodeKind::Operator => "operator",
        NodeKind::Return => "':'",
        NodeKind::If => "'?'",
        NodeKind::Indent => "indentation",
        NodeKind::Literal => "literal",
        NodeKind::Atom => "atom",
        NodeKind::EndOfInput => "end of input",
    };
    name.to_string()
}
