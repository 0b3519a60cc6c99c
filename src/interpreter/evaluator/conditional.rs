use std::io::Write;

use tracing::trace;

use crate::{
    ast::{NodeId, NodeKind},
    error::{RuntimeError, SyntaxError},
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            environment::EnvId,
        },
        value::core::Value,
    },
};

/// What happened to the block guarded by a conditional.
#[derive(Debug, Clone, PartialEq)]
pub enum Branch {
    /// The condition was true and the block ran. The enclosing block ends
    /// with this value.
    Taken(Option<Value>),
    /// The condition was false. The enclosing block continues at the node
    /// after the skipped block.
    Skipped(NodeId),
}

impl<W: Write> Context<'_, W> {
    /// Evaluates a `?` conditional.
    ///
    /// The condition is the expression after the `?`. It must end its line
    /// and be followed by a line indented deeper than the `?` itself; that
    /// line and every following line that is still deeper form the guarded
    /// block.
    ///
    /// When the condition is the canonical true value the block runs and
    /// whatever comes after it in the enclosing block is not evaluated, so
    /// the lines after a conditional act as its else branch. When the
    /// condition is the canonical false value the block is skipped.
    ///
    /// # Parameters
    /// - `id`: The `?` node.
    /// - `env`: Environment the conditional runs in.
    ///
    /// # Errors
    /// - `SyntaxError::IfWithoutBlock` if no deeper line follows the
    ///   condition.
    /// - `SyntaxError::UnexpectedEndOfInput` if the condition fails and
    ///   nothing follows the skipped block.
    /// - `RuntimeError::TypeError` if the condition is not a boolean.
    pub(crate) fn eval_conditional(&mut self, id: NodeId, env: EnvId) -> EvalResult<Branch> {
        let ast = self.ast;
        let node = &ast[id];
        let initial_indent = node.indent_level;

        let (condition, rest) = self.eval_operand(id, env)?;
        let block = self.find_block(rest, initial_indent)
                        .ok_or(SyntaxError::IfWithoutBlock { line: node.line })?;

        match condition {
            Some(ref value) if value.is_true() => {
                trace!(line = node.line, "condition holds");
                let value = self.eval_block(Some(block), Some(initial_indent), env)?;
                Ok(Branch::Taken(value))
            },
            Some(ref value) if value.is_false() => {
                trace!(line = node.line, "condition fails");
                Ok(Branch::Skipped(self.skip_block(block, initial_indent, node.line)?))
            },
            other => {
                let found = other.as_ref().map_or("(null)", Value::type_name);
                Err(RuntimeError::TypeError { details: format!("condition must be a bool, \
                                                                found {found}"),
                                              line:    node.line, }.into())
            },
        }
    }

    /// Returns the `Indent` that opens the guarded block, if the node right
    /// after the condition is one deeper than `initial_indent`.
    fn find_block(&self, after: Option<NodeId>, initial_indent: usize) -> Option<NodeId> {
        let ast = self.ast;
        after.filter(|id| {
                 ast[*id].kind == NodeKind::Indent && ast[*id].indent_level > initial_indent
             })
    }

    /// Skips every node of the block at `start`.
    ///
    /// # Returns
    /// The first `Indent` not deeper than `initial_indent`.
    ///
    /// # Errors
    /// `SyntaxError::UnexpectedEndOfInput` if the input ends before such a
    /// line.
    fn skip_block(&self, start: NodeId, initial_indent: usize, line: usize) -> EvalResult<NodeId> {
        let ast = self.ast;
        let mut cursor = Some(start);

        while let Some(id) = cursor {
            let node = &ast[id];
            match node.kind {
                NodeKind::EndOfInput => break,
                NodeKind::Indent if node.indent_level <= initial_indent => return Ok(id),
                _ => cursor = node.next,
            }
        }
        Err(SyntaxError::UnexpectedEndOfInput { line }.into())
    }
}
