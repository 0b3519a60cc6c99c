use std::{ops::Index, rc::Rc};

use crate::interpreter::{lexer::TokenKind, value::core::Value};

/// Index of a node inside an [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The classification of a node.
///
/// Mirrors the token kinds that can survive parsing, plus the synthetic
/// program root. `Dedent` markers never make it into the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The synthetic root that anchors the statement list.
    Root,
    /// A function definition head.
    FunctionDef,
    /// A parameter of a definition.
    FunctionArg,
    /// `!`
    Call,
    /// `+`, `-`, `=` or `%`.
    Operator,
    /// `:`
    Return,
    /// `?`
    If,
    /// Start of an indented line.
    Indent,
    /// A number or string literal.
    Literal,
    /// A bare identifier.
    Atom,
    /// End of the program.
    EndOfInput,
}

impl From<TokenKind> for NodeKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::FunctionDef => Self::FunctionDef,
            TokenKind::FunctionArg => Self::FunctionArg,
            TokenKind::Call => Self::Call,
            TokenKind::Operator => Self::Operator,
            TokenKind::Return => Self::Return,
            TokenKind::If => Self::If,
            // A column-zero marker starts a line just like an indented one.
            TokenKind::Indent | TokenKind::Dedent => Self::Indent,
            TokenKind::String | TokenKind::Number => Self::Literal,
            TokenKind::Atom => Self::Atom,
            TokenKind::EndOfInput => Self::EndOfInput,
        }
    }
}

/// A node of the flattened tree.
///
/// The same node type is used for call heads and for leaves. A call head's
/// arguments hang off its `next` chain; top-level statements are chained
/// through `sibling`, starting at the root's `children`.
#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    /// The classification of the node.
    pub kind:         NodeKind,
    /// The source text for names and operators.
    pub text:         Option<Rc<str>>,
    /// The value of a literal.
    pub literal:      Option<Value>,
    /// Number of leading spaces of the line the node came from.
    pub indent_level: usize,
    /// Source line of the node.
    pub line:         usize,
    /// The next node of the chain this node belongs to.
    pub next:         Option<NodeId>,
    /// The previous node of the chain this node belongs to.
    pub prev:         Option<NodeId>,
    /// The next top-level statement.
    pub sibling:      Option<NodeId>,
    /// The first top-level statement (root only).
    pub children:     Option<NodeId>,
}

impl AstNode {
    /// Creates an unlinked node.
    #[must_use]
    pub const fn new(kind: NodeKind,
                     text: Option<Rc<str>>,
                     literal: Option<Value>,
                     indent_level: usize,
                     line: usize)
                     -> Self {
        Self { kind,
               text,
               literal,
               indent_level,
               line,
               next: None,
               prev: None,
               sibling: None,
               children: None }
    }

    /// The node's text, or an empty string for markers.
    #[must_use]
    pub fn name(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Returns `true` for nodes that end an argument list: the start of a
    /// new line or the end of the program.
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        matches!(self.kind, NodeKind::Indent | NodeKind::EndOfInput)
    }
}

/// A parsed program.
///
/// Nodes live in an arena and refer to each other by [`NodeId`]. The tree is
/// never modified after parsing, so the evaluator can walk the same function
/// body any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    nodes: Vec<AstNode>,
    root:  NodeId,
}

impl Ast {
    /// Creates a tree holding only the synthetic program root.
    #[must_use]
    pub fn new() -> Self {
        let root = AstNode::new(NodeKind::Root, None, None, 0, 0);
        Self { nodes: vec![root],
               root:  NodeId(0), }
    }

    /// The synthetic program root.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, the root included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self[self.root].children.is_none()
    }

    /// Adds an unlinked node to the arena.
    pub fn push(&mut self, node: AstNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Links `node` after `tail` in a `next` chain.
    pub fn link_next(&mut self, tail: NodeId, node: NodeId) {
        self.nodes[tail.0].next = Some(node);
        self.nodes[node.0].prev = Some(tail);
    }

    /// Appends `statement` to the root's statement list, after `last`.
    pub fn link_statement(&mut self, last: Option<NodeId>, statement: NodeId) {
        match last {
            Some(last) => self.nodes[last.0].sibling = Some(statement),
            None => self.nodes[self.root.0].children = Some(statement),
        }
    }

    /// Iterates over the top-level statements in order.
    pub fn statements(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self[self.root].children, |id| self[*id].sibling)
    }

    /// Iterates over the `next` chain starting at (and including) `start`.
    ///
    /// # Example
    /// ```
    /// use lair::{
    ///     ast::NodeKind,
    ///     interpreter::{lexer::tokenize, parser::core::parse},
    /// };
    ///
    /// let ast = parse(tokenize("! println 42").unwrap()).unwrap();
    /// let statement = ast.statements().next().unwrap();
    /// let kinds: Vec<NodeKind> = ast.chain(statement).map(|id| ast[id].kind).collect();
    ///
    /// assert_eq!(kinds,
    ///            vec![NodeKind::Call, NodeKind::Atom, NodeKind::Literal, NodeKind::EndOfInput]);
    /// ```
    pub fn chain(&self, start: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(start), |id| self[*id].next)
    }
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<NodeId> for Ast {
    type Output = AstNode;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}
