//! Boundary representation of the host language's syntax tree.
//!
//! The analysis engine does not parse the host language; it consumes an
//! opaque tree supplied by the host with conventional node-kind tags. This
//! module defines that boundary: a flat arena of nodes with parent links
//! ([`SourceTree`]), the node-kind vocabulary ([`NodeKind`]), and the
//! parameter-descriptor shapes function-like nodes expose
//! ([`ParamPattern`]).
//!
//! The arena keeps upward traversal cheap (ancestor walks for template-tag
//! harvesting) without reference cycles: nodes are addressed by [`NodeId`].

/// Index of a node within a [`SourceTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// The kind tag of a syntax node.
///
/// Only the kinds the analysis inspects are distinguished; everything else
/// is [`NodeKind::Other`], which every check treats as inert rather than
/// an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The file root.
    Program,

    FunctionDeclaration,
    FunctionExpression,
    ArrowFunctionExpression,

    ClassDeclaration,
    ClassExpression,
    MethodDefinition,
    PropertyDefinition,

    /// A variable declaration; `constant` distinguishes `const`.
    VariableDeclaration { constant: bool },

    /// `return;` vs `return expr;`.
    ReturnStatement { has_argument: bool },

    /// `yield` vs `yield expr`.
    YieldExpression { has_argument: bool },

    BlockStatement,
    IfStatement,
    SwitchStatement,
    SwitchCase,
    TryStatement,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    WithStatement,
    ExpressionStatement,
    LabeledStatement,
    ThrowStatement,
    BreakStatement,
    ContinueStatement,
    DebuggerStatement,
    EmptyStatement,

    /// Any node kind the analysis has no opinion about.
    Other,
}

impl NodeKind {
    /// Whether this kind is a function-like declaration or expression.
    pub fn is_function_like(&self) -> bool {
        matches!(
            self,
            NodeKind::FunctionDeclaration
                | NodeKind::FunctionExpression
                | NodeKind::ArrowFunctionExpression
        )
    }

    /// The conventional kind-tag spelling, as host trees label nodes.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Program => "Program",
            NodeKind::FunctionDeclaration => "FunctionDeclaration",
            NodeKind::FunctionExpression => "FunctionExpression",
            NodeKind::ArrowFunctionExpression => "ArrowFunctionExpression",
            NodeKind::ClassDeclaration => "ClassDeclaration",
            NodeKind::ClassExpression => "ClassExpression",
            NodeKind::MethodDefinition => "MethodDefinition",
            NodeKind::PropertyDefinition => "PropertyDefinition",
            NodeKind::VariableDeclaration { .. } => "VariableDeclaration",
            NodeKind::ReturnStatement { .. } => "ReturnStatement",
            NodeKind::YieldExpression { .. } => "YieldExpression",
            NodeKind::BlockStatement => "BlockStatement",
            NodeKind::IfStatement => "IfStatement",
            NodeKind::SwitchStatement => "SwitchStatement",
            NodeKind::SwitchCase => "SwitchCase",
            NodeKind::TryStatement => "TryStatement",
            NodeKind::WhileStatement => "WhileStatement",
            NodeKind::DoWhileStatement => "DoWhileStatement",
            NodeKind::ForStatement => "ForStatement",
            NodeKind::ForInStatement => "ForInStatement",
            NodeKind::ForOfStatement => "ForOfStatement",
            NodeKind::WithStatement => "WithStatement",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::LabeledStatement => "LabeledStatement",
            NodeKind::ThrowStatement => "ThrowStatement",
            NodeKind::BreakStatement => "BreakStatement",
            NodeKind::ContinueStatement => "ContinueStatement",
            NodeKind::DebuggerStatement => "DebuggerStatement",
            NodeKind::EmptyStatement => "EmptyStatement",
            NodeKind::Other => "Other",
        }
    }

    /// Whether this kind is a loop statement.
    pub fn is_loop(&self) -> bool {
        matches!(
            self,
            NodeKind::WhileStatement
                | NodeKind::DoWhileStatement
                | NodeKind::ForStatement
                | NodeKind::ForInStatement
                | NodeKind::ForOfStatement
        )
    }
}

/// A formal-parameter descriptor of a function-like node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamPattern {
    /// A plain named parameter.
    Name(String),

    /// A parameter with a default value wrapping an inner pattern.
    Defaulted(Box<ParamPattern>),

    /// A rest parameter (`...args`).
    Rest(String),

    /// An object-destructuring pattern with its property names.
    ObjectPattern { properties: Vec<String> },

    /// An array-destructuring pattern.
    ArrayPattern,

    /// A typed-property wrapper around an inner pattern
    /// (constructor parameter properties).
    TypedProperty(Box<ParamPattern>),
}

/// Sentinel for object-destructured parameters with no usable name.
pub const OBJECT_PATTERN_NAME: &str = "<ObjectPattern>";

/// Sentinel for array-destructured parameters with no usable name.
pub const ARRAY_PATTERN_NAME: &str = "<ArrayPattern>";

impl ParamPattern {
    /// Reduce the pattern to a representative name: the bound name where
    /// one exists, or a sentinel placeholder for destructuring patterns.
    pub fn representative_name(&self) -> &str {
        match self {
            ParamPattern::Name(name) | ParamPattern::Rest(name) => name,
            ParamPattern::Defaulted(inner) | ParamPattern::TypedProperty(inner) => {
                inner.representative_name()
            }
            ParamPattern::ObjectPattern { .. } => OBJECT_PATTERN_NAME,
            ParamPattern::ArrayPattern => ARRAY_PATTERN_NAME,
        }
    }

    /// The destructured property names, if this is (possibly through a
    /// default or typed-property wrapper) an object pattern.
    pub fn destructured_properties(&self) -> Option<&[String]> {
        match self {
            ParamPattern::ObjectPattern { properties } => Some(properties),
            ParamPattern::Defaulted(inner) | ParamPattern::TypedProperty(inner) => {
                inner.destructured_properties()
            }
            _ => None,
        }
    }

    /// Whether this pattern is (possibly wrapped) an array pattern.
    pub fn is_array_pattern(&self) -> bool {
        match self {
            ParamPattern::ArrayPattern => true,
            ParamPattern::Defaulted(inner) | ParamPattern::TypedProperty(inner) => {
                inner.is_array_pattern()
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    params: Vec<ParamPattern>,
    is_async: bool,
    is_generator: bool,
    /// Arrow functions with an expression body (no braces).
    expression_body: bool,
    /// 1-based start line in the source file.
    start_line: usize,
}

/// A flat arena of syntax nodes with parent/child links.
///
/// Hosts build the tree top-down: [`SourceTree::root`] first, then
/// [`SourceTree::add`] for each child. Builder-style setters fill in the
/// function-specific fields.
#[derive(Debug, Clone)]
pub struct SourceTree {
    nodes: Vec<NodeData>,
    /// Whether the file is a module (affects scope-chain handling).
    module: bool,
}

impl SourceTree {
    /// Create a tree containing only a root [`NodeKind::Program`] node.
    pub fn new() -> Self {
        SourceTree {
            nodes: vec![NodeData {
                kind: NodeKind::Program,
                parent: None,
                children: Vec::new(),
                params: Vec::new(),
                is_async: false,
                is_generator: false,
                expression_body: false,
                start_line: 1,
            }],
            module: false,
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Mark the file as a module.
    pub fn set_module(&mut self, module: bool) {
        self.module = module;
    }

    /// Whether the file is a module.
    pub fn is_module(&self) -> bool {
        self.module
    }

    /// Append a child node under `parent`.
    pub fn add(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
            params: Vec::new(),
            is_async: false,
            is_generator: false,
            expression_body: false,
            start_line: 1,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Set the formal parameters of a function-like node.
    pub fn set_params(&mut self, id: NodeId, params: Vec<ParamPattern>) {
        self.nodes[id.0].params = params;
    }

    /// Mark a function-like node as `async`.
    pub fn set_async(&mut self, id: NodeId, is_async: bool) {
        self.nodes[id.0].is_async = is_async;
    }

    /// Mark a function-like node as a generator.
    pub fn set_generator(&mut self, id: NodeId, is_generator: bool) {
        self.nodes[id.0].is_generator = is_generator;
    }

    /// Mark an arrow function as expression-bodied.
    pub fn set_expression_body(&mut self, id: NodeId, expression_body: bool) {
        self.nodes[id.0].expression_body = expression_body;
    }

    /// Record the 1-based start line of a node.
    pub fn set_start_line(&mut self, id: NodeId, line: usize) {
        self.nodes[id.0].start_line = line;
    }

    /// The kind of a node.
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    /// The parent of a node, absent at the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// The children of a node, in source order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// The formal parameters of a node (empty for non-functions).
    pub fn params(&self, id: NodeId) -> &[ParamPattern] {
        &self.nodes[id.0].params
    }

    /// Whether the node is an `async` function.
    pub fn is_async(&self, id: NodeId) -> bool {
        self.nodes[id.0].is_async
    }

    /// Whether the node is a generator function.
    pub fn is_generator(&self, id: NodeId) -> bool {
        self.nodes[id.0].is_generator
    }

    /// Whether the node is an expression-bodied arrow.
    pub fn has_expression_body(&self, id: NodeId) -> bool {
        self.nodes[id.0].expression_body
    }

    /// The 1-based start line of a node.
    pub fn start_line(&self, id: NodeId) -> usize {
        self.nodes[id.0].start_line
    }

    /// Whether the node is a direct child of the file root.
    pub fn is_top_level(&self, id: NodeId) -> bool {
        self.parent(id) == Some(self.root())
    }

    /// The ancestors of a node, nearest first, up to and excluding the
    /// file root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.parent(id);
        std::iter::from_fn(move || {
            let next = current?;
            if next == self.root() {
                return None;
            }
            current = self.parent(next);
            Some(next)
        })
    }

    /// All node ids in insertion (pre-order) order.
    pub fn iter_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }
}

impl Default for SourceTree {
    fn default() -> Self {
        Self::new()
    }
}

/// One raw comment record supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    /// The comment payload (the text between `/*` and `*/` for block
    /// comments).
    pub text: String,

    /// 1-based line the comment starts on.
    pub line: usize,

    /// 0-based column the comment starts at.
    pub column: usize,

    /// Whether this is a block-style (`/* */`) comment.
    pub block_style: bool,
}

impl CommentRecord {
    /// Whether the payload begins with the doc-block sentinel: `*`
    /// followed by whitespace (the conventional `/** ` opener).
    pub fn is_doc_block(&self) -> bool {
        self.block_style
            && self
                .text
                .strip_prefix('*')
                .is_some_and(|rest| rest.starts_with(|c: char| c.is_whitespace()))
    }
}
