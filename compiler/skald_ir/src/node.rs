//! The concrete syntax tree the evaluator walks.
//!
//! Nodes expose exactly what evaluation needs: a kind tag from a fixed
//! vocabulary, an ordered child list, and the raw source slice. A
//! `SyntaxNode` is a cheap reference-counted handle, so runtime values
//! (closures) can keep references into the tree without copying it.

use std::fmt;
use std::rc::Rc;

use crate::Span;

/// Node kinds in the Skald concrete tree.
///
/// The evaluator handles a subset of these; anything it does not
/// recognize is reported as an unhandled node kind and evaluates to void.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeKind {
    /// A scope: the whole source file, or `{ ... }`.
    Block,
    /// One statement inside a block; holds at most one expression child.
    Statement,
    /// `[operator, operand]`
    UnaryExpression,
    /// `[lhs, operator, rhs]`
    BinaryExpression,
    /// `[lhs, operator, rhs]` where the operator decides constancy.
    AssignmentExpression,
    /// `[lhs, '.', identifier]`, left-nested for `a.b.c`.
    MemberExpression,
    /// Number literal leaf.
    Number,
    /// String literal leaf, quotes included in the text.
    String,
    /// `true` / `false` leaf.
    Boolean,
    /// Identifier leaf.
    Identifier,
    /// Line comment leaf.
    Comment,
    /// Operator or punctuation leaf inside an expression node.
    Operator,
    /// Unparseable input. Presence anywhere marks the tree as erroneous.
    Error,
}

impl NodeKind {
    /// The snake_case kind label, as it appears in tree dumps.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Block => "block",
            NodeKind::Statement => "statement",
            NodeKind::UnaryExpression => "unary_expression",
            NodeKind::BinaryExpression => "binary_expression",
            NodeKind::AssignmentExpression => "assignment_expression",
            NodeKind::MemberExpression => "member_expression",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Boolean => "boolean",
            NodeKind::Identifier => "identifier",
            NodeKind::Comment => "comment",
            NodeKind::Operator => "operator",
            NodeKind::Error => "error",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct NodeData {
    kind: NodeKind,
    span: Span,
    /// The full source text; every node in a tree shares one allocation.
    source: Rc<str>,
    children: Vec<SyntaxNode>,
}

/// A node in the concrete syntax tree.
///
/// Clone is cheap (one `Rc` bump); clones refer to the same node.
#[derive(Clone)]
pub struct SyntaxNode(Rc<NodeData>);

impl SyntaxNode {
    /// Build an interior node over the given children.
    pub fn new(kind: NodeKind, span: Span, source: Rc<str>, children: Vec<SyntaxNode>) -> Self {
        SyntaxNode(Rc::new(NodeData {
            kind,
            span,
            source,
            children,
        }))
    }

    /// Build a childless leaf node.
    pub fn leaf(kind: NodeKind, span: Span, source: Rc<str>) -> Self {
        SyntaxNode::new(kind, span, source, Vec::new())
    }

    /// The node's kind tag.
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.0.kind
    }

    /// The node's byte span in the source.
    #[inline]
    pub fn span(&self) -> Span {
        self.0.span
    }

    /// The raw source slice this node covers.
    #[inline]
    pub fn text(&self) -> &str {
        &self.0.source[self.0.span.range()]
    }

    /// Ordered child nodes.
    #[inline]
    pub fn children(&self) -> &[SyntaxNode] {
        &self.0.children
    }

    /// The first child, if any.
    #[inline]
    pub fn first_child(&self) -> Option<&SyntaxNode> {
        self.0.children.first()
    }

    /// Whether two handles refer to the same node.
    #[inline]
    pub fn same_node(&self, other: &SyntaxNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Whether this node or any descendant is an `Error` node.
    pub fn has_error(&self) -> bool {
        self.kind() == NodeKind::Error || self.0.children.iter().any(SyntaxNode::has_error)
    }

    /// Render the subtree as an s-expression, one node per parenthesis.
    ///
    /// Leaves print their raw text so dumps are readable:
    /// `(block (statement (binary_expression (number "1") (operator "+") (number "2"))))`
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        self.write_sexp(&mut out);
        out
    }

    fn write_sexp(&self, out: &mut String) {
        out.push('(');
        out.push_str(self.kind().as_str());
        if self.0.children.is_empty() {
            out.push_str(" \"");
            out.push_str(self.text());
            out.push('"');
        } else {
            for child in &self.0.children {
                out.push(' ');
                child.write_sexp(out);
            }
        }
        out.push(')');
    }
}

// Debug prints kind and span only; dumping whole subtrees through Debug
// makes test failures unreadable.
impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind(), self.span())
    }
}

/// A parsed source file: the root node plus the parse-error flag.
#[derive(Clone)]
pub struct SyntaxTree {
    root: SyntaxNode,
    has_error: bool,
}

impl SyntaxTree {
    /// Wrap a root node. `has_error` comes from the parser; the tree also
    /// scans for `Error` nodes so a stray one can never be missed.
    pub fn new(root: SyntaxNode, has_error: bool) -> Self {
        let has_error = has_error || root.has_error();
        SyntaxTree { root, has_error }
    }

    /// The root node; always kind `block`.
    #[inline]
    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    /// Whether the parse contained a syntax error.
    ///
    /// Evaluation must not proceed when this is set.
    #[inline]
    pub fn has_error(&self) -> bool {
        self.has_error
    }
}
