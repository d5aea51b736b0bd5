use crate::error::Span;
use std::fmt;

/// Grammar rule or terminal a node was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Top-level rule: anchor, operator, one or more expressions, anchor.
    Program,
    /// Parenthesised application: `(`, operator, one or more expressions, `)`.
    Expr,
    /// Integer literal leaf, text exactly as written (`-?[0-9]+`).
    Number,
    /// One of `+ - * /`, kept as text.
    Operator,
    /// Literal punctuation such as `(` and `)`.
    Char,
    /// Zero-width start or end of input.
    Anchor,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Tag::Program => "program",
            Tag::Expr => "expr",
            Tag::Number => "number",
            Tag::Operator => "operator",
            Tag::Char => "char",
            Tag::Anchor => "anchor",
        };
        write!(f, "{}", name)
    }
}

/// Syntax tree node. Each node owns its children; the tree is never mutated after parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub tag: Tag,
    pub contents: String,
    pub span: Span,
    pub children: Vec<Node>,
}

impl Node {
    pub fn leaf(tag: Tag, contents: impl Into<String>, span: Span) -> Self {
        Self {
            tag,
            contents: contents.into(),
            span,
            children: Vec::new(),
        }
    }

    pub fn branch(tag: Tag, children: Vec<Node>) -> Self {
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => first.span.to(last.span),
            _ => Span::new(0, 0),
        };
        Self {
            tag,
            contents: String::new(),
            span,
            children,
        }
    }

    /// A number leaf in operand position is itself an expression.
    pub fn is_expr(&self) -> bool {
        matches!(self.tag, Tag::Expr | Tag::Number)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Operand subtrees of a `Program` or `Expr` node, in source order.
    pub fn operands(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().skip(2).take_while(|child| child.is_expr())
    }

    fn write_indented(&self, f: &mut fmt::Formatter, depth: usize) -> fmt::Result {
        write!(f, "{:width$}", "", width = depth * 2)?;
        if self.is_leaf() {
            writeln!(f, "{} '{}'", self.tag, self.contents)
        } else {
            writeln!(f, "{}", self.tag)?;
            for child in &self.children {
                child.write_indented(f, depth + 1)?;
            }
            Ok(())
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// Total number of nodes in the tree, root included.
pub fn count_nodes(node: &Node) -> usize {
    1 + node.children.iter().map(count_nodes).sum::<usize>()
}
