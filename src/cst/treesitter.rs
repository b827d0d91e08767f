//! Tree-sitter adapter for the node capability.

use tree_sitter::{Language, Node, Parser, Tree};

use super::SyntaxNode;

/// A tree-sitter node paired with the source it was parsed from.
#[derive(Debug, Clone, Copy)]
pub struct TsNode<'a> {
    node: Node<'a>,
    source: &'a [u8],
}

impl<'a> TsNode<'a> {
    pub fn new(node: Node<'a>, source: &'a [u8]) -> Self {
        Self { node, source }
    }

    /// The wrapped tree-sitter node.
    pub fn inner(&self) -> Node<'a> {
        self.node
    }

    fn wrap(&self, node: Node<'a>) -> Self {
        Self {
            node,
            source: self.source,
        }
    }
}

impl SyntaxNode for TsNode<'_> {
    fn kind(&self) -> &str {
        self.node.kind()
    }

    fn text(&self) -> &str {
        self.node.utf8_text(self.source).unwrap_or("")
    }

    fn start_row(&self) -> usize {
        self.node.start_position().row
    }

    fn end_row(&self) -> usize {
        self.node.end_position().row
    }

    fn start_column(&self) -> usize {
        self.node.start_position().column
    }

    fn end_column(&self) -> usize {
        self.node.end_position().column
    }

    fn is_named(&self) -> bool {
        self.node.is_named()
    }

    fn children(&self) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .children(&mut cursor)
            .map(|child| self.wrap(child))
            .collect()
    }

    fn child_by_field_name(&self, name: &str) -> Option<Self> {
        self.node
            .child_by_field_name(name)
            .map(|child| self.wrap(child))
    }
}

/// Holds a parsed tree-sitter tree together with its source.
///
/// The source must outlive every node borrowed from the tree, so both are
/// kept in one place and nodes are handed out through [`ParsedSource::root`].
pub struct ParsedSource {
    /// The tree-sitter parse tree.
    pub tree: Tree,
    /// The original source code (kept for node text extraction).
    pub source: Vec<u8>,
}

impl ParsedSource {
    /// Parse source code with the given grammar.
    ///
    /// Syntax errors still produce a tree (with ERROR nodes); only a parser
    /// that cannot run at all is reported as an error.
    pub fn parse(language: &Language, source: impl Into<Vec<u8>>) -> anyhow::Result<Self> {
        let source = source.into();
        let mut parser = Parser::new();
        parser.set_language(language)?;
        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse source"))?;
        Ok(Self { tree, source })
    }

    /// Root node of the tree.
    pub fn root(&self) -> TsNode<'_> {
        TsNode::new(self.tree.root_node(), &self.source)
    }

    /// Get the source code as a string slice.
    pub fn source_str(&self) -> &str {
        std::str::from_utf8(&self.source).unwrap_or("")
    }

    /// Whether the parser had to recover from syntax errors.
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }
}
