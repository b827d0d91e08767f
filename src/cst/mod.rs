//! Node capability consumed by the analysis core.
//!
//! The parser that produces concrete syntax trees lives outside this crate.
//! Everything here talks to it through [`SyntaxNode`], which is implemented
//! for tree-sitter nodes in [`treesitter`] and can be implemented for any
//! other tree with typed nodes, spans and named-field lookup.

#[cfg(feature = "tree-sitter")]
pub mod treesitter;

#[cfg(feature = "tree-sitter")]
pub use treesitter::{ParsedSource, TsNode};

/// A node of a concrete syntax tree.
///
/// Rows and columns are 0-indexed, as parsers report them. Conversion to
/// 1-indexed lines happens in the extractor.
pub trait SyntaxNode: Sized {
    /// Grammar node type (e.g. `function_declaration`).
    fn kind(&self) -> &str;

    /// Raw source text covered by this node.
    fn text(&self) -> &str;

    fn start_row(&self) -> usize;
    fn end_row(&self) -> usize;
    fn start_column(&self) -> usize;
    fn end_column(&self) -> usize;

    /// Whether the grammar names this node (punctuation and keywords are anonymous).
    fn is_named(&self) -> bool;

    /// All children in document order, named and anonymous.
    fn children(&self) -> Vec<Self>;

    /// The child stored under a grammar field, if present.
    fn child_by_field_name(&self, name: &str) -> Option<Self>;

    /// Start position as a `(row, column)` pair.
    fn start_point(&self) -> (usize, usize) {
        (self.start_row(), self.start_column())
    }

    /// End position as a `(row, column)` pair.
    fn end_point(&self) -> (usize, usize) {
        (self.end_row(), self.end_column())
    }

    /// Whether `other` lies entirely within this node's span.
    fn encloses<N: SyntaxNode>(&self, other: &N) -> bool {
        self.start_point() <= other.start_point() && other.end_point() <= self.end_point()
    }

    /// Whether the node's end does not precede its start.
    fn has_ordered_span(&self) -> bool {
        self.start_point() <= self.end_point()
    }
}

/// In-memory tree used by unit tests.
#[cfg(test)]
pub(crate) mod testing {
    use super::SyntaxNode;

    #[derive(Debug, Clone)]
    pub struct MemNode {
        pub kind: String,
        pub text: String,
        pub start: (usize, usize),
        pub end: (usize, usize),
        pub named: bool,
        pub children: Vec<MemNode>,
        pub fields: Vec<(String, usize)>,
    }

    impl MemNode {
        /// A named node spanning a single row.
        pub fn new(kind: &str, text: &str, row: usize, column: usize) -> Self {
            Self {
                kind: kind.to_string(),
                text: text.to_string(),
                start: (row, column),
                end: (row, column + text.len()),
                named: true,
                children: Vec::new(),
                fields: Vec::new(),
            }
        }

        pub fn anonymous(kind: &str, row: usize, column: usize) -> Self {
            Self {
                named: false,
                ..Self::new(kind, kind, row, column)
            }
        }

        pub fn ending_at(mut self, row: usize, column: usize) -> Self {
            self.end = (row, column);
            self
        }

        pub fn child(mut self, child: MemNode) -> Self {
            self.children.push(child);
            self
        }

        pub fn field(mut self, name: &str, child: MemNode) -> Self {
            self.fields.push((name.to_string(), self.children.len()));
            self.children.push(child);
            self
        }
    }

    impl SyntaxNode for MemNode {
        fn kind(&self) -> &str {
            &self.kind
        }

        fn text(&self) -> &str {
            &self.text
        }

        fn start_row(&self) -> usize {
            self.start.0
        }

        fn end_row(&self) -> usize {
            self.end.0
        }

        fn start_column(&self) -> usize {
            self.start.1
        }

        fn end_column(&self) -> usize {
            self.end.1
        }

        fn is_named(&self) -> bool {
            self.named
        }

        fn children(&self) -> Vec<Self> {
            self.children.clone()
        }

        fn child_by_field_name(&self, name: &str) -> Option<Self> {
            self.fields
                .iter()
                .find(|(field, _)| field == name)
                .and_then(|(_, index)| self.children.get(*index).cloned())
        }
    }
}
