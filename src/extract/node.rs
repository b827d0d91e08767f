//! Structured nodes produced by extraction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::schema::SemanticIntent;

/// A line/column position (line 1-indexed, column 0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A CST node flattened into plain data.
///
/// Carries the node's span, raw text and every semantic intent that
/// resolved to a non-empty field. Children are only present when the node
/// came from a recursive extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredNode {
    pub node_type: String,
    /// First line (1-indexed).
    pub start_line: usize,
    /// Last line (1-indexed).
    pub end_line: usize,
    /// Start column (0-indexed).
    pub start_column: usize,
    /// End column (0-indexed).
    pub end_column: usize,
    pub text: String,
    /// Intent name → text of the field that plays it.
    pub extractions: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<StructuredNode>,
    /// Set by the caller, never by the extractor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

impl StructuredNode {
    /// The node's identity: its resolved `identifier` intent.
    pub fn identity(&self) -> Option<&str> {
        self.extraction(SemanticIntent::Identifier)
    }

    /// Text extracted for an intent.
    pub fn extraction(&self, intent: SemanticIntent) -> Option<&str> {
        self.extraction_key(intent.as_str())
    }

    /// Text extracted under a raw key.
    pub fn extraction_key(&self, key: &str) -> Option<&str> {
        self.extractions.get(key).map(String::as_str)
    }

    pub fn start(&self) -> Location {
        Location {
            line: self.start_line,
            column: self.start_column,
        }
    }

    pub fn end(&self) -> Location {
        Location {
            line: self.end_line,
            column: self.end_column,
        }
    }

    /// Number of lines the node spans beyond its first.
    pub fn line_span(&self) -> usize {
        self.end_line.saturating_sub(self.start_line)
    }

    /// Attach the file this node came from.
    pub fn with_source_file(mut self, file: impl Into<String>) -> Self {
        self.source_file = Some(file.into());
        self
    }

    /// This node and all of its extracted descendants, pre-order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

impl Drop for StructuredNode {
    // Unlinks children iteratively so deep trees don't recurse on drop.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Pre-order iterator over a structured tree.
pub struct Descendants<'a> {
    stack: Vec<&'a StructuredNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a StructuredNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(node_type: &str, line: usize, identity: Option<&str>) -> StructuredNode {
        let mut extractions = BTreeMap::new();
        if let Some(id) = identity {
            extractions.insert("identifier".to_string(), id.to_string());
        }
        StructuredNode {
            node_type: node_type.to_string(),
            start_line: line,
            end_line: line + 2,
            start_column: 4,
            end_column: 1,
            text: String::new(),
            extractions,
            parent_node_type: None,
            children: Vec::new(),
            source_file: None,
        }
    }

    #[test]
    fn test_identity() {
        assert_eq!(node("function_definition", 1, Some("run")).identity(), Some("run"));
        assert_eq!(node("lambda", 1, None).identity(), None);
    }

    #[test]
    fn test_positions() {
        let n = node("class_definition", 3, Some("A"));
        assert_eq!(n.start(), Location { line: 3, column: 4 });
        assert_eq!(n.end().to_string(), "5:1");
        assert_eq!(n.line_span(), 2);
    }

    #[test]
    fn test_descendants_pre_order() {
        let mut root = node("module", 1, None);
        let mut class = node("class_definition", 1, Some("A"));
        class.children.push(node("function_definition", 2, Some("m")));
        root.children.push(class);
        root.children.push(node("function_definition", 5, Some("f")));

        let order: Vec<_> = root
            .descendants()
            .map(|n| n.identity().unwrap_or("-"))
            .collect();
        assert_eq!(order, vec!["-", "A", "m", "f"]);
    }

    #[test]
    fn test_serialization_omits_empty_optionals() {
        let json = serde_json::to_value(node("lambda", 1, None)).unwrap();
        assert!(json.get("children").is_none());
        assert!(json.get("parent_node_type").is_none());
        assert!(json.get("source_file").is_none());
        assert_eq!(json["node_type"], "lambda");

        let json = serde_json::to_value(node("lambda", 1, None).with_source_file("a.py")).unwrap();
        assert_eq!(json["source_file"], "a.py");
    }
}
