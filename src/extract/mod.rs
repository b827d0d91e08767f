//! Schema-driven extraction of structured nodes from a CST.
//!
//! Two traversal modes are offered:
//! - `extract_all` materializes the tree, keeping only children whose type
//!   the schema indexes (a strict filter: unindexed nodes and everything
//!   below them are dropped).
//! - `extract_by_type` searches the whole tree for a set of node types,
//!   ignoring the schema filter and collecting nested matches too.

mod node;

pub use node::{Descendants, Location, StructuredNode};

use std::collections::{BTreeMap, HashSet};

use crate::cst::SyntaxNode;
use crate::error::{Result, SchemaError};
use crate::schema::SchemaModel;

/// Turns CST nodes into [`StructuredNode`]s using a schema.
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'s> {
    schema: &'s SchemaModel,
}

impl<'s> Extractor<'s> {
    pub fn new(schema: &'s SchemaModel) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &'s SchemaModel {
        self.schema
    }

    /// Extract one node without looking at its children.
    ///
    /// Fields named in the node type's extraction plan but absent from the
    /// node are skipped, as are fields with empty text.
    pub fn extract_node<N: SyntaxNode>(&self, node: &N) -> Result<StructuredNode> {
        let mut extractions = BTreeMap::new();

        if let Some(plan) = self.schema.extraction_plan(node.kind()) {
            for (intent, field) in plan.resolved() {
                let Some(child) = node.child_by_field_name(field) else {
                    continue;
                };
                if !child.has_ordered_span() || !node.encloses(&child) {
                    return Err(SchemaError::InconsistentSpan {
                        node_type: node.kind().to_string(),
                        field: field.to_string(),
                    });
                }
                let text = child.text();
                if !text.is_empty() {
                    extractions.insert(intent.as_str().to_string(), text.to_string());
                }
            }
        }

        Ok(StructuredNode {
            node_type: node.kind().to_string(),
            start_line: node.start_row() + 1,
            end_line: node.end_row() + 1,
            start_column: node.start_column(),
            end_column: node.end_column(),
            text: node.text().to_string(),
            extractions,
            parent_node_type: None,
            children: Vec::new(),
            source_file: None,
        })
    }

    /// Extract a node and, when `recurse` is set, every schema-indexed
    /// descendant reachable through indexed parents.
    ///
    /// Runs on an explicit stack: each frame holds a node still collecting
    /// children and the CST children it has yet to visit.
    pub fn extract_all<N: SyntaxNode>(&self, node: &N, recurse: bool) -> Result<StructuredNode> {
        let mut root = self.extract_node(node)?;
        if !recurse {
            return Ok(root);
        }

        let mut root_pending = node.children().into_iter();
        let mut stack: Vec<(StructuredNode, std::vec::IntoIter<N>)> = Vec::new();

        loop {
            let (parent, pending) = match stack.last_mut() {
                Some((extracted, pending)) => (&*extracted, pending),
                None => (&root, &mut root_pending),
            };

            if let Some(child) = pending.find(|c| self.schema.has_node_type(c.kind())) {
                let mut extracted = self.extract_node(&child)?;
                extracted.parent_node_type = Some(parent.node_type.clone());
                stack.push((extracted, child.children().into_iter()));
                continue;
            }

            let Some((done, _)) = stack.pop() else {
                break;
            };
            match stack.last_mut() {
                Some((parent, _)) => parent.children.push(done),
                None => root.children.push(done),
            }
        }

        Ok(root)
    }

    /// Collect every node whose type is in `types`, pre-order.
    ///
    /// The whole tree is walked regardless of the schema, and matches are
    /// descended into, so a function nested in a function yields both. Each
    /// match records its immediate parent's type.
    pub fn extract_by_type<N, S>(&self, root: &N, types: &[S]) -> Result<Vec<StructuredNode>>
    where
        N: SyntaxNode,
        S: AsRef<str>,
    {
        let wanted: HashSet<&str> = types.iter().map(|t| t.as_ref()).collect();
        let mut found = Vec::new();
        if wanted.is_empty() {
            return Ok(found);
        }

        if wanted.contains(root.kind()) {
            found.push(self.extract_node(root)?);
        }

        let root_kind = root.kind().to_string();
        let mut stack: Vec<(N, String)> = root
            .children()
            .into_iter()
            .rev()
            .map(|child| (child, root_kind.clone()))
            .collect();

        while let Some((node, parent)) = stack.pop() {
            if wanted.contains(node.kind()) {
                let mut extracted = self.extract_node(&node)?;
                extracted.parent_node_type = Some(parent);
                found.push(extracted);
            }

            let kind = node.kind().to_string();
            stack.extend(
                node.children()
                    .into_iter()
                    .rev()
                    .map(|child| (child, kind.clone())),
            );
        }

        Ok(found)
    }
}
