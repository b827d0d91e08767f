//! Definition / call-site graph.

use indexmap::IndexMap;
use std::collections::HashSet;

use crate::extract::StructuredNode;
use crate::schema::SemanticIntent;

/// Accumulates definitions and called names across files.
///
/// One builder per worker; combine them with [`merge`](Self::merge).
#[derive(Debug, Clone, Default)]
pub struct CallGraphBuilder {
    definitions: IndexMap<String, Vec<StructuredNode>>,
    called: HashSet<String>,
}

impl CallGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index definitions by identity. Nodes without one are dropped.
    pub fn add_definitions<I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = StructuredNode>,
    {
        for node in nodes {
            let Some(identity) = node.identity().filter(|id| !id.is_empty()) else {
                tracing::trace!("definition {} without identity dropped", node.node_type);
                continue;
            };
            let identity = identity.to_string();
            self.definitions.entry(identity).or_default().push(node);
        }
    }

    /// Record the callee name of each call site.
    pub fn add_call_sites<'a, I>(&mut self, nodes: I, callee_key: &str)
    where
        I: IntoIterator<Item = &'a StructuredNode>,
    {
        for node in nodes {
            if let Some(name) = callee_name(node, callee_key) {
                self.called.insert(name);
            }
        }
    }

    /// Definitions whose identity is never called, in insertion order.
    pub fn unused_definitions(&self) -> impl Iterator<Item = &StructuredNode> {
        self.definitions
            .iter()
            .filter(|(identity, _)| !self.called.contains(identity.as_str()))
            .flat_map(|(_, nodes)| nodes.iter())
    }

    /// Fold another builder into this one.
    ///
    /// Identities new to `self` are appended after the existing ones.
    pub fn merge(&mut self, other: CallGraphBuilder) {
        for (identity, nodes) in other.definitions {
            self.definitions.entry(identity).or_default().extend(nodes);
        }
        self.called.extend(other.called);
    }

    /// Number of indexed definitions, counting every node.
    pub fn definition_count(&self) -> usize {
        self.definitions.values().map(Vec::len).sum()
    }

    /// Number of distinct called names.
    pub fn called_count(&self) -> usize {
        self.called.len()
    }

    pub fn is_called(&self, name: &str) -> bool {
        self.called.contains(name)
    }
}

/// Name a call site invokes.
///
/// Tries the node's identifier, then the callee extraction, then a guess
/// from the raw text.
fn callee_name(node: &StructuredNode, callee_key: &str) -> Option<String> {
    let name = node
        .extraction(SemanticIntent::Identifier)
        .filter(|s| !s.is_empty())
        .or_else(|| node.extraction_key(callee_key).filter(|s| !s.is_empty()))
        .map(str::to_string)
        .unwrap_or_else(|| callee_from_text(&node.text));
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// `a.b.c(x)` → `c`.
fn callee_from_text(text: &str) -> String {
    let head = match text.find('(') {
        Some(i) => &text[..i],
        None => text,
    };
    let head = head.trim();
    match head.rfind('.') {
        Some(i) => head[i + 1..].trim().to_string(),
        None => head.to_string(),
    }
}
