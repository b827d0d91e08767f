//! Semantic change records and the diff result.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::extract::{Location, StructuredNode};

/// Kind of semantic change between two versions of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Add,
    Remove,
    Rename,
    Modify,
    Move,
    Reorder,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Add => "add",
            ChangeKind::Remove => "remove",
            ChangeKind::Rename => "rename",
            ChangeKind::Modify => "modify",
            ChangeKind::Move => "move",
            ChangeKind::Reorder => "reorder",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of the node a change refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub node_type: String,
    pub start_line: usize,
    pub end_line: usize,
    pub start_column: usize,
    pub end_column: usize,
}

impl NodeInfo {
    pub fn from_node(node: &StructuredNode) -> Self {
        Self {
            node_type: node.node_type.clone(),
            start_line: node.start_line,
            end_line: node.end_line,
            start_column: node.start_column,
            end_column: node.end_column,
        }
    }

    pub fn line_span(&self) -> usize {
        self.end_line.saturating_sub(self.start_line)
    }
}

/// One semantic change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticChange {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub node_type: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_identity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_identity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_info: Option<NodeInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_location: Option<Location>,
}

impl SemanticChange {
    fn base(kind: ChangeKind, node: &StructuredNode, path: String) -> Self {
        Self {
            kind,
            node_type: node.node_type.clone(),
            path,
            old_identity: None,
            new_identity: None,
            old_value: None,
            new_value: None,
            node_info: Some(NodeInfo::from_node(node)),
            old_location: None,
            new_location: None,
        }
    }

    pub fn added(node: &StructuredNode, path: String, value: String) -> Self {
        Self {
            new_identity: node.identity().map(str::to_string),
            new_value: Some(value),
            new_location: Some(node.start()),
            ..Self::base(ChangeKind::Add, node, path)
        }
    }

    pub fn removed(node: &StructuredNode, path: String, value: String) -> Self {
        Self {
            old_identity: node.identity().map(str::to_string),
            old_value: Some(value),
            old_location: Some(node.start()),
            ..Self::base(ChangeKind::Remove, node, path)
        }
    }

    pub fn modified(
        old: &StructuredNode,
        new: &StructuredNode,
        path: String,
        old_value: String,
        new_value: String,
    ) -> Self {
        Self {
            old_identity: old.identity().map(str::to_string),
            new_identity: new.identity().map(str::to_string),
            old_value: Some(old_value),
            new_value: Some(new_value),
            old_location: Some(old.start()),
            new_location: Some(new.start()),
            ..Self::base(ChangeKind::Modify, new, path)
        }
    }

    pub fn moved(old: &StructuredNode, new: &StructuredNode, path: String) -> Self {
        Self {
            old_identity: old.identity().map(str::to_string),
            new_identity: new.identity().map(str::to_string),
            old_location: Some(old.start()),
            new_location: Some(new.start()),
            ..Self::base(ChangeKind::Move, new, path)
        }
    }

    /// Merge a Remove and an Add into one Rename.
    pub fn renamed(removed: &SemanticChange, added: &SemanticChange) -> Self {
        Self {
            kind: ChangeKind::Rename,
            node_type: added.node_type.clone(),
            path: added.path.clone(),
            old_identity: removed.old_identity.clone(),
            new_identity: added.new_identity.clone(),
            old_value: removed.old_value.clone(),
            new_value: added.new_value.clone(),
            node_info: added.node_info.clone(),
            old_location: removed.old_location,
            new_location: added.new_location,
        }
    }
}

/// Ordered changes plus a per-kind tally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub changes: Vec<SemanticChange>,
    /// Only kinds that occur are present.
    pub summary: BTreeMap<ChangeKind, usize>,
}

impl DiffResult {
    /// Build a result whose summary matches `changes` exactly.
    pub fn from_changes(changes: Vec<SemanticChange>) -> Self {
        let mut summary = BTreeMap::new();
        for change in &changes {
            *summary.entry(change.kind).or_insert(0) += 1;
        }
        Self { changes, summary }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn count(&self, kind: ChangeKind) -> usize {
        self.summary.get(&kind).copied().unwrap_or(0)
    }

    /// Changes of one kind, in list order.
    pub fn of_kind(&self, kind: ChangeKind) -> impl Iterator<Item = &SemanticChange> {
        self.changes.iter().filter(move |c| c.kind == kind)
    }
}
