//! Node-type schema indexing and intent resolution.
//!
//! A grammar ships a `node-types.json` document describing every node type,
//! the named fields it exposes and the children it allows. [`SchemaModel`]
//! indexes the named entries of such a document and answers one question for
//! the rest of the crate: which field of a given node type plays a given
//! [`SemanticIntent`].

mod intents;

pub use intents::{ExtractionPlan, SemanticIntent};

use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::error::{Result, SchemaError};

/// Field name → allowed child types.
pub type FieldMap = BTreeMap<String, Vec<String>>;

/// A reference to a node type inside a schema entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeRef {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub named: bool,
}

/// One grammar-defined node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeTypeSchema {
    pub node_type: String,
    pub named: bool,
    pub fields: FieldMap,
    /// Allowed positional (non-field) children.
    pub children: Vec<TypeRef>,
    /// Concrete types of a supertype entry.
    pub subtypes: Vec<TypeRef>,
}

#[derive(Deserialize)]
struct RawChildSpec {
    #[serde(default)]
    types: Vec<TypeRef>,
}

#[derive(Deserialize)]
struct RawNodeType {
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default)]
    named: bool,
    #[serde(default)]
    fields: BTreeMap<String, RawChildSpec>,
    #[serde(default)]
    children: Option<RawChildSpec>,
    #[serde(default)]
    subtypes: Vec<TypeRef>,
}

impl From<RawNodeType> for NodeTypeSchema {
    fn from(raw: RawNodeType) -> Self {
        let fields = raw
            .fields
            .into_iter()
            .map(|(name, spec)| {
                let types = spec.types.into_iter().map(|t| t.node_type).collect();
                (name, types)
            })
            .collect();

        Self {
            node_type: raw.node_type,
            named: raw.named,
            fields,
            children: raw.children.map(|c| c.types).unwrap_or_default(),
            subtypes: raw.subtypes,
        }
    }
}

/// Index over a grammar's named node types.
///
/// Immutable once built, so one instance can be shared across threads and
/// analyses.
#[derive(Debug, Clone, Default)]
pub struct SchemaModel {
    entries: IndexMap<String, NodeTypeSchema>,
    plans: HashMap<String, ExtractionPlan>,
}

impl SchemaModel {
    /// Load a schema from a `node-types.json` document.
    ///
    /// An empty array is valid and yields an empty model.
    pub fn from_json(document: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(document)?;
        if !value.is_array() {
            return Err(SchemaError::NotAnArray);
        }
        let raw: Vec<RawNodeType> = serde_json::from_value(value)?;
        Ok(Self::from_entries(raw.into_iter().map(NodeTypeSchema::from)))
    }

    /// Load a schema document from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Build a model from already-parsed entries.
    ///
    /// Anonymous entries are skipped; when a named type appears twice the
    /// first entry wins.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = NodeTypeSchema>,
    {
        let mut index = IndexMap::new();
        let mut skipped = 0usize;

        for entry in entries {
            if !entry.named {
                skipped += 1;
                continue;
            }
            if index.contains_key(&entry.node_type) {
                tracing::debug!("duplicate node type {:?} ignored", entry.node_type);
                continue;
            }
            index.insert(entry.node_type.clone(), entry);
        }

        let plans = index
            .iter()
            .map(|(name, entry)| {
                let plan = ExtractionPlan::resolve(|field| entry.fields.contains_key(field));
                (name.clone(), plan)
            })
            .collect();

        tracing::debug!(
            "indexed {} named node types ({} anonymous skipped)",
            index.len(),
            skipped
        );

        Self {
            entries: index,
            plans,
        }
    }

    /// Whether the schema indexes this node type.
    pub fn has_node_type(&self, node_type: &str) -> bool {
        self.entries.contains_key(node_type)
    }

    /// The full entry for a node type.
    pub fn get(&self, node_type: &str) -> Option<&NodeTypeSchema> {
        self.entries.get(node_type)
    }

    /// Named fields of a node type.
    pub fn fields(&self, node_type: &str) -> Option<&FieldMap> {
        self.entries.get(node_type).map(|e| &e.fields)
    }

    /// The field that plays `intent` for `node_type`.
    pub fn resolve_intent(&self, node_type: &str, intent: SemanticIntent) -> Option<&str> {
        self.plans.get(node_type).and_then(|plan| plan.get(intent))
    }

    /// Resolution of every intent for a node type, or `None` for types the
    /// schema does not index.
    pub fn extraction_plan(&self, node_type: &str) -> Option<&ExtractionPlan> {
        self.plans.get(node_type)
    }

    /// The field holding a node type's identity.
    pub fn identity_field(&self, node_type: &str) -> Option<&str> {
        self.resolve_intent(node_type, SemanticIntent::Identifier)
    }

    /// Named types allowed as positional children, in document order.
    pub fn children_types(&self, node_type: &str) -> Vec<&str> {
        self.entries
            .get(node_type)
            .map(|e| {
                e.children
                    .iter()
                    .filter(|t| t.named)
                    .map(|t| t.node_type.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Indexed node type names, in document order.
    pub fn node_types(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
