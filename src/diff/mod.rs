//! Semantic diff between two versions of a tree.
//!
//! Declarations are discovered in both trees, keyed by type and identity,
//! and compared as sets:
//!
//! ```text
//! old tree ──┐                        ┌─ only new      → Add
//!            ├─ declarations by key ──┼─ only old      → Remove
//! new tree ──┘                        └─ in both       → Modify | Move | nothing
//!                                            │
//!                                            ▼
//!                                  Remove + Add of same type,
//!                                  similar line span → Rename
//! ```
//!
//! Declarations without an identity are keyed by position, so they never
//! collide inside one tree but also never match across an edit.

mod change;
mod rename;

pub use change::{ChangeKind, DiffResult, NodeInfo, SemanticChange};
pub use rename::MAX_RENAME_SPAN_DELTA;

use indexmap::IndexMap;

use crate::cst::SyntaxNode;
use crate::error::Result;
use crate::extract::{Extractor, StructuredNode};
use crate::profile::LanguageProfile;
use crate::schema::SchemaModel;

/// Node types treated as units of comparison when no profile supplies its own.
///
/// Only the ones present in the active schema are used.
pub const DEFAULT_DECLARATION_TYPES: &[&str] = &[
    // functions and methods
    "function_declaration",
    "function_definition",
    "function_item",
    "generator_function_declaration",
    "method_definition",
    "method_declaration",
    "constructor_declaration",
    // classes and types
    "class_declaration",
    "class_definition",
    "abstract_class_declaration",
    "struct_item",
    "enum_item",
    "enum_declaration",
    "interface_declaration",
    "trait_item",
    "type_alias_declaration",
    "type_spec",
    "record_declaration",
    // variables and constants
    "variable_declarator",
    "const_item",
    "static_item",
    "const_spec",
    "var_spec",
    // imports and modules
    "import_statement",
    "import_from_statement",
    "import_declaration",
    "use_declaration",
    "mod_item",
    "internal_module",
];

/// Longest value summary before truncation.
pub const SUMMARY_LIMIT: usize = 100;

/// Options for a single diff run.
#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    /// Prepended to every change path as `prefix.identity`.
    pub path_prefix: Option<String>,
    /// Keep whole declaration texts in values instead of truncating.
    pub include_full_text: bool,
}

/// Computes semantic changes between two trees of the same grammar.
pub struct Differ<'s> {
    extractor: Extractor<'s>,
    declaration_types: Vec<String>,
}

impl<'s> Differ<'s> {
    /// A differ over [`DEFAULT_DECLARATION_TYPES`].
    pub fn new(schema: &'s SchemaModel) -> Self {
        Self::with_declaration_types(schema, DEFAULT_DECLARATION_TYPES)
    }

    /// A differ over a caller-supplied set of declaration types.
    pub fn with_declaration_types<I, S>(schema: &'s SchemaModel, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut declaration_types: Vec<String> = Vec::new();
        for t in types {
            let t = t.as_ref();
            if schema.has_node_type(t) && !declaration_types.iter().any(|d| d == t) {
                declaration_types.push(t.to_string());
            }
        }
        tracing::debug!("diffing over {} declaration types", declaration_types.len());

        Self {
            extractor: Extractor::new(schema),
            declaration_types,
        }
    }

    /// A differ over a profile's declaration types, or the defaults when the
    /// profile names none.
    pub fn for_profile(schema: &'s SchemaModel, profile: &LanguageProfile) -> Self {
        match profile.declaration_types.as_deref() {
            Some(types) => Self::with_declaration_types(schema, types),
            None => Self::new(schema),
        }
    }

    /// Declaration types in use, after filtering against the schema.
    pub fn declaration_types(&self) -> &[String] {
        &self.declaration_types
    }

    /// Compare two trees.
    pub fn diff<N: SyntaxNode>(
        &self,
        old_root: &N,
        new_root: &N,
        options: &DiffOptions,
    ) -> Result<DiffResult> {
        let old_decls = self.discover(old_root)?;
        let new_decls = self.discover(new_root)?;
        tracing::debug!(
            "discovered {} old and {} new declarations",
            old_decls.len(),
            new_decls.len()
        );

        let mut changes = Vec::new();

        for (key, node) in &new_decls {
            if !old_decls.contains_key(key) {
                changes.push(SemanticChange::added(
                    node,
                    change_path(options, key, node),
                    summarize(&node.text, options.include_full_text),
                ));
            }
        }

        for (key, node) in &old_decls {
            if !new_decls.contains_key(key) {
                changes.push(SemanticChange::removed(
                    node,
                    change_path(options, key, node),
                    summarize(&node.text, options.include_full_text),
                ));
            }
        }

        for (key, old) in &old_decls {
            let Some(new) = new_decls.get(key) else {
                continue;
            };
            if old.text != new.text {
                changes.push(SemanticChange::modified(
                    old,
                    new,
                    change_path(options, key, new),
                    summarize(&old.text, options.include_full_text),
                    summarize(&new.text, options.include_full_text),
                ));
            } else if old.start() != new.start() {
                changes.push(SemanticChange::moved(old, new, change_path(options, key, new)));
            }
        }

        let result = DiffResult::from_changes(rename::collapse_renames(changes));
        tracing::debug!("diff produced {} changes", result.changes.len());
        Ok(result)
    }

    /// Declarations of a tree keyed by identity, in document order.
    ///
    /// When two declarations share a key the first one wins.
    fn discover<N: SyntaxNode>(&self, root: &N) -> Result<IndexMap<String, StructuredNode>> {
        let mut decls = IndexMap::new();
        for node in self.extractor.extract_by_type(root, &self.declaration_types)? {
            let key = declaration_key(&node);
            if decls.contains_key(&key) {
                tracing::trace!("duplicate declaration key {:?} ignored", key);
                continue;
            }
            decls.insert(key, node);
        }
        Ok(decls)
    }
}

/// `type:identity`, or `type@line:column` for anonymous declarations.
pub fn declaration_key(node: &StructuredNode) -> String {
    match node.identity() {
        Some(identity) => format!("{}:{}", node.node_type, identity),
        None => format!(
            "{}@{}:{}",
            node.node_type, node.start_line, node.start_column
        ),
    }
}

fn change_path(options: &DiffOptions, key: &str, node: &StructuredNode) -> String {
    let label = node.identity().unwrap_or(key);
    match options.path_prefix.as_deref() {
        Some(prefix) if !prefix.is_empty() => format!("{}.{}", prefix, label),
        _ => label.to_string(),
    }
}

/// Trimmed text, cut to [`SUMMARY_LIMIT`] characters unless `full`.
pub fn summarize(text: &str, full: bool) -> String {
    let trimmed = text.trim();
    if full || trimmed.chars().count() <= SUMMARY_LIMIT {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(SUMMARY_LIMIT).collect();
    cut.push_str("...");
    cut
}
