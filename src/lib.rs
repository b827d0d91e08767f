//! cstscope - schema-driven analysis of concrete syntax trees.
//!
//! Takes the CST an external grammar-driven parser produced and turns it
//! into things a tool can use:
//!
//! - a schema-indexed extraction of each node's semantic fields,
//! - a semantic diff between two versions of a tree,
//! - a dead-code report built from definitions and call sites.
//!
//! # Architecture
//!
//! - `cst`: the [`SyntaxNode`] capability, plus the tree-sitter adapter
//! - `schema`: `node-types.json` index and semantic intent resolution
//! - `extract`: CST nodes to [`StructuredNode`]s
//! - `diff`: Add/Remove/Rename/Modify/Move between two trees
//! - `deadcode`: call graph, false-positive filter, parallel project scan
//! - `profile`: per-language tables as data (built-in or YAML)
//! - `grammars`: bundled tree-sitter grammars by language id
//! - `report`: JSON and colored terminal output
//!
//! # Adding a New Language
//!
//! Write a [`LanguageProfile`] (YAML works) naming the grammar's
//! definition, call and decorator node types and its entry points. Load the grammar's
//! `node-types.json` with [`SchemaModel::from_json`] and parse with any
//! [`SyntaxNode`] implementation.

pub mod cst;
pub mod deadcode;
pub mod diff;
pub mod error;
pub mod extract;
#[cfg(feature = "tree-sitter")]
pub mod grammars;
pub mod profile;
pub mod report;
pub mod schema;

pub use cst::SyntaxNode;
#[cfg(feature = "tree-sitter")]
pub use cst::{ParsedSource, TsNode};
pub use deadcode::{
    CallGraphBuilder, DeadCodeAnalyzer, DeadCodeReport, FalsePositiveFilter, FilterOptions,
    UnusedDefinition,
};
#[cfg(feature = "tree-sitter")]
pub use deadcode::{ProjectScan, SourceFile};
pub use diff::{ChangeKind, DiffOptions, DiffResult, Differ, SemanticChange};
pub use error::{Result, SchemaError};
pub use extract::{Extractor, Location, StructuredNode};
pub use profile::LanguageProfile;
pub use schema::{ExtractionPlan, SchemaModel, SemanticIntent};
