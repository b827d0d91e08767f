//! Error types for schema loading and tree extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the analysis core.
///
/// Only structurally invalid input ends up here. Unresolved intents, missing
/// identities and empty trees are ordinary outcomes, not errors.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("invalid schema document: {0}")]
    Invalid(#[from] serde_json::Error),
    #[error("invalid schema document: top level must be an array of node types")]
    NotAnArray,
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("node {node_type:?} reports field {field:?} with a span outside its own")]
    InconsistentSpan { node_type: String, field: String },
    #[error("invalid language profile: {0}")]
    Profile(#[from] serde_yaml::Error),
    #[error("invalid language profile: callee_key: {0}")]
    CalleeKey(String),
}

/// Result alias for the analysis core.
pub type Result<T> = std::result::Result<T, SchemaError>;
