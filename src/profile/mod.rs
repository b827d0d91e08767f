//! Per-language lookup tables as data.
//!
//! A [`LanguageProfile`] tells the dead-code analyzer and the differ which
//! node types matter for a grammar and which names the runtime or a
//! framework calls on its own. Supporting another language means writing a
//! profile, not changing code.
//!
//! ```yaml
//! id: python
//! definition_types: [function_definition, class_definition]
//! call_types: [call]
//! decorator_containers: [decorated_definition]
//! entry_points: [main, lambda_handler]
//! framework_hooks: [setUp, tearDown]
//! ```

mod builtin;

pub use builtin::{builtin, builtin_ids};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, SchemaError};
use crate::schema::SemanticIntent;

fn default_callee_key() -> String {
    SemanticIntent::Callable.as_str().to_string()
}

fn default_entry_points() -> Vec<String> {
    vec!["main".to_string()]
}

/// Static analysis tables for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProfile {
    pub id: String,
    /// Node types indexed as definitions (candidates for dead code).
    #[serde(default)]
    pub definition_types: Vec<String>,
    /// Node types treated as call sites.
    #[serde(default)]
    pub call_types: Vec<String>,
    /// Extraction key holding the callee of a call site.
    #[serde(default = "default_callee_key")]
    pub callee_key: String,
    /// Parent node types that mark a definition as decorated.
    #[serde(default)]
    pub decorator_containers: Vec<String>,
    /// Names the runtime starts from.
    #[serde(default = "default_entry_points")]
    pub entry_points: Vec<String>,
    /// Names invoked implicitly by frameworks or the runtime.
    #[serde(default)]
    pub framework_hooks: Vec<String>,
    /// Declaration types for diffing; the differ's defaults when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration_types: Option<Vec<String>>,
}

impl LanguageProfile {
    /// An empty profile with the default callee key and entry points.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            definition_types: Vec::new(),
            call_types: Vec::new(),
            callee_key: default_callee_key(),
            decorator_containers: Vec::new(),
            entry_points: default_entry_points(),
            framework_hooks: Vec::new(),
            declaration_types: None,
        }
    }

    /// Parse a profile from YAML text.
    ///
    /// The callee key must name a semantic intent, since extraction only
    /// ever produces intent keys.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let profile: Self = serde_yaml::from_str(content)?;
        profile
            .callee_key
            .parse::<SemanticIntent>()
            .map_err(SchemaError::CalleeKey)?;
        Ok(profile)
    }

    /// Parse a profile from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let profile = Self::from_yaml_str(&content)?;
        Ok(profile)
    }

    pub fn is_definition_type(&self, node_type: &str) -> bool {
        self.definition_types.iter().any(|t| t == node_type)
    }

    pub fn is_call_type(&self, node_type: &str) -> bool {
        self.call_types.iter().any(|t| t == node_type)
    }
}
