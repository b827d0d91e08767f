//! Bundled tree-sitter grammars.
//!
//! Each grammar pairs a parser `Language` with the `node-types.json` its
//! crate ships, so a [`SchemaModel`] can be built without touching disk.
//! Lookup is by language id only.

use tree_sitter::Language;

use crate::cst::ParsedSource;
use crate::error::Result;
use crate::profile::{self, LanguageProfile};
use crate::schema::SchemaModel;

/// A bundled grammar.
#[derive(Clone, Copy)]
pub struct Grammar {
    pub id: &'static str,
    language: fn() -> Language,
    /// The grammar's node-types document.
    pub node_types: &'static str,
}

impl Grammar {
    pub fn language(&self) -> Language {
        (self.language)()
    }

    /// Schema built from the bundled node-types document.
    pub fn schema(&self) -> Result<SchemaModel> {
        SchemaModel::from_json(self.node_types)
    }

    pub fn parse(&self, source: impl Into<Vec<u8>>) -> anyhow::Result<ParsedSource> {
        ParsedSource::parse(&self.language(), source)
    }

    /// The built-in profile with the same id.
    pub fn profile(&self) -> Option<&'static LanguageProfile> {
        profile::builtin(self.id)
    }
}

impl std::fmt::Debug for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grammar").field("id", &self.id).finish()
    }
}

fn python() -> Language {
    tree_sitter_python::LANGUAGE.into()
}

fn javascript() -> Language {
    tree_sitter_javascript::LANGUAGE.into()
}

fn typescript() -> Language {
    tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
}

fn tsx() -> Language {
    tree_sitter_typescript::LANGUAGE_TSX.into()
}

fn go() -> Language {
    tree_sitter_go::LANGUAGE.into()
}

fn rust() -> Language {
    tree_sitter_rust::LANGUAGE.into()
}

fn java() -> Language {
    tree_sitter_java::LANGUAGE.into()
}

static GRAMMARS: &[Grammar] = &[
    Grammar {
        id: "python",
        language: python,
        node_types: tree_sitter_python::NODE_TYPES,
    },
    Grammar {
        id: "javascript",
        language: javascript,
        node_types: tree_sitter_javascript::NODE_TYPES,
    },
    Grammar {
        id: "typescript",
        language: typescript,
        node_types: tree_sitter_typescript::TYPESCRIPT_NODE_TYPES,
    },
    Grammar {
        id: "tsx",
        language: tsx,
        node_types: tree_sitter_typescript::TSX_NODE_TYPES,
    },
    Grammar {
        id: "go",
        language: go,
        node_types: tree_sitter_go::NODE_TYPES,
    },
    Grammar {
        id: "rust",
        language: rust,
        node_types: tree_sitter_rust::NODE_TYPES,
    },
    Grammar {
        id: "java",
        language: java,
        node_types: tree_sitter_java::NODE_TYPES,
    },
];

/// Grammar for a language id.
pub fn by_id(id: &str) -> Option<Grammar> {
    GRAMMARS.iter().find(|g| g.id == id).copied()
}

/// Ids of all bundled grammars.
pub fn ids() -> impl Iterator<Item = &'static str> {
    GRAMMARS.iter().map(|g| g.id)
}
