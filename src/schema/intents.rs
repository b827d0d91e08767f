//! Language-agnostic semantic intents and their candidate field names.

use phf::phf_map;
use serde::{Deserialize, Serialize};

static INTENT_NAMES: phf::Map<&'static str, SemanticIntent> = phf_map! {
    "identifier" => SemanticIntent::Identifier,
    "callable" => SemanticIntent::Callable,
    "value" => SemanticIntent::Value,
    "target" => SemanticIntent::Target,
    "condition" => SemanticIntent::Condition,
    "body" => SemanticIntent::Body,
    "parameters" => SemanticIntent::Parameters,
    "operator" => SemanticIntent::Operator,
    "type" => SemanticIntent::Type,
};

/// An abstract role a child node can play, independent of any grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticIntent {
    Identifier,
    Callable,
    Value,
    Target,
    Condition,
    Body,
    Parameters,
    Operator,
    Type,
}

impl SemanticIntent {
    /// Every intent, in resolution order.
    pub const ALL: [SemanticIntent; 9] = [
        SemanticIntent::Identifier,
        SemanticIntent::Callable,
        SemanticIntent::Value,
        SemanticIntent::Target,
        SemanticIntent::Condition,
        SemanticIntent::Body,
        SemanticIntent::Parameters,
        SemanticIntent::Operator,
        SemanticIntent::Type,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticIntent::Identifier => "identifier",
            SemanticIntent::Callable => "callable",
            SemanticIntent::Value => "value",
            SemanticIntent::Target => "target",
            SemanticIntent::Condition => "condition",
            SemanticIntent::Body => "body",
            SemanticIntent::Parameters => "parameters",
            SemanticIntent::Operator => "operator",
            SemanticIntent::Type => "type",
        }
    }

    /// Candidate field names, highest priority first.
    ///
    /// The first candidate a node type actually declares wins, so the order
    /// here matters more than the membership.
    pub fn candidates(&self) -> &'static [&'static str] {
        match self {
            SemanticIntent::Identifier => &["name", "identifier", "declarator", "key"],
            SemanticIntent::Callable => &["function", "callee", "method", "constructor", "macro"],
            SemanticIntent::Value => &["value", "right", "initializer", "default_value"],
            SemanticIntent::Target => &["left", "target", "object", "receiver", "pattern"],
            SemanticIntent::Condition => &["condition", "test", "predicate"],
            SemanticIntent::Body => &["body", "consequence", "block"],
            SemanticIntent::Parameters => &["parameters", "formal_parameters", "parameter"],
            SemanticIntent::Operator => &["operator"],
            SemanticIntent::Type => &["type", "return_type", "result", "type_annotation"],
        }
    }
}

impl std::str::FromStr for SemanticIntent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        INTENT_NAMES
            .get(s)
            .copied()
            .ok_or_else(|| format!("unknown semantic intent: {}", s))
    }
}

impl std::fmt::Display for SemanticIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The field each intent resolves to for one node type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionPlan {
    entries: Vec<(SemanticIntent, Option<String>)>,
}

impl ExtractionPlan {
    /// Resolve every intent against a node type's declared fields.
    pub fn resolve<F>(has_field: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        let entries = SemanticIntent::ALL
            .iter()
            .map(|intent| {
                let field = intent
                    .candidates()
                    .iter()
                    .find(|candidate| has_field(**candidate))
                    .map(|candidate| candidate.to_string());
                (*intent, field)
            })
            .collect();
        Self { entries }
    }

    /// The field resolved for an intent, if any.
    pub fn get(&self, intent: SemanticIntent) -> Option<&str> {
        self.entries
            .iter()
            .find(|(i, _)| *i == intent)
            .and_then(|(_, field)| field.as_deref())
    }

    /// All intents with their resolution, in intent order.
    pub fn iter(&self) -> impl Iterator<Item = (SemanticIntent, Option<&str>)> {
        self.entries.iter().map(|(i, f)| (*i, f.as_deref()))
    }

    /// Only the intents that resolved to a field.
    pub fn resolved(&self) -> impl Iterator<Item = (SemanticIntent, &str)> {
        self.entries
            .iter()
            .filter_map(|(i, f)| f.as_deref().map(|f| (*i, f)))
    }

    pub fn is_empty(&self) -> bool {
        self.resolved().next().is_none()
    }
}
