//! False-positive suppression for unused definitions.
//!
//! A definition with no call sites is not necessarily dead: the runtime
//! calls `main`, test runners call `test_*`, frameworks call lifecycle
//! hooks, and decorators register functions out of band. The filter drops
//! those, in this order:
//!
//! 1. no identifier
//! 2. decorated (parent type is a decorator container)
//! 3. entry point (profile names, then test-name patterns)
//! 4. framework hook (profile names, then `__dunder__` for any language)

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::extract::StructuredNode;
use crate::profile::LanguageProfile;

/// Reason attached to every reported unused definition.
pub const NO_CALL_SITES: &str = "No call sites found";

lazy_static::lazy_static! {
    static ref TEST_NAME_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"^test_").unwrap(),
        Regex::new(r"^Test").unwrap(),
        Regex::new(r"_test$").unwrap(),
        Regex::new(r"Tests?$").unwrap(),
    ];
}

/// Which exclusion rules are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    pub exclude_decorated: bool,
    pub exclude_entry_points: bool,
    pub exclude_framework_hooks: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            exclude_decorated: true,
            exclude_entry_points: true,
            exclude_framework_hooks: true,
        }
    }
}

/// Outcome of checking one definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exclusion {
    Keep,
    Exclude(&'static str),
}

impl Exclusion {
    pub fn is_excluded(&self) -> bool {
        matches!(self, Exclusion::Exclude(_))
    }

    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Exclusion::Keep => None,
            Exclusion::Exclude(reason) => Some(*reason),
        }
    }
}

/// A definition reported as dead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnusedDefinition {
    pub identifier: String,
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    pub start_line: usize,
    pub end_line: usize,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_node_type: Option<String>,
}

impl UnusedDefinition {
    /// `None` for a definition without an identity.
    fn from_node(node: &StructuredNode, reason: &str) -> Option<Self> {
        let identifier = node.identity().filter(|id| !id.is_empty())?;
        Some(Self {
            identifier: identifier.to_string(),
            node_type: node.node_type.clone(),
            source_file: node.source_file.clone(),
            start_line: node.start_line,
            end_line: node.end_line,
            reason: reason.to_string(),
            parent_node_type: node.parent_node_type.clone(),
        })
    }
}

/// An uncalled definition the filter suppressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedDefinition {
    #[serde(flatten)]
    pub definition: UnusedDefinition,
}

/// Drops uncalled definitions that are likely invoked implicitly.
#[derive(Debug, Clone)]
pub struct FalsePositiveFilter {
    options: FilterOptions,
    decorator_containers: HashSet<String>,
    entry_points: HashSet<String>,
    framework_hooks: HashSet<String>,
}

impl FalsePositiveFilter {
    pub fn new(profile: &LanguageProfile, options: FilterOptions) -> Self {
        Self {
            options,
            decorator_containers: profile.decorator_containers.iter().cloned().collect(),
            entry_points: profile.entry_points.iter().cloned().collect(),
            framework_hooks: profile.framework_hooks.iter().cloned().collect(),
        }
    }

    pub fn options(&self) -> FilterOptions {
        self.options
    }

    /// Decide whether a definition is a false positive.
    pub fn should_exclude(&self, def: &StructuredNode) -> Exclusion {
        let Some(name) = def.identity().filter(|id| !id.is_empty()) else {
            return Exclusion::Exclude("no identifier");
        };

        if self.options.exclude_decorated {
            if let Some(parent) = def.parent_node_type.as_deref() {
                if self.decorator_containers.contains(parent) {
                    return Exclusion::Exclude("decorated");
                }
            }
        }

        if self.options.exclude_entry_points {
            if self.entry_points.contains(name) {
                return Exclusion::Exclude("entry point");
            }
            if TEST_NAME_PATTERNS.iter().any(|re| re.is_match(name)) {
                return Exclusion::Exclude("test function");
            }
        }

        if self.options.exclude_framework_hooks {
            if self.framework_hooks.contains(name) {
                return Exclusion::Exclude("framework hook");
            }
            if is_dunder(name) {
                return Exclusion::Exclude("dunder method");
            }
        }

        Exclusion::Keep
    }

    /// Definitions that survive the filter, as report entries.
    pub fn filter_unused<'a, I>(&'a self, defs: I) -> impl Iterator<Item = UnusedDefinition> + 'a
    where
        I: IntoIterator<Item = &'a StructuredNode>,
        I::IntoIter: 'a,
    {
        defs.into_iter()
            .filter(move |def| !self.should_exclude(def).is_excluded())
            .filter_map(|def| UnusedDefinition::from_node(def, NO_CALL_SITES))
    }

    /// Split definitions into reported and suppressed.
    ///
    /// Definitions without an identity appear in neither list.
    pub fn partition<'a, I>(&self, defs: I) -> (Vec<UnusedDefinition>, Vec<ExcludedDefinition>)
    where
        I: IntoIterator<Item = &'a StructuredNode>,
    {
        let mut unused = Vec::new();
        let mut excluded = Vec::new();
        for def in defs {
            let exclusion = self.should_exclude(def);
            let reason = exclusion.reason().unwrap_or(NO_CALL_SITES);
            let Some(definition) = UnusedDefinition::from_node(def, reason) else {
                tracing::trace!("skipping {} without identity", def.node_type);
                continue;
            };
            if exclusion.is_excluded() {
                tracing::trace!("excluding {} ({})", definition.identifier, reason);
                excluded.push(ExcludedDefinition { definition });
            } else {
                unused.push(definition);
            }
        }
        (unused, excluded)
    }
}

fn is_dunder(name: &str) -> bool {
    name.len() > 4 && name.starts_with("__") && name.ends_with("__")
}
