//! Dead-code detection over extracted trees.
//!
//! Definitions and call sites are found by node type (taken from a
//! [`LanguageProfile`]), joined by name in a [`CallGraphBuilder`], and the
//! uncalled remainder goes through a [`FalsePositiveFilter`].
//!
//! Matching is by bare name only. Two functions called `run` in different
//! modules are one identity here.

mod filter;
mod graph;
#[cfg(feature = "tree-sitter")]
mod scan;

pub use filter::{
    Exclusion, ExcludedDefinition, FalsePositiveFilter, FilterOptions, UnusedDefinition,
    NO_CALL_SITES,
};
pub use graph::CallGraphBuilder;
#[cfg(feature = "tree-sitter")]
pub use scan::{ProjectScan, SourceFile};

use serde::{Deserialize, Serialize};

use crate::cst::SyntaxNode;
use crate::error::Result;
use crate::extract::Extractor;
use crate::profile::LanguageProfile;

/// Outcome of a dead-code run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadCodeReport {
    /// Sources indexed.
    pub files: usize,
    /// Definitions indexed.
    pub definitions: usize,
    /// Distinct called names.
    pub call_sites: usize,
    pub unused: Vec<UnusedDefinition>,
    pub excluded: Vec<ExcludedDefinition>,
}

impl DeadCodeReport {
    pub fn is_clean(&self) -> bool {
        self.unused.is_empty()
    }

    fn from_graph(builder: &CallGraphBuilder, filter: &FalsePositiveFilter, files: usize) -> Self {
        let (unused, excluded) = filter.partition(builder.unused_definitions());
        tracing::debug!(
            "{} unused definitions reported, {} excluded",
            unused.len(),
            excluded.len()
        );
        Self {
            files,
            definitions: builder.definition_count(),
            call_sites: builder.called_count(),
            unused,
            excluded,
        }
    }
}

/// Index one tree's definitions and call sites into a builder.
pub(crate) fn index_tree<N: SyntaxNode>(
    extractor: &Extractor<'_>,
    profile: &LanguageProfile,
    root: &N,
    source_file: Option<&str>,
    builder: &mut CallGraphBuilder,
) -> Result<()> {
    let types: Vec<&str> = profile
        .definition_types
        .iter()
        .chain(&profile.call_types)
        .map(String::as_str)
        .collect();

    let mut definitions = Vec::new();
    let mut calls = Vec::new();
    for node in extractor.extract_by_type(root, &types)? {
        let kind = node.node_type.as_str();
        match (profile.is_definition_type(kind), profile.is_call_type(kind)) {
            (true, true) => {
                calls.push(node.clone());
                definitions.push(node);
            }
            (false, true) => calls.push(node),
            _ => definitions.push(node),
        }
    }
    tracing::debug!(
        "{}: {} definitions, {} call sites",
        source_file.unwrap_or("<memory>"),
        definitions.len(),
        calls.len()
    );

    builder.add_call_sites(&calls, &profile.callee_key);
    builder.add_definitions(definitions.into_iter().map(|def| match source_file {
        Some(file) => def.with_source_file(file),
        None => def,
    }));
    Ok(())
}

/// Single-threaded dead-code analysis over one or more trees.
pub struct DeadCodeAnalyzer<'a> {
    extractor: Extractor<'a>,
    profile: &'a LanguageProfile,
    filter: FalsePositiveFilter,
    builder: CallGraphBuilder,
    files: usize,
}

impl<'a> DeadCodeAnalyzer<'a> {
    pub fn new(
        extractor: Extractor<'a>,
        profile: &'a LanguageProfile,
        options: FilterOptions,
    ) -> Self {
        Self {
            extractor,
            profile,
            filter: FalsePositiveFilter::new(profile, options),
            builder: CallGraphBuilder::new(),
            files: 0,
        }
    }

    pub fn profile(&self) -> &LanguageProfile {
        self.profile
    }

    pub fn graph(&self) -> &CallGraphBuilder {
        &self.builder
    }

    /// Add one parsed file.
    pub fn add_file<N: SyntaxNode>(&mut self, root: &N, source_file: Option<&str>) -> Result<()> {
        index_tree(
            &self.extractor,
            self.profile,
            root,
            source_file,
            &mut self.builder,
        )?;
        self.files += 1;
        Ok(())
    }

    pub fn report(&self) -> DeadCodeReport {
        DeadCodeReport::from_graph(&self.builder, &self.filter, self.files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::testing::MemNode;
    use crate::schema::SchemaModel;

    fn schema() -> SchemaModel {
        SchemaModel::from_json(
            r#"[
                {"type": "module", "named": true},
                {"type": "function_definition", "named": true, "fields": {
                    "name": {"types": [{"type": "identifier", "named": true}]}
                }},
                {"type": "call", "named": true, "fields": {
                    "function": {"types": [{"type": "identifier", "named": true}]}
                }},
                {"type": "decorated_definition", "named": true},
                {"type": "identifier", "named": true}
            ]"#,
        )
        .unwrap()
    }

    fn function(name: &str, row: usize) -> MemNode {
        let text = format!("def {}(): pass", name);
        MemNode::new("function_definition", &text, row, 0)
            .field("name", MemNode::new("identifier", name, row, 4))
    }

    fn call(name: &str, row: usize) -> MemNode {
        let text = format!("{}()", name);
        MemNode::new("call", &text, row, 0)
            .field("function", MemNode::new("identifier", name, row, 0))
    }

    fn module(children: Vec<MemNode>) -> MemNode {
        let mut root = MemNode::new("module", "", 0, 0).ending_at(20, 0);
        root.children = children;
        root
    }

    fn analyzer<'a>(schema: &'a SchemaModel, options: FilterOptions) -> DeadCodeAnalyzer<'a> {
        let profile = crate::profile::builtin("python").unwrap();
        DeadCodeAnalyzer::new(Extractor::new(schema), profile, options)
    }

    #[test]
    fn test_report_lists_uncalled() {
        let schema = schema();
        let tree = module(vec![
            function("used", 0),
            function("unused", 1),
            function("main", 2),
            call("used", 3),
        ]);

        let mut analyzer = analyzer(&schema, FilterOptions::default());
        analyzer.add_file(&tree, Some("app.py")).unwrap();
        let report = analyzer.report();

        assert_eq!(report.files, 1);
        assert_eq!(report.definitions, 3);
        assert_eq!(report.call_sites, 1);
        assert_eq!(report.unused.len(), 1);
        assert_eq!(report.unused[0].identifier, "unused");
        assert_eq!(report.unused[0].source_file.as_deref(), Some("app.py"));
        assert_eq!(report.excluded.len(), 1);
        assert_eq!(report.excluded[0].definition.reason, "entry point");
        assert!(!report.is_clean());
    }

    #[test]
    fn test_calls_across_files() {
        let schema = schema();
        let mut analyzer = analyzer(&schema, FilterOptions::default());
        analyzer
            .add_file(&module(vec![function("helper", 0)]), Some("lib.py"))
            .unwrap();
        analyzer
            .add_file(&module(vec![call("helper", 0)]), Some("app.py"))
            .unwrap();

        let report = analyzer.report();
        assert_eq!(report.files, 2);
        assert!(report.is_clean());
    }

    #[test]
    fn test_decorated_parent() {
        let schema = schema();
        let decorated = MemNode::new("decorated_definition", "@app.route", 0, 0)
            .ending_at(1, 20)
            .child(function("index", 1));
        let tree = module(vec![decorated]);

        let mut on = analyzer(&schema, FilterOptions::default());
        on.add_file(&tree, None).unwrap();
        assert!(on.report().is_clean());

        let mut off = analyzer(
            &schema,
            FilterOptions {
                exclude_decorated: false,
                ..FilterOptions::default()
            },
        );
        off.add_file(&tree, None).unwrap();
        let report = off.report();
        assert_eq!(report.unused.len(), 1);
        assert_eq!(
            report.unused[0].parent_node_type.as_deref(),
            Some("decorated_definition")
        );
    }

    #[test]
    fn test_report_shape() {
        let report = DeadCodeReport::default();
        let json = serde_json::to_value(&report).unwrap();
        for key in ["files", "definitions", "call_sites", "unused", "excluded"] {
            assert!(json.get(key).is_some(), "{}", key);
        }
    }
}
