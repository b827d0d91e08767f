//! Parallel dead-code scan over many sources.

use rayon::prelude::*;
use tree_sitter::Language;

use super::{index_tree, CallGraphBuilder, DeadCodeReport, FalsePositiveFilter, FilterOptions};
use crate::cst::ParsedSource;
use crate::extract::Extractor;
use crate::profile::LanguageProfile;
use crate::schema::SchemaModel;

/// One in-memory source to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub source: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Dead-code scan of a set of sources in one language.
///
/// Every rayon worker folds its sources into a private
/// [`CallGraphBuilder`]; the builders are merged in source order, so the
/// report does not depend on scheduling.
pub struct ProjectScan<'a> {
    language: Language,
    schema: &'a SchemaModel,
    profile: &'a LanguageProfile,
    options: FilterOptions,
}

impl<'a> ProjectScan<'a> {
    pub fn new(
        language: Language,
        schema: &'a SchemaModel,
        profile: &'a LanguageProfile,
        options: FilterOptions,
    ) -> Self {
        Self {
            language,
            schema,
            profile,
            options,
        }
    }

    /// Scan all sources. Sources that fail to parse or extract are skipped.
    pub fn scan(&self, sources: &[SourceFile]) -> anyhow::Result<DeadCodeReport> {
        let extractor = Extractor::new(self.schema);

        let (builder, files) = sources
            .par_iter()
            .fold(
                || (CallGraphBuilder::new(), 0usize),
                |(mut builder, files), file| match self.index(&extractor, file, &mut builder) {
                    Ok(()) => (builder, files + 1),
                    Err(e) => {
                        tracing::warn!("skipping {}: {}", file.path, e);
                        (builder, files)
                    }
                },
            )
            .reduce(
                || (CallGraphBuilder::new(), 0usize),
                |(mut left, left_files), (right, right_files)| {
                    left.merge(right);
                    (left, left_files + right_files)
                },
            );

        tracing::debug!(
            "scanned {} of {} sources as {}",
            files,
            sources.len(),
            self.profile.id
        );

        let filter = FalsePositiveFilter::new(self.profile, self.options);
        Ok(DeadCodeReport::from_graph(&builder, &filter, files))
    }

    fn index(
        &self,
        extractor: &Extractor<'_>,
        file: &SourceFile,
        builder: &mut CallGraphBuilder,
    ) -> anyhow::Result<()> {
        let parsed = ParsedSource::parse(&self.language, file.source.as_bytes())?;
        if parsed.has_errors() {
            tracing::debug!("{} parsed with syntax errors", file.path);
        }
        index_tree(
            extractor,
            self.profile,
            &parsed.root(),
            Some(file.path.as_str()),
            builder,
        )?;
        Ok(())
    }
}
