//! Example collection - enumerates, sorts and splits every example.

use crate::{
    config::{default_marker, DuplicatePolicy},
    models::{ExampleRecord, ExampleSource, ExtraFields},
    provider::{ExampleProvider, ProviderError},
    splitter::{SplitError, Splitter},
};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Splitter error: {0}")]
    Split(#[from] SplitError),

    #[error("Duplicate example name: {0}")]
    DuplicateName(String),
}

/// Collects enriched example records from a provider and a splitter
pub struct ExampleCollector<'a> {
    provider: &'a dyn ExampleProvider,
    splitter: &'a dyn Splitter,
    marker: String,
    on_duplicate: DuplicatePolicy,
}

impl<'a> ExampleCollector<'a> {
    pub fn new(provider: &'a dyn ExampleProvider, splitter: &'a dyn Splitter) -> Self {
        Self {
            provider,
            splitter,
            marker: default_marker(),
            on_duplicate: DuplicatePolicy::default(),
        }
    }

    /// Statement appended to every code body
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.on_duplicate = policy;
        self
    }

    /// Fetch, sort by name and split every example.
    ///
    /// Navigation links are left empty; see [`crate::navigation::link`].
    pub fn collect(&self, extra: &ExtraFields) -> Result<Vec<ExampleRecord>, CollectError> {
        let mut sources = self.provider.examples()?;

        // Stable, so duplicates keep provider order
        sources.sort_by(|a, b| a.name.cmp(&b.name));
        self.check_duplicates(&sources)?;

        let mut records = Vec::with_capacity(sources.len());
        for source in sources {
            let split = self.splitter.split(&source.filename)?;
            tracing::debug!(
                "Collected {} from {} (code starts at line {})",
                source.name,
                source.filename.display(),
                split.starting_line
            );

            let mut code = split.code;
            code.push('\n');
            code.push_str(&self.marker);

            records.push(ExampleRecord {
                name: source.name,
                category: source.category,
                filename: source.filename,
                docstring: split.docstring,
                code,
                starting_line: split.starting_line,
                prev_ref: None,
                next_ref: None,
                extra: extra.clone(),
            });
        }

        tracing::info!("Collected {} examples", records.len());

        Ok(records)
    }

    fn check_duplicates(&self, sources: &[ExampleSource]) -> Result<(), CollectError> {
        let mut seen = HashSet::new();
        for source in sources {
            if seen.insert(source.name.as_str()) {
                continue;
            }
            match self.on_duplicate {
                DuplicatePolicy::Error => {
                    return Err(CollectError::DuplicateName(source.name.clone()));
                }
                DuplicatePolicy::Warn => {
                    tracing::warn!(
                        "Duplicate example name '{}' ({}); its page will overwrite the earlier one",
                        source.name,
                        source.filename.display()
                    );
                }
            }
        }
        Ok(())
    }
}
