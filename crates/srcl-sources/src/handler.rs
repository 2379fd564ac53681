//! Resolution source trait and registry

use async_trait::async_trait;
use srcl_core::{Error, MAVEN_CENTRAL, ResolvedArtifact, Result};

use crate::gradle::GradleCacheSource;
use crate::lock::LockFileSource;
use crate::maven::MavenLayoutSource;

/// Options shared by all resolution sources
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// Repository used when the source does not record one
    pub repository: String,
    /// File extensions picked up by directory scans
    pub extensions: Vec<String>,
    /// Glob patterns (relative to the scanned root) to leave out
    pub exclude: Vec<String>,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            repository: MAVEN_CENTRAL.to_string(),
            extensions: vec!["jar".to_string()],
            exclude: Vec::new(),
        }
    }
}

/// Something that can hand over the outcome of a finished dependency resolution
#[async_trait]
pub trait ResolutionSource: Send + Sync {
    /// URI scheme, without the trailing colon
    fn scheme(&self) -> &'static str;

    /// Check if this source can handle the given URI
    fn can_handle(&self, uri: &str) -> bool {
        uri.strip_prefix(self.scheme())
            .is_some_and(|rest| rest.starts_with(':'))
    }

    /// Resolved artifacts, deduplicated, in the order the resolver reports them
    async fn resolve(&self, uri: &str, options: &SourceOptions) -> Result<Vec<ResolvedArtifact>>;
}

/// Dispatches a source URI to the source that understands it
pub struct SourceRegistry {
    sources: Vec<Box<dyn ResolutionSource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self {
            sources: vec![
                Box::new(LockFileSource),
                Box::new(MavenLayoutSource),
                Box::new(GradleCacheSource),
            ],
        }
    }

    pub fn schemes(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.scheme()).collect()
    }

    pub async fn resolve(&self, uri: &str, options: &SourceOptions) -> Result<Vec<ResolvedArtifact>> {
        let source = self
            .sources
            .iter()
            .find(|s| s.can_handle(uri))
            .ok_or_else(|| {
                Error::InvalidSourceUri(format!(
                    "{} (expected one of: {})",
                    uri,
                    self.schemes().join(", ")
                ))
            })?;

        let artifacts = source.resolve(uri, options).await?;
        tracing::debug!(source = source.scheme(), count = artifacts.len(), "resolved {}", uri);
        Ok(artifacts)
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
