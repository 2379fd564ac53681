//! Resolution lock files (`lock:path.json`, `lock:path.toml`)
//!
//! A lock file is whatever record the host build tool writes after resolving
//! its dependency graph. The entry order in the file is the resolver order.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use srcl_core::{Coordinate, Error, ResolvedArtifact, Result};

use crate::handler::{ResolutionSource, SourceOptions};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LockFile {
    #[serde(default)]
    pub artifacts: Vec<LockedArtifact>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LockedArtifact {
    pub group: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub classifier: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
    /// Local copy; relative paths are relative to the lock file
    pub file: PathBuf,
    /// Repository the artifact was fetched from (defaults to the configured one)
    #[serde(default)]
    pub repository: Option<String>,
}

impl LockFile {
    /// Parse lock file text, picking the format from the file extension
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

        if is_toml {
            toml::from_str(content).map_err(|e| {
                Error::Resolution(format!("Malformed lock file {}: {}", path.display(), e))
            })
        } else {
            serde_json::from_str(content).map_err(|e| {
                Error::Resolution(format!("Malformed lock file {}: {}", path.display(), e))
            })
        }
    }

    pub fn into_artifacts(self, base_dir: &Path, default_repository: &str) -> Vec<ResolvedArtifact> {
        self.artifacts
            .into_iter()
            .map(|locked| {
                let mut coordinate = Coordinate::new(locked.group, locked.name, locked.version);
                coordinate.classifier = locked.classifier;
                if let Some(extension) = locked.extension {
                    coordinate.extension = extension;
                }

                let file = if locked.file.is_absolute() {
                    locked.file
                } else {
                    base_dir.join(locked.file)
                };
                let repository = locked
                    .repository
                    .unwrap_or_else(|| default_repository.to_string());

                ResolvedArtifact::new(coordinate, file, repository)
            })
            .collect()
    }
}

pub struct LockFileSource;

#[async_trait]
impl ResolutionSource for LockFileSource {
    fn scheme(&self) -> &'static str {
        "lock"
    }

    fn can_handle(&self, uri: &str) -> bool {
        uri.starts_with("lock:") || !uri.contains(':')
    }

    async fn resolve(&self, uri: &str, options: &SourceOptions) -> Result<Vec<ResolvedArtifact>> {
        let path = Path::new(uri.strip_prefix("lock:").unwrap_or(uri));

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::Resolution(format!("Failed to read lock file {}: {}", path.display(), e))
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(LockFile::parse(path, &content)?.into_artifacts(base_dir, &options.repository))
    }
}
