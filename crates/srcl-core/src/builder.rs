//! Manifest builder - resolved artifacts in, manifest entries out
//!
//! Entry order always follows the input order. Hashes are computed in
//! parallel but reassembled in submission order before anything is returned.

use futures_util::{StreamExt, TryStreamExt, stream};

use crate::hash::sha512_file;
use crate::{EntryKind, Error, Manifest, ManifestEntry, ResolvedArtifact, Result};

pub const DEFAULT_HASH_CONCURRENCY: usize = 4;

/// Builds a manifest whose entries all share one destination directory
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    dest: String,
    concurrency: usize,
}

impl ManifestBuilder {
    pub fn new(dest: impl Into<String>) -> Self {
        Self {
            dest: dest.into(),
            concurrency: DEFAULT_HASH_CONCURRENCY,
        }
    }

    /// Maximum number of files hashed at once (at least 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn dest(&self) -> &str {
        &self.dest
    }

    /// Build the manifest for `artifacts`.
    ///
    /// Fails on the first artifact that cannot be named or read; no partial
    /// manifest is ever returned.
    pub async fn build(&self, artifacts: &[ResolvedArtifact]) -> Result<Manifest> {
        // Names and URLs first, so a malformed set fails before any I/O.
        let located = artifacts
            .iter()
            .map(|artifact| -> Result<(String, String)> {
                Ok((artifact.url()?, artifact.file_name()?))
            })
            .collect::<Result<Vec<_>>>()?;

        let hashes: Vec<String> = stream::iter(artifacts.iter().cloned())
            .map(|artifact| async move {
                let path = artifact.file.clone();
                let digest = tokio::task::spawn_blocking(move || sha512_file(&path))
                    .await
                    .map_err(|e| Error::Other(e.into()))
                    .and_then(std::convert::identity)?;
                tracing::debug!(coordinate = %artifact.coordinate, "hashed {}", artifact.file.display());
                Ok::<_, Error>(digest)
            })
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        let entries = located
            .into_iter()
            .zip(hashes)
            .map(|((url, dest_filename), sha512)| ManifestEntry {
                kind: EntryKind::File,
                url,
                sha512,
                dest: self.dest.clone(),
                dest_filename,
            })
            .collect();

        Ok(Manifest::new(entries))
    }
}
