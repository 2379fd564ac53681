use std::collections::HashMap;
use std::path::PathBuf;

use srcl_config::Settings;
use srcl_core::{Manifest, ManifestBuilder, ResolvedArtifact, Result, render_manifest};
use srcl_sources::{SourceOptions, SourceRegistry};
use srcl_storage::ManifestStore;

/// Everything one "generate manifest" step needs
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub source: String,
    pub output_file: PathBuf,
    pub download_directory: String,
    pub options: SourceOptions,
    pub hash_concurrency: usize,
}

impl GenerateRequest {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let Some(source) = settings.source.clone() else {
            anyhow::bail!(
                "No resolution source configured. Pass --source or set `source` in {}",
                srcl_config::PROJECT_FILE
            );
        };

        Ok(Self {
            source,
            output_file: settings.output_file.clone(),
            download_directory: settings.download_directory.clone(),
            options: SourceOptions {
                repository: settings.default_repository.clone(),
                extensions: settings.extensions.clone(),
                exclude: settings.exclude.clone(),
            },
            hash_concurrency: settings.hash_concurrency,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub output_file: PathBuf,
    pub entries: usize,
    /// False when the new manifest is byte-identical to the previous one
    pub changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckReport {
    UpToDate { entries: usize },
    Missing,
    /// Lists hold `dest-filename`s
    Stale {
        added: Vec<String>,
        removed: Vec<String>,
        changed: Vec<String>,
    },
}

impl CheckReport {
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, CheckReport::UpToDate { .. })
    }
}

pub struct Generator {
    registry: SourceRegistry,
    store: ManifestStore,
}

impl Generator {
    pub fn new() -> Self {
        Self {
            registry: SourceRegistry::new(),
            store: ManifestStore::new(),
        }
    }

    pub async fn resolve(&self, request: &GenerateRequest) -> Result<Vec<ResolvedArtifact>> {
        self.registry.resolve(&request.source, &request.options).await
    }

    /// Resolve and hash, returning the manifest and its rendered text
    pub async fn build(&self, request: &GenerateRequest) -> Result<(Manifest, String)> {
        // 1. Resolve
        let artifacts = self.resolve(request).await?;

        // 2. Build (hashes every artifact)
        let manifest = ManifestBuilder::new(request.download_directory.clone())
            .with_concurrency(request.hash_concurrency)
            .build(&artifacts)
            .await?;

        // 3. Render
        let text = render_manifest(&manifest)?;
        Ok((manifest, text))
    }

    /// Build the manifest and write it. Nothing is written unless every
    /// artifact resolved and hashed.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateReport> {
        let (manifest, text) = self.build(request).await?;

        let previous = self.store.read(&request.output_file).await?;
        let changed = previous.as_deref() != Some(text.as_bytes());
        if changed {
            self.store.write(&request.output_file, text).await?;
        } else {
            tracing::info!("{} is up to date", request.output_file.display());
        }

        Ok(GenerateReport {
            output_file: request.output_file.clone(),
            entries: manifest.len(),
            changed,
        })
    }

    /// Compare what would be generated with the manifest on disk
    pub async fn check(&self, request: &GenerateRequest) -> Result<CheckReport> {
        let (manifest, text) = self.build(request).await?;

        let Some(previous) = self.store.read(&request.output_file).await? else {
            return Ok(CheckReport::Missing);
        };
        if previous == text.as_bytes() {
            return Ok(CheckReport::UpToDate {
                entries: manifest.len(),
            });
        }

        let parsed = std::str::from_utf8(&previous)
            .map_err(|e| srcl_core::Error::Other(e.into()))
            .and_then(Manifest::from_json);
        let previous = match parsed {
            Ok(previous) => previous,
            Err(e) => {
                tracing::warn!("existing manifest is unreadable: {}", e);
                Manifest::default()
            }
        };
        Ok(diff(&previous, &manifest))
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

fn diff(previous: &Manifest, current: &Manifest) -> CheckReport {
    let old: HashMap<&str, &str> = previous
        .iter()
        .map(|e| (e.dest_filename.as_str(), e.sha512.as_str()))
        .collect();
    let new: HashMap<&str, &str> = current
        .iter()
        .map(|e| (e.dest_filename.as_str(), e.sha512.as_str()))
        .collect();

    let mut added = Vec::new();
    let mut changed = Vec::new();
    for entry in current.iter() {
        match old.get(entry.dest_filename.as_str()) {
            None => added.push(entry.dest_filename.clone()),
            Some(hash) if *hash != entry.sha512 => changed.push(entry.dest_filename.clone()),
            Some(_) => {}
        }
    }
    let removed = previous
        .iter()
        .filter(|e| !new.contains_key(e.dest_filename.as_str()))
        .map(|e| e.dest_filename.clone())
        .collect();

    CheckReport::Stale {
        added,
        removed,
        changed,
    }
}
