//! Gradle artifact cache (`gradle-cache:<dir>`)
//!
//! Layout of `~/.gradle/caches/modules-2/files-2.1`:
//! `<group>/<name>/<version>/<sha1>/<file>`. The cache does not record which
//! repository served a file, so every artifact gets the configured one.

use std::path::Path;

use async_trait::async_trait;
use srcl_core::{ResolvedArtifact, Result};

use crate::filter::ArtifactFilter;
use crate::handler::{ResolutionSource, SourceOptions};
use crate::layout::{coordinate_for, dedupe, scan_files};

pub struct GradleCacheSource;

#[async_trait]
impl ResolutionSource for GradleCacheSource {
    fn scheme(&self) -> &'static str {
        "gradle-cache"
    }

    async fn resolve(&self, uri: &str, options: &SourceOptions) -> Result<Vec<ResolvedArtifact>> {
        let root = Path::new(uri.strip_prefix("gradle-cache:").unwrap_or(uri));
        let filter = ArtifactFilter::new(&options.extensions, &options.exclude);

        let mut artifacts = Vec::new();
        for file in scan_files(root)? {
            let [group, name, version, _sha1, file_name] = file.components.as_slice() else {
                continue;
            };

            let Some(coordinate) = coordinate_for(group.clone(), name, version, file_name) else {
                tracing::debug!("not an artifact file: {}", file.relative_path());
                continue;
            };
            if !filter.accepts_extension(&coordinate.extension)
                || filter.is_excluded(&file.relative_path())
            {
                continue;
            }

            artifacts.push(ResolvedArtifact::new(
                coordinate,
                file.path.clone(),
                options.repository.clone(),
            ));
        }

        Ok(dedupe(artifacts))
    }
}
