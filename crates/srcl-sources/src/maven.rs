//! Local Maven repository layout (`m2:<dir>`)
//!
//! `<group path>/<name>/<version>/<name>-<version>[-classifier].<ext>`

use std::path::Path;

use async_trait::async_trait;
use srcl_core::{ResolvedArtifact, Result};

use crate::filter::ArtifactFilter;
use crate::handler::{ResolutionSource, SourceOptions};
use crate::layout::{coordinate_for, dedupe, scan_files};

pub struct MavenLayoutSource;

#[async_trait]
impl ResolutionSource for MavenLayoutSource {
    fn scheme(&self) -> &'static str {
        "m2"
    }

    async fn resolve(&self, uri: &str, options: &SourceOptions) -> Result<Vec<ResolvedArtifact>> {
        let root = Path::new(uri.strip_prefix("m2:").unwrap_or(uri));
        let filter = ArtifactFilter::new(&options.extensions, &options.exclude);

        let mut artifacts = Vec::new();
        for file in scan_files(root)? {
            // group needs at least one component
            let [group @ .., name, version, file_name] = file.components.as_slice() else {
                continue;
            };
            if group.is_empty() {
                continue;
            }

            let Some(coordinate) = coordinate_for(group.join("."), name, version, file_name) else {
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
