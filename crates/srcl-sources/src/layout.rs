//! Shared helpers for repository directory layouts

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use srcl_core::{Coordinate, Error, ResolvedArtifact, Result};

/// A regular file found under a scan root
#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    /// Path components relative to the root
    pub components: Vec<String>,
}

impl ScannedFile {
    pub fn relative_path(&self) -> String {
        self.components.join("/")
    }
}

/// List every file under `root`, in file-name order at each level
pub fn scan_files(root: &Path) -> Result<Vec<ScannedFile>> {
    if !root.is_dir() {
        return Err(Error::Resolution(format!(
            "Repository directory does not exist: {}",
            root.display()
        )));
    }

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            Error::Resolution(format!("Failed to scan {}: {}", root.display(), e))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let components: Option<Vec<String>> = relative
            .components()
            .map(|c| c.as_os_str().to_str().map(String::from))
            .collect();

        match components {
            Some(components) => files.push(ScannedFile {
                path: entry.path().to_path_buf(),
                components,
            }),
            None => tracing::warn!("skipping non UTF-8 path {}", entry.path().display()),
        }
    }

    Ok(files)
}

/// Split `name-version[-classifier].ext` into classifier and extension.
/// Returns None when the file does not belong to `name:version`.
pub fn split_file_name(name: &str, version: &str, file_name: &str) -> Option<(Option<String>, String)> {
    let rest = file_name.strip_prefix(name)?.strip_prefix('-')?.strip_prefix(version)?;

    if let Some(extension) = rest.strip_prefix('.') {
        return (!extension.is_empty()).then(|| (None, extension.to_string()));
    }

    let (classifier, extension) = rest.strip_prefix('-')?.split_once('.')?;
    if classifier.is_empty() || extension.is_empty() {
        return None;
    }
    Some((Some(classifier.to_string()), extension.to_string()))
}

/// Build a coordinate, or None if the file name does not match it
pub fn coordinate_for(group: String, name: &str, version: &str, file_name: &str) -> Option<Coordinate> {
    let (classifier, extension) = split_file_name(name, version, file_name)?;
    let mut coordinate = Coordinate::new(group, name, version).with_extension(extension);
    coordinate.classifier = classifier;
    Some(coordinate)
}

/// Keep the first artifact for each coordinate, preserving order
pub fn dedupe(artifacts: Vec<ResolvedArtifact>) -> Vec<ResolvedArtifact> {
    let mut seen = HashSet::new();
    artifacts
        .into_iter()
        .filter(|artifact| {
            let fresh = seen.insert(artifact.coordinate.clone());
            if !fresh {
                tracing::warn!(
                    "duplicate {} at {}, keeping first copy",
                    artifact.coordinate,
                    artifact.file.display()
                );
            }
            fresh
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use srcl_core::MAVEN_CENTRAL;

    #[test]
    fn test_split_plain() {
        assert_eq!(
            split_file_name("junit-jupiter", "5.9.2", "junit-jupiter-5.9.2.jar"),
            Some((None, "jar".to_string()))
        );
    }

    #[test]
    fn test_split_classifier() {
        assert_eq!(
            split_file_name("lib", "1.0", "lib-1.0-sources.jar"),
            Some((Some("sources".to_string()), "jar".to_string()))
        );
        assert_eq!(
            split_file_name("lib", "1.0", "lib-1.0.jar.sha1"),
            Some((None, "jar.sha1".to_string()))
        );
    }

    #[test]
    fn test_split_foreign_file() {
        // A sibling artifact's jar must not be claimed
        assert_eq!(split_file_name("junit-jupiter", "5.9.2", "junit-jupiter-api-5.9.2.jar"), None);
        assert_eq!(split_file_name("lib", "1.0", "lib-1.0"), None);
        assert_eq!(split_file_name("lib", "1.0", "lib-1.0."), None);
        assert_eq!(split_file_name("lib", "1.0", "lib-1.0-.jar"), None);
        assert_eq!(split_file_name("lib", "1.0", "_remote.repositories"), None);
    }

    #[test]
    fn test_dedupe_keeps_first() {
        let coord = Coordinate::new("g", "n", "1");
        let artifacts = vec![
            ResolvedArtifact::new(coord.clone(), "/a/n-1.jar", MAVEN_CENTRAL),
            ResolvedArtifact::new(Coordinate::new("g", "m", "1"), "/a/m-1.jar", MAVEN_CENTRAL),
            ResolvedArtifact::new(coord, "/b/n-1.jar", MAVEN_CENTRAL),
        ];
        let deduped = dedupe(artifacts);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].file, PathBuf::from("/a/n-1.jar"));
        assert_eq!(deduped[1].coordinate.name, "m");
    }

    #[test]
    fn test_scan_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_files(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, Error::Resolution(_)));
    }

    #[test]
    fn test_scan_order() {
        let dir = tempfile::tempdir().unwrap();
        for rel in ["b/2.txt", "a/z.txt", "a/a.txt", "c.txt"] {
            let path = dir.path().join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, rel).unwrap();
        }

        let files: Vec<String> = scan_files(dir.path())
            .unwrap()
            .iter()
            .map(ScannedFile::relative_path)
            .collect();
        assert_eq!(files, vec!["a/a.txt", "a/z.txt", "b/2.txt", "c.txt"]);
    }
}
