use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Base URL of Maven Central as Gradle's `mavenCentral()` reports it.
pub const MAVEN_CENTRAL: &str = "https://repo.maven.apache.org/maven2/";

/// (group, name, version) of a dependency, plus the classifier and
/// extension that pick one file out of the published set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub group: String,
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    "jar".to_string()
}

impl Coordinate {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
            classifier: None,
            extension: default_extension(),
        }
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// File name the repository publishes this coordinate under
    /// (`name-version[-classifier].ext`).
    pub fn file_name(&self) -> String {
        match &self.classifier {
            Some(classifier) => format!(
                "{}-{}-{}.{}",
                self.name, self.version, classifier, self.extension
            ),
            None => format!("{}-{}.{}", self.name, self.version, self.extension),
        }
    }

    /// Directory of this coordinate relative to a repository root.
    pub fn directory_path(&self) -> String {
        format!(
            "{}/{}/{}",
            self.group.replace('.', "/"),
            self.name,
            self.version
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}", classifier)?;
        }
        if self.extension != "jar" {
            write!(f, "@{}", self.extension)?;
        }
        Ok(())
    }
}

/// A dependency whose version and source repository are settled and whose
/// bytes are available locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    pub coordinate: Coordinate,
    /// Local copy of the artifact.
    pub file: PathBuf,
    /// Base URL of the repository the resolver fetched it from.
    pub repository: String,
}

impl ResolvedArtifact {
    pub fn new(coordinate: Coordinate, file: impl Into<PathBuf>, repository: impl Into<String>) -> Self {
        Self {
            coordinate,
            file: file.into(),
            repository: repository.into(),
        }
    }

    /// Name of the local file, which is also the name it gets at the destination.
    pub fn file_name(&self) -> Result<String> {
        self.file
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .map(String::from)
            .ok_or_else(|| {
                Error::InvalidArtifact(format!(
                    "{} has no usable file name ({})",
                    self.coordinate,
                    self.file.display()
                ))
            })
    }

    /// Download URL under the repository the artifact was resolved from.
    pub fn url(&self) -> Result<String> {
        let base = self.repository.trim_end_matches('/');
        Ok(format!(
            "{}/{}/{}",
            base,
            self.coordinate.directory_path(),
            self.file_name()?
        ))
    }
}
