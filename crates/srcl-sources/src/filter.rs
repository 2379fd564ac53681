use glob::Pattern;

/// Decides which files a directory scan turns into artifacts
pub struct ArtifactFilter {
    extensions: Vec<String>,
    exclude: Vec<Pattern>,
}

impl ArtifactFilter {
    /// Create a filter from extension names and exclude glob strings.
    /// Patterns that fail to compile are dropped with a warning.
    pub fn new(extensions: &[String], exclude: &[String]) -> Self {
        let exclude = exclude
            .iter()
            .filter_map(|p| match Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::warn!("ignoring exclude pattern {:?}: {}", p, e);
                    None
                }
            })
            .collect();

        Self {
            extensions: extensions.to_vec(),
            exclude,
        }
    }

    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }

    /// Check a path relative to the scan root, using `/` separators
    pub fn is_excluded(&self, relative_path: &str) -> bool {
        self.exclude.iter().any(|pattern| pattern.matches(relative_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extensions() {
        let filter = ArtifactFilter::new(&strings(&["jar", "pom"]), &[]);
        assert!(filter.accepts_extension("jar"));
        assert!(filter.accepts_extension("POM"));
        assert!(!filter.accepts_extension("jar.sha1"));
        assert!(!filter.accepts_extension("module"));
    }

    #[test]
    fn test_exclude_patterns() {
        let filter = ArtifactFilter::new(
            &strings(&["jar"]),
            &strings(&["org/junit/**", "**/*-sources.jar"]),
        );
        assert!(filter.is_excluded("org/junit/jupiter/junit-jupiter/5.9.2/junit-jupiter-5.9.2.jar"));
        assert!(filter.is_excluded("com/example/lib/1.0/lib-1.0-sources.jar"));
        assert!(!filter.is_excluded("com/example/lib/1.0/lib-1.0.jar"));
    }

    #[test]
    fn test_invalid_pattern_is_dropped() {
        let filter = ArtifactFilter::new(&strings(&["jar"]), &strings(&["[unclosed"]));
        assert!(!filter.is_excluded("[unclosed"));
    }
}
