use serde::{Deserialize, Serialize};
use srcl_core::{DEFAULT_HASH_CONCURRENCY, MAVEN_CENTRAL};
use std::path::{Path, PathBuf};

pub const PROJECT_FILE: &str = "sources-list.toml";
pub const DEFAULT_OUTPUT_FILE: &str = "sources.json";
pub const DEFAULT_DOWNLOAD_DIRECTORY: &str = "localRepository";

// ============================================================================
// Global Config (<config dir>/sources-list/config.toml)
// ============================================================================

/// User-wide defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Repository assumed when a source does not record one
    #[serde(default = "default_repository")]
    pub default_repository: String,

    #[serde(default = "default_hash_concurrency")]
    pub hash_concurrency: usize,

    /// File extensions picked up by directory scans
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_repository: default_repository(),
            hash_concurrency: default_hash_concurrency(),
            extensions: default_extensions(),
        }
    }
}

fn default_repository() -> String {
    MAVEN_CENTRAL.to_string()
}

fn default_hash_concurrency() -> usize {
    DEFAULT_HASH_CONCURRENCY
}

fn default_extensions() -> Vec<String> {
    vec!["jar".to_string()]
}

impl Config {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("io.github", "jwharm", "sources-list")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

// ============================================================================
// Project Config (sources-list.toml)
// ============================================================================

/// Project-level configuration (sources-list.toml)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectConfig {
    /// Where the manifest is written
    pub output_file: Option<PathBuf>,

    /// Copied verbatim into every entry's `dest`
    pub download_directory: Option<String>,

    /// Resolution source URI (lock:, m2:, gradle-cache:)
    pub source: Option<String>,

    /// Exclude globs for directory scans
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl ProjectConfig {
    /// Find and load sources-list.toml from current or parent directories
    pub fn find_and_load() -> anyhow::Result<Option<(PathBuf, Self)>> {
        let current = std::env::current_dir()?;
        Self::find_and_load_from(&current)
    }

    pub fn find_and_load_from(start: &Path) -> anyhow::Result<Option<(PathBuf, Self)>> {
        if let Some(root) = Self::find_project_root_from(start) {
            let config = Self::load(&root)?;
            Ok(Some((root, config)))
        } else {
            Ok(None)
        }
    }

    /// Find sources-list.toml by walking up from given directory
    pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(PROJECT_FILE).exists() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Load sources-list.toml from project root
    pub fn load(project_root: &Path) -> anyhow::Result<Self> {
        let path = project_root.join(PROJECT_FILE);
        let content = std::fs::read_to_string(&path)?;
        let config: ProjectConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Make relative paths relative to the project root instead of the cwd
    pub fn rebased(mut self, project_root: &Path) -> Self {
        self.output_file = self.output_file.map(|p| rebase_path(project_root, p));
        self.source = self.source.map(|s| rebase_source_uri(project_root, &s));
        self
    }
}

fn rebase_path(root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() { path } else { root.join(path) }
}

/// Source schemes whose path part is rebased; anything else is a bare path
const SOURCE_SCHEMES: &[&str] = &["lock", "m2", "gradle-cache"];

/// Rebase the path part of `scheme:path`, or of a bare path
pub fn rebase_source_uri(root: &Path, uri: &str) -> String {
    let scheme = SOURCE_SCHEMES.iter().find_map(|scheme| {
        uri.strip_prefix(scheme)
            .and_then(|rest| rest.strip_prefix(':'))
            .map(|path| (*scheme, path))
    });

    match scheme {
        Some((scheme, path)) => format!(
            "{}:{}",
            scheme,
            rebase_path(root, PathBuf::from(path)).display()
        ),
        None => rebase_path(root, PathBuf::from(uri)).display().to_string(),
    }
}

// ============================================================================
// Effective settings
// ============================================================================

/// Values given on the command line; they win over every file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output_file: Option<PathBuf>,
    pub download_directory: Option<String>,
    pub source: Option<String>,
    pub exclude: Vec<String>,
}

/// Fully merged settings for one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub output_file: PathBuf,
    pub download_directory: String,
    pub source: Option<String>,
    pub exclude: Vec<String>,
    pub default_repository: String,
    pub hash_concurrency: usize,
    pub extensions: Vec<String>,
}

impl Settings {
    /// Merge defaults, global config, project config and overrides (in that order)
    pub fn merge(config: Config, project: Option<(PathBuf, ProjectConfig)>, overrides: Overrides) -> Self {
        let project = project
            .map(|(root, project)| project.rebased(&root))
            .unwrap_or_default();

        let mut exclude = project.exclude;
        exclude.extend(overrides.exclude);

        Self {
            output_file: overrides
                .output_file
                .or(project.output_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
            download_directory: overrides
                .download_directory
                .or(project.download_directory)
                .unwrap_or_else(|| DEFAULT_DOWNLOAD_DIRECTORY.to_string()),
            source: overrides.source.or(project.source),
            exclude,
            default_repository: config.default_repository,
            hash_concurrency: config.hash_concurrency,
            extensions: config.extensions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_repository, "https://repo.maven.apache.org/maven2/");
        assert_eq!(config.hash_concurrency, 4);
        assert_eq!(config.extensions, vec!["jar".to_string()]);
    }

    #[test]
    fn test_config_partial_file() {
        let config: Config = toml::from_str("hash_concurrency = 16\n").unwrap();
        assert_eq!(config.hash_concurrency, 16);
        assert_eq!(config.default_repository, MAVEN_CENTRAL);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.default_repository, config.default_repository);
        assert_eq!(parsed.extensions, config.extensions);
    }

    #[test]
    fn test_project_config_parse() {
        let toml_str = r#"
output_file = "build/sources.json"
download_directory = "maven-local"
source = "lock:build/resolution.json"
exclude = ["org/junit/**"]
"#;
        let config: ProjectConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output_file, Some(PathBuf::from("build/sources.json")));
        assert_eq!(config.download_directory.as_deref(), Some("maven-local"));
        assert_eq!(config.source.as_deref(), Some("lock:build/resolution.json"));
        assert_eq!(config.exclude, vec!["org/junit/**".to_string()]);
    }

    #[test]
    fn test_find_project_root() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("a").join(PROJECT_FILE), "download_directory = \"deps\"\n").unwrap();

        let (root, config) = ProjectConfig::find_and_load_from(&nested).unwrap().unwrap();
        assert_eq!(root, dir.path().join("a"));
        assert_eq!(config.download_directory.as_deref(), Some("deps"));
    }

    #[test]
    fn test_rebase_source_uri() {
        let root = Path::new("/home/user/app");
        assert_eq!(
            rebase_source_uri(root, "lock:build/deps.json"),
            "lock:/home/user/app/build/deps.json"
        );
        assert_eq!(
            rebase_source_uri(root, "m2:/home/user/.m2/repository"),
            "m2:/home/user/.m2/repository"
        );
        assert_eq!(rebase_source_uri(root, "deps.toml"), "/home/user/app/deps.toml");
        assert_eq!(
            rebase_source_uri(root, "gradle-cache:caches/modules-2/files-2.1"),
            "gradle-cache:/home/user/app/caches/modules-2/files-2.1"
        );
    }

    #[test]
    fn test_rebase_path_containing_colon() {
        let root = Path::new("/home/user/app");
        assert_eq!(
            rebase_source_uri(root, "build/deps:v2.json"),
            "/home/user/app/build/deps:v2.json"
        );
        // a scheme name alone is not enough, the colon must follow it
        assert_eq!(
            rebase_source_uri(root, "lockfiles:main.json"),
            "/home/user/app/lockfiles:main.json"
        );
    }

    #[test]
    fn test_merge_precedence() {
        let root = PathBuf::from("/work/app");
        let project = ProjectConfig {
            output_file: Some(PathBuf::from("out/sources.json")),
            download_directory: Some("from-project".to_string()),
            source: Some("lock:deps.json".to_string()),
            exclude: vec!["a/**".to_string()],
        };
        let overrides = Overrides {
            download_directory: Some("from-cli".to_string()),
            exclude: vec!["b/**".to_string()],
            ..Default::default()
        };

        let settings = Settings::merge(Config::default(), Some((root, project)), overrides);
        assert_eq!(settings.output_file, PathBuf::from("/work/app/out/sources.json"));
        assert_eq!(settings.download_directory, "from-cli");
        assert_eq!(settings.source.as_deref(), Some("lock:/work/app/deps.json"));
        assert_eq!(settings.exclude, vec!["a/**".to_string(), "b/**".to_string()]);
    }

    #[test]
    fn test_merge_defaults() {
        let settings = Settings::merge(Config::default(), None, Overrides::default());
        assert_eq!(settings.output_file, PathBuf::from(DEFAULT_OUTPUT_FILE));
        assert_eq!(settings.download_directory, DEFAULT_DOWNLOAD_DIRECTORY);
        assert_eq!(settings.source, None);
    }
}
