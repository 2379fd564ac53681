use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "sources-list")]
#[command(about = "Dependency source manifests for offline builds", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the sources manifest
    Generate(ManifestArgs),

    /// Fail if the manifest on disk does not match the current resolution
    Check(ManifestArgs),

    /// Print the resolved artifacts without hashing them
    Resolve(ManifestArgs),

    /// Print a shell completion script
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ManifestArgs {
    /// Resolution source URI (lock:FILE, m2:DIR, gradle-cache:DIR)
    #[arg(long, env = "SOURCES_LIST_SOURCE")]
    pub source: Option<String>,

    /// Where to write the manifest (default: sources.json)
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Value of every entry's `dest` (default: localRepository)
    #[arg(long)]
    pub download_directory: Option<String>,

    /// Glob of repository paths to leave out of directory scans
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Use this global config file instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,
}
