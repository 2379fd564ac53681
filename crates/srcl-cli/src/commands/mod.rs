pub mod check;
pub mod completions;
pub mod generate;
pub mod resolve;

use anyhow::Result;
use srcl_config::{Config, Overrides, ProjectConfig, Settings};
use srcl_engine::GenerateRequest;

use crate::cli::ManifestArgs;

/// Merge config files and flags into one request
pub fn load_request(args: ManifestArgs) -> Result<GenerateRequest> {
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let project = ProjectConfig::find_and_load()?;
    if let Some((root, _)) = &project {
        tracing::debug!("using {}", root.join(srcl_config::PROJECT_FILE).display());
    }

    let overrides = Overrides {
        output_file: args.output_file,
        download_directory: args.download_directory,
        source: args.source,
        exclude: args.exclude,
    };

    GenerateRequest::from_settings(&Settings::merge(config, project, overrides))
}
