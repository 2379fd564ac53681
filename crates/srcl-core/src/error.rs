use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Dependency resolution failed: {0}")]
    Resolution(String),

    #[error("Invalid source URI: {0}")]
    InvalidSourceUri(String),

    #[error("Failed to hash artifact {}: {source}", .path.display())]
    HashComputation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("Failed to write manifest {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
