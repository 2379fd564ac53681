pub mod filter;
pub mod gradle;
pub mod handler;
pub mod layout;
pub mod lock;
pub mod maven;

pub use filter::ArtifactFilter;
pub use handler::{ResolutionSource, SourceOptions, SourceRegistry};
pub use lock::{LockFile, LockedArtifact};
