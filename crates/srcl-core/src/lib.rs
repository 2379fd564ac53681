//! Core domain models and logic for sources-list
//!
//! This crate contains:
//! - Domain models (Coordinate, ResolvedArtifact, ManifestEntry, Manifest)
//! - Manifest builder (hashing + URL reconstruction)
//! - Render engine (byte-stable manifest text)

pub mod artifact;
pub mod builder;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod render;

pub use artifact::{Coordinate, MAVEN_CENTRAL, ResolvedArtifact};
pub use builder::{DEFAULT_HASH_CONCURRENCY, ManifestBuilder};
pub use error::{Error, Result};
pub use manifest::{EntryKind, Manifest, ManifestEntry};
pub use render::render_manifest;
