//! Storage layer for sources-list
//!
//! Manifest files are replaced atomically so a failed run never leaves a
//! truncated manifest behind.

pub mod store;

pub use store::ManifestStore;
