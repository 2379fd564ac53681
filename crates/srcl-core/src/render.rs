//! Render engine - deterministic manifest text
//!
//! Output must be byte-identical for identical manifests, so consumers can
//! diff or checksum the file between runs.

use crate::{Manifest, Result};

/// Render a manifest as a JSON array terminated by a newline.
///
/// Each object is pretty-printed on its own, unindented inside the array:
///
/// ```text
/// [
/// {
///   "type": "file",
///   ...
/// }
/// ]
/// ```
pub fn render_manifest(manifest: &Manifest) -> Result<String> {
    if manifest.is_empty() {
        return Ok("[]\n".to_string());
    }

    let objects = manifest
        .iter()
        .map(|entry| serde_json::to_string_pretty(entry))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut out = String::from("[\n");
    out.push_str(&objects.join(",\n"));
    out.push_str("\n]\n");
    Ok(out)
}
