//! Manifest file storage

use std::io::Write;
use std::path::{Path, PathBuf};

use srcl_core::{Error, Result};

/// Reads and atomically replaces manifest files
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestStore;

impl ManifestStore {
    pub fn new() -> Self {
        Self
    }

    /// Write `content` to `path` via a temporary sibling file and a rename.
    ///
    /// On failure the previous file (if any) is left untouched.
    pub async fn write(&self, path: &Path, content: String) -> Result<()> {
        let target = path.to_path_buf();
        tokio::task::spawn_blocking(move || write_atomic(&target, content.as_bytes()))
            .await
            .map_err(|e| Error::Other(e.into()))??;

        tracing::info!("wrote {}", path.display());
        Ok(())
    }

    /// Previous manifest bytes, or None if there is none yet.
    ///
    /// Bytes rather than text: a garbage file must not block regeneration.
    pub async fn read(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let output_error = |source: std::io::Error| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let parent = parent_dir(path);
    std::fs::create_dir_all(&parent).map_err(output_error)?;

    // The replacement keeps the old file's mode; new files get 0666 minus umask.
    let existing = std::fs::metadata(path).ok().map(|m| m.permissions());
    let mut builder = tempfile::Builder::new();
    if existing.is_none()
        && let Some(permissions) = default_permissions()
    {
        builder.permissions(permissions);
    }
    let mut temp = builder.tempfile_in(&parent).map_err(output_error)?;
    if let Some(permissions) = existing {
        temp.as_file()
            .set_permissions(permissions)
            .map_err(output_error)?;
    }

    temp.write_all(bytes).map_err(output_error)?;
    temp.as_file().sync_all().map_err(output_error)?;
    temp.persist(path).map_err(|e| output_error(e.error))?;

    Ok(())
}

#[cfg(unix)]
fn default_permissions() -> Option<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(std::fs::Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<std::fs::Permissions> {
    None
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/sources.json");
        let store = ManifestStore::new();

        assert_eq!(store.read(&path).await.unwrap(), None);

        store.write(&path, "[]\n".to_string()).await.unwrap();
        assert_eq!(store.read(&path).await.unwrap().as_deref(), Some(&b"[]\n"[..]));

        store.write(&path, "[\n]\n".to_string()).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[\n]\n");

        // only the manifest remains, no leftover temp files
        let names: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("sources.json")]);
    }

    #[tokio::test]
    async fn test_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        // a regular file where a directory is needed
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file").unwrap();
        let path = blocker.join("sources.json");

        let err = ManifestStore::new()
            .write(&path, "[]\n".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::OutputWrite { .. }));
        assert_eq!(std::fs::read_to_string(&blocker).unwrap(), "file");
    }

    #[tokio::test]
    async fn test_read_non_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sources.json");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let previous = ManifestStore::new().read(&path).await.unwrap();
        assert_eq!(previous, Some(vec![0xff, 0xfe, 0x00]));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_replace_keeps_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = ManifestStore::new();

        for mode in [0o644, 0o640] {
            let path = dir.path().join(format!("sources-{:o}.json", mode));
            std::fs::write(&path, "old").unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();

            store.write(&path, "[]\n".to_string()).await.unwrap();

            let actual = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
            assert_eq!(actual, mode);
            assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]\n");
        }
    }

    #[test]
    fn test_parent_dir_of_bare_name() {
        assert_eq!(parent_dir(Path::new("sources.json")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("a/b.json")), PathBuf::from("a"));
    }
}
