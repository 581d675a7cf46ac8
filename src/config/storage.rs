use crate::core::Storage;
use crate::utils::error::{EtlError, Result};
use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::Builder;

/// Filesystem storage rooted at `base_path`. Absolute paths bypass the base.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        if !full_path.is_file() {
            return Err(EtlError::InputNotFound {
                path: full_path.display().to_string(),
            });
        }

        let data = fs::read(full_path)?;
        Ok(data)
    }

    /// Writes to a temporary file beside the destination and renames it into
    /// place, so a failed run never leaves a truncated file behind.
    ///
    /// A replaced file keeps its permissions; a new one gets the usual
    /// umask-derived mode rather than the temp file's private 0600.
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);
        let shown_path = full_path.display().to_string();
        let write_error = |source: std::io::Error| EtlError::WriteError {
            path: shown_path.clone(),
            source,
        };

        let parent = match full_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        };

        let mut builder = Builder::new();
        #[cfg(unix)]
        builder.permissions(fs::Permissions::from_mode(0o666));

        let mut temp = builder.tempfile_in(&parent).map_err(write_error)?;
        if let Ok(existing) = fs::metadata(&full_path) {
            temp.as_file().set_permissions(existing.permissions()).map_err(write_error)?;
        }
        temp.write_all(data).map_err(write_error)?;
        temp.flush().map_err(write_error)?;
        temp.persist(&full_path).map_err(|e| write_error(e.error))?;

        tracing::debug!("Wrote {} bytes to {}", data.len(), shown_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_under_base_path() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.write_file("out.csv", b"id\n1").unwrap();
        assert_eq!(storage.read_file("out.csv").unwrap(), b"id\n1");
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.write_file("out.csv", b"old content that is longer").unwrap();
        storage.write_file("out.csv", b"new").unwrap();
        assert_eq!(fs::read(dir.path().join("out.csv")).unwrap(), b"new");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let err = storage.read_file("nope.json").unwrap_err();
        assert!(matches!(err, EtlError::InputNotFound { .. }));
    }

    #[test]
    fn test_read_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("data")).unwrap();
        let storage = LocalStorage::new(dir.path());
        assert!(matches!(
            storage.read_file("data"),
            Err(EtlError::InputNotFound { .. })
        ));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let err = storage.write_file("missing/out.csv", b"id").unwrap_err();
        assert!(matches!(err, EtlError::WriteError { .. }));
        assert!(!dir.path().join("missing").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_keeps_existing_mode() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.csv");
        fs::write(&target, b"old").unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o644)).unwrap();

        LocalStorage::new(dir.path()).write_file("out.csv", b"new").unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
        assert_eq!(fs::read(&target).unwrap(), b"new");
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_gets_default_mode() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("plain.csv"), b"id").unwrap();
        LocalStorage::new(dir.path()).write_file("fresh.csv", b"id").unwrap();

        let mode = |name: &str| {
            fs::metadata(dir.path().join(name)).unwrap().permissions().mode() & 0o777
        };
        assert_eq!(mode("fresh.csv"), mode("plain.csv"));
    }
}
