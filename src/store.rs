//! Filesystem rendition store.
//!
//! Every stored file for one upload shares the upload id as its filename
//! stem and lands in a per-class subdirectory:
//!
//! ```text
//! media/
//! ├── original/
//! │   └── {upload_id}.jpg
//! ├── w320/
//! │   └── {upload_id}.jpg
//! ├── w640/
//! │   └── {upload_id}.jpg
//! └── ...
//! ```
//!
//! This layout is a compatibility contract with already-stored assets; the
//! subdirectory names and the `{upload_id}.{extension}` stem scheme must not
//! change. Directory creation is idempotent, so concurrent invocations
//! targeting the same subdirectory are safe — upload-id uniqueness is the
//! only collision protection, and the only one needed.

use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which subdirectory a stored file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenditionClass {
    Original,
    Width(u32),
}

impl fmt::Display for RenditionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenditionClass::Original => f.write_str("original"),
            RenditionClass::Width(width) => write!(f, "w{width}"),
        }
    }
}

/// Resolvable location of one stored file.
///
/// Serialized as a plain path string so the caller can embed it directly in
/// the post record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StoredLocation(PathBuf);

impl StoredLocation {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Writes encoded renditions under a media root directory.
#[derive(Debug, Clone)]
pub struct RenditionStore {
    root: PathBuf,
}

impl RenditionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write `bytes` to `{root}/{class}/{upload_id}.{extension}`.
    ///
    /// Creates the class subdirectory if absent. Fails only on filesystem
    /// errors; the caller decides whether that is fatal (original) or a
    /// per-width degrade.
    pub fn store(
        &self,
        bytes: &[u8],
        class: RenditionClass,
        upload_id: Uuid,
        extension: &str,
    ) -> Result<StoredLocation, StoreError> {
        let dir = self.root.join(class.to_string());
        fs::create_dir_all(&dir)?;

        let path = dir.join(format!("{upload_id}.{extension}"));
        fs::write(&path, bytes)?;
        Ok(StoredLocation(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn rendition_class_labels() {
        assert_eq!(RenditionClass::Original.to_string(), "original");
        assert_eq!(RenditionClass::Width(320).to_string(), "w320");
        assert_eq!(RenditionClass::Width(1125).to_string(), "w1125");
    }

    #[test]
    fn store_writes_to_class_subdirectory() {
        let tmp = TempDir::new().unwrap();
        let store = RenditionStore::new(tmp.path());
        let upload_id = Uuid::new_v4();

        let location = store
            .store(b"bytes", RenditionClass::Width(640), upload_id, "jpg")
            .unwrap();

        let expected = tmp.path().join("w640").join(format!("{upload_id}.jpg"));
        assert_eq!(location.path(), expected);
        assert_eq!(fs::read(location.path()).unwrap(), b"bytes");
    }

    #[test]
    fn store_creates_nested_root_if_absent() {
        let tmp = TempDir::new().unwrap();
        let store = RenditionStore::new(tmp.path().join("deep/media"));
        let location = store
            .store(b"x", RenditionClass::Original, Uuid::new_v4(), "jpg")
            .unwrap();
        assert!(location.path().exists());
    }

    #[test]
    fn repeated_stores_into_same_class_are_idempotent_on_the_directory() {
        let tmp = TempDir::new().unwrap();
        let store = RenditionStore::new(tmp.path());

        let a = store
            .store(b"a", RenditionClass::Width(320), Uuid::new_v4(), "jpg")
            .unwrap();
        let b = store
            .store(b"b", RenditionClass::Width(320), Uuid::new_v4(), "jpg")
            .unwrap();

        assert_ne!(a.path(), b.path());
        assert_eq!(fs::read(a.path()).unwrap(), b"a");
        assert_eq!(fs::read(b.path()).unwrap(), b"b");
    }

    #[test]
    fn shared_stem_across_classes() {
        let tmp = TempDir::new().unwrap();
        let store = RenditionStore::new(tmp.path());
        let upload_id = Uuid::new_v4();

        let original = store
            .store(b"o", RenditionClass::Original, upload_id, "jpg")
            .unwrap();
        let w320 = store
            .store(b"r", RenditionClass::Width(320), upload_id, "jpg")
            .unwrap();

        assert_eq!(
            original.path().file_name(),
            w320.path().file_name(),
            "all renditions of one upload share a filename stem"
        );
    }

    #[test]
    fn store_into_unwritable_root_errors() {
        let tmp = TempDir::new().unwrap();
        // A plain file where the root directory should be.
        let blocked = tmp.path().join("media");
        fs::write(&blocked, b"not a directory").unwrap();

        let store = RenditionStore::new(&blocked);
        let result = store.store(b"x", RenditionClass::Original, Uuid::new_v4(), "jpg");
        assert!(matches!(result, Err(StoreError::Io(_))));
    }

    #[test]
    fn stored_location_serializes_as_path_string() {
        let tmp = TempDir::new().unwrap();
        let store = RenditionStore::new(tmp.path());
        let location = store
            .store(b"x", RenditionClass::Original, Uuid::new_v4(), "jpg")
            .unwrap();

        let json = serde_json::to_value(&location).unwrap();
        assert_eq!(json, serde_json::json!(location.path()));
    }
}
