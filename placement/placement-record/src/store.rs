//! Append-only on-disk record store.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{RecordError, Result};
use crate::record::DemoRecord;

/// Writes one JSON file per successful trial into a root directory.
///
/// The store is strictly append-only: a trial index can be written once,
/// and attempting to write it again fails rather than overwriting.
#[derive(Debug, Clone)]
pub struct RecordStore {
    root: PathBuf,
}

impl RecordStore {
    /// Opens (creating if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// [`RecordError::Io`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The store's root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a given trial index persists to.
    #[must_use]
    pub fn path_for(&self, iteration: usize) -> PathBuf {
        self.root.join(format!("demo_aug_{iteration}.json"))
    }

    /// Whether a record exists for the given trial index.
    #[must_use]
    pub fn contains(&self, iteration: usize) -> bool {
        self.path_for(iteration).exists()
    }

    /// Persists a record for the given trial index.
    ///
    /// # Errors
    ///
    /// - [`RecordError::AlreadyExists`] if the index was written before.
    /// - [`RecordError::Io`] / [`RecordError::Serialize`] on write
    ///   failures.
    pub fn write(&self, iteration: usize, record: &DemoRecord) -> Result<PathBuf> {
        let path = self.path_for(iteration);
        if path.exists() {
            return Err(RecordError::AlreadyExists { path });
        }
        let json = serde_json::to_vec_pretty(record)?;
        fs::write(&path, json)?;
        info!(
            iteration,
            path = %path.display(),
            parent = record.object_classes.parent.as_str(),
            child = record.object_classes.child.as_str(),
            "persisted demonstration record"
        );
        Ok(path)
    }

    /// Loads a previously written record.
    ///
    /// # Errors
    ///
    /// [`RecordError::Io`] / [`RecordError::Serialize`] when the file is
    /// missing or malformed.
    pub fn read(&self, iteration: usize) -> Result<DemoRecord> {
        let bytes = fs::read(self.path_for(iteration))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
