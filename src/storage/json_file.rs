//! src/storage/json_file.rs

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::domain::Submission;
use crate::storage::{StoreError, SubmissionStore};

/// Keeps the whole collection as a single JSON array in one file.
///
/// Every append rewrites the file. Appends made through the same store are
/// serialized; separate processes writing the same file are not coordinated.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_collection(&self) -> Result<Vec<Submission>, StoreError> {
        let contents = std::fs::read(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        // a literal `null` is an empty collection.
        let submissions: Option<Vec<Submission>> =
            serde_json::from_slice(&contents).map_err(|source| StoreError::Format {
                path: self.path.clone(),
                source,
            })?;

        Ok(submissions.unwrap_or_default())
    }
}

impl SubmissionStore for JsonFileStore {
    #[tracing::instrument(name = "Loading stored submissions", skip(self), fields(path = %self.path.display()))]
    fn load_all(&self) -> Result<Vec<Submission>, StoreError> {
        self.read_collection().map_err(|e| {
            tracing::error!(error.cause_chain = ?e, "Failed to load submissions");
            e
        })
    }

    #[tracing::instrument(name = "Appending a submission", skip(self, submission), fields(path = %self.path.display()))]
    fn append(&self, submission: &Submission) -> Result<(), StoreError> {
        // the lock only guards the file, a panicking writer leaves nothing to repair.
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut submissions = self.read_collection()?;
        submissions.push(submission.clone());

        let serialized = serde_json::to_vec(&submissions).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e.into(),
        })?;

        std::fs::write(&self.path, serialized).map_err(|source| {
            tracing::error!(error.message = %source, "Failed to write submissions");
            StoreError::Write {
                path: self.path.clone(),
                source,
            }
        })?;

        tracing::info!(stored = submissions.len(), "Submission appended");
        Ok(())
    }
}
