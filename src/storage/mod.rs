//! src/storage
//!
//! Persistence for contact-form submissions.

use std::path::PathBuf;

use crate::domain::Submission;

pub mod json_file;

pub use json_file::JsonFileStore;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Append-only collection of submissions.
///
/// Implementations are shared between request handlers, hence `Send + Sync`.
/// Both operations are blocking and are expected to be driven from a
/// blocking thread pool.
pub trait SubmissionStore: Send + Sync {
    /// Every stored submission, in insertion order.
    fn load_all(&self) -> Result<Vec<Submission>, StoreError>;

    /// Adds `submission` after every existing entry.
    fn append(&self, submission: &Submission) -> Result<(), StoreError>;
}
