//! Error types for indexing.

use std::io;
use std::path::PathBuf;

/// Errors raised while taking a filesystem snapshot.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Metadata for an entry could not be read.
    #[error("cannot read metadata for {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory could not be enumerated.
    #[error("cannot read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl IndexError {
    /// Path of the entry that failed.
    pub fn path(&self) -> &std::path::Path {
        match self {
            IndexError::Metadata { path, .. } | IndexError::ReadDir { path, .. } => path,
        }
    }
}

/// Convenience alias for indexing results.
pub type IndexResult<T> = Result<T, IndexError>;
