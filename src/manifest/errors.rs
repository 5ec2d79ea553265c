//! Manifest error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Manifest errors
///
/// A missing file is not an error: `read` returns an empty manifest with
/// `missing: true` instead.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write manifest {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize manifest {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ManifestError {
    /// Returns the path the error refers to
    pub fn path(&self) -> &PathBuf {
        match self {
            ManifestError::Read { path, .. }
            | ManifestError::Parse { path, .. }
            | ManifestError::Write { path, .. }
            | ManifestError::Serialize { path, .. } => path,
        }
    }

    /// Returns true for JSON syntax errors
    pub fn is_parse(&self) -> bool {
        matches!(self, ManifestError::Parse { .. })
    }
}
