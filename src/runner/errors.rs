//! Runner error types
//!
//! Only systemic failures live here. Anything wrong with a single course
//! document is a finding, not an error.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for runner operations
pub type RunnerResult<T> = Result<T, RunnerError>;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Failed to read courses directory {path}: {source}")]
    CourseEnumeration {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to list lessons in {path}: {source}")]
    LessonEnumeration {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    ReportSerialize(#[from] serde_json::Error),
}

impl RunnerError {
    /// Returns the path the error refers to, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            RunnerError::CourseEnumeration { path, .. }
            | RunnerError::LessonEnumeration { path, .. }
            | RunnerError::ReportWrite { path, .. } => Some(path),
            RunnerError::ReportSerialize(_) => None,
        }
    }
}
