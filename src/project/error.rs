//! Errors raised while loading `.ll` files from disk.

use std::path::PathBuf;

use thiserror::Error;

/// A failure while loading IR files into an [`AnalysisHost`](crate::ide::AnalysisHost).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Some files failed; the rest were loaded.
    #[error("Failed to load {} file(s):\n  {}", errors.len(), join_errors(errors))]
    Batch { errors: Vec<LoadError> },
}

impl LoadError {
    /// The file or directory the error is about, when known.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            LoadError::DirectoryNotFound { path } | LoadError::Io { path, .. } => Some(path.as_path()),
            LoadError::Walk(err) => err.path(),
            LoadError::Batch { .. } => None,
        }
    }
}

fn join_errors(errors: &[LoadError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n  ")
}
