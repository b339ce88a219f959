/// Error types for the core crate.
///
/// Per-entry traversal failures are *not* errors: they are recorded as
/// [`Skipped`](crate::model::Skipped) records on the result set. Only the
/// conditions below abort an operation.
use std::io;
use std::path::PathBuf;

/// A scan could not start because its root is unusable.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("scan root does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("scan root is not a directory: {}", .0.display())]
    RootNotADirectory(PathBuf),

    #[error("scan root cannot be read: {}: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The background worker went away without reporting an outcome.
    #[error("scanner thread exited before reporting a result")]
    Interrupted,
}

impl ScanError {
    /// `true` for the variants that mean the chosen root cannot be scanned.
    pub fn is_invalid_root(&self) -> bool {
        matches!(
            self,
            Self::RootNotFound(_) | Self::RootNotADirectory(_) | Self::RootUnreadable { .. }
        )
    }
}

/// Opening the host file browser failed.
#[derive(Debug, thiserror::Error)]
pub enum RevealError {
    #[error("path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot access {}: {source}", path.display())]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not launch `{program}`: {source}")]
    Launch {
        program: &'static str,
        #[source]
        source: io::Error,
    },
}

/// Writing an exported result set failed.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("export I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}
