/// Scan progress reporting -- messages sent from the scan thread to the
/// consumer (usually the UI thread) via a crossbeam channel.
use crate::error::ScanError;
use crate::model::ResultSet;
use std::path::PathBuf;
use std::time::Duration;

/// Progress updates sent from a background scan.
///
/// Every scan ends with exactly one `Complete` or `Failed` message.
#[derive(Debug)]
pub enum ScanProgress {
    /// A directory has just been processed.
    Visiting { path: PathBuf, dirs_visited: u64 },
    /// The scan finished; results are ranked largest first.
    Complete {
        results: ResultSet,
        duration: Duration,
    },
    /// The scan could not start (invalid root).
    Failed { error: ScanError },
}
