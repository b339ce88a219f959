/// Scanner module -- orchestrates filesystem scanning.
///
/// Two modes share one sequential traversal engine ([`walk`]):
/// - **Files:** every readable file, ranked by size ([`files::scan_files`]).
/// - **Folders:** every directory with its cumulative subtree size, computed
///   bottom-up ([`folders::scan_folders`]).
///
/// The synchronous entry points can be called from any thread. [`start_scan`]
/// wraps them on a dedicated worker thread and streams progress over a
/// bounded channel, leaving it to the caller to marshal updates onto its own
/// event loop.
pub mod files;
pub mod folders;
pub mod progress;
pub mod walk;

pub use files::scan_files;
pub use folders::scan_folders;

use crate::error::ScanError;
use crate::model::ResultSet;
use crossbeam_channel::{Receiver, TrySendError};
use progress::ScanProgress;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;
use tracing::{info, warn};

/// What a scan reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScanMode {
    /// One entry per file.
    #[default]
    Files,
    /// One entry per directory, sized by its whole subtree.
    Folders,
}

impl ScanMode {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Files => "Files",
            Self::Folders => "Folders",
        }
    }
}

/// Everything needed to run one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub root: PathBuf,
    pub mode: ScanMode,
}

impl ScanRequest {
    pub fn new(root: impl Into<PathBuf>, mode: ScanMode) -> Self {
        Self {
            root: root.into(),
            mode,
        }
    }
}

/// Run a scan synchronously on the calling thread.
pub fn scan<F>(request: &ScanRequest, on_progress: F) -> Result<ResultSet, ScanError>
where
    F: FnMut(&Path),
{
    match request.mode {
        ScanMode::Files => scan_files(&request.root, on_progress),
        ScanMode::Folders => scan_folders(&request.root, on_progress),
    }
}

/// Maximum number of progress messages that may queue up in the channel.
///
/// `Visiting` messages beyond this are dropped rather than blocking the
/// scanner; the terminal message always waits for room.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 4_096;

/// Handle to a running or completed background scan.
///
/// There is no cancellation: a started scan runs to completion.
pub struct ScanHandle {
    /// Receiver for progress updates from the scan thread.
    pub progress_rx: Receiver<ScanProgress>,
    /// Join handle for the scan thread.
    _thread: Option<thread::JoinHandle<()>>,
}

impl ScanHandle {
    /// Block until the scan finishes, discarding intermediate progress.
    pub fn wait(self) -> Result<ResultSet, ScanError> {
        for msg in self.progress_rx.iter() {
            match msg {
                ScanProgress::Visiting { .. } => continue,
                ScanProgress::Complete { results, .. } => return Ok(results),
                ScanProgress::Failed { error } => return Err(error),
            }
        }
        Err(ScanError::Interrupted)
    }
}

/// Start a new scan on a background thread.
///
/// Returns a [`ScanHandle`] for receiving progress and the final results.
pub fn start_scan(request: ScanRequest) -> ScanHandle {
    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<ScanProgress>(PROGRESS_CHANNEL_CAPACITY);

    let thread = thread::Builder::new()
        .name("sizerank-scanner".into())
        .spawn(move || {
            info!(
                "Starting {} scan of {}",
                request.mode.label(),
                request.root.display()
            );
            let start = Instant::now();
            let mut dirs_visited: u64 = 0;
            let mut receiver_gone = false;

            let outcome = scan(&request, |path| {
                dirs_visited += 1;
                let msg = ScanProgress::Visiting {
                    path: path.to_path_buf(),
                    dirs_visited,
                };
                // Progress is advisory: never stall the walk on a slow consumer.
                if let Err(TrySendError::Disconnected(_)) = progress_tx.try_send(msg) {
                    if !receiver_gone {
                        warn!("Progress receiver dropped; scan continues without updates");
                        receiver_gone = true;
                    }
                }
            });

            let terminal = match outcome {
                Ok(results) => ScanProgress::Complete {
                    results,
                    duration: start.elapsed(),
                },
                Err(error) => {
                    warn!("Scan failed: {error}");
                    ScanProgress::Failed { error }
                }
            };
            let _ = progress_tx.send(terminal);
        })
        .expect("failed to spawn scanner thread");

    ScanHandle {
        progress_rx,
        _thread: Some(thread),
    }
}
