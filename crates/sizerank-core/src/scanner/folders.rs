/// Folder-mode aggregator -- cumulative size of every directory under the root.
///
/// Directories are visited bottom-up, so by the time a directory is reached
/// every subdirectory total is already final in the size table. Each
/// directory total is therefore computed exactly once:
///
/// ```text
/// total(dir) = Σ size(file in dir) + Σ total(subdir of dir)
/// ```
use super::walk::{Walk, WalkOrder};
use crate::error::ScanError;
use crate::model::{FileOutcome, ResultSet, ScanEntry};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Compute the total size of every directory under `root`, including `root`.
///
/// `on_progress` is called synchronously each time a directory's total is
/// finalised. Unreadable files are excluded from the sums; unreadable
/// subdirectories contribute nothing and produce no entry.
pub fn scan_folders<F>(root: &Path, mut on_progress: F) -> Result<ResultSet, ScanError>
where
    F: FnMut(&Path),
{
    let start = Instant::now();
    let mut walk = Walk::new(root, WalkOrder::BottomUp)?;
    // Scan-lifetime only; dropped when this function returns.
    let mut folder_sizes: HashMap<PathBuf, u64> = HashMap::new();
    let mut entries = Vec::new();
    let mut skipped = Vec::new();

    for visit in walk.by_ref() {
        let mut total: u64 = 0;

        for path in visit.file_paths() {
            match FileOutcome::measure(&path) {
                FileOutcome::Measured(size) => total = total.saturating_add(size),
                FileOutcome::Skipped(s) => {
                    debug!("Skipping file {}: {}", s.path.display(), s.reason);
                    skipped.push(s);
                }
            }
        }

        for child in visit.subdir_paths() {
            // Absent only when the child could not be listed.
            let child_total = folder_sizes.get(&child).copied().unwrap_or(0);
            total = total.saturating_add(child_total);
        }

        folder_sizes.insert(visit.path.clone(), total);
        on_progress(&visit.path);
        entries.push(ScanEntry::new(total, visit.path));
    }

    skipped.extend(walk.into_skipped());
    let results = ResultSet::new(entries, skipped);
    info!(
        "Folder scan of {} complete: {} dirs, {} skipped, {:?}",
        root.display(),
        results.len(),
        results.skipped().len(),
        start.elapsed()
    );
    Ok(results)
}
