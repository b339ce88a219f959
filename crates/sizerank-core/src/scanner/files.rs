/// File-mode aggregator -- one entry per readable file under the root.
use super::walk::{Walk, WalkOrder};
use crate::error::ScanError;
use crate::model::{FileOutcome, ResultSet, ScanEntry};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Measure every file under `root`, recursively, and rank them by size.
///
/// `on_progress` is called synchronously once per visited directory, after
/// that directory's files have been measured. Walk order is top-down so the
/// progress path tracks the user's mental model of the tree.
pub fn scan_files<F>(root: &Path, mut on_progress: F) -> Result<ResultSet, ScanError>
where
    F: FnMut(&Path),
{
    let start = Instant::now();
    let mut walk = Walk::new(root, WalkOrder::TopDown)?;
    let mut entries = Vec::new();
    let mut skipped = Vec::new();
    let mut dirs_visited: u64 = 0;

    for visit in walk.by_ref() {
        for path in visit.file_paths() {
            match FileOutcome::measure(&path) {
                FileOutcome::Measured(size) => entries.push(ScanEntry::new(size, path)),
                FileOutcome::Skipped(s) => {
                    debug!("Skipping file {}: {}", s.path.display(), s.reason);
                    skipped.push(s);
                }
            }
        }
        dirs_visited += 1;
        on_progress(&visit.path);
    }

    skipped.extend(walk.into_skipped());
    let results = ResultSet::new(entries, skipped);
    info!(
        "File scan of {} complete: {} files in {} dirs, {} skipped, {:?}",
        root.display(),
        results.len(),
        dirs_visited,
        results.skipped().len(),
        start.elapsed()
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_bytes(path: &Path, n: usize) {
        let mut f = fs::File::create(path).unwrap();
        f.write_all(&vec![0u8; n]).unwrap();
    }

    #[test]
    fn reports_every_file_sorted_descending() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let sub = root.join("sub");
        fs::create_dir(&sub).unwrap();
        write_bytes(&root.join("a"), 100);
        write_bytes(&sub.join("b"), 50);
        write_bytes(&sub.join("c"), 75);

        let results = scan_files(root, |_| {}).unwrap();
        let got: Vec<(u64, PathBuf)> = results.iter().map(|e| (e.size, e.path.clone())).collect();
        assert_eq!(
            got,
            vec![(100, root.join("a")), (75, sub.join("c")), (50, sub.join("b"))]
        );
        assert!(results.skipped().is_empty());
    }

    #[test]
    fn progress_fires_once_per_directory() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("one").join("two")).unwrap();
        let mut seen = Vec::new();
        scan_files(tmp.path(), |p| seen.push(p.to_path_buf())).unwrap();
        assert_eq!(
            seen,
            vec![
                tmp.path().to_path_buf(),
                tmp.path().join("one"),
                tmp.path().join("one").join("two"),
            ]
        );
    }

    #[test]
    fn empty_directory_yields_no_entries() {
        let tmp = TempDir::new().unwrap();
        let results = scan_files(tmp.path(), |_| {}).unwrap();
        assert!(results.is_empty());
    }
}
