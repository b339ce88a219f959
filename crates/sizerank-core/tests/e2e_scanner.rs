/// End-to-end scanner integration tests.
///
/// These tests run the real walker and both aggregators against real
/// temporary directory trees built with `tempfile`, and drive the background
/// `start_scan` path through its channel exactly as the GUI does.
use sizerank_core::scanner::progress::ScanProgress;
use sizerank_core::scanner::{start_scan, ScanHandle, PROGRESS_CHANNEL_CAPACITY};
use sizerank_core::{scan_files, scan_folders, ScanError, ScanMode, ScanRequest};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_bytes(path: &Path, n: usize) {
    let mut f = fs::File::create(path).unwrap();
    f.write_all(&vec![0u8; n]).unwrap();
}

/// Create a reproducible directory tree:
///
/// ```text
/// root/
///   alpha/
///     a.txt   (100 bytes)
///     b.rs    (200 bytes)
///     deep/
///       e.log (50 bytes)
///   beta/
///     c.png   (300 bytes)
///   empty/
///   d.zip     (400 bytes)
/// ```
///
/// Total file bytes: 1 050.
fn build_test_tree(root: &Path) {
    let alpha = root.join("alpha");
    fs::create_dir_all(alpha.join("deep")).unwrap();
    fs::create_dir_all(root.join("beta")).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();

    write_bytes(&alpha.join("a.txt"), 100);
    write_bytes(&alpha.join("b.rs"), 200);
    write_bytes(&alpha.join("deep").join("e.log"), 50);
    write_bytes(&root.join("beta").join("c.png"), 300);
    write_bytes(&root.join("d.zip"), 400);
}

fn sizes_and_paths(results: &sizerank_core::ResultSet) -> Vec<(u64, PathBuf)> {
    results.iter().map(|e| (e.size, e.path.clone())).collect()
}

/// Drain a background scan, returning the terminal message and the number of
/// `Visiting` messages seen.
fn drain(handle: ScanHandle) -> (ScanProgress, usize) {
    let mut visiting = 0;
    loop {
        match handle.progress_rx.recv_timeout(Duration::from_secs(30)) {
            Ok(ScanProgress::Visiting { .. }) => visiting += 1,
            Ok(terminal) => return (terminal, visiting),
            Err(err) => panic!("scanner did not finish: {err}"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// The worked example: `/r/a` (100) and `/r/sub/b` (50).
#[test]
fn worked_example_both_modes() {
    let tmp = TempDir::new().unwrap();
    let r = tmp.path();
    fs::create_dir(r.join("sub")).unwrap();
    write_bytes(&r.join("a"), 100);
    write_bytes(&r.join("sub").join("b"), 50);

    let files = scan_files(r, |_| {}).unwrap();
    assert_eq!(
        sizes_and_paths(&files),
        vec![(100, r.join("a")), (50, r.join("sub").join("b"))]
    );

    let folders = scan_folders(r, |_| {}).unwrap();
    assert_eq!(
        sizes_and_paths(&folders),
        vec![(150, r.to_path_buf()), (50, r.join("sub"))]
    );
}

#[test]
fn file_mode_reports_every_file_once() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());

    let results = scan_files(tmp.path(), |_| {}).unwrap();
    assert_eq!(results.len(), 5);
    assert_eq!(results.total_size(), 1_050);
    let sizes: Vec<u64> = results.iter().map(|e| e.size).collect();
    assert_eq!(sizes, vec![400, 300, 200, 100, 50]);
}

#[test]
fn folder_mode_reports_every_directory_once() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    build_test_tree(root);

    let results = scan_folders(root, |_| {}).unwrap();
    // root, alpha, alpha/deep, beta, empty
    assert_eq!(results.len(), 5);
    assert_eq!(results.get(root).unwrap().size, 1_050);
    assert_eq!(results.get(&root.join("alpha")).unwrap().size, 350);
    assert_eq!(results.get(&root.join("alpha").join("deep")).unwrap().size, 50);
    assert_eq!(results.get(&root.join("beta")).unwrap().size, 300);
    assert_eq!(results.get(&root.join("empty")).unwrap().size, 0);

    let sizes: Vec<u64> = results.iter().map(|e| e.size).collect();
    let mut sorted = sizes.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(sizes, sorted);
}

#[test]
fn repeated_scans_are_identical() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());

    assert_eq!(
        scan_files(tmp.path(), |_| {}).unwrap(),
        scan_files(tmp.path(), |_| {}).unwrap()
    );
    assert_eq!(
        scan_folders(tmp.path(), |_| {}).unwrap(),
        scan_folders(tmp.path(), |_| {}).unwrap()
    );
}

#[test]
fn invalid_roots_fail_before_traversal() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing");
    let mut calls = 0;
    let err = scan_files(&missing, |_| calls += 1).unwrap_err();
    assert!(matches!(err, ScanError::RootNotFound(_)));
    assert!(err.is_invalid_root());
    assert_eq!(calls, 0);

    let file = tmp.path().join("plain.txt");
    write_bytes(&file, 10);
    let err = scan_folders(&file, |_| {}).unwrap_err();
    assert!(matches!(err, ScanError::RootNotADirectory(_)));
}

/// A dangling symlink stands in for a file whose metadata read fails.
#[cfg(unix)]
#[test]
fn unreadable_file_is_skipped_silently() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    build_test_tree(root);
    std::os::unix::fs::symlink(root.join("nowhere"), root.join("alpha").join("broken")).unwrap();

    let files = scan_files(root, |_| {}).unwrap();
    assert_eq!(files.len(), 5);
    assert!(files.get(&root.join("alpha").join("broken")).is_none());
    assert_eq!(files.skipped_files(), 1);
    assert_eq!(files.skipped()[0].path, root.join("alpha").join("broken"));

    let folders = scan_folders(root, |_| {}).unwrap();
    assert_eq!(folders.get(&root.join("alpha")).unwrap().size, 350);
    assert_eq!(folders.get(root).unwrap().size, 1_050);
    assert_eq!(folders.skipped_files(), 1);
}

/// A directory without read permission is skipped with its subtree.
/// Privileged users bypass permission bits, in which case there is nothing
/// to observe and the test returns early.
#[cfg(unix)]
#[test]
fn unreadable_directory_is_skipped_with_subtree() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    build_test_tree(root);
    let beta = root.join("beta");
    fs::set_permissions(&beta, fs::Permissions::from_mode(0o000)).unwrap();
    let bypassed = fs::read_dir(&beta).is_ok();

    let files = scan_files(root, |_| {});
    let folders = scan_folders(root, |_| {});
    fs::set_permissions(&beta, fs::Permissions::from_mode(0o755)).unwrap();
    if bypassed {
        return;
    }

    let files = files.unwrap();
    assert_eq!(files.len(), 4);
    assert_eq!(files.skipped_dirs(), 1);

    let folders = folders.unwrap();
    assert!(folders.get(&beta).is_none());
    assert_eq!(folders.get(root).unwrap().size, 750);
    assert_eq!(folders.len(), 4);
}

/// root/{a/x (10 bytes), b/y (20 bytes)}
fn build_two_branch_tree(root: &Path) {
    fs::create_dir_all(root.join("a")).unwrap();
    fs::create_dir_all(root.join("b")).unwrap();
    write_bytes(&root.join("a").join("x"), 10);
    write_bytes(&root.join("b").join("y"), 20);
}

/// A directory deleted after the walk started, but before it is listed, is
/// skipped with its subtree. Works regardless of privileges.
#[test]
fn directory_removed_mid_scan_is_skipped_in_folder_mode() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    build_two_branch_tree(root);

    // `a` is finalised before its sibling `b` is listed.
    let results = scan_folders(root, |p| {
        if p.ends_with("a") {
            fs::remove_dir_all(root.join("b")).unwrap();
        }
    })
    .unwrap();

    assert_eq!(
        sizes_and_paths(&results),
        vec![(10, root.join("a")), (10, root.to_path_buf())]
    );
    assert!(results.get(&root.join("b")).is_none());
    assert_eq!(results.skipped_dirs(), 1);
    assert_eq!(results.skipped_files(), 0);
    assert_eq!(results.skipped()[0].path, root.join("b"));
}

#[test]
fn directory_removed_mid_scan_is_skipped_in_file_mode() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    build_two_branch_tree(root);

    // The root is reported before either subdirectory is measured.
    let results = scan_files(root, |p| {
        if p == root {
            fs::remove_dir_all(root.join("b")).unwrap();
        }
    })
    .unwrap();

    assert_eq!(sizes_and_paths(&results), vec![(10, root.join("a").join("x"))]);
    assert_eq!(results.skipped_dirs(), 1);
    assert_eq!(results.skipped_files(), 0);
}

#[test]
fn background_scan_streams_progress_then_results() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());

    let handle = start_scan(ScanRequest::new(tmp.path(), ScanMode::Folders));
    let (terminal, visiting) = drain(handle);
    assert_eq!(visiting, 5, "one progress message per directory");
    match terminal {
        ScanProgress::Complete { results, .. } => {
            assert_eq!(results.entries()[0].path.as_path(), tmp.path());
            assert_eq!(results.entries()[0].size, 1_050);
        }
        other => panic!("expected Complete, got {other:?}"),
    }
}

#[test]
fn background_scan_reports_invalid_root() {
    let tmp = TempDir::new().unwrap();
    let handle = start_scan(ScanRequest::new(tmp.path().join("nope"), ScanMode::Files));
    let (terminal, visiting) = drain(handle);
    assert_eq!(visiting, 0);
    assert!(matches!(
        terminal,
        ScanProgress::Failed {
            error: ScanError::RootNotFound(_)
        }
    ));
}

#[test]
fn wait_returns_final_results() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());
    let results = start_scan(ScanRequest::new(tmp.path(), ScanMode::Files))
        .wait()
        .unwrap();
    assert_eq!(results.len(), 5);
}

/// `PROGRESS_CHANNEL_CAPACITY` must never be 0, which would drop every
/// progress message.
const _: () = assert!(
    PROGRESS_CHANNEL_CAPACITY > 0,
    "PROGRESS_CHANNEL_CAPACITY must be > 0"
);
