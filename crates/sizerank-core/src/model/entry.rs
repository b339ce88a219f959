/// Scan results -- one entry per measured file or aggregated folder.
///
/// Entries are created during traversal and never mutated afterwards. The
/// owning [`ResultSet`] is sorted once, when the scan finishes, and then
/// handed to the caller wholesale.
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A single reportable result: a file (file mode) or a directory with its
/// cumulative subtree size (folder mode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanEntry {
    /// Size in bytes. Always the raw value; display units are applied later.
    pub size: u64,
    /// Full path of the file or directory.
    pub path: PathBuf,
}

impl ScanEntry {
    pub fn new(size: u64, path: PathBuf) -> Self {
        Self { size, path }
    }
}

/// Whether a skipped item was a file or a whole directory subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipKind {
    File,
    Directory,
}

/// An item the traversal could not read and therefore left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skipped {
    pub path: PathBuf,
    pub kind: SkipKind,
    /// Human-readable cause, usually the OS error message.
    pub reason: String,
}

impl Skipped {
    pub fn file(path: PathBuf, reason: impl ToString) -> Self {
        Self {
            path,
            kind: SkipKind::File,
            reason: reason.to_string(),
        }
    }

    pub fn directory(path: PathBuf, reason: impl ToString) -> Self {
        Self {
            path,
            kind: SkipKind::Directory,
            reason: reason.to_string(),
        }
    }
}

/// Outcome of measuring one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Measured(u64),
    Skipped(Skipped),
}

impl FileOutcome {
    /// Read the size of `path`, following a trailing symlink.
    pub fn measure(path: &Path) -> Self {
        match std::fs::metadata(path) {
            Ok(meta) => Self::Measured(meta.len()),
            Err(err) => Self::Skipped(Skipped::file(path.to_path_buf(), err)),
        }
    }
}

/// The sorted collection produced by one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    entries: Vec<ScanEntry>,
    skipped: Vec<Skipped>,
}

impl ResultSet {
    /// Build a result set, ranking `entries` by size (largest first).
    pub fn new(mut entries: Vec<ScanEntry>, skipped: Vec<Skipped>) -> Self {
        crate::analysis::rank_by_size(&mut entries);
        Self { entries, skipped }
    }

    /// Entries, largest first.
    pub fn entries(&self) -> &[ScanEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScanEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Everything the traversal had to leave out.
    pub fn skipped(&self) -> &[Skipped] {
        &self.skipped
    }

    pub fn skipped_files(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| s.kind == SkipKind::File)
            .count()
    }

    pub fn skipped_dirs(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| s.kind == SkipKind::Directory)
            .count()
    }

    /// Sum of all entry sizes. Only meaningful in file mode; folder-mode
    /// entries overlap, so use the root entry's size there.
    pub fn total_size(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.size))
    }

    /// Look up the entry for an exact path.
    pub fn get(&self, path: &Path) -> Option<&ScanEntry> {
        self.entries.iter().find(|e| e.path == path)
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ScanEntry;
    type IntoIter = std::slice::Iter<'a, ScanEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
