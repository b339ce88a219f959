/// Sequential directory walker -- the traversal engine behind both scan modes.
///
/// Wraps [`walkdir`] and regroups its flat entry stream into one
/// [`DirVisit`] per readable directory, carrying the names of the files
/// directly inside it. Two orders are supported:
///
/// - **Top-down:** a directory is yielded before any of its descendants.
/// - **Bottom-up:** a directory is yielded only after every descendant
///   directory has been yielded (`contents_first`). Folder-mode aggregation
///   relies on this.
///
/// Each listing is sorted with files ahead of subdirectories and by name
/// within each group, so a directory's files arrive as one run right after
/// the directory itself and repeated walks of an unchanged tree are
/// identical.
///
/// # Error policy
///
/// Nothing below the root aborts the walk. A directory that cannot be listed
/// is recorded as a [`Skipped`] directory and its subtree is left out; an
/// entry whose type cannot be determined is recorded as a skipped file.
/// Symbolic links are never descended into.
use crate::error::ScanError;
use crate::model::Skipped;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Order in which directories are yielded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOrder {
    TopDown,
    BottomUp,
}

/// One directory visited by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirVisit {
    /// Full path of the directory.
    pub path: PathBuf,
    /// Names of non-directory entries (regular files and non-directory links).
    pub files: Vec<OsString>,
    /// Names of immediate subdirectories. Filled in bottom-up walks only; a
    /// top-down visit is yielded before its subdirectories are listed.
    pub subdirs: Vec<OsString>,
}

impl DirVisit {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            files: Vec::new(),
            subdirs: Vec::new(),
        }
    }

    /// Full paths of the immediate files.
    pub fn file_paths(&self) -> impl DoubleEndedIterator<Item = PathBuf> + '_ {
        self.files.iter().map(|name| self.path.join(name))
    }

    /// Full paths of the immediate subdirectories.
    pub fn subdir_paths(&self) -> impl DoubleEndedIterator<Item = PathBuf> + '_ {
        self.subdirs.iter().map(|name| self.path.join(name))
    }
}

/// Iterator over the directories under a root.
pub struct Walk {
    order: WalkOrder,
    entries: walkdir::IntoIter,
    /// Top-down: the directory whose files are still arriving.
    current: Option<DirVisit>,
    /// Bottom-up: children collected per parent, claimed when the parent
    /// itself comes out of the walk.
    pending: HashMap<PathBuf, DirVisit>,
    /// Bottom-up: errors held until it is known whether they belong to a
    /// directory listing or to a single entry.
    failed: HashMap<PathBuf, walkdir::Error>,
    /// Bottom-up: listing errors without a path, attributed on the next entry.
    unattributed: Vec<walkdir::Error>,
    skipped: Vec<Skipped>,
}

impl Walk {
    /// Validate `root` and prepare a walk over it.
    ///
    /// An unusable root is reported here, before any directory is yielded.
    pub fn new(root: &Path, order: WalkOrder) -> Result<Self, ScanError> {
        let meta = fs::metadata(root).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => ScanError::RootNotFound(root.to_path_buf()),
            _ => ScanError::RootUnreadable {
                path: root.to_path_buf(),
                source: err,
            },
        })?;
        if !meta.is_dir() {
            return Err(ScanError::RootNotADirectory(root.to_path_buf()));
        }
        fs::read_dir(root).map_err(|source| ScanError::RootUnreadable {
            path: root.to_path_buf(),
            source,
        })?;

        let entries = WalkDir::new(root)
            .follow_links(false)
            .contents_first(order == WalkOrder::BottomUp)
            .sort_by(listing_order)
            .into_iter();

        Ok(Self {
            order,
            entries,
            current: None,
            pending: HashMap::new(),
            failed: HashMap::new(),
            unattributed: Vec::new(),
            skipped: Vec::new(),
        })
    }

    /// Consume the walker, returning everything it skipped.
    pub fn into_skipped(self) -> Vec<Skipped> {
        self.skipped
    }

    fn next_top_down(&mut self) -> Option<DirVisit> {
        loop {
            let Some(result) = self.entries.next() else {
                return self.current.take();
            };
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    self.top_down_error(err);
                    continue;
                }
            };

            if is_directory(&entry) {
                // Files sort first, so the previous directory is complete.
                let finished = self.current.replace(DirVisit::new(entry.into_path()));
                if finished.is_some() {
                    return finished;
                }
            } else if !is_linked_dir(&entry) {
                if let Some(dir) = self.current.as_mut() {
                    dir.files.push(entry.file_name().to_owned());
                }
            }
        }
    }

    fn top_down_error(&mut self, err: walkdir::Error) {
        let current = self.current.as_ref().map(|dir| dir.path.clone());
        match (err.path().map(Path::to_path_buf), current) {
            // The directory just entered could not be listed.
            (Some(path), Some(current)) if path == current => {
                self.current = None;
                self.skip(Skipped::directory(path, err));
            }
            (Some(path), _) => self.skip(Skipped::file(path, err)),
            // Listing broke off partway through the current directory.
            (None, Some(current)) => self.skip(Skipped::directory(current, err)),
            (None, None) => debug!("Walk error outside any directory: {err}"),
        }
    }

    fn next_bottom_up(&mut self) -> Option<DirVisit> {
        while let Some(result) = self.entries.next() {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    match err.path().map(Path::to_path_buf) {
                        Some(path) => {
                            self.failed.insert(path, err);
                        }
                        None => self.unattributed.push(err),
                    }
                    continue;
                }
            };
            self.attribute_listing_errors(&entry);

            if is_directory(&entry) {
                if entry.depth() > 0 {
                    self.record_child(&entry, true);
                }
                let path = entry.into_path();
                let visit = self
                    .pending
                    .remove(&path)
                    .unwrap_or_else(|| DirVisit::new(path.clone()));
                if let Some(err) = self.failed.remove(&path) {
                    self.skip(Skipped::directory(path, err));
                    continue;
                }
                return Some(visit);
            }
            if !is_linked_dir(&entry) {
                self.record_child(&entry, false);
            }
        }

        // Whatever no directory claimed belongs to an individual entry.
        let mut leftover: Vec<_> = self.failed.drain().collect();
        leftover.sort_by(|a, b| a.0.cmp(&b.0));
        for (path, err) in leftover {
            self.skip(Skipped::file(path, err));
        }
        None
    }

    /// Add `entry`'s name to its parent's pending visit.
    fn record_child(&mut self, entry: &DirEntry, is_subdir: bool) {
        let Some(parent) = entry.path().parent() else {
            return;
        };
        let visit = self
            .pending
            .entry(parent.to_path_buf())
            .or_insert_with(|| DirVisit::new(parent.to_path_buf()));
        let names = if is_subdir {
            &mut visit.subdirs
        } else {
            &mut visit.files
        };
        names.push(entry.file_name().to_owned());
    }

    /// Pin path-less listing errors on the directory they were raised in.
    fn attribute_listing_errors(&mut self, next: &DirEntry) {
        for err in std::mem::take(&mut self.unattributed) {
            let dir = listing_dir(next.path(), next.depth(), err.depth());
            match dir {
                Some(dir) => self.skip(Skipped::directory(dir.to_path_buf(), err)),
                None => debug!("Unattributed walk error: {err}"),
            }
        }
    }

    fn skip(&mut self, skipped: Skipped) {
        debug!(
            "Skipping {:?} {}: {}",
            skipped.kind,
            skipped.path.display(),
            skipped.reason
        );
        self.skipped.push(skipped);
    }
}

impl Iterator for Walk {
    type Item = DirVisit;

    fn next(&mut self) -> Option<DirVisit> {
        match self.order {
            WalkOrder::TopDown => self.next_top_down(),
            WalkOrder::BottomUp => self.next_bottom_up(),
        }
    }
}

/// Files ahead of subdirectories, then byte-wise by name.
fn listing_order(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn is_directory(entry: &DirEntry) -> bool {
    entry.depth() == 0 || entry.file_type().is_dir()
}

/// A link that resolves to a directory is neither file nor subdirectory.
fn is_linked_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_symlink() && fs::metadata(entry.path()).is_ok_and(|m| m.is_dir())
}

/// The directory whose listing produced an error reported at `err_depth`
/// (the depth its children would have had), given the first entry yielded
/// after it. In contents-first order that entry is a descendant of the
/// directory or the directory itself.
fn listing_dir(next: &Path, next_depth: usize, err_depth: usize) -> Option<&Path> {
    let up = (next_depth + 1).checked_sub(err_depth)?;
    next.ancestors().nth(up)
}
