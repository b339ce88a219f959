/// Reveal a path in the host file browser.
///
/// Files are revealed by opening their containing directory; directories
/// are opened directly. The browser is launched as a detached child process
/// so the caller (typically the UI thread) never waits on it.
use crate::error::RevealError;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

#[cfg(target_os = "windows")]
const BROWSER: &str = "explorer";
#[cfg(target_os = "macos")]
const BROWSER: &str = "open";
#[cfg(all(not(target_os = "windows"), not(target_os = "macos")))]
const BROWSER: &str = "xdg-open";

/// The directory that [`reveal_in_file_browser`] would open for `path`.
pub fn reveal_target(path: &Path) -> Result<PathBuf, RevealError> {
    let meta = std::fs::metadata(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => RevealError::NotFound(path.to_path_buf()),
        _ => RevealError::Inaccessible {
            path: path.to_path_buf(),
            source: err,
        },
    })?;

    if meta.is_dir() {
        Ok(path.to_path_buf())
    } else {
        Ok(path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| path.to_path_buf()))
    }
}

/// Open the host file browser at `path` (directory) or its parent (file).
pub fn reveal_in_file_browser(path: &Path) -> Result<(), RevealError> {
    let target = reveal_target(path)?;
    info!("Revealing {} with {BROWSER}", target.display());

    let mut child = Command::new(BROWSER)
        .arg(&target)
        .spawn()
        .map_err(|source| {
            warn!("Failed to launch {BROWSER}: {source}");
            RevealError::Launch {
                program: BROWSER,
                source,
            }
        })?;

    // Reap the launcher in the background so it does not linger as a zombie.
    std::thread::Builder::new()
        .name("sizerank-reveal".into())
        .spawn(move || {
            let _ = child.wait();
        })
        .map_err(|source| RevealError::Launch {
            program: BROWSER,
            source,
        })?;
    Ok(())
}
