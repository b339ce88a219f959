/// SizeRank Core -- scanning, ranking, and formatting.
///
/// This crate contains all business logic with zero UI dependencies.
/// It is designed to be reusable across different frontends (GUI, CLI, TUI).
///
/// # Modules
///
/// - [`scanner`] -- Sequential directory walking with file and folder sizing.
/// - [`model`] -- Scan results, skip records, and size units.
/// - [`analysis`] -- Ranking of results by size.
/// - [`export`] -- CSV and JSON export of a result set.
/// - [`platform`] -- Revealing paths in the host file browser.
/// - [`error`] -- Error types.
pub mod analysis;
pub mod error;
pub mod export;
pub mod model;
pub mod platform;
pub mod scanner;

pub use error::{ExportError, RevealError, ScanError};
pub use model::{convert_size, format_size, ResultSet, ScanEntry, SizeUnit};
pub use platform::reveal_in_file_browser;
pub use scanner::{scan, scan_files, scan_folders, start_scan, ScanMode, ScanRequest};
