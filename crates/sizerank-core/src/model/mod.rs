/// Data model for SizeRank scan results.
///
/// Re-exports the result types and the size-unit helpers.
pub mod entry;
pub mod size;

pub use entry::{FileOutcome, ResultSet, ScanEntry, SkipKind, Skipped};
pub use size::{convert_size, format_count, format_size, SizeUnit};
