/// Ranking of scan results by size.
///
/// Sorting always uses the raw byte count, never a converted display value,
/// so switching units can never reorder results.
use crate::model::ScanEntry;

/// Sort entries largest first. The sort is stable; equal sizes keep their
/// traversal order.
pub fn rank_by_size(entries: &mut [ScanEntry]) {
    entries.sort_by(|a, b| b.size.cmp(&a.size));
}
