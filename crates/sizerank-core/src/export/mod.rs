/// Export of scan results to CSV and JSON.
///
/// Both formats carry the raw byte size so exported data can be re-ranked
/// or re-converted without loss. CSV additionally carries a formatted size
/// column in the caller's display unit.
use crate::error::ExportError;
use crate::model::{convert_size, ResultSet, ScanEntry, SizeUnit, Skipped};
use serde::Serialize;
use std::io::Write;

/// One CSV row.
#[derive(Serialize)]
struct CsvRow<'a> {
    rank: usize,
    size_bytes: u64,
    size: String,
    unit: &'static str,
    path: std::borrow::Cow<'a, str>,
}

/// Write `results` as CSV with a header row, largest first.
pub fn write_csv<W: Write>(
    results: &ResultSet,
    unit: SizeUnit,
    writer: W,
) -> Result<(), ExportError> {
    let mut out = csv::Writer::from_writer(writer);
    for (i, entry) in results.iter().enumerate() {
        out.serialize(CsvRow {
            rank: i + 1,
            size_bytes: entry.size,
            size: format!("{:.2}", convert_size(entry.size, unit)),
            unit: unit.label(),
            path: entry.path.to_string_lossy(),
        })?;
    }
    out.flush()?;
    Ok(())
}

/// JSON document layout.
#[derive(Serialize)]
struct JsonReport<'a> {
    entries: &'a [ScanEntry],
    skipped: &'a [Skipped],
}

/// Write `results` (entries and skipped items) as pretty-printed JSON.
pub fn write_json<W: Write>(results: &ResultSet, writer: W) -> Result<(), ExportError> {
    let report = JsonReport {
        entries: results.entries(),
        skipped: results.skipped(),
    };
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}
