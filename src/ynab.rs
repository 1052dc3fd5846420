use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::models::{OutputRecord, Pipeline};

/// YNAB 4 import columns, in file order.
pub const COLUMNS: [&str; 11] = [
    "Account",
    "Flag",
    "Date",
    "Payee",
    "Category",
    "Master Category",
    "Sub Category",
    "Memo",
    "Outflow",
    "Inflow",
    "Cleared",
];

/// `<prefix><input basename without extension>.csv`, in the working directory.
pub fn output_filename(pipeline: Pipeline, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    PathBuf::from(format!("{}{stem}.csv", pipeline.output_prefix()))
}

/// Serialize records with a header row. The header is written even when
/// there are no records.
pub fn to_csv_bytes(records: &[OutputRecord]) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(COLUMNS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.into_inner()
        .map_err(|e| ConvertError::Io(e.into_error()))
}

/// Write the whole import file in one go; nothing touches disk until every
/// record has been serialized.
pub fn write_import_file(path: &Path, records: &[OutputRecord]) -> Result<()> {
    let bytes = to_csv_bytes(records)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
