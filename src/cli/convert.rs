use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::error::{ConvertError, Result};
use crate::models::{OutputRecord, Pipeline};
use crate::ynab::{output_filename, write_import_file};

/// Pick the pipeline for `file` from its extension.
pub fn detect_pipeline(file: &Path) -> Result<Pipeline> {
    let ext = file
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();
    Pipeline::from_extension(&ext)
        .filter(|p| is_enabled(*p))
        .ok_or_else(|| ConvertError::UnsupportedFormat(format!(".{ext}")))
}

fn is_enabled(pipeline: Pipeline) -> bool {
    match pipeline {
        Pipeline::Spreadsheet => cfg!(feature = "xlsx"),
        Pipeline::Document => cfg!(feature = "pdf"),
    }
}

fn load(pipeline: Pipeline, file: &Path) -> Result<Vec<OutputRecord>> {
    match pipeline {
        #[cfg(feature = "xlsx")]
        Pipeline::Spreadsheet => crate::spreadsheet::convert(file),
        #[cfg(feature = "pdf")]
        Pipeline::Document => crate::pdf::convert(file),
        #[allow(unreachable_patterns)]
        _ => Err(ConvertError::UnsupportedFormat(pipeline.format_name().to_string())),
    }
}

/// Convert `file` and write the import CSV into the working directory.
/// Returns the path written.
pub fn run(file: &Path) -> Result<PathBuf> {
    let pipeline = detect_pipeline(file)?;
    let wrap = |e: ConvertError| ConvertError::processing(pipeline.format_name(), e);

    let records = load(pipeline, file).map_err(wrap)?;
    let output = output_filename(pipeline, file);
    write_import_file(&output, &records).map_err(wrap)?;

    println!(
        "{} saved as {}",
        pipeline.saved_label(),
        output.display().to_string().green()
    );
    println!("{} transactions converted", records.len());
    Ok(output)
}
