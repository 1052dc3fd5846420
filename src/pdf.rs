use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::models::OutputRecord;
use crate::statement::parse_statement_text;

/// Extract the text of every page, in page order, as one blob.
pub fn extract_text(file_path: &Path) -> Result<String> {
    let bytes = std::fs::read(file_path)?;
    pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ConvertError::Pdf(e.to_string()))
}

/// Convert a card statement PDF into YNAB records.
pub fn convert(file_path: &Path) -> Result<Vec<OutputRecord>> {
    let text = extract_text(file_path)?;
    let txns = parse_statement_text(&text)?;
    Ok(txns.iter().map(OutputRecord::from_transaction).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_rejects_non_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statement.pdf");
        std::fs::write(&path, "plain text, no PDF header").unwrap();
        assert!(matches!(extract_text(&path), Err(ConvertError::Pdf(_))));
    }

    #[test]
    fn test_extract_text_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.pdf");
        assert!(matches!(extract_text(&path), Err(ConvertError::Io(_))));
    }
}
