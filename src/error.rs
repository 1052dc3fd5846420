use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Unsupported file format '{0}'. Supported formats: .xlsx, .pdf")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to open XLSX: {0}")]
    Workbook(String),

    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Row {row}: '{value}' is not a date/time value")]
    InvalidDate { row: usize, value: String },

    #[error("Row {row}: '{value}' is not a numeric amount")]
    InvalidAmount { row: usize, value: String },

    #[error("Line {line}: unparseable amount '{token}'")]
    StatementAmount { line: usize, token: String },

    #[error("Error processing the {format} file: {source}")]
    Processing {
        format: &'static str,
        #[source]
        source: Box<ConvertError>,
    },
}

impl ConvertError {
    /// Wrong invocation as opposed to a failure while converting.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::UnsupportedFormat(_))
    }

    pub fn processing(format: &'static str, source: ConvertError) -> Self {
        Self::Processing {
            format,
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
