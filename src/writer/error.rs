/// Errors that can occur while writing the match table
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the CSV serializer
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}
