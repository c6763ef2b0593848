//! Top-level error type for a batch search run.
//!
//! Only fatal conditions appear here. Failed search attempts are absorbed by
//! the fetcher and never reach this type.

use crate::fetch::FetchError;
use crate::mgf::MgfError;
use crate::writer::WriterError;

/// Errors that abort a batch search
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The input spectra could not be read
    #[error("MGF error: {0}")]
    MgfError(#[from] MgfError),

    /// The match table could not be written
    #[error("Writer error: {0}")]
    WriterError(#[from] WriterError),

    /// The HTTP client could not be constructed
    ///
    /// Only built explicitly. A [`FetchError`] raised while searching is a
    /// failed attempt.
    #[error("HTTP client error: {0}")]
    ClientError(FetchError),
}
