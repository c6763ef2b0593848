/// Errors that can occur while loading spectra from an MGF file
#[derive(Debug, thiserror::Error)]
pub enum MgfError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A spectrum without a PEPMASS line
    #[error("spectrum {index} ({id}) has no precursor")]
    MissingPrecursor { index: usize, id: String },

    /// mzdata could not produce a centroided peak list for a spectrum
    #[error("spectrum {index} ({id}): {message}")]
    PeakData {
        index: usize,
        id: String,
        message: String,
    },
}
