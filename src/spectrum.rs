//! In-memory representation of a query spectrum.

/// A single (m/z, intensity) pair.
pub type Peak = [f64; 2];

/// A tandem mass spectrum as read from an MGF block.
///
/// Peaks are kept in file order and are never filtered or converted.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Precursor mass-to-charge ratio (`PEPMASS`)
    pub precursor_mz: f64,
    /// Precursor charge (`CHARGE`), 0 when the block carries none
    pub charge: i32,
    /// Peak list as (m/z, intensity) pairs
    pub peaks: Vec<Peak>,
    /// Optional `TITLE` line, only used for diagnostics
    pub title: Option<String>,
}

impl Spectrum {
    /// Create a spectrum without a title
    pub fn new(precursor_mz: f64, charge: i32, peaks: Vec<Peak>) -> Self {
        Self {
            precursor_mz,
            charge,
            peaks,
            title: None,
        }
    }

    /// Attach a title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Number of peaks
    pub fn peak_count(&self) -> usize {
        self.peaks.len()
    }
}
