//! # MGF Input Module
//!
//! Loads query spectra from Mascot Generic Format files through
//! [`mzdata`]'s MGF reader and keeps only what a library query needs:
//! precursor m/z, charge and the centroid peak list.
//!
//! ```text
//! BEGIN IONS
//! TITLE=scan=12
//! PEPMASS=271.1077 1520.3
//! CHARGE=1+
//! 165.0698 0.3801
//! 180.0808 100.0
//! END IONS
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use mzdata::io::mgf::MGFReader;
use mzdata::prelude::{IonProperties, SpectrumLike};
use mzdata::spectrum::MultiLayerSpectrum;

use crate::spectrum::{Peak, Spectrum};

pub use error::MgfError;

mod error;


/// Load every spectrum of an MGF file, failing on the first unusable one
pub fn load_spectra<P: AsRef<Path>>(path: P) -> Result<Vec<Spectrum>, MgfError> {
    let file = File::open(path.as_ref())?;
    read_spectra(BufReader::new(file))
}

/// Read every spectrum from an in-memory or streamed MGF source
pub fn read_spectra<R: Read>(source: R) -> Result<Vec<Spectrum>, MgfError> {
    MGFReader::new(source)
        .enumerate()
        .map(|(index, spectrum)| convert_spectrum(index, spectrum))
        .collect()
}

/// Map one mzdata spectrum onto a query [`Spectrum`]
///
/// A missing charge becomes 0 and a zero precursor m/z counts as missing.
/// Intensities are widened from mzdata's `f32`.
fn convert_spectrum(index: usize, mut spectrum: MultiLayerSpectrum) -> Result<Spectrum, MgfError> {
    let id = spectrum.id().to_string();

    let (precursor_mz, charge) = match spectrum.precursor() {
        Some(precursor) if precursor.mz() > 0.0 && precursor.mz().is_finite() => {
            (precursor.mz(), precursor.charge().unwrap_or(0))
        }
        _ => return Err(MgfError::MissingPrecursor { index, id }),
    };

    let peaks: Vec<Peak> = spectrum
        .try_build_centroids()
        .map_err(|e| MgfError::PeakData {
            index,
            id: id.clone(),
            message: e.to_string(),
        })?
        .iter()
        .map(|peak| [peak.mz, peak.intensity as f64])
        .collect();

    let spectrum = Spectrum::new(precursor_mz, charge, peaks);
    Ok(if id.is_empty() {
        spectrum
    } else {
        spectrum.with_title(id)
    })
}
