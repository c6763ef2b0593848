//! # fasst-search - Batch Spectral Library Search
//!
//! `fasst-search` submits every spectrum of an MGF file to the
//! [FASST](https://fasst.gnps2.org) library search service and collects the
//! returned matches into one flat CSV table.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fasst_search::query::SearchParameters;
//! use fasst_search::SearchJob;
//! use indicatif::ProgressBar;
//!
//! let params = SearchParameters {
//!     analog: true,
//!     ..SearchParameters::new("gnpslibrary")
//! };
//! let job = SearchJob::new("spectra.mgf", "matches.csv", params);
//!
//! let stats = job.run(ProgressBar::hidden())?;
//! println!("{stats}");
//! # Ok::<(), fasst_search::SearchError>(())
//! ```
//!
//! ## Output
//!
//! ```text
//! query_index,delta_mass,matching_USI,matching_charge,matching_cosine,matching_peaks
//! 0,0.0012,mzspec:GNPS:GNPS-LIBRARY:accession:CCMSLIB00000001,1,0.91,12
//! ```
//!
//! `query_index` is the zero-based position of the spectrum in the MGF file.
//! Spectra without matches, and spectra whose requests failed on every
//! attempt, contribute no rows.
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`mgf`]: MGF loading through `mzdata`, producing [`Spectrum`] values
//! - [`query`]: Search parameters and per-spectrum request construction
//! - [`fetch`]: HTTP transport and the retrying [`fetch::Fetcher`]
//! - [`writer`]: Streaming CSV output of [`MatchRecord`]s
//! - [`pipeline`]: Sequential driver tying the pieces together

pub mod error;
pub mod fetch;
pub mod mgf;
pub mod pipeline;
pub mod query;
pub mod record;
pub mod spectrum;
pub mod writer;

pub use error::SearchError;
pub use pipeline::{BatchSearch, SearchJob, SearchStats};
pub use record::MatchRecord;
pub use spectrum::Spectrum;
