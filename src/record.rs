//! Flat match rows produced by the search.

use serde::Serialize;

/// Column names of the output table, in write order
pub const COLUMNS: [&str; 6] = [
    "query_index",
    "delta_mass",
    "matching_USI",
    "matching_charge",
    "matching_cosine",
    "matching_peaks",
];

/// One library match of one query spectrum
///
/// Numeric columns keep the JSON number the service returned, so `1` and
/// `1.0` are written back unchanged. A `null` becomes an empty cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    /// Zero-based position of the query spectrum in the input file
    pub query_index: usize,
    /// Precursor mass difference between query and library spectrum
    pub delta_mass: Option<serde_json::Number>,
    /// Universal Spectrum Identifier of the library spectrum
    #[serde(rename = "matching_USI")]
    pub matching_usi: String,
    /// Charge of the library spectrum
    pub matching_charge: Option<serde_json::Number>,
    /// Cosine similarity of the match
    pub matching_cosine: Option<serde_json::Number>,
    /// Number of matched peaks
    pub matching_peaks: Option<serde_json::Number>,
}
