//! Construction of FASST library search requests.
//!
//! Every spectrum maps to exactly one [`QueryRequest`]: the search endpoint
//! plus the form fields the service expects. The spectrum itself travels as a
//! JSON document in the `query_spectrum` field.

use serde::{Deserialize, Serialize};

use crate::spectrum::{Peak, Spectrum};

/// Public FASST search endpoint
pub const DEFAULT_SEARCH_URL: &str = "https://fasst.gnps2.org/search";

/// User-supplied search options, shared by every query of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParameters {
    /// Library index to search (`library` form field)
    pub search_index: String,
    /// Enable analog search with a precursor mass offset
    pub analog: bool,
    /// Ask the service to bypass its result cache
    pub no_cache: bool,
    /// Lower bound of the analog mass delta (Da)
    pub lower_delta: f64,
    /// Upper bound of the analog mass delta (Da)
    pub upper_delta: f64,
    /// Precursor mass tolerance (Da)
    pub pm_tolerance: f64,
    /// Fragment mass tolerance (Da)
    pub fragment_tolerance: f64,
    /// Minimum cosine similarity for a reported match
    pub cosine_threshold: f64,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            search_index: String::new(),
            analog: false,
            no_cache: false,
            lower_delta: 130.0,
            upper_delta: 200.0,
            pm_tolerance: 0.05,
            fragment_tolerance: 0.05,
            cosine_threshold: 0.7,
        }
    }
}

impl SearchParameters {
    /// Parameters for a library with default tolerances
    pub fn new(search_index: impl Into<String>) -> Self {
        Self {
            search_index: search_index.into(),
            ..Default::default()
        }
    }
}

/// JSON payload sent in the `query_spectrum` field
#[derive(Debug, Serialize)]
struct QuerySpectrum<'a> {
    peaks: &'a [Peak],
    precursor_charge: i32,
    precursor_mz: f64,
}

/// One HTTP search request, ready to be POSTed as a form
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    /// Search endpoint
    pub url: String,
    /// Form fields in submission order
    pub fields: Vec<(&'static str, String)>,
}

impl QueryRequest {
    /// Build the request for one spectrum
    pub fn build(spectrum: &Spectrum, params: &SearchParameters, url: &str) -> Self {
        let fields = vec![
            ("library", params.search_index.clone()),
            ("analog", yes_no(params.analog).to_string()),
            ("cache", yes_no(!params.no_cache).to_string()),
            ("lower_delta", format_float(params.lower_delta)),
            ("upper_delta", format_float(params.upper_delta)),
            ("pm_tolerance", format_float(params.pm_tolerance)),
            ("fragment_tolerance", format_float(params.fragment_tolerance)),
            ("cosine_threshold", format_float(params.cosine_threshold)),
            ("query_spectrum", query_spectrum_json(spectrum)),
        ];

        Self {
            url: url.to_string(),
            fields,
        }
    }

    /// Look up a form field by name
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Build one request per spectrum, preserving input order
pub fn build_queries(
    spectra: &[Spectrum],
    params: &SearchParameters,
    url: &str,
) -> Vec<QueryRequest> {
    spectra
        .iter()
        .map(|spectrum| QueryRequest::build(spectrum, params, url))
        .collect()
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Render with a decimal point even for integral values (`130.0`)
fn format_float(value: f64) -> String {
    format!("{value:?}")
}

fn query_spectrum_json(spectrum: &Spectrum) -> String {
    let payload = QuerySpectrum {
        peaks: &spectrum.peaks,
        precursor_charge: spectrum.charge,
        precursor_mz: spectrum.precursor_mz,
    };
    serde_json::to_string(&payload)
        .expect("peak list, charge and m/z always serialize to JSON")
}
