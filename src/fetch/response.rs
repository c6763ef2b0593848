use serde::{Deserialize, Deserializer};
use serde_json::Number;

use super::FetchError;
use crate::record::MatchRecord;

/// Successful search response body
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<ServiceMatch>,
}

/// One entry of `results`, keyed the way the service names them
///
/// Every key must be present. Numeric values may be integers, floats or null.
#[derive(Debug, Deserialize)]
struct ServiceMatch {
    #[serde(rename = "Delta Mass", deserialize_with = "nullable_number")]
    delta_mass: Option<Number>,
    #[serde(rename = "USI")]
    usi: String,
    #[serde(rename = "Charge", deserialize_with = "nullable_number")]
    charge: Option<Number>,
    #[serde(rename = "Cosine", deserialize_with = "nullable_number")]
    cosine: Option<Number>,
    #[serde(rename = "Matching Peaks", deserialize_with = "nullable_number")]
    matching_peaks: Option<Number>,
}

// Through `deserialize_with` an absent key stays a missing-field error
fn nullable_number<'de, D>(deserializer: D) -> Result<Option<Number>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Number>::deserialize(deserializer)
}

/// Parse a response body into rows for `query_index`, preserving result order
pub(crate) fn parse_matches(body: &str, query_index: usize) -> Result<Vec<MatchRecord>, FetchError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response
        .results
        .into_iter()
        .map(|m| MatchRecord {
            query_index,
            delta_mass: m.delta_mass,
            matching_usi: m.usi,
            matching_charge: m.charge,
            matching_cosine: m.cosine,
            matching_peaks: m.matching_peaks,
        })
        .collect())
}
