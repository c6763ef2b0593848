//! Integration tests for the batch search pipeline
//!
//! These tests run the full MGF → query → fetch → CSV path against an
//! in-memory service.

use std::cell::RefCell;
use std::fs;

use fasst_search::fetch::{FetchError, Fetcher, HttpConfig, SearchTransport, TransportResponse};
use fasst_search::query::{build_queries, SearchParameters};
use fasst_search::writer::ResultWriter;
use fasst_search::{BatchSearch, SearchError, SearchJob, Spectrum};
use indicatif::ProgressBar;
use tempfile::tempdir;

const HEADER: &str =
    "query_index,delta_mass,matching_USI,matching_charge,matching_cosine,matching_peaks";

const TWO_SPECTRA_MGF: &str = "\
BEGIN IONS
TITLE=first
PEPMASS=271.1077
CHARGE=1+
165.0698 0.375
180.0808 100.0
END IONS
BEGIN IONS
TITLE=second
PEPMASS=512.25
CHARGE=2+
200.0 10.0
END IONS
";

/// Answers each request by looking at its precursor m/z and records every call
struct FakeService<F: Fn(f64) -> Result<TransportResponse, FetchError>> {
    respond: F,
    calls: RefCell<Vec<Vec<(String, String)>>>,
}

impl<F: Fn(f64) -> Result<TransportResponse, FetchError>> FakeService<F> {
    fn new(respond: F) -> Self {
        Self {
            respond,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls_for(&self, precursor_mz: f64) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|fields| precursor_of(fields) == precursor_mz)
            .count()
    }
}

impl<F: Fn(f64) -> Result<TransportResponse, FetchError>> SearchTransport for FakeService<F> {
    fn post_form(
        &self,
        _url: &str,
        fields: &[(&'static str, String)],
    ) -> Result<TransportResponse, FetchError> {
        let owned: Vec<_> = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        let precursor_mz = precursor_of(&owned);
        self.calls.borrow_mut().push(owned);
        (self.respond)(precursor_mz)
    }
}

fn precursor_of(fields: &[(String, String)]) -> f64 {
    let json = &fields
        .iter()
        .find(|(k, _)| k == "query_spectrum")
        .expect("query_spectrum field")
        .1;
    let payload: serde_json::Value = serde_json::from_str(json).unwrap();
    payload["precursor_mz"].as_f64().unwrap()
}

fn ok(body: String) -> Result<TransportResponse, FetchError> {
    Ok(TransportResponse { status: 200, body })
}

fn matches_body(usis: &[&str]) -> String {
    let results: Vec<_> = usis
        .iter()
        .map(|usi| {
            serde_json::json!({
                "Delta Mass": 0.001,
                "USI": usi,
                "Charge": 1,
                "Cosine": 0.93,
                "Matching Peaks": 9,
            })
        })
        .collect();
    serde_json::json!({ "results": results }).to_string()
}

fn timeout() -> Result<TransportResponse, FetchError> {
    Err(FetchError::Other("operation timed out".to_string()))
}

/// One match for the first spectrum, a timeout on every attempt for the second
#[test]
fn test_one_match_then_persistent_timeout() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.mgf");
    let output = dir.path().join("matches.csv");
    fs::write(&input, TWO_SPECTRA_MGF).unwrap();

    let service = FakeService::new(|precursor_mz| {
        if precursor_mz == 271.1077 {
            ok(matches_body(&["mzspec:GNPS:LIB:accession:CCMSLIB1"]))
        } else {
            timeout()
        }
    });

    let job = SearchJob::new(&input, &output, SearchParameters::new("gnpslibrary"));
    let stats = job.run_with(&service, ProgressBar::hidden()).unwrap();

    assert_eq!(stats.queries, 2);
    assert_eq!(stats.matched_queries, 1);
    assert_eq!(stats.exhausted_queries, 1);
    assert_eq!(stats.records_written, 1);
    assert_eq!(service.calls_for(271.1077), 1);
    assert_eq!(service.calls_for(512.25), 3);

    let text = fs::read_to_string(&output).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            HEADER,
            "0,0.001,mzspec:GNPS:LIB:accession:CCMSLIB1,1,0.93,9",
        ]
    );
}

#[test]
fn test_null_and_fractional_charges_keep_every_row() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.mgf");
    let output = dir.path().join("matches.csv");
    fs::write(&input, TWO_SPECTRA_MGF).unwrap();

    let body = r#"{"results": [
        {"Delta Mass": 0.001, "USI": "mzspec:A", "Charge": 1, "Cosine": 0.93, "Matching Peaks": 9},
        {"Delta Mass": 0.002, "USI": "mzspec:B", "Charge": null, "Cosine": 0.91, "Matching Peaks": 7},
        {"Delta Mass": 0.003, "USI": "mzspec:C", "Charge": 2.0, "Cosine": 0.9, "Matching Peaks": 6.0}
    ]}"#;
    let service = FakeService::new(|precursor_mz| {
        if precursor_mz == 271.1077 {
            ok(body.to_string())
        } else {
            ok(matches_body(&[]))
        }
    });

    let stats = SearchJob::new(&input, &output, SearchParameters::new("gnpslibrary"))
        .run_with(&service, ProgressBar::hidden())
        .unwrap();

    assert_eq!(stats.records_written, 3);
    assert_eq!(stats.exhausted_queries, 0);
    assert_eq!(service.calls_for(271.1077), 1);

    let text = fs::read_to_string(&output).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            HEADER,
            "0,0.001,mzspec:A,1,0.93,9",
            "0,0.002,mzspec:B,,0.91,7",
            "0,0.003,mzspec:C,2.0,0.9,6.0",
        ]
    );
}

#[test]
fn test_query_index_tracks_spectrum_position() {
    let spectra: Vec<_> = (0..5)
        .map(|i| Spectrum::new(100.0 + i as f64, 1, vec![[50.0, 1.0]]))
        .collect();
    let queries = build_queries(&spectra, &SearchParameters::new("lib"), "http://fake/search");
    assert_eq!(queries.len(), spectra.len());

    // Spectrum i gets i matches; spectrum 2 fails outright
    let service = FakeService::new(|precursor_mz| {
        let position = (precursor_mz - 100.0).round() as usize;
        if position == 2 {
            return Ok(TransportResponse {
                status: 503,
                body: String::new(),
            });
        }
        let usis: Vec<String> = (0..position).map(|n| format!("mzspec:{position}:{n}")).collect();
        let refs: Vec<&str> = usis.iter().map(String::as_str).collect();
        ok(matches_body(&refs))
    });

    let mut writer = ResultWriter::new(Vec::new()).unwrap();
    let stats = BatchSearch::new(Fetcher::new(&service))
        .run(&queries, &mut writer)
        .unwrap();

    // 0 + 1 + (dropped) + 3 + 4 rows
    assert_eq!(stats.records_written, 8);
    assert_eq!(stats.matched_queries, 3);
    assert_eq!(stats.exhausted_queries, 1);

    let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(HEADER));
    for line in lines {
        let mut columns = line.split(',');
        let query_index: usize = columns.next().unwrap().parse().unwrap();
        let usi = columns.nth(1).unwrap();
        assert!(usi.starts_with(&format!("mzspec:{query_index}:")));
        assert_ne!(query_index, 2);
    }
}

#[test]
fn test_no_matches_still_writes_header() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.mgf");
    let output = dir.path().join("matches.csv");
    fs::write(&input, TWO_SPECTRA_MGF).unwrap();

    let service = FakeService::new(|_| timeout());
    let stats = SearchJob::new(&input, &output, SearchParameters::new("lib"))
        .run_with(&service, ProgressBar::hidden())
        .unwrap();

    assert_eq!(stats.exhausted_queries, 2);
    assert_eq!(fs::read_to_string(&output).unwrap(), format!("{HEADER}\n"));
}

#[test]
fn test_outgoing_form_fields() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.mgf");
    fs::write(&input, TWO_SPECTRA_MGF).unwrap();

    let params = SearchParameters {
        analog: true,
        no_cache: true,
        ..SearchParameters::new("gnpslibrary")
    };
    let service = FakeService::new(|_| ok(matches_body(&[])));
    SearchJob::new(&input, dir.path().join("out.csv"), params)
        .run_with(&service, ProgressBar::hidden())
        .unwrap();

    let calls = service.calls.borrow();
    assert_eq!(calls.len(), 2);
    for fields in calls.iter() {
        let get = |name: &str| {
            fields
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("library"), Some("gnpslibrary"));
        assert_eq!(get("analog"), Some("Yes"));
        assert_eq!(get("cache"), Some("No"));
    }
}

#[test]
fn test_malformed_input_aborts_before_output_is_created() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.mgf");
    let output = dir.path().join("matches.csv");
    fs::write(&input, "BEGIN IONS\nCHARGE=1+\n100.0 1.0\nEND IONS\n").unwrap();

    let service = FakeService::new(|_| ok(matches_body(&[])));
    let err = SearchJob::new(&input, &output, SearchParameters::new("lib"))
        .run_with(&service, ProgressBar::hidden())
        .unwrap_err();

    assert!(matches!(err, SearchError::MgfError(_)));
    assert!(!output.exists());
    assert!(service.calls.borrow().is_empty());
}

#[test]
fn test_unwritable_output_is_fatal() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.mgf");
    fs::write(&input, TWO_SPECTRA_MGF).unwrap();

    let service = FakeService::new(|_| ok(matches_body(&[])));
    let err = SearchJob::new(
        &input,
        dir.path().join("no_such_dir").join("out.csv"),
        SearchParameters::new("lib"),
    )
    .run_with(&service, ProgressBar::hidden())
    .unwrap_err();

    assert!(matches!(err, SearchError::WriterError(_)));
}

#[test]
fn test_invalid_client_config_is_client_error() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("matches.csv");

    let input = dir.path().join("input.mgf");
    let mut job = SearchJob::new(&input, &output, SearchParameters::new("lib"));
    job.http = HttpConfig {
        user_agent: "fasst-search\nbroken".to_string(),
        ..HttpConfig::default()
    };

    let err = job.run(ProgressBar::hidden()).unwrap_err();
    assert!(matches!(err, SearchError::ClientError(_)));
    assert!(!output.exists());
}
