#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

use fasst_search::mgf::read_spectra;
use fasst_search::query::{build_queries, SearchParameters, DEFAULT_SEARCH_URL};

fuzz_target!(|data: &[u8]| {
    // Malformed input must surface as an MgfError, never a panic
    if let Ok(spectra) = read_spectra(Cursor::new(data)) {
        // Any loaded spectrum must also survive query construction
        let _ = build_queries(&spectra, &SearchParameters::new("fuzz"), DEFAULT_SEARCH_URL);
    }
});
