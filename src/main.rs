//! # fasst-search
//!
//! Searches every spectrum of an MGF file against the FASST spectral library
//! search service and writes the matches to a CSV table.
//!
//! ## Usage
//!
//! ```bash
//! fasst-search --input_mgf spectra.mgf --search_index gnpslibrary --output matches.csv
//!
//! # Analog search, bypassing the service cache
//! fasst-search --input_mgf spectra.mgf --search_index gnpslibrary --output matches.csv \
//!     --analog --no_cache --lower_delta 100 --upper_delta 250
//!
//! # Settings from a config file
//! fasst-search --config fasst-search.toml -v
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
