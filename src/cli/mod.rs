use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod config;
mod search;

/// fasst-search - Batch MGF search against the FASST spectral library service
#[derive(Parser, Debug)]
#[command(name = "fasst-search")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Input MGF file
    #[arg(long = "input_mgf", value_name = "FILE")]
    input_mgf: Option<PathBuf>,

    /// Library index to search (e.g. gnpslibrary)
    #[arg(long = "search_index", value_name = "INDEX")]
    search_index: Option<String>,

    /// Output CSV file
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Search analogs within the delta mass window
    #[arg(long)]
    analog: bool,

    /// Bypass the service-side result cache
    #[arg(long = "no_cache")]
    no_cache: bool,

    /// Lower delta mass for analog search (default: 130)
    #[arg(long = "lower_delta")]
    lower_delta: Option<f64>,

    /// Upper delta mass for analog search (default: 200)
    #[arg(long = "upper_delta")]
    upper_delta: Option<f64>,

    /// Precursor mass tolerance (default: 0.05)
    #[arg(long = "pm_tolerance")]
    pm_tolerance: Option<f64>,

    /// Fragment mass tolerance (default: 0.05)
    #[arg(long = "fragment_tolerance")]
    fragment_tolerance: Option<f64>,

    /// Cosine threshold (default: 0.7)
    #[arg(long = "cosine_threshold")]
    cosine_threshold: Option<f64>,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    search::run(cli)
}
