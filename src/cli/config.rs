//! TOML configuration file support.
//!
//! Every option can be set in a config file instead of on the command line;
//! flags given explicitly take precedence:
//!
//! ```toml
//! # fasst-search.toml
//! [search]
//! input_mgf = "spectra.mgf"
//! output = "matches.csv"
//! search_index = "gnpslibrary"
//! analog = true
//! cosine_threshold = 0.8
//!
//! [http]
//! url = "https://fasst.gnps2.org/search"
//! timeout_secs = 60
//!
//! [retry]
//! max_attempts = 5
//! delay_ms = 500
//! ```

use anyhow::{Context, Result};
use fasst_search::fetch::RetryConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration structure for fasst-search.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Inputs, outputs and search parameters.
    #[serde(default)]
    pub search: SearchConfig,

    /// Endpoint and HTTP client settings.
    #[serde(default)]
    pub http: HttpSection,

    /// Retry behaviour per query.
    #[serde(default)]
    pub retry: RetryConfig,
}

/// `[search]` section.
#[derive(Debug, Default, Deserialize)]
pub struct SearchConfig {
    pub input_mgf: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub search_index: Option<String>,
    pub analog: Option<bool>,
    pub no_cache: Option<bool>,
    pub lower_delta: Option<f64>,
    pub upper_delta: Option<f64>,
    pub pm_tolerance: Option<f64>,
    pub fragment_tolerance: Option<f64>,
    pub cosine_threshold: Option<f64>,
}

/// `[http]` section.
#[derive(Debug, Default, Deserialize)]
pub struct HttpSection {
    /// Search endpoint (defaults to the public FASST service).
    pub url: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// User agent header.
    pub user_agent: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
