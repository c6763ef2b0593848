//! Sequential batch search: every query in input order, one at a time.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use indicatif::ProgressBar;
use log::{debug, info};

use crate::error::SearchError;
use crate::fetch::{Fetcher, HttpConfig, HttpTransport, RetryPolicy, SearchTransport};
use crate::mgf::load_spectra;
use crate::query::{build_queries, QueryRequest, SearchParameters, DEFAULT_SEARCH_URL};
use crate::writer::ResultWriter;

/// Summary of a finished batch search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Queries processed
    pub queries: usize,
    /// Queries with at least one match
    pub matched_queries: usize,
    /// Queries dropped after exhausting their attempts
    pub exhausted_queries: usize,
    /// Match rows written
    pub records_written: usize,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Searched {} queries: {} with matches, {} failed, {} rows written",
            self.queries, self.matched_queries, self.exhausted_queries, self.records_written
        )
    }
}

/// Drives queries through a [`Fetcher`] into a [`ResultWriter`]
pub struct BatchSearch<T: SearchTransport> {
    fetcher: Fetcher<T>,
    progress: ProgressBar,
}

impl<T: SearchTransport> BatchSearch<T> {
    /// Create a batch search without progress display
    pub fn new(fetcher: Fetcher<T>) -> Self {
        Self {
            fetcher,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report progress on the given bar
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Get the fetcher
    pub fn fetcher(&self) -> &Fetcher<T> {
        &self.fetcher
    }

    /// Search every query and stream its matches to `writer`
    ///
    /// Queries whose attempts are exhausted contribute no rows. Only writer
    /// failures abort the run.
    pub fn run<W: Write>(
        &self,
        queries: &[QueryRequest],
        writer: &mut ResultWriter<W>,
    ) -> Result<SearchStats, SearchError> {
        let mut stats = SearchStats::default();
        self.progress.set_length(queries.len() as u64);

        for (query_index, request) in queries.iter().enumerate() {
            let outcome = self.fetcher.fetch(query_index, request);
            stats.queries += 1;
            if outcome.is_exhausted() {
                stats.exhausted_queries += 1;
            }

            let records = outcome.into_records();
            if !records.is_empty() {
                stats.matched_queries += 1;
            }
            writer.write_records(&records)?;
            writer.flush()?;
            stats.records_written += records.len();

            debug!("Query {}: wrote {} rows", query_index, records.len());
            self.progress.inc(1);
        }

        self.progress.finish_and_clear();
        info!("{}", stats);
        Ok(stats)
    }
}

/// Everything needed to search one MGF file against the live service
#[derive(Debug, Clone)]
pub struct SearchJob {
    pub input_mgf: PathBuf,
    pub output: PathBuf,
    pub params: SearchParameters,
    pub url: String,
    pub http: HttpConfig,
    pub retry: RetryPolicy,
}

impl SearchJob {
    /// Job against the public endpoint with default client and retry settings
    pub fn new(
        input_mgf: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        params: SearchParameters,
    ) -> Self {
        Self {
            input_mgf: input_mgf.into(),
            output: output.into(),
            params,
            url: DEFAULT_SEARCH_URL.to_string(),
            http: HttpConfig::default(),
            retry: RetryPolicy::default(),
        }
    }

    /// Load spectra, build queries, then search over HTTP
    pub fn run(&self, progress: ProgressBar) -> Result<SearchStats, SearchError> {
        let transport =
            HttpTransport::with_config(&self.http).map_err(SearchError::ClientError)?;
        self.run_with(transport, progress)
    }

    /// Same as [`SearchJob::run`] over an arbitrary transport
    ///
    /// All spectra are read and all queries built before the output file is
    /// created, so a malformed input leaves no partial table behind.
    pub fn run_with<T: SearchTransport>(
        &self,
        transport: T,
        progress: ProgressBar,
    ) -> Result<SearchStats, SearchError> {
        let spectra = load_spectra(&self.input_mgf)?;
        info!(
            "Loaded {} spectra from {}",
            spectra.len(),
            self.input_mgf.display()
        );

        info!("Preparing queries");
        let queries = build_queries(&spectra, &self.params, &self.url);

        info!("Searching and writing results to {}", self.output.display());
        let mut writer = ResultWriter::create(&self.output)?;
        let search = BatchSearch::new(Fetcher::with_policy(transport, self.retry))
            .with_progress(progress);
        let stats = search.run(&queries, &mut writer)?;
        writer.finish()?;

        Ok(stats)
    }
}
