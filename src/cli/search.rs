use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::path::PathBuf;

use fasst_search::fetch::{HttpConfig, RetryPolicy};
use fasst_search::query::{SearchParameters, DEFAULT_SEARCH_URL};
use fasst_search::SearchJob;

use super::config::Config;
use super::Cli;

/// Merge flags, config file and defaults into a runnable job
fn resolve(cli: Cli, config: Config) -> Result<SearchJob> {
    let search = config.search;
    let defaults = SearchParameters::default();

    let input_mgf: PathBuf = cli
        .input_mgf
        .or(search.input_mgf)
        .context("No input file given (use --input_mgf or [search].input_mgf)")?;
    let output: PathBuf = cli
        .output
        .or(search.output)
        .context("No output file given (use --output or [search].output)")?;
    let search_index = cli
        .search_index
        .or(search.search_index)
        .context("No library given (use --search_index or [search].search_index)")?;

    let params = SearchParameters {
        search_index,
        analog: cli.analog || search.analog.unwrap_or(defaults.analog),
        no_cache: cli.no_cache || search.no_cache.unwrap_or(defaults.no_cache),
        lower_delta: cli
            .lower_delta
            .or(search.lower_delta)
            .unwrap_or(defaults.lower_delta),
        upper_delta: cli
            .upper_delta
            .or(search.upper_delta)
            .unwrap_or(defaults.upper_delta),
        pm_tolerance: cli
            .pm_tolerance
            .or(search.pm_tolerance)
            .unwrap_or(defaults.pm_tolerance),
        fragment_tolerance: cli
            .fragment_tolerance
            .or(search.fragment_tolerance)
            .unwrap_or(defaults.fragment_tolerance),
        cosine_threshold: cli
            .cosine_threshold
            .or(search.cosine_threshold)
            .unwrap_or(defaults.cosine_threshold),
    };

    let default_http = HttpConfig::default();
    let http = HttpConfig {
        timeout_secs: config.http.timeout_secs,
        user_agent: config.http.user_agent.unwrap_or(default_http.user_agent),
    };

    Ok(SearchJob {
        input_mgf,
        output,
        params,
        url: config
            .http
            .url
            .unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string()),
        http,
        retry: RetryPolicy::from(&config.retry),
    })
}

/// Run a batch search from command-line arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let job = resolve(cli, config)?;

    if !job.input_mgf.exists() {
        anyhow::bail!("Input file does not exist: {}", job.input_mgf.display());
    }

    info!("fasst-search - MGF library search");
    info!("=================================");
    info!("Input:  {}", job.input_mgf.display());
    info!("Output: {}", job.output.display());
    info!("Endpoint: {}", job.url);
    info!("Library: {}", job.params.search_index);
    info!("Analog search: {}", job.params.analog);
    info!("Bypass cache: {}", job.params.no_cache);
    info!(
        "Delta mass window: {} to {}",
        job.params.lower_delta, job.params.upper_delta
    );
    info!("Precursor tolerance: {}", job.params.pm_tolerance);
    info!("Fragment tolerance: {}", job.params.fragment_tolerance);
    info!("Cosine threshold: {}", job.params.cosine_threshold);
    info!(
        "Attempts per query: {} (delay {:?})",
        job.retry.max_attempts, job.retry.delay
    );

    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
    )
    .context("Invalid progress bar template")?;
    let progress = ProgressBar::new(0).with_style(style);

    let stats = job.run(progress).context("Batch search failed")?;

    println!("{}", stats);
    println!("Results written to {}", job.output.display());

    Ok(())
}
