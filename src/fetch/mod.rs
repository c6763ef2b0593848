//! # Fetcher Module
//!
//! Executes [`QueryRequest`]s against the search service with a bounded
//! number of attempts.
//!
//! An attempt succeeds only when the service answers with a 2xx status and a
//! body of the form `{"results": [...]}`. A bad status, a transport error or a
//! malformed body fails the attempt, is logged, and the next attempt starts
//! immediately (or after [`RetryPolicy::delay`]). When every attempt fails the
//! query is dropped: it yields no records and the run carries on.

use std::thread;
use std::time::Duration;

use log::{debug, error, warn};
use serde::Deserialize;

use crate::query::QueryRequest;
use crate::record::MatchRecord;

use response::parse_matches;

pub use error::FetchError;
pub use transport::{HttpConfig, HttpTransport, SearchTransport, TransportResponse};

mod error;
mod response;
mod transport;

/// Default number of attempts per query
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// How often, and how patiently, a query is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per query, at least one
    pub max_attempts: u32,
    /// Pause between a failed attempt and the next one
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: Duration::ZERO,
        }
    }
}

/// `[retry]` section of the configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RetryConfig {
    pub max_attempts: Option<u32>,
    pub delay_ms: Option<u64>,
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        let defaults = RetryPolicy::default();
        Self {
            max_attempts: config.max_attempts.unwrap_or(defaults.max_attempts).max(1),
            delay: config
                .delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.delay),
        }
    }
}

/// Terminal state of one query
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// An attempt succeeded; `records` may be empty
    Succeeded {
        records: Vec<MatchRecord>,
        attempts: u32,
    },
    /// Every attempt failed
    Exhausted { attempts: u32 },
}

impl FetchOutcome {
    /// Number of attempts made
    pub fn attempts(&self) -> u32 {
        match self {
            FetchOutcome::Succeeded { attempts, .. } | FetchOutcome::Exhausted { attempts } => {
                *attempts
            }
        }
    }

    /// Whether the query was dropped
    pub fn is_exhausted(&self) -> bool {
        matches!(self, FetchOutcome::Exhausted { .. })
    }

    /// Records of the successful attempt, empty when exhausted
    pub fn into_records(self) -> Vec<MatchRecord> {
        match self {
            FetchOutcome::Succeeded { records, .. } => records,
            FetchOutcome::Exhausted { .. } => Vec::new(),
        }
    }
}

/// Retrying search client over a [`SearchTransport`]
pub struct Fetcher<T: SearchTransport> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: SearchTransport> Fetcher<T> {
    /// Create a fetcher with the default policy (3 attempts, no delay)
    pub fn new(transport: T) -> Self {
        Self::with_policy(transport, RetryPolicy::default())
    }

    /// Create a fetcher with a custom retry policy
    pub fn with_policy(transport: T, policy: RetryPolicy) -> Self {
        Self {
            transport,
            policy: RetryPolicy {
                max_attempts: policy.max_attempts.max(1),
                ..policy
            },
        }
    }

    /// Get the retry policy
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one query to a terminal outcome
    pub fn fetch(&self, query_index: usize, request: &QueryRequest) -> FetchOutcome {
        let max_attempts = self.policy.max_attempts;

        for attempt in 1..=max_attempts {
            match self.attempt(query_index, request) {
                Ok(records) => {
                    debug!(
                        "Query {}: {} matches on attempt {}",
                        query_index,
                        records.len(),
                        attempt
                    );
                    return FetchOutcome::Succeeded {
                        records,
                        attempts: attempt,
                    };
                }
                Err(e) => {
                    warn!(
                        "Query {}: attempt {}/{} failed: {}",
                        query_index, attempt, max_attempts, e
                    );
                    if attempt < max_attempts && !self.policy.delay.is_zero() {
                        thread::sleep(self.policy.delay);
                    }
                }
            }
        }

        error!(
            "Query {}: giving up after {} attempts, no matches recorded",
            query_index, max_attempts
        );
        FetchOutcome::Exhausted {
            attempts: max_attempts,
        }
    }

    fn attempt(
        &self,
        query_index: usize,
        request: &QueryRequest,
    ) -> Result<Vec<MatchRecord>, FetchError> {
        let reply = self.transport.post_form(&request.url, &request.fields)?;
        if !reply.is_success() {
            return Err(FetchError::Status {
                status: reply.status,
            });
        }
        parse_matches(&reply.body, query_index)
    }
}
