//! HTTP page fetching with exponential backoff retry logic.
//!
//! News sites rate-limit and occasionally time out, so every page request
//! goes through a retrying decorator.
//!
//! # Architecture
//!
//! - [`Fetch`]: Core trait returning the body of a URL
//! - [`HttpFetcher`]: `reqwest` client with a browser User-Agent and timeout
//! - [`RetryFetch`]: Decorator that adds retry logic to any `Fetch` implementation
//!
//! # Retry Strategy
//!
//! ```text
//! delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
//! ```

use crate::config::ScraperConfig;
use rand::{Rng, rng};
use reqwest::Client;
use std::error::Error;
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, instrument, warn};

/// Trait for async page fetching.
pub trait Fetch {
    /// Fetch `url` and return the response body as text.
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// Plain HTTP fetcher backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: StdDuration) -> Result<Self, Box<dyn Error>> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let t0 = Instant::now();
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`Fetch`] implementation.
pub struct RetryFetch<T> {
    inner: T,
    /// Retries after the first attempt before giving up.
    max_retries: usize,
    /// Initial delay between retries (doubles with each attempt).
    base_delay: StdDuration,
    max_delay: StdDuration,
}

impl<T> RetryFetch<T>
where
    T: Fetch,
{
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(10),
        }
    }

    /// Delay before retry number `attempt` (1-based), without jitter.
    pub fn backoff(&self, attempt: usize) -> StdDuration {
        let shift = attempt.saturating_sub(1).min(31) as u32;
        let delay = self.base_delay.saturating_mul(1u32 << shift);
        delay.min(self.max_delay)
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> Fetch for RetryFetch<T>
where
    T: Fetch,
{
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            match self.inner.fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    attempt += 1;
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_total = total_dt.as_millis() as u64,
                            error = %e,
                            "fetch() exhausted retries"
                        );
                        return Err(e);
                    }

                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = self.backoff(attempt) + StdDuration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_total = total_dt.as_millis() as u64,
                        ?delay,
                        error = %e,
                        "fetch() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Build the retrying fetcher described by `config`.
pub fn build_fetcher(config: &ScraperConfig) -> Result<RetryFetch<HttpFetcher>, Box<dyn Error>> {
    let http = HttpFetcher::new(&config.user_agent, StdDuration::from_secs(config.timeout_secs))?;
    Ok(RetryFetch::new(
        http,
        config.max_retries,
        StdDuration::from_millis(500),
    ))
}
