use crate::config::VerifierConfig;
use crate::types::{Result, VerifierError};
use reqwest::Client;
use std::time::Instant;
use tracing::debug;
use url::Url;

const MAX_REDIRECTS: usize = 5;

#[derive(Debug, Clone)]
pub struct FetchedFeed {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Shared HTTP client for a run. Every request is bounded by the configured timeout.
pub struct Fetcher {
    client: Client,
    max_feed_size_mb: u64,
}

impl Fetcher {
    pub fn new(config: &VerifierConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self {
            client,
            max_feed_size_mb: config.max_feed_size_mb,
        })
    }

    /// Fetches `url`. Error statuses come back as data; transport failures,
    /// malformed URLs and oversized bodies are errors.
    pub async fn fetch(&self, url: &str) -> Result<FetchedFeed> {
        let url = Url::parse(url)?;
        let start_time = Instant::now();

        debug!("Fetching feed: {}", url);
        let mut response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            debug!("Fetched {} -> HTTP {}", url, status);
            return Ok(FetchedFeed { status, body: Vec::new() });
        }

        let limit = self.max_feed_size_mb * 1024 * 1024;

        if response.content_length().is_some_and(|length| length > limit) {
            return Err(VerifierError::FeedTooLarge { size_mb: self.max_feed_size_mb });
        }

        // Bodies without a Content-Length are capped while streaming.
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if (body.len() + chunk.len()) as u64 > limit {
                return Err(VerifierError::FeedTooLarge { size_mb: self.max_feed_size_mb });
            }
            body.extend_from_slice(&chunk);
        }

        debug!(
            "Fetched {} -> HTTP {} ({} bytes in {}ms)",
            url,
            status,
            body.len(),
            start_time.elapsed().as_millis()
        );

        Ok(FetchedFeed { status, body })
    }
}
