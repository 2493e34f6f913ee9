use crate::config::VerifierConfig;
use crate::fetcher::Fetcher;
use crate::parser::parse_feed;
use crate::types::{Result, VerifierError};
use async_trait::async_trait;
use tracing::debug;

/// Outcome of checking a single feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Working,
    HttpError(u16),
    InvalidFormat(String),
    NoEntries,
    AccessError(String),
}

impl Verdict {
    pub fn is_working(&self) -> bool {
        matches!(self, Verdict::Working)
    }

    pub fn message(&self) -> String {
        match self {
            Verdict::Working => "Feed is valid and contains entries".to_string(),
            Verdict::HttpError(status) => format!("HTTP Error: {status}"),
            Verdict::InvalidFormat(detail) => format!("Invalid RSS feed format: {detail}"),
            Verdict::NoEntries => "No entries found in feed".to_string(),
            Verdict::AccessError(detail) => format!("Error accessing feed: {detail}"),
        }
    }
}

/// Classifies a fetched response: transport status first, then
/// well-formedness, then whether the feed has any entries.
pub fn assess(status: u16, body: &[u8]) -> Verdict {
    if !(200..300).contains(&status) {
        return Verdict::HttpError(status);
    }
    match parse_feed(body) {
        Ok(parsed) => {
            debug!(
                "Parsed feed {:?} with {} entries",
                parsed.title.as_deref().unwrap_or("(untitled)"),
                parsed.entry_count
            );
            if parsed.entry_count == 0 {
                Verdict::NoEntries
            } else {
                Verdict::Working
            }
        }
        Err(VerifierError::Parse(detail)) => Verdict::InvalidFormat(detail),
        Err(e) => Verdict::InvalidFormat(e.to_string()),
    }
}

#[async_trait]
pub trait Validate: Send + Sync {
    /// Checks one feed. Failures are reported through the verdict, never as errors.
    async fn validate(&self, url: &str) -> Verdict;
}

pub struct FeedValidator {
    fetcher: Fetcher,
}

impl FeedValidator {
    pub fn new(config: &VerifierConfig) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(config)?,
        })
    }
}

#[async_trait]
impl Validate for FeedValidator {
    async fn validate(&self, url: &str) -> Verdict {
        match self.fetcher.fetch(url).await {
            Ok(fetched) => assess(fetched.status, &fetched.body),
            Err(e) => Verdict::AccessError(access_detail(e)),
        }
    }
}

fn access_detail(error: VerifierError) -> String {
    match error {
        VerifierError::Http(e) if e.is_timeout() => format!("request timed out ({e})"),
        VerifierError::Http(e) => e.to_string(),
        VerifierError::InvalidUrl(e) => e.to_string(),
        VerifierError::FeedTooLarge { size_mb } => format!("response body exceeds {size_mb}MB"),
        other => other.to_string(),
    }
}
