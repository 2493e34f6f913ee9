use serde::{Deserialize, Serialize};

/// One entry of the `sources` list in the source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

fn default_name() -> String {
    "Unknown".to_string()
}

fn default_category() -> String {
    "Uncategorized".to_string()
}

impl SourceDescriptor {
    pub fn new(name: impl Into<String>, url: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            category: category.into(),
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub sources: Option<Vec<SourceDescriptor>>,
}

impl SourcesConfig {
    /// The configuration written out when no source file exists yet.
    pub fn default_sources() -> Self {
        Self {
            sources: Some(vec![SourceDescriptor::new(
                "Hacker News",
                "https://news.ycombinator.com/rss",
                "Technology",
            )
            .with_kind("rss")]),
        }
    }

    pub fn into_sources(self) -> Vec<SourceDescriptor> {
        self.sources.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedResult {
    pub name: String,
    pub url: String,
    pub category: String,
    pub working: bool,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub working: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, working: bool) {
        self.total += 1;
        if working {
            self.working += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Everything one run produced. Serialized as the status document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub timestamp: String,
    pub feeds: Vec<FeedResult>,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            feeds: Vec::new(),
            summary: RunSummary::default(),
        }
    }

    /// Appends a result and counts it in the same step, so the summary
    /// always matches `feeds`.
    pub fn push(&mut self, result: FeedResult) {
        self.summary.record(result.working);
        self.feeds.push(result);
    }

    pub fn working_feeds(&self) -> impl Iterator<Item = &FeedResult> {
        self.feeds.iter().filter(|feed| feed.working)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VerifierError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Feed exceeds the {size_mb}MB size limit")]
    FeedTooLarge { size_mb: u64 },

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid timestamp: {0}")]
    Timestamp(String),
}

pub type Result<T> = std::result::Result<T, VerifierError>;
