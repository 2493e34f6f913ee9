use chrono::Duration as ChronoDuration;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// How the run's verdicts translate into the process exit status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExitPolicy {
    /// Fail only when no feed is working.
    #[default]
    AnyWorking,
    /// Fail when any feed is not working.
    AllWorking,
}

#[derive(Debug, Clone)]
pub struct VerifierConfig {
    pub sources_path: PathBuf,
    pub status_path: PathBuf,
    pub catalog_path: PathBuf,
    pub refresh_state_path: PathBuf,
    pub timeout: Duration,
    pub refresh_interval: ChronoDuration,
    pub user_agent: String,
    pub max_feed_size_mb: u64,
    pub policy: ExitPolicy,
    pub force_refresh: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            sources_path: PathBuf::from("sources.yml"),
            status_path: PathBuf::from("feed_status.json"),
            catalog_path: PathBuf::from("FEEDS.md"),
            refresh_state_path: PathBuf::from(".last_catalog_update"),
            timeout: Duration::from_secs(10),
            refresh_interval: ChronoDuration::days(7),
            user_agent: format!("feed-verifier/{}", env!("CARGO_PKG_VERSION")),
            max_feed_size_mb: 10,
            policy: ExitPolicy::default(),
            force_refresh: false,
        }
    }
}

impl VerifierConfig {
    /// Resolves every path against `dir`. Absolute paths are left alone.
    pub fn rooted_at(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.sources_path = dir.join(&self.sources_path);
        self.status_path = dir.join(&self.status_path);
        self.catalog_path = dir.join(&self.catalog_path);
        self.refresh_state_path = dir.join(&self.refresh_state_path);
        self
    }
}

#[derive(Debug, Parser)]
#[command(name = "feed-verifier", version, about = "Check that configured RSS/Atom feeds are reachable and non-empty")]
pub struct Cli {
    /// YAML file with the `sources` list
    #[arg(long, env = "FEED_VERIFIER_SOURCES", default_value = "sources.yml")]
    pub sources: PathBuf,

    /// JSON status document, rewritten every run
    #[arg(long, env = "FEED_VERIFIER_STATUS", default_value = "feed_status.json")]
    pub status: PathBuf,

    /// Markdown catalog of working feeds
    #[arg(long, env = "FEED_VERIFIER_CATALOG", default_value = "FEEDS.md")]
    pub catalog: PathBuf,

    /// File holding the time of the last catalog regeneration
    #[arg(long, env = "FEED_VERIFIER_REFRESH_STATE", default_value = ".last_catalog_update")]
    pub refresh_state: PathBuf,

    /// Per-feed request timeout
    #[arg(
        long,
        env = "FEED_VERIFIER_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..=3600)
    )]
    pub timeout_secs: u64,

    /// Minimum number of days between catalog regenerations
    #[arg(
        long,
        env = "FEED_VERIFIER_REFRESH_DAYS",
        default_value_t = 7,
        value_parser = clap::value_parser!(i64).range(1..=3650)
    )]
    pub refresh_days: i64,

    /// Largest feed body accepted, in megabytes
    #[arg(
        long,
        env = "FEED_VERIFIER_MAX_FEED_SIZE_MB",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..=1024)
    )]
    pub max_feed_size_mb: u64,

    #[arg(long, env = "FEED_VERIFIER_POLICY", value_enum, default_value_t = ExitPolicy::AnyWorking)]
    pub policy: ExitPolicy,

    /// Regenerate the catalog even if it is not due
    #[arg(long, env = "FEED_VERIFIER_FORCE_REFRESH")]
    pub force_refresh: bool,
}

impl Cli {
    pub fn into_config(self) -> VerifierConfig {
        VerifierConfig {
            sources_path: self.sources,
            status_path: self.status,
            catalog_path: self.catalog,
            refresh_state_path: self.refresh_state,
            timeout: Duration::from_secs(self.timeout_secs),
            refresh_interval: ChronoDuration::days(self.refresh_days),
            max_feed_size_mb: self.max_feed_size_mb,
            policy: self.policy,
            force_refresh: self.force_refresh,
            ..VerifierConfig::default()
        }
    }
}
