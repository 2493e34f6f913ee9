use crate::aggregator::Aggregator;
use crate::catalog::write_catalog;
use crate::config::{ExitPolicy, VerifierConfig};
use crate::refresh::RefreshGate;
use crate::sources::load_sources;
use crate::status::write_status;
use crate::types::RunSummary;
use crate::validator::{FeedValidator, Validate};
use anyhow::Context;
use chrono::{DateTime, Utc};
use std::fs::{self, OpenOptions};
use std::path::Path;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub total: usize,
    pub working: usize,
    pub failed: usize,
    pub passed: bool,
    pub catalog_refreshed: bool,
}

impl RunOutcome {
    fn evaluate(summary: RunSummary, policy: ExitPolicy, catalog_refreshed: bool) -> Self {
        // An empty run counts as "nothing worked" under either policy.
        let passed = summary.working > 0
            && match policy {
                ExitPolicy::AnyWorking => true,
                ExitPolicy::AllWorking => summary.failed == 0,
            };

        Self {
            total: summary.total,
            working: summary.working,
            failed: summary.failed,
            passed,
            catalog_refreshed,
        }
    }

    pub fn summary_line(&self) -> String {
        if self.passed {
            format!("Validation complete: {}/{} feeds working", self.working, self.total)
        } else if self.working == 0 {
            "Error: All feeds failed validation".to_string()
        } else {
            format!("Error: {}/{} feeds failed validation", self.failed, self.total)
        }
    }
}

/// Sequences one check-and-report run.
pub struct Runner<V> {
    config: VerifierConfig,
    aggregator: Aggregator<V>,
    gate: RefreshGate,
}

impl Runner<FeedValidator> {
    pub fn new(config: VerifierConfig) -> anyhow::Result<Self> {
        let validator = FeedValidator::new(&config).context("failed to build HTTP client")?;
        Ok(Self::with_validator(config, validator))
    }
}

impl<V: Validate> Runner<V> {
    pub fn with_validator(config: VerifierConfig, validator: V) -> Self {
        let gate = RefreshGate::new(&config.refresh_state_path, config.refresh_interval);
        Self {
            config,
            aggregator: Aggregator::new(validator),
            gate,
        }
    }

    pub async fn run(&self) -> RunOutcome {
        self.run_at(Utc::now()).await
    }

    /// Runs against a fixed clock. Output problems are logged and the run carries on.
    pub async fn run_at(&self, now: DateTime<Utc>) -> RunOutcome {
        info!("Starting feed validation");

        for path in [&self.config.status_path, &self.config.catalog_path] {
            if let Err(e) = ensure_placeholder(path) {
                warn!("{:#}", e);
            }
        }

        let sources = load_sources(&self.config.sources_path);
        let timestamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
        let report = self.aggregator.run(&sources, timestamp).await;

        if let Err(e) = write_status(&self.config.status_path, &report) {
            error!("Failed to write status to {}: {}", self.config.status_path.display(), e);
        }

        let mut catalog_refreshed = false;
        if self.config.force_refresh || self.gate.should_refresh(now) {
            match write_catalog(&self.config.catalog_path, &report) {
                Ok(()) => {
                    catalog_refreshed = true;
                    if let Err(e) = self.gate.update(now) {
                        warn!("Failed to record catalog refresh in {}: {}", self.gate.path().display(), e);
                    }
                }
                Err(e) => error!("Failed to write catalog to {}: {}", self.config.catalog_path.display(), e),
            }
        } else {
            info!("Catalog is not due for regeneration");
        }

        RunOutcome::evaluate(report.summary, self.config.policy, catalog_refreshed)
    }
}

/// Creates an empty file (and its directories) if nothing exists at `path`.
fn ensure_placeholder(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(working: usize, failed: usize) -> RunSummary {
        RunSummary {
            total: working + failed,
            working,
            failed,
        }
    }

    #[test]
    fn permissive_policy_needs_one_working_feed() {
        let outcome = RunOutcome::evaluate(summary(1, 3), ExitPolicy::AnyWorking, false);
        assert!(outcome.passed);
        assert_eq!(outcome.summary_line(), "Validation complete: 1/4 feeds working");

        let outcome = RunOutcome::evaluate(summary(0, 2), ExitPolicy::AnyWorking, false);
        assert!(!outcome.passed);
        assert_eq!(outcome.summary_line(), "Error: All feeds failed validation");
    }

    #[test]
    fn strict_policy_needs_every_feed() {
        let outcome = RunOutcome::evaluate(summary(3, 1), ExitPolicy::AllWorking, false);
        assert!(!outcome.passed);
        assert_eq!(outcome.summary_line(), "Error: 1/4 feeds failed validation");

        assert!(RunOutcome::evaluate(summary(2, 0), ExitPolicy::AllWorking, false).passed);
    }

    #[test]
    fn empty_run_fails_under_both_policies() {
        for policy in [ExitPolicy::AnyWorking, ExitPolicy::AllWorking] {
            let outcome = RunOutcome::evaluate(summary(0, 0), policy, false);
            assert!(!outcome.passed);
            assert_eq!(outcome.summary_line(), "Error: All feeds failed validation");
        }
    }
}
