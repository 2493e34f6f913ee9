use crate::types::{FeedResult, RunReport, SourceDescriptor};
use crate::validator::Validate;
use tracing::{error, info};

/// Runs the validator over every source, one at a time, in configuration order.
pub struct Aggregator<V> {
    validator: V,
}

impl<V: Validate> Aggregator<V> {
    pub fn new(validator: V) -> Self {
        Self { validator }
    }

    pub async fn run(&self, sources: &[SourceDescriptor], timestamp: impl Into<String>) -> RunReport {
        let mut report = RunReport::new(timestamp);

        info!("Validating {} feeds", sources.len());

        for source in sources {
            let verdict = self.validator.validate(&source.url).await;
            let message = verdict.message();

            if verdict.is_working() {
                info!("Feed working: {} ({})", source.name, source.url);
            } else {
                error!("Feed failed: {} ({}): {}", source.name, source.url, message);
            }

            report.push(FeedResult {
                name: source.name.clone(),
                url: source.url.clone(),
                category: source.category.clone(),
                working: verdict.is_working(),
                message,
            });
        }

        info!(
            "Checked {} feeds: {} working, {} failed",
            report.summary.total, report.summary.working, report.summary.failed
        );
        report
    }
}
