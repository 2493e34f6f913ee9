use crate::types::{Result, RunReport};
use std::fs;
use std::path::Path;
use tracing::info;

/// Replaces the status document with `report`.
pub fn write_status(path: &Path, report: &RunReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    info!("Wrote status for {} feeds to {}", report.feeds.len(), path.display());
    Ok(())
}

pub fn read_status(path: &Path) -> Result<RunReport> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
