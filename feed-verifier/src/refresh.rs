use crate::types::{Result, VerifierError};
use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Decides whether the catalog is due for regeneration, based on the
/// timestamp stored at `path`.
#[derive(Debug, Clone)]
pub struct RefreshGate {
    path: PathBuf,
    interval: Duration,
}

impl RefreshGate {
    pub fn new(path: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            path: path.into(),
            interval,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored timestamp, or `None` if it is missing, empty or unreadable.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No refresh state at {}: {}", self.path.display(), e);
                return None;
            }
        };

        match parse_timestamp(content.trim()) {
            Ok(timestamp) => Some(timestamp),
            Err(e) => {
                warn!("Ignoring refresh state in {}: {}", self.path.display(), e);
                None
            }
        }
    }

    pub fn should_refresh(&self, now: DateTime<Utc>) -> bool {
        match self.last_refresh() {
            None => true,
            Some(last) => now.signed_duration_since(last) >= self.interval,
        }
    }

    pub fn update(&self, now: DateTime<Utc>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, now.to_rfc3339_opts(SecondsFormat::Secs, true))?;
        Ok(())
    }
}

/// Accepts RFC 3339 timestamps as well as naive ISO-8601 ones, which are taken as UTC.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if raw.is_empty() {
        return Err(VerifierError::Timestamp("empty".to_string()));
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| VerifierError::Timestamp(format!("{raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_supported_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-05-01T12:30:00Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-05-01T14:30:00+02:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-05-01T12:30:00").unwrap(), expected);
        assert!(parse_timestamp("2024-05-01T12:30:00.123456").is_ok());
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("last tuesday").is_err());
    }
}
