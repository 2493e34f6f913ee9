use crate::types::{FeedResult, Result, RunReport};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

/// Renders the Markdown catalog of working feeds, grouped by category.
/// Categories and the feeds inside them are sorted by name.
pub fn render_catalog(report: &RunReport) -> String {
    let mut by_category: BTreeMap<&str, Vec<&FeedResult>> = BTreeMap::new();
    for feed in report.working_feeds() {
        by_category.entry(feed.category.as_str()).or_default().push(feed);
    }

    let mut out = String::new();
    let summary = &report.summary;

    // Writing into a String cannot fail.
    let _ = writeln!(out, "# RSS Feed Sources\n");
    let _ = writeln!(out, "Last updated: {} UTC\n", report.timestamp);
    let _ = writeln!(out, "## Summary\n");
    let _ = writeln!(out, "- Total feeds: {}", summary.total);
    let _ = writeln!(out, "- Working feeds: {}", summary.working);
    let _ = writeln!(out, "- Failed feeds: {}", summary.failed);

    if by_category.is_empty() {
        let _ = writeln!(out, "\n_No working feeds._");
        return out;
    }

    for (category, mut feeds) in by_category {
        feeds.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.url.cmp(&b.url)));

        let _ = writeln!(out, "\n## {category}\n");
        for feed in feeds {
            let _ = writeln!(out, "- [{}]({})", escape_link_text(&feed.name), escape_link_url(&feed.url));
        }
    }

    out
}

fn escape_link_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Percent-encodes the characters that would end a link destination early.
fn escape_link_url(url: &str) -> String {
    url.replace(' ', "%20").replace('(', "%28").replace(')', "%29")
}

pub fn write_catalog(path: &Path, report: &RunReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_catalog(report))?;
    info!("Wrote catalog of {} working feeds to {}", report.summary.working, path.display());
    Ok(())
}
