use crate::types::{Result, VerifierError};
use feed_rs::parser;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub entry_count: usize,
}

/// Parses RSS, Atom or JSON Feed content. A parse failure means the
/// document is not a well-formed feed.
pub fn parse_feed(content: &[u8]) -> Result<ParsedFeed> {
    debug!("Parsing feed content ({} bytes)", content.len());

    let feed = parser::parse(content).map_err(|e| VerifierError::Parse(e.to_string()))?;

    Ok(ParsedFeed {
        title: feed.title.map(|t| t.content),
        entry_count: feed.entries.len(),
    })
}
