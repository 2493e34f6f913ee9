pub mod types;
pub mod config;
pub mod sources;
pub mod fetcher;
pub mod parser;
pub mod validator;
pub mod aggregator;
pub mod status;
pub mod catalog;
pub mod refresh;
pub mod controller;

pub use types::*;
pub use config::{Cli, ExitPolicy, VerifierConfig};
pub use sources::load_sources;
pub use fetcher::{FetchedFeed, Fetcher};
pub use parser::{parse_feed, ParsedFeed};
pub use validator::{assess, FeedValidator, Validate, Verdict};
pub use aggregator::Aggregator;
pub use status::{read_status, write_status};
pub use catalog::{render_catalog, write_catalog};
pub use refresh::RefreshGate;
pub use controller::{RunOutcome, Runner};
