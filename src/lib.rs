pub mod core;

use std::path::PathBuf;

use chrono::Utc;

use crate::core::config::FeedConfig;
use crate::core::feed::fetcher::{build_client, fetch_feed, FetchError};
use crate::core::feed::parser::{parse_channel_items, FeedParseError};
use crate::core::output::{write_payload, FeedPayload, WriteError};
use crate::core::transform::build_posts;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] FeedParseError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub out_file: PathBuf,
    pub item_count: usize,
}

/// Fetches the configured feed and replaces the output file with its latest
/// posts. Nothing is written unless fetching and parsing both succeed.
pub async fn run(config: &FeedConfig) -> Result<RunSummary, RunError> {
    let client = build_client(config)?;
    let fetched = fetch_feed(&client, &config.feed_url).await?;
    let items = parse_channel_items(&fetched.body, config.max_items)?;

    let posts = build_posts(&items, &config.fallback_link);
    let payload = FeedPayload::new(&config.feed_url, posts, Utc::now());
    write_payload(&config.out_file, &payload)?;

    Ok(RunSummary {
        out_file: config.out_file.clone(),
        item_count: payload.items.len(),
    })
}
