//! Feed command: the recent recipient ticker.

use super::models::FeedArgs;
use crate::aggregator::{fetch_history, recent_recipient_feed, FeedItem};
use crate::output::render_feed;
use crate::rpc::ChainReader;
use crate::utils::config::Settings;
use anyhow::{Context, Result};

pub fn execute_feed(
    reader: &dyn ChainReader,
    settings: &Settings,
    args: FeedArgs,
) -> Result<Vec<FeedItem>> {
    let events = fetch_history(
        reader,
        &settings.distribution_event_type(),
        None,
        settings.history_limit,
    )
    .context("Error fetching distributions")?;

    let items = recent_recipient_feed(&events, args.limit);
    print!("{}", render_feed(&items));

    Ok(items)
}
