//! `postgate list` — most recent posts as JSON.

use crate::cli::output;
use anyhow::{Context, Result};
use postgate::{EntrySource, PostQueries};
use tracing::info;

pub async fn run<S: EntrySource>(queries: &PostQueries<S>, limit: u32) -> Result<()> {
    let records = queries
        .fetch_list(limit)
        .await
        .context("fetching latest posts")?;
    info!(count = records.len(), "fetched posts");
    output::print_json(&records)
}
