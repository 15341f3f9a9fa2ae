//! `postgate page` — one window of posts with the total count.

use crate::cli::output;
use anyhow::{Context, Result};
use postgate::{EntrySource, PostQueries};
use tracing::info;

pub async fn run<S: EntrySource>(queries: &PostQueries<S>, limit: u32, page: i64) -> Result<()> {
    let result = queries
        .fetch_page(limit, page)
        .await
        .with_context(|| format!("fetching page {page} of {limit} posts"))?;
    info!(
        count = result.records.len(),
        total = result.total,
        pages = result.page_count(limit),
        "fetched page"
    );
    output::print_json(&result)
}
