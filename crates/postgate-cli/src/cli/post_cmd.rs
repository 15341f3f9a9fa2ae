//! `postgate post <slug>` — a single post as JSON.

use crate::cli::output;
use anyhow::{bail, Context, Result};
use postgate::{EntrySource, PostQueries};

pub async fn run<S: EntrySource>(queries: &PostQueries<S>, slug: &str) -> Result<()> {
    let record = queries
        .fetch_by_slug(slug)
        .await
        .with_context(|| format!("looking up post {slug:?}"))?;

    match record {
        Some(record) => output::print_json(&record),
        None => bail!("no post with slug {slug:?}"),
    }
}
