//! Post queries: latest list, paginated window, and slug lookup.

use super::mapper::{fields, map_entry};
use super::record::ContentRecord;
use crate::delivery::{EntryCollection, EntryQuery, EntrySource, MAX_LIMIT};
use crate::error::Result;
use serde::Serialize;
use tracing::debug;

/// Upper bound on records fetched for a sitemap build.
pub const SITEMAP_FETCH_CAP: u32 = 1000;

/// One window of posts plus the total number of posts available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub records: Vec<ContentRecord>,
    pub total: u64,
}

impl Page {
    /// Number of pages of `limit` records needed to cover `total`.
    pub fn page_count(&self, limit: u32) -> u64 {
        if limit == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(limit))
    }
}

/// Offset for a 1-based page number. Pages below 1 map to offset 0.
pub fn page_skip(limit: u32, page: i64) -> u64 {
    let skip = page.saturating_sub(1).saturating_mul(i64::from(limit));
    u64::try_from(skip).unwrap_or(0)
}

/// Stateless query executor over an [`EntrySource`].
#[derive(Debug, Clone)]
pub struct PostQueries<S> {
    source: S,
}

impl<S: EntrySource> PostQueries<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The `limit` most recently published posts, newest first.
    pub async fn fetch_list(&self, limit: u32) -> Result<Vec<ContentRecord>> {
        let query = EntryQuery::posts().newest_first().limit(limit);
        let mut records = self.run(&query).await?.0;
        records.truncate(limit as usize);
        Ok(records)
    }

    /// Page `page` (1-based) of `limit` posts, newest first.
    ///
    /// `total` is always the backend's count of all posts, so a page past the
    /// end yields no records but a correct total. `limit` is capped at
    /// [`MAX_LIMIT`] before the offset is computed so pages always tile.
    pub async fn fetch_page(&self, limit: u32, page: i64) -> Result<Page> {
        let limit = limit.min(MAX_LIMIT);
        let query = EntryQuery::posts()
            .newest_first()
            .limit(limit)
            .skip(page_skip(limit, page));
        let (mut records, total) = self.run(&query).await?;
        records.truncate(limit as usize);
        Ok(Page { records, total })
    }

    /// The post whose slug equals `slug` exactly, if any.
    pub async fn fetch_by_slug(&self, slug: &str) -> Result<Option<ContentRecord>> {
        let query = EntryQuery::posts().field_eq(fields::SLUG, slug).limit(1);
        let (records, _) = self.run(&query).await?;
        Ok(records.into_iter().next())
    }

    /// Recent posts for sitemap generation, capped at [`SITEMAP_FETCH_CAP`].
    pub async fn fetch_all_for_sitemap(&self) -> Result<Vec<ContentRecord>> {
        self.fetch_list(SITEMAP_FETCH_CAP).await
    }

    async fn run(&self, query: &EntryQuery) -> Result<(Vec<ContentRecord>, u64)> {
        let mut collection: EntryCollection = self.source.entries(query).await?;
        collection.resolve_links();

        let mut records: Vec<ContentRecord> = collection.items.iter().map(map_entry).collect();
        // Stable: equal dates keep backend order.
        records.sort_by(|a, b| b.published_date.cmp(&a.published_date));
        debug!(
            mapped = records.len(),
            total = collection.total,
            "mapped entries to records"
        );
        Ok((records, collection.total))
    }
}
