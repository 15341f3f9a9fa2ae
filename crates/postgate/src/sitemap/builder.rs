//! Assemble sitemap entries from static routes and post records.

use super::{clamp_priority, ChangeFrequency, SitemapEntry, StaticRoute};
use crate::delivery::EntrySource;
use crate::error::Result;
use crate::posts::{ContentRecord, PostQueries};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use url::Url;

/// Path under which post pages live.
pub const DEFAULT_POST_PATH: &str = "/blog";
/// Change frequency stamped on every post entry.
pub const POST_CHANGE_FREQUENCY: ChangeFrequency = ChangeFrequency::Weekly;
/// Priority stamped on every post entry.
pub const POST_PRIORITY: f32 = 0.8;

/// Builds the ordered sitemap for one site.
#[derive(Debug, Clone)]
pub struct SitemapBuilder {
    site_url: String,
    post_path: String,
    routes: Vec<StaticRoute>,
}

impl SitemapBuilder {
    /// Start a sitemap for `site_url` (e.g. `https://example.com`).
    pub fn new(site_url: &str) -> Self {
        Self {
            site_url: site_url.trim_end_matches('/').to_string(),
            post_path: DEFAULT_POST_PATH.to_string(),
            routes: Vec::new(),
        }
    }

    /// Set the path prefix for post URLs. An empty path puts posts at the site root.
    pub fn post_path(mut self, path: &str) -> Self {
        let trimmed = path.trim_matches('/');
        self.post_path = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        self
    }

    /// Append a static route. Routes keep their declaration order.
    pub fn static_route(mut self, route: StaticRoute) -> Self {
        self.routes.push(StaticRoute {
            priority: clamp_priority(route.priority),
            ..route
        });
        self
    }

    pub fn static_routes(self, routes: impl IntoIterator<Item = StaticRoute>) -> Self {
        routes.into_iter().fold(self, Self::static_route)
    }

    pub fn routes(&self) -> &[StaticRoute] {
        &self.routes
    }

    /// Public URL of the post with `slug`. The slug is percent-encoded as a
    /// single path segment.
    pub fn post_url(&self, slug: &str) -> String {
        let base = format!("{}{}", self.site_url, self.post_path);
        match Url::parse(&base) {
            Ok(mut url) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.pop_if_empty().push(slug);
                }
                url.into()
            }
            Err(e) => {
                warn!(site = %base, error = %e, "site URL does not parse, slug left unencoded");
                format!("{base}/{slug}")
            }
        }
    }

    fn route_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        let path = url.trim_start_matches('/');
        if path.is_empty() {
            format!("{}/", self.site_url)
        } else {
            format!("{}/{}", self.site_url, path)
        }
    }

    /// All static routes (stamped with `now`) followed by one entry per record,
    /// in the order given. Nothing is deduplicated or filtered.
    pub fn build(&self, records: &[ContentRecord], now: DateTime<Utc>) -> Vec<SitemapEntry> {
        let mut entries = Vec::with_capacity(self.routes.len() + records.len());

        entries.extend(self.routes.iter().map(|route| SitemapEntry {
            url: self.route_url(&route.url),
            last_modified: now,
            change_frequency: route.change_frequency,
            priority: route.priority,
        }));

        for record in records {
            if !record.has_slug() {
                warn!(entry = record.id(), "post without slug in sitemap");
            }
            entries.push(SitemapEntry {
                url: self.post_url(record.slug()),
                last_modified: record.published_date(),
                change_frequency: POST_CHANGE_FREQUENCY,
                priority: POST_PRIORITY,
            });
        }

        debug!(
            static_count = self.routes.len(),
            post_count = records.len(),
            "sitemap assembled"
        );
        entries
    }

    /// Fetch recent posts (capped) and build the sitemap from them.
    pub async fn build_from<S: EntrySource>(
        &self,
        queries: &PostQueries<S>,
        now: DateTime<Utc>,
    ) -> Result<Vec<SitemapEntry>> {
        let records = queries.fetch_all_for_sitemap().await?;
        Ok(self.build(&records, now))
    }
}
