//! `postgate sitemap` — static routes plus every recent post, as sitemap XML.

use crate::cli::output;
use anyhow::{Context, Result};
use chrono::Utc;
use postgate::sitemap::to_xml;
use postgate::{ChangeFrequency, EntrySource, PostQueries, SitemapBuilder, StaticRoute};
use std::path::Path;
use tracing::info;

/// Routes used when no routes file is given.
pub fn default_routes() -> Vec<StaticRoute> {
    vec![
        StaticRoute::new("/", ChangeFrequency::Daily, 1.0),
        StaticRoute::new("/blog", ChangeFrequency::Daily, 0.9),
        StaticRoute::new("/about", ChangeFrequency::Monthly, 0.7),
        StaticRoute::new("/projects", ChangeFrequency::Monthly, 0.6),
        StaticRoute::new("/contact", ChangeFrequency::Yearly, 0.3),
    ]
}

/// Read a JSON array of static routes.
pub fn load_routes(path: &Path) -> Result<Vec<StaticRoute>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read routes file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid routes file {}", path.display()))
}

pub async fn run<S: EntrySource>(
    queries: &PostQueries<S>,
    site_url: &str,
    routes: Option<&Path>,
    post_path: &str,
    out: Option<&Path>,
) -> Result<()> {
    let routes = match routes {
        Some(path) => load_routes(path)?,
        None => default_routes(),
    };

    let builder = SitemapBuilder::new(site_url)
        .post_path(post_path)
        .static_routes(routes);
    let entries = builder
        .build_from(queries, Utc::now())
        .await
        .context("fetching posts for sitemap")?;

    info!(
        urls = entries.len(),
        static_routes = builder.routes().len(),
        "sitemap built"
    );
    output::write_text(&to_xml(&entries)?, out)
}
