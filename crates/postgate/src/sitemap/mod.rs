//! Sitemap aggregation: static site routes followed by one entry per post,
//! serialized as a sitemaps.org `<urlset>` document.

pub mod builder;
pub mod serializer;

pub use builder::{SitemapBuilder, DEFAULT_POST_PATH, POST_CHANGE_FREQUENCY, POST_PRIORITY};
pub use serializer::to_xml;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a URL is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `<url>` of the sitemap.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    /// In `0.0..=1.0`.
    pub priority: f32,
}

/// A caller-declared site URL that is not backed by a post.
///
/// `url` is either absolute or a path (`/about`) resolved against the site URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticRoute {
    pub url: String,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

impl StaticRoute {
    /// Create a route; `priority` is clamped into `0.0..=1.0`.
    pub fn new(url: impl Into<String>, change_frequency: ChangeFrequency, priority: f32) -> Self {
        Self {
            url: url.into(),
            change_frequency,
            priority: clamp_priority(priority),
        }
    }
}

pub(crate) fn clamp_priority(priority: f32) -> f32 {
    if priority.is_nan() {
        return 0.5;
    }
    priority.clamp(0.0, 1.0)
}
