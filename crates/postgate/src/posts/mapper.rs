//! Field mapping from raw backend entries to [`ContentRecord`]s.
//!
//! Defaults applied here:
//!
//! | record field      | backend field      | when absent            |
//! |-------------------|--------------------|------------------------|
//! | `title`           | `header`           | `"Untitled"`           |
//! | `published_date`  | `date`             | the mapping timestamp  |
//! | `slug`            | `slug`             | empty string           |
//! | `content`         | `content`          | JSON `null`            |
//! | `tags`, `writer`  | `tags`, `writer`   | empty list             |
//!
//! Nothing else is validated. Nested shapes such as the featured image pass
//! through untouched.

use super::record::{ContentRecord, RecordMetadata};
use crate::delivery::RawEntry;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::warn;

/// Title used when an entry has no `header`.
pub const UNTITLED: &str = "Untitled";

/// Backend field names for the post content type.
pub mod fields {
    pub const HEADER: &str = "header";
    pub const DATE: &str = "date";
    pub const SLUG: &str = "slug";
    pub const SHORT_DESCRIPTION: &str = "shortDescription";
    pub const FEATURED_IMAGE: &str = "featuredImage";
    pub const CONTENT: &str = "content";
    pub const TAGS: &str = "tags";
    pub const WRITER: &str = "writer";
}

/// Map an entry, using the current time for a missing date.
pub fn map_entry(entry: &RawEntry) -> ContentRecord {
    map_entry_at(entry, Utc::now())
}

/// Map an entry, using `now` for a missing or unparsable date.
pub fn map_entry_at(entry: &RawEntry, now: DateTime<Utc>) -> ContentRecord {
    let id = entry.sys.id.clone();

    let published_date = match entry.field(fields::DATE) {
        None => now,
        Some(raw) => match raw.as_str().and_then(parse_date) {
            Some(date) => date,
            None => {
                warn!(entry = %id, value = %raw, "unparsable publish date, using mapping time");
                now
            }
        },
    };

    let slug = match entry.str_field(fields::SLUG) {
        Some(slug) => slug.to_string(),
        None => {
            warn!(entry = %id, "entry has no slug");
            String::new()
        }
    };

    ContentRecord {
        slug,
        published_date,
        title: entry
            .str_field(fields::HEADER)
            .unwrap_or(UNTITLED)
            .to_string(),
        short_description: entry
            .str_field(fields::SHORT_DESCRIPTION)
            .map(String::from),
        featured_image: entry.field(fields::FEATURED_IMAGE).cloned(),
        content: entry.field(fields::CONTENT).cloned().unwrap_or(Value::Null),
        tags: string_list(&id, fields::TAGS, entry.field(fields::TAGS)),
        writer: string_list(&id, fields::WRITER, entry.field(fields::WRITER)),
        metadata: RecordMetadata {
            tags: entry.metadata.tags.clone(),
        },
        id,
    }
}

/// Parse the backend's date field.
///
/// Accepts RFC 3339, the editor's minute-precision form
/// (`2024-03-01T09:30+02:00`, `2024-03-01T09:30`), and a bare date.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn string_list(id: &str, name: &str, value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => {
            let list: Vec<String> = items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect();
            if list.len() < items.len() {
                warn!(
                    entry = id,
                    field = name,
                    dropped = items.len() - list.len(),
                    "non-string list items skipped"
                );
            }
            list
        }
        Some(Value::String(single)) => vec![single.clone()],
        None => Vec::new(),
        Some(other) => {
            warn!(entry = id, field = name, value = %other, "list field is not a list");
            Vec::new()
        }
    }
}
