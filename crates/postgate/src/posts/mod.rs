//! Blog posts: the canonical record, field mapping, and the query executor.

pub mod mapper;
pub mod queries;
pub mod record;

pub use mapper::{map_entry, map_entry_at, parse_date, UNTITLED};
pub use queries::{page_skip, Page, PostQueries, SITEMAP_FETCH_CAP};
pub use record::{ContentRecord, FeaturedImage, RecordMetadata};
