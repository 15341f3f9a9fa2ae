//! Delivery API boundary: typed queries, the HTTP client, and the raw entry
//! shapes it returns.

pub mod client;
pub mod entry;
pub mod query;

pub use client::{DeliveryClient, EntrySource};
pub use entry::{EntryCollection, EntryMetadata, EntrySys, Includes, Link, LinkSys, RawEntry};
pub use query::{EntryQuery, MAX_LIMIT, ORDER_NEWEST_FIRST, POST_CONTENT_TYPE};
