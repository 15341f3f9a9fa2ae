//! # postgate
//!
//! Content access layer for a blog backed by a headless CMS delivery API.
//!
//! - [`config`] resolves the backend host and bearer token (production or preview).
//! - [`delivery`] issues typed entry queries over HTTP and decodes raw entries.
//! - [`posts`] maps raw entries to [`ContentRecord`]s and runs the list, page,
//!   and slug queries.
//! - [`sitemap`] merges static routes with post records and writes sitemap XML.
//!
//! ```rust,ignore
//! use postgate::{ClientConfig, DeliveryClient, PostQueries};
//!
//! let config = ClientConfig::from_env()?;
//! let posts = PostQueries::new(DeliveryClient::new(config));
//! let page = posts.fetch_page(6, 2).await?;
//! println!("{} of {} posts", page.records.len(), page.total);
//! ```

pub mod config;
pub mod delivery;
pub mod error;
pub mod posts;
pub mod sitemap;

pub use config::{ClientConfig, ConfigInputs, Endpoint};
pub use delivery::{DeliveryClient, EntryQuery, EntrySource, RawEntry};
pub use error::{Error, Result};
pub use posts::{ContentRecord, FeaturedImage, Page, PostQueries};
pub use sitemap::{ChangeFrequency, SitemapBuilder, SitemapEntry, StaticRoute};
