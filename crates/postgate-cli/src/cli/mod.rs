//! Subcommand implementations for the `postgate` binary.

pub mod list_cmd;
pub mod logging;
pub mod output;
pub mod page_cmd;
pub mod post_cmd;
pub mod sitemap_cmd;
