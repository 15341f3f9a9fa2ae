//! `postgate` — inspect blog content and write sitemaps from the command line.

mod cli;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use postgate::{ClientConfig, ConfigInputs, DeliveryClient, PostQueries};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "postgate", version, about = "Query blog posts from the CMS delivery API")]
struct Cli {
    /// Use the preview endpoint (requires PREVIEW_TOKEN)
    #[arg(long, global = true)]
    preview: bool,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the most recently published posts
    List {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Show one page of posts with the total count
    Page {
        #[arg(long, default_value_t = 6)]
        limit: u32,
        /// 1-based page number; zero and negative values mean the first page
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,
    },
    /// Look up a single post by its slug
    Post { slug: String },
    /// Write sitemap XML for the site
    Sitemap {
        /// Public site URL (falls back to SITE_URL)
        #[arg(long)]
        site_url: Option<String>,
        /// JSON file with static routes: [{"url", "changeFrequency", "priority"}]
        #[arg(long)]
        routes: Option<PathBuf>,
        /// Path prefix for post pages
        #[arg(long, default_value = postgate::sitemap::DEFAULT_POST_PATH)]
        post_path: String,
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    cli::logging::init(args.json_logs);

    let mut inputs = ConfigInputs::from_env();
    if args.preview {
        inputs.use_preview = true;
    }
    let config = ClientConfig::resolve(inputs).context("resolving backend configuration")?;
    info!(
        host = config.host(),
        preview = config.is_preview(),
        "postgate v{}",
        env!("CARGO_PKG_VERSION")
    );

    let queries = PostQueries::new(DeliveryClient::new(config));

    match args.command {
        Command::List { limit } => cli::list_cmd::run(&queries, limit).await,
        Command::Page { limit, page } => cli::page_cmd::run(&queries, limit, page).await,
        Command::Post { slug } => cli::post_cmd::run(&queries, &slug).await,
        Command::Sitemap {
            site_url,
            routes,
            post_path,
            out,
        } => {
            let site_url = site_url
                .or_else(|| std::env::var("SITE_URL").ok())
                .context("--site-url or SITE_URL is required")?;
            cli::sitemap_cmd::run(
                &queries,
                &site_url,
                routes.as_deref(),
                &post_path,
                out.as_deref(),
            )
            .await
        }
    }
}
