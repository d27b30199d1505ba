//! Press CLI - build-time WordPress content fetcher.
//!
//! Provides commands for:
//! - `posts`, `all-posts`, `count`, `post`: post listings and lookup
//! - `pages`, `menu`, `options`: other site content
//! - `rewrite-url`: map a CMS image URL to the CDN host
//! - `snapshot`: fetch everything into one JSON document for the site build

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use press_config::{CliSettings, Config};
use press_gateway::ContentGateway;
use tracing_subscriber::EnvFilter;

use commands::{MenuArgs, PostArgs, PostsArgs, RewriteUrlArgs, SnapshotArgs, content};
use error::CliError;
use output::Output;

/// Press - fetch WordPress content for static builds.
#[derive(Parser)]
#[command(name = "press", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command.
#[derive(Args)]
struct GlobalArgs {
    /// Path to configuration file (default: auto-discover press.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// WordPress REST API root (overrides config and WP_API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// HTTP timeout in seconds (overrides config).
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Enable verbose output (log every request).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of posts.
    Posts(PostsArgs),
    /// List all posts (up to the bulk limit).
    AllPosts,
    /// Print the total number of posts.
    Count,
    /// Get a post by slug.
    Post(PostArgs),
    /// List pages.
    Pages,
    /// Get navigation menu items.
    Menu(MenuArgs),
    /// Get site-wide options.
    Options,
    /// Rewrite an image URL to the CDN host.
    RewriteUrl(RewriteUrlArgs),
    /// Fetch all content into one JSON document.
    Snapshot(SnapshotArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let cli_settings = CliSettings {
        api_url: cli.global.api_url,
        timeout_secs: cli.global.timeout,
    };
    let config = Config::load(cli.global.config.as_deref(), Some(&cli_settings))?;
    let gateway = ContentGateway::new(&config);

    match cli.command {
        Commands::Posts(args) => args.execute(&gateway),
        Commands::AllPosts => content::all_posts(&gateway),
        Commands::Count => content::count(&gateway),
        Commands::Post(args) => args.execute(&gateway),
        Commands::Pages => content::pages(&gateway),
        Commands::Menu(args) => args.execute(&gateway),
        Commands::Options => content::options(&gateway),
        Commands::RewriteUrl(args) => args.execute(&gateway),
        Commands::Snapshot(args) => args.execute(&gateway),
    }
}
