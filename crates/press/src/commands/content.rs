//! Single-operation content commands.
//!
//! Each command maps to one gateway call and prints its JSON result. The
//! gateway degrades failures to empty values, so these never fail because
//! of the remote API.

use std::io::Write;

use clap::Args;
use press_gateway::ContentGateway;
use serde_json::json;

use crate::error::CliError;
use crate::output::{Output, print_json};

/// Arguments for `press posts`.
#[derive(Args)]
pub(crate) struct PostsArgs {
    /// Page number, starting at 1.
    #[arg(short, long, default_value_t = 1)]
    page: u32,

    /// Posts per page (default: `posts.per_page` from config).
    #[arg(long)]
    per_page: Option<u32>,
}

impl PostsArgs {
    pub(crate) fn execute(self, gateway: &ContentGateway) -> Result<(), CliError> {
        print_json(&gateway.list_posts(self.page, self.per_page))
    }
}

/// Arguments for `press post`.
#[derive(Args)]
pub(crate) struct PostArgs {
    /// Post slug.
    slug: String,
}

impl PostArgs {
    pub(crate) fn execute(self, gateway: &ContentGateway) -> Result<(), CliError> {
        let post = gateway.get_post(&self.slug);
        if post.is_none() {
            Output::new().warning(&format!("No post found for slug '{}'", self.slug));
        }
        print_json(&post)
    }
}

/// Arguments for `press menu`.
#[derive(Args)]
pub(crate) struct MenuArgs {
    /// Menu ID to try first (default: the configured primary menu).
    #[arg(long)]
    id: Option<u64>,
}

impl MenuArgs {
    pub(crate) fn execute(self, gateway: &ContentGateway) -> Result<(), CliError> {
        print_json(&gateway.get_menu(self.id))
    }
}

/// Arguments for `press rewrite-url`.
#[derive(Args)]
pub(crate) struct RewriteUrlArgs {
    /// Image URL to rewrite.
    url: String,
}

impl RewriteUrlArgs {
    pub(crate) fn execute(self, gateway: &ContentGateway) -> Result<(), CliError> {
        let url = gateway.image_rewriter().rewrite(&self.url);
        writeln!(std::io::stdout().lock(), "{url}")?;
        Ok(())
    }
}

pub(crate) fn all_posts(gateway: &ContentGateway) -> Result<(), CliError> {
    print_json(&gateway.list_all_posts())
}

pub(crate) fn count(gateway: &ContentGateway) -> Result<(), CliError> {
    print_json(&json!({ "total": gateway.count_posts() }))
}

pub(crate) fn pages(gateway: &ContentGateway) -> Result<(), CliError> {
    print_json(&gateway.list_pages())
}

pub(crate) fn options(gateway: &ContentGateway) -> Result<(), CliError> {
    print_json(&gateway.get_options())
}
