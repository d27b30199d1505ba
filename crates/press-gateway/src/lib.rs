//! WordPress content gateway for Press.
//!
//! Fetches posts, pages, navigation menus and site options from the
//! WordPress REST API at build time:
//! - [`ContentGateway`]: one method per content intent, each with a `try_*`
//!   variant returning [`GatewayError`] and a non-failing variant that logs
//!   and degrades to an empty value
//! - [`ImageRewriter`]: rewrites CMS image URLs to the CDN host
//! - [`Transport`]: the HTTP seam, backed by `ureq` ([`UreqTransport`]) or
//!   canned responses ([`MockTransport`], behind the `mock` feature)
//!
//! # Example
//!
//! ```ignore
//! use press_config::Config;
//! use press_gateway::ContentGateway;
//!
//! let config = Config::load(None, None)?;
//! let gateway = ContentGateway::new(&config);
//!
//! let page = gateway.list_posts(1, None);
//! println!("{} of {} posts", page.posts.len(), page.total_posts);
//! let menu = gateway.get_menu(None);
//! ```

mod client;
pub use client::{ContentGateway, TOTAL_HEADER, TOTAL_PAGES_HEADER};

mod images;
pub use images::ImageRewriter;

#[cfg(any(test, feature = "mock"))]
mod mock;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;

mod transport;
pub use transport::{HttpResponse, Transport, UreqTransport};

mod types;
pub use types::{MenuItem, Options, Page, PageResult, Post, Rendered};

pub mod error;
pub use error::{FailureKind, GatewayError};
