//! WordPress REST API gateway.
//!
//! Every operation comes in two flavours:
//! - `try_*` returns `Result<_, GatewayError>` so callers and tests can see
//!   why a request failed;
//! - the plain variant logs the failure and returns the operation's default
//!   (empty list, empty map, zero, or `None`), so a failing remote call never
//!   aborts a static build.

mod menus;
mod options;
mod pages;
mod posts;

use std::borrow::Cow;

use press_config::{Config, MAX_PER_PAGE, MenuConfig};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::GatewayError;
use crate::images::ImageRewriter;
use crate::transport::{HttpResponse, Transport, UreqTransport};

/// Header carrying the total number of items of a list endpoint.
pub const TOTAL_HEADER: &str = "X-WP-Total";

/// Header carrying the total number of pages of a list endpoint.
pub const TOTAL_PAGES_HEADER: &str = "X-WP-TotalPages";

/// Longest error body kept in [`GatewayError::HttpResponse`].
const MAX_ERROR_BODY: usize = 512;

/// Content gateway for a WordPress site.
///
/// Holds no per-request state, so a single instance can be shared across
/// threads and called concurrently.
pub struct ContentGateway {
    transport: Box<dyn Transport>,
    api_url: String,
    site_root: String,
    per_page: u32,
    bulk_limit: u32,
    menu: MenuConfig,
    images: ImageRewriter,
}

impl ContentGateway {
    /// Create gateway talking HTTP through `ureq`.
    pub fn new(config: &Config) -> Self {
        Self::with_transport(config, UreqTransport::new(config.api.timeout()))
    }

    /// Create gateway with a custom transport.
    pub fn with_transport(config: &Config, transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            api_url: config.api.base_url().to_owned(),
            site_root: config.api.site_root(),
            per_page: config.posts.per_page.clamp(1, MAX_PER_PAGE),
            bulk_limit: config.posts.bulk_limit.clamp(1, MAX_PER_PAGE),
            menu: config.menu.clone(),
            images: ImageRewriter::from_config(&config.images),
        }
    }

    /// REST API root, e.g. `https://example.com/wp-json/wp/v2`.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Site root, e.g. `https://example.com`.
    pub fn site_root(&self) -> &str {
        &self.site_root
    }

    /// Image URL rewriter.
    pub fn image_rewriter(&self) -> &ImageRewriter {
        &self.images
    }

    /// Rewrite an image URL to the CDN host.
    ///
    /// Absent and empty input is returned unchanged.
    pub fn rewrite_image_url<'a>(&self, url: Option<&'a str>) -> Option<Cow<'a, str>> {
        self.images.rewrite_opt(url)
    }

    /// Issue a `GET` and require a 2xx status.
    fn fetch(&self, url: &str) -> Result<HttpResponse, GatewayError> {
        debug!("GET {}", url);

        let response = self.transport.get(url)?;
        if !response.is_success() {
            let body = String::from_utf8_lossy(&response.body);
            return Err(GatewayError::HttpResponse {
                status: response.status,
                body: truncate(&body, MAX_ERROR_BODY).to_owned(),
            });
        }
        Ok(response)
    }

    /// Issue a `GET` and decode the JSON body.
    fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GatewayError> {
        let response = self.fetch(url)?;
        Ok(serde_json::from_slice(&response.body)?)
    }
}

/// Unwrap `result`, logging the failure and falling back to the default.
fn degrade<T: Default>(operation: &str, result: Result<T, GatewayError>) -> T {
    result.unwrap_or_else(|err| {
        warn!(operation, kind = %err.kind(), "content request failed: {err}");
        T::default()
    })
}

/// Read a numeric pagination header; missing or malformed values count as 0.
fn header_count(response: &HttpResponse, name: &str) -> u64 {
    response
        .header(name)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or_else(|| {
            debug!("missing or invalid {} header", name);
            0
        })
}

/// Cut `s` to at most `max` bytes on a char boundary.
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::test_support::{API, SITE, config, gateway};
    use super::*;
    use crate::error::FailureKind;
    use crate::mock::MockTransport;

    #[test]
    fn test_urls_from_config() {
        let mock = Arc::new(MockTransport::new());
        let gateway = gateway(&mock);
        assert_eq!(gateway.api_url(), API);
        assert_eq!(gateway.site_root(), SITE);
    }

    #[test]
    fn test_fetch_non_success_is_status_error() {
        let mock = Arc::new(MockTransport::new().with_response(
            format!("{API}/pages"),
            HttpResponse::new(500).with_body("boom"),
        ));
        let err = gateway(&mock).fetch(&format!("{API}/pages")).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Status);
        assert!(matches!(
            err,
            GatewayError::HttpResponse { status: 500, ref body } if body == "boom"
        ));
    }

    #[test]
    fn test_fetch_json_decode_error() {
        let mock = Arc::new(MockTransport::new().with_response(
            format!("{API}/pages"),
            HttpResponse::new(200).with_body("<html>maintenance</html>"),
        ));
        let err = gateway(&mock)
            .fetch_json::<Vec<serde_json::Value>>(&format!("{API}/pages"))
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Decode);
    }

    #[test]
    fn test_rewrite_image_url() {
        let mock = Arc::new(MockTransport::new());
        let mut config = config();
        config.images.origin_host = "cms.test".to_owned();
        config.images.cdn_host = "cdn.test".to_owned();
        let gateway = ContentGateway::with_transport(&config, Arc::clone(&mock));

        assert_eq!(
            gateway
                .rewrite_image_url(Some("https://cms.test/wp-content/uploads/a.jpg"))
                .as_deref(),
            Some("https://cdn.test/wp-content/uploads/a.jpg")
        );
        assert_eq!(gateway.rewrite_image_url(None), None);
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn test_unreachable_api_degrades_everywhere() {
        let mock = Arc::new(MockTransport::unreachable());
        let gateway = gateway(&mock);

        assert_eq!(gateway.list_posts(1, None), crate::PageResult::default());
        assert!(gateway.list_all_posts().is_empty());
        assert_eq!(gateway.count_posts(), 0);
        assert_eq!(gateway.get_post("any"), None);
        assert!(gateway.list_pages().is_empty());
        assert!(gateway.get_menu(None).is_empty());
        assert!(gateway.get_options().is_empty());
        // Menu lookup tries both ids, everything else issues one request
        assert_eq!(mock.requests().len(), 8);
    }

    #[test]
    fn test_gateway_shared_across_threads() {
        let mock = Arc::new(MockTransport::new().with_json(
            format!("{API}/posts?per_page=1"),
            200,
            serde_json::json!([]),
        ));
        let gateway = gateway(&mock);

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| gateway.list_pages());
                scope.spawn(|| gateway.count_posts());
            }
        });

        assert_eq!(mock.requests().len(), 8);
    }

    #[test]
    fn test_header_count() {
        let response = HttpResponse::new(200)
            .with_header(TOTAL_HEADER, " 20 ")
            .with_header(TOTAL_PAGES_HEADER, "many");
        assert_eq!(header_count(&response, TOTAL_HEADER), 20);
        assert_eq!(header_count(&response, TOTAL_PAGES_HEADER), 0);
        assert_eq!(header_count(&response, "X-Missing"), 0);
    }

    #[test]
    fn test_degrade_returns_default() {
        let err = GatewayError::HttpResponse {
            status: 404,
            body: String::new(),
        };
        assert_eq!(degrade::<Vec<u32>>("test", Err(err)), Vec::<u32>::new());
        assert_eq!(degrade("test", Ok(7_u64)), 7);
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ąčę", 3), "ą");
    }
}
