//! Post operations for the WordPress REST API.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use press_config::MAX_PER_PAGE;
use tracing::info;

use super::{ContentGateway, TOTAL_HEADER, TOTAL_PAGES_HEADER, degrade, header_count};
use crate::error::GatewayError;
use crate::types::{PageResult, Post};

/// RFC 3986 unreserved characters: A-Z a-z 0-9 - . _ ~
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

impl ContentGateway {
    /// Get one page of posts with embedded relations.
    ///
    /// `page` starts at 1; 0 is treated as 1. `per_page` defaults to the
    /// configured page size and is clamped to the API maximum of 100.
    pub fn try_list_posts(
        &self,
        page: u32,
        per_page: Option<u32>,
    ) -> Result<PageResult, GatewayError> {
        let page = page.max(1);
        let per_page = self.page_size(per_page);
        let url = format!(
            "{}/posts?_embed&per_page={}&page={}",
            self.api_url, per_page, page
        );

        let response = self.fetch(&url)?;
        let posts: Vec<Post> = serde_json::from_slice(&response.body)?;
        let result = PageResult {
            posts,
            total_pages: header_count(&response, TOTAL_PAGES_HEADER),
            total_posts: header_count(&response, TOTAL_HEADER),
        };

        info!(
            "Fetched {} posts (page {} of {})",
            result.posts.len(),
            page,
            result.total_pages
        );
        Ok(result)
    }

    /// Get one page of posts, or an empty [`PageResult`] on failure.
    pub fn list_posts(&self, page: u32, per_page: Option<u32>) -> PageResult {
        degrade("list_posts", self.try_list_posts(page, per_page))
    }

    /// Get up to `bulk_limit` (default 100) posts with embedded relations.
    pub fn try_list_all_posts(&self) -> Result<Vec<Post>, GatewayError> {
        let url = format!("{}/posts?_embed&per_page={}", self.api_url, self.bulk_limit);
        let posts: Vec<Post> = self.fetch_json(&url)?;
        info!("Fetched {} posts", posts.len());
        Ok(posts)
    }

    /// Get up to `bulk_limit` posts, or an empty list on failure.
    pub fn list_all_posts(&self) -> Vec<Post> {
        degrade("list_all_posts", self.try_list_all_posts())
    }

    /// Total number of published posts, read from `X-WP-Total`.
    pub fn try_count_posts(&self) -> Result<u64, GatewayError> {
        let url = format!("{}/posts?per_page=1", self.api_url);
        let response = self.fetch(&url)?;
        Ok(header_count(&response, TOTAL_HEADER))
    }

    /// Total number of published posts, or 0 on failure.
    pub fn count_posts(&self) -> u64 {
        degrade("count_posts", self.try_count_posts())
    }

    /// Find a post by slug. `Ok(None)` when no post matches.
    pub fn try_get_post(&self, slug: &str) -> Result<Option<Post>, GatewayError> {
        let url = format!(
            "{}/posts?slug={}&_embed",
            self.api_url,
            utf8_percent_encode(slug, QUERY_ENCODE_SET)
        );
        let posts: Vec<Post> = self.fetch_json(&url)?;
        Ok(posts.into_iter().next())
    }

    /// Find a post by slug.
    ///
    /// Returns `None` both when nothing matches and when the request fails;
    /// use [`ContentGateway::try_get_post`] to tell the two apart.
    pub fn get_post(&self, slug: &str) -> Option<Post> {
        degrade("get_post", self.try_get_post(slug))
    }

    /// Featured image URL of a post, rewritten to the CDN host.
    pub fn featured_image_url(&self, post: &Post) -> Option<String> {
        self.images
            .rewrite_opt(post.featured_image_url())
            .map(std::borrow::Cow::into_owned)
    }

    fn page_size(&self, requested: Option<u32>) -> u32 {
        match requested {
            Some(n) if n > 0 => n.min(MAX_PER_PAGE),
            _ => self.per_page,
        }
    }
}
