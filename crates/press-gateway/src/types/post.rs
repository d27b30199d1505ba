//! WordPress post and page types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::null_as_default;

/// WordPress post.
///
/// Common fields are typed; everything else (taxonomies, meta, `_links`)
/// is kept in [`Post::extra`] and written back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Post {
    /// Post ID.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    /// URL slug.
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    /// Publication date (site timezone, ISO 8601 without offset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Permalink.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Post title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Rendered>,
    /// Post body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Rendered>,
    /// Post excerpt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<Rendered>,
    /// Featured media attachment ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<u64>,
    /// Embedded relations, present when requested with `_embed`.
    #[serde(rename = "_embedded", default, skip_serializing_if = "Option::is_none")]
    pub embedded: Option<Value>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// WordPress page. Pages share the post shape.
pub type Page = Post;

impl Post {
    /// Rendered title HTML.
    pub fn title_text(&self) -> &str {
        self.title.as_ref().map_or("", |title| title.rendered.as_str())
    }

    /// Source URL of the embedded featured image, if any.
    pub fn featured_image_url(&self) -> Option<&str> {
        self.embedded
            .as_ref()?
            .get("wp:featuredmedia")?
            .get(0)?
            .get("source_url")?
            .as_str()
    }
}

/// Field carrying rendered HTML, e.g. `{"rendered": "<p>Hi</p>"}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Rendered {
    /// Rendered HTML.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rendered: String,
    /// Other keys such as `protected`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of a paginated post listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    /// Posts on this page.
    pub posts: Vec<Post>,
    /// Total number of pages, from `X-WP-TotalPages`.
    pub total_pages: u64,
    /// Total number of posts, from `X-WP-Total`.
    pub total_posts: u64,
}
