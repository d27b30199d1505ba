//! Image URL rewriting to the CDN host.

use std::borrow::Cow;

use press_config::ImagesConfig;

/// Replaces the CMS host in image URLs with the CDN host.
///
/// Rewriting is idempotent as long as `cdn_host` does not contain
/// `origin_host`, which config validation enforces.
#[derive(Debug, Clone)]
pub struct ImageRewriter {
    origin_host: String,
    cdn_host: String,
}

impl ImageRewriter {
    /// Create a rewriter replacing `origin_host` with `cdn_host`.
    pub fn new(origin_host: impl Into<String>, cdn_host: impl Into<String>) -> Self {
        Self {
            origin_host: origin_host.into(),
            cdn_host: cdn_host.into(),
        }
    }

    /// Create a rewriter from the `[images]` config section.
    pub fn from_config(config: &ImagesConfig) -> Self {
        Self::new(config.origin_host.clone(), config.cdn_host.clone())
    }

    /// Rewrite a URL. URLs without the origin host are borrowed back unchanged.
    ///
    /// Only the host part is touched; the origin host showing up again in the
    /// path or query is left alone.
    pub fn rewrite<'a>(&self, url: &'a str) -> Cow<'a, str> {
        if self.origin_host.is_empty() {
            return Cow::Borrowed(url);
        }
        let start = url.find("://").map_or(0, |i| i + 3);
        let end = url[start..]
            .find(['/', '?', '#'])
            .map_or(url.len(), |i| start + i);
        match url[start..end].find(self.origin_host.as_str()) {
            Some(offset) => {
                let at = start + offset;
                let mut rewritten = String::with_capacity(url.len() + self.cdn_host.len());
                rewritten.push_str(&url[..at]);
                rewritten.push_str(&self.cdn_host);
                rewritten.push_str(&url[at + self.origin_host.len()..]);
                Cow::Owned(rewritten)
            }
            None => Cow::Borrowed(url),
        }
    }

    /// Rewrite an optional URL; `None` stays `None`.
    pub fn rewrite_opt<'a>(&self, url: Option<&'a str>) -> Option<Cow<'a, str>> {
        url.map(|u| self.rewrite(u))
    }
}
