//! Page operations for the WordPress REST API.

use tracing::info;

use super::{ContentGateway, degrade};
use crate::error::GatewayError;
use crate::types::Page;

impl ContentGateway {
    /// Get all pages (first page of the API's default size).
    pub fn try_list_pages(&self) -> Result<Vec<Page>, GatewayError> {
        let url = format!("{}/pages", self.api_url);
        let pages: Vec<Page> = self.fetch_json(&url)?;
        info!("Fetched {} pages", pages.len());
        Ok(pages)
    }

    /// Get all pages, or an empty list on failure.
    pub fn list_pages(&self) -> Vec<Page> {
        degrade("list_pages", self.try_list_pages())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::super::test_support::{API, gateway};
    use crate::mock::MockTransport;

    #[test]
    fn test_list_pages() {
        let url = format!("{API}/pages");
        let mock = Arc::new(MockTransport::new().with_json(
            url.clone(),
            200,
            json!([
                {"id": 1, "slug": "about", "title": {"rendered": "About"}},
                {"id": 2, "slug": "contact", "title": {"rendered": "Contact"}}
            ]),
        ));

        let pages = gateway(&mock).list_pages();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].slug, "contact");
        assert_eq!(mock.requests(), vec![url]);
    }

    #[test]
    fn test_list_pages_with_null_excerpt() {
        let url = format!("{API}/pages");
        let mock = Arc::new(MockTransport::new().with_json(
            url,
            200,
            json!([
                {"id": 1, "slug": "about", "excerpt": {"rendered": "<p>Hi</p>"}},
                {"id": 2, "slug": "contact", "excerpt": null, "title": {"rendered": null}}
            ]),
        ));

        let pages = gateway(&mock).list_pages();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].excerpt, None);
        assert_eq!(pages[1].title_text(), "");
    }

    #[test]
    fn test_list_pages_failures_are_empty() {
        let url = format!("{API}/pages");

        let status = Arc::new(MockTransport::new().with_json(url.clone(), 500, json!({})));
        let shape = Arc::new(MockTransport::new().with_json(url, 200, json!({"not": "a list"})));
        let down = Arc::new(MockTransport::unreachable());

        assert!(gateway(&status).list_pages().is_empty());
        assert!(gateway(&shape).list_pages().is_empty());
        assert!(gateway(&down).list_pages().is_empty());
    }
}
