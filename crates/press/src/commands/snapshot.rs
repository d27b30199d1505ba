//! `press snapshot` command implementation.
//!
//! Fetches everything a static build needs in one go and writes it as a
//! single JSON document.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;
use press_gateway::{ContentGateway, MenuItem, Options, Page, Post};
use serde::Serialize;
use tracing::warn;

use crate::error::CliError;
use crate::output::{Output, print_json, write_json};

/// Arguments for the snapshot command.
#[derive(Args)]
pub(crate) struct SnapshotArgs {
    /// Output file (default: stdout).
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Menu ID to try first (default: the configured primary menu).
    #[arg(long)]
    menu_id: Option<u64>,
}

/// All site content fetched for a build.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Snapshot {
    pub(crate) api_url: String,
    pub(crate) site_root: String,
    pub(crate) total_posts: u64,
    pub(crate) posts: Vec<Post>,
    pub(crate) pages: Vec<Page>,
    pub(crate) menu: Vec<MenuItem>,
    pub(crate) options: Options,
    /// Featured image per post slug, already pointing at the CDN.
    pub(crate) featured_images: BTreeMap<String, String>,
}

impl Snapshot {
    /// Fetch every content section. Failed sections are empty.
    pub(crate) fn fetch(gateway: &ContentGateway, menu_id: Option<u64>) -> Self {
        let posts = gateway.list_all_posts();
        let featured_images = posts
            .iter()
            .filter_map(|post| Some((post.slug.clone(), gateway.featured_image_url(post)?)))
            .collect();

        Self {
            api_url: gateway.api_url().to_owned(),
            site_root: gateway.site_root().to_owned(),
            total_posts: gateway.count_posts(),
            posts,
            pages: gateway.list_pages(),
            menu: gateway.get_menu(menu_id),
            options: gateway.get_options(),
            featured_images,
        }
    }

    /// Names of sections that came back empty.
    pub(crate) fn empty_sections(&self) -> Vec<&'static str> {
        let mut empty = Vec::new();
        if self.posts.is_empty() {
            empty.push("posts");
        }
        if self.pages.is_empty() {
            empty.push("pages");
        }
        if self.menu.is_empty() {
            empty.push("menu");
        }
        if self.options.is_empty() {
            empty.push("options");
        }
        empty
    }
}

impl SnapshotArgs {
    /// Execute the snapshot command.
    ///
    /// # Errors
    ///
    /// Returns an error only if the output cannot be written.
    pub(crate) fn execute(self, gateway: &ContentGateway) -> Result<(), CliError> {
        let output = Output::new();
        output.info(&format!("Fetching content from {}...", gateway.api_url()));

        let snapshot = Snapshot::fetch(gateway, self.menu_id);

        let empty = snapshot.empty_sections();
        if !empty.is_empty() {
            warn!(sections = ?empty, "snapshot has empty sections");
            output.warning(&format!("Empty sections: {}", empty.join(", ")));
        }

        match &self.out {
            Some(path) => {
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    std::fs::create_dir_all(parent)?;
                }
                write_json(BufWriter::new(File::create(path)?), &snapshot)?;
                output.success(&format!(
                    "Wrote {} posts, {} pages to {}",
                    snapshot.posts.len(),
                    snapshot.pages.len(),
                    path.display()
                ));
            }
            None => print_json(&snapshot)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use press_config::{ApiConfig, Config};
    use press_gateway::MockTransport;
    use serde_json::json;

    use super::*;

    const API: &str = "https://wp.emigrantai.lt/wp-json/wp/v2";
    const SITE: &str = "https://wp.emigrantai.lt";

    fn config() -> Config {
        Config {
            api: ApiConfig {
                base_url: API.to_owned(),
                ..ApiConfig::default()
            },
            ..Config::default()
        }
    }

    fn full_mock() -> MockTransport {
        MockTransport::new()
            .with_json(
                format!("{API}/posts?_embed&per_page=100"),
                200,
                json!([
                    {
                        "id": 1,
                        "slug": "first",
                        "_embedded": {"wp:featuredmedia": [{"source_url": "https://wp.emigrantai.lt/wp-content/uploads/1.jpg"}]}
                    },
                    {"id": 2, "slug": "second"}
                ]),
            )
            .with_response(
                format!("{API}/posts?per_page=1"),
                press_gateway::HttpResponse::json(200, &json!([{"id": 1}]))
                    .with_header("X-WP-Total", "2"),
            )
            .with_json(format!("{API}/pages"), 200, json!([{"id": 9, "slug": "about"}]))
            .with_json(
                format!("{SITE}/wp-json/menus/v1/menus/2"),
                200,
                json!({"items": [{"ID": 1, "title": "Home", "url": "/"}]}),
            )
            .with_json(
                format!("{SITE}/wp-json/custom/v1/options"),
                200,
                json!({"phone": "123"}),
            )
    }

    #[test]
    fn test_fetch_snapshot() {
        let mock = Arc::new(full_mock());
        let gateway = ContentGateway::with_transport(&config(), Arc::clone(&mock));

        let snapshot = Snapshot::fetch(&gateway, None);

        assert_eq!(snapshot.site_root, SITE);
        assert_eq!(snapshot.total_posts, 2);
        assert_eq!(snapshot.posts.len(), 2);
        assert_eq!(snapshot.pages[0].slug, "about");
        assert_eq!(snapshot.menu[0].title, "Home");
        assert_eq!(snapshot.options["phone"], json!("123"));
        assert_eq!(
            snapshot.featured_images,
            BTreeMap::from([(
                "first".to_owned(),
                "https://cdn.emigrantai.lt/wp-content/uploads/1.jpg".to_owned()
            )])
        );
        assert!(snapshot.empty_sections().is_empty());
    }

    #[test]
    fn test_fetch_snapshot_offline() {
        let mock = Arc::new(MockTransport::unreachable());
        let gateway = ContentGateway::with_transport(&config(), Arc::clone(&mock));

        let snapshot = Snapshot::fetch(&gateway, None);

        assert_eq!(snapshot.total_posts, 0);
        assert_eq!(
            snapshot.empty_sections(),
            vec!["posts", "pages", "menu", "options"]
        );
    }

    #[test]
    fn test_execute_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("build").join("content.json");
        let gateway = ContentGateway::with_transport(&config(), full_mock());

        SnapshotArgs {
            out: Some(out.clone()),
            menu_id: None,
        }
        .execute(&gateway)
        .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(written["totalPosts"], json!(2));
        assert_eq!(written["apiUrl"], json!(API));
        assert_eq!(written["menu"][0]["ID"], json!(1));
        assert_eq!(
            written["featuredImages"]["first"],
            json!("https://cdn.emigrantai.lt/wp-content/uploads/1.jpg")
        );
    }

    #[test]
    fn test_execute_offline_writes_empty_sections() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("content.json");
        let gateway =
            ContentGateway::with_transport(&config(), Arc::new(MockTransport::unreachable()));

        SnapshotArgs {
            out: Some(out.clone()),
            menu_id: None,
        }
        .execute(&gateway)
        .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(written["totalPosts"], json!(0));
        assert_eq!(written["posts"], json!([]));
        assert_eq!(written["options"], json!({}));
    }
}
