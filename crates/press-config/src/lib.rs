//! Configuration management for Press.
//!
//! Parses `press.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! The API base URL is resolved once, in order of precedence:
//!
//! 1. CLI settings ([`CliSettings`])
//! 2. The `WP_API_URL` environment variable (ignored when empty)
//! 3. `api.base_url` from the config file
//! 4. The built-in default, [`DEFAULT_API_URL`]
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `api.base_url`
//! - `images.origin_host`
//! - `images.cdn_host`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "WP_API_URL";

/// API base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://wp.emigrantai.lt/wp-json/wp/v2";

/// REST path suffix removed from the API base URL to get the site root.
pub const REST_PATH: &str = "/wp-json/wp/v2";

/// Largest page size the WordPress REST API accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "press.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override API base URL.
    pub api_url: Option<String>,
    /// Override HTTP timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote API configuration.
    pub api: ApiConfig,
    /// Image URL rewriting.
    pub images: ImagesConfig,
    /// Navigation menu lookup.
    pub menu: MenuConfig,
    /// Post listing defaults.
    pub posts: PostsConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Remote API configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// WordPress REST API root, e.g. `https://example.com/wp-json/wp/v2`.
    pub base_url: String,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// API base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Site root derived by removing [`REST_PATH`] from the base URL.
    ///
    /// Plugin endpoints (menus, options) live under the site root rather
    /// than under the `wp/v2` namespace.
    #[must_use]
    pub fn site_root(&self) -> String {
        self.base_url()
            .replacen(REST_PATH, "", 1)
            .trim_end_matches('/')
            .to_owned()
    }

    /// HTTP timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Image URL rewriting configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Host substring identifying images served by the CMS.
    pub origin_host: String,
    /// Host substituted for `origin_host`.
    pub cdn_host: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            origin_host: "wp.emigrantai.lt".to_owned(),
            cdn_host: "cdn.emigrantai.lt".to_owned(),
        }
    }
}

/// Navigation menu configuration.
///
/// The two ids form the fallback pair: each one is the alternate of the other.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Menu tried first when no id is requested.
    pub primary_id: u64,
    /// Menu tried when the primary one is empty or unavailable.
    pub fallback_id: u64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            primary_id: 2,
            fallback_id: 4,
        }
    }
}

/// Post listing configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PostsConfig {
    /// Default page size for paged listings.
    pub per_page: u32,
    /// Cap for the "all posts" listing.
    pub bulk_limit: u32,
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            per_page: 9,
            bulk_limit: MAX_PER_PAGE,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`api.base_url`").
        field: String,
        /// Error message (e.g., "${`WP_HOST`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `press.toml` in current directory and parents,
    /// falling back to built-in defaults when none is found.
    ///
    /// The `WP_API_URL` environment variable and CLI settings are applied
    /// after loading, then the result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        config.apply_env_overrides(|name| std::env::var(name).ok());

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides using the given variable lookup.
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.is_empty()) {
            self.api.base_url = url;
        }
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(api_url) = &settings.api_url {
            self.api.base_url.clone_from(api_url);
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.api.timeout_secs = timeout_secs;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars(|name| std::env::var(name).ok())?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_api()?;
        self.validate_images()?;
        self.validate_menu()?;
        self.validate_posts()?;
        Ok(())
    }

    fn validate_api(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.api.base_url, "api.base_url")?;
        require_http_url(&self.api.base_url, "api.base_url")?;
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_images(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.images.origin_host, "images.origin_host")?;
        require_non_empty(&self.images.cdn_host, "images.cdn_host")?;
        // A CDN host containing the origin would be rewritten again on every pass
        if self.images.cdn_host.contains(&self.images.origin_host) {
            return Err(ConfigError::Validation(
                "images.cdn_host must not contain images.origin_host".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_menu(&self) -> Result<(), ConfigError> {
        if self.menu.primary_id == 0 || self.menu.fallback_id == 0 {
            return Err(ConfigError::Validation(
                "menu ids must be greater than 0".to_owned(),
            ));
        }
        if self.menu.primary_id == self.menu.fallback_id {
            return Err(ConfigError::Validation(
                "menu.primary_id and menu.fallback_id must differ".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_posts(&self) -> Result<(), ConfigError> {
        for (value, field) in [
            (self.posts.per_page, "posts.per_page"),
            (self.posts.bulk_limit, "posts.bulk_limit"),
        ] {
            if value == 0 || value > MAX_PER_PAGE {
                return Err(ConfigError::Validation(format!(
                    "{field} must be between 1 and {MAX_PER_PAGE}"
                )));
            }
        }
        Ok(())
    }

    /// Expand `${VAR}` references in the string fields that accept them.
    fn expand_env_vars(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        for (value, field) in [
            (&mut self.api.base_url, "api.base_url"),
            (&mut self.images.origin_host, "images.origin_host"),
            (&mut self.images.cdn_host, "images.cdn_host"),
        ] {
            *value = expand::expand_vars(value, field, &lookup)?;
        }
        Ok(())
    }
}
