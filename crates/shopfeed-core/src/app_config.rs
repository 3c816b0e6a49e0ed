use std::path::PathBuf;

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Settings every command needs: environment, logging and the channel
/// catalog location. Does not require a storefront URL.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    pub env: Environment,
    pub log_level: String,
    pub catalog_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Absolute http(s) storefront URL with no query or fragment.
    pub base_url: Url,
    /// Root the image cache is served from; defaults to `base_url`.
    pub media_base_url: Url,
    pub catalog_path: PathBuf,
    /// Rendering profile used for feed image thumbnails.
    pub thumbnail_filter: String,
    /// Path template of the shop product page, with `{slug}` and `{_locale}`.
    pub product_route: String,
}
