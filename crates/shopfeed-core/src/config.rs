use url::Url;

use crate::app_config::{AppConfig, BaseConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_THUMBNAIL_FILTER: &str = "sylius_shop_product_large_thumbnail";
pub const DEFAULT_PRODUCT_ROUTE: &str = "/{_locale}/products/{slug}";

/// Load the base configuration (environment, logging, catalog path).
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars,
/// so later `*_from_env` loaders see the same values.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid.
pub fn load_base_config() -> Result<BaseConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_base_config(|key| std::env::var(key))
}

/// Load application configuration from environment variables already in the process.
///
/// Does NOT load `.env` files; call [`load_base_config`] first for that.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

fn build_base_config<F>(lookup: F) -> Result<BaseConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    Ok(BaseConfig {
        env: parse_environment(&or_default("SHOPFEED_ENV", "development"))?,
        log_level: or_default("SHOPFEED_LOG_LEVEL", "info"),
        catalog_path: PathBuf::from(or_default(
            "SHOPFEED_CATALOG_PATH",
            "./config/channels.yaml",
        )),
    })
}

/// Build application configuration using the provided env-var lookup function,
/// so parsing can be tested with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let BaseConfig {
        env,
        log_level,
        catalog_path,
    } = build_base_config(&lookup)?;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let base_url = parse_base_url("SHOPFEED_BASE_URL", &require("SHOPFEED_BASE_URL")?)?;
    let media_base_url = match lookup("SHOPFEED_MEDIA_BASE_URL") {
        Ok(raw) => parse_base_url("SHOPFEED_MEDIA_BASE_URL", &raw)?,
        Err(_) => base_url.clone(),
    };

    let thumbnail_filter = or_default("SHOPFEED_THUMBNAIL_FILTER", DEFAULT_THUMBNAIL_FILTER);

    let product_route = or_default("SHOPFEED_PRODUCT_ROUTE", DEFAULT_PRODUCT_ROUTE);
    if !product_route.starts_with('/') || !product_route.contains("{slug}") {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPFEED_PRODUCT_ROUTE".to_string(),
            reason: "must start with '/' and contain a {slug} placeholder".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        base_url,
        media_base_url,
        catalog_path,
        thumbnail_filter,
        product_route,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPFEED_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Parses an absolute http(s) URL with a host and no query or fragment.
/// A trailing slash on the path is dropped.
fn parse_base_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(format!("'{raw}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("'{raw}' is not an http(s) URL")));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid(format!("'{raw}' has no host")));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(format!(
            "'{raw}' must not carry a query string or fragment"
        )));
    }

    let path = url.path().trim_end_matches('/').to_string();
    url.set_path(&path);
    Ok(url)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
