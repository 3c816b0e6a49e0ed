use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("SHOPFEED_BASE_URL", "https://shop.example.com");
    m
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SHOPFEED_ENV"));
}

#[test]
fn build_app_config_fails_without_base_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SHOPFEED_BASE_URL"),
        "expected MissingEnvVar(SHOPFEED_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).expect("expected Ok");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.base_url.as_str(), "https://shop.example.com/");
    assert_eq!(cfg.media_base_url, cfg.base_url);
    assert_eq!(cfg.catalog_path.to_str(), Some("./config/channels.yaml"));
    assert_eq!(cfg.thumbnail_filter, "sylius_shop_product_large_thumbnail");
    assert_eq!(cfg.product_route, "/{_locale}/products/{slug}");
}

#[test]
fn build_app_config_strips_trailing_slash_from_path() {
    let mut map = full_env();
    map.insert("SHOPFEED_BASE_URL", "https://shop.example.com/store/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.base_url.as_str(), "https://shop.example.com/store");
}

#[test]
fn build_app_config_rejects_malformed_base_urls() {
    for raw in [
        "https://shop.example.com?ref=feed",
        "https://shop.example.com/#top",
        "https://exa mple.com",
        "http://:::",
        "mailto:shop@example.com",
    ] {
        let mut map = full_env();
        map.insert("SHOPFEED_BASE_URL", raw);
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPFEED_BASE_URL"),
            "expected {raw} to be rejected, got: {result:?}"
        );
    }
}

#[test]
fn build_app_config_rejects_relative_base_url() {
    let mut map = full_env();
    map.insert("SHOPFEED_BASE_URL", "shop.example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPFEED_BASE_URL"),
        "got: {result:?}"
    );
}

#[test]
fn build_app_config_media_base_url_override() {
    let mut map = full_env();
    map.insert("SHOPFEED_MEDIA_BASE_URL", "https://cdn.example.com/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.media_base_url.as_str(), "https://cdn.example.com/");
}

#[test]
fn build_app_config_rejects_invalid_media_base_url() {
    let mut map = full_env();
    map.insert("SHOPFEED_MEDIA_BASE_URL", "ftp://cdn.example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPFEED_MEDIA_BASE_URL")
    );
}

#[test]
fn build_app_config_rejects_media_base_url_with_query() {
    let mut map = full_env();
    map.insert("SHOPFEED_MEDIA_BASE_URL", "https://cdn.example.com/?v=2");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPFEED_MEDIA_BASE_URL")
    );
}

#[test]
fn build_base_config_does_not_need_base_url() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("SHOPFEED_CATALOG_PATH", "/etc/shopfeed/channels.yaml");
    let cfg = build_base_config(lookup_from_map(&map)).expect("expected Ok");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.catalog_path.to_str(), Some("/etc/shopfeed/channels.yaml"));
}

#[test]
fn build_base_config_rejects_unknown_environment() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("SHOPFEED_ENV", "staging");
    let result = build_base_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPFEED_ENV"));
}

#[test]
fn build_app_config_product_route_override() {
    let mut map = full_env();
    map.insert("SHOPFEED_PRODUCT_ROUTE", "/p/{slug}");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.product_route, "/p/{slug}");
}

#[test]
fn build_app_config_rejects_route_without_slug() {
    let mut map = full_env();
    map.insert("SHOPFEED_PRODUCT_ROUTE", "/products/{id}");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPFEED_PRODUCT_ROUTE")
    );
}

#[test]
fn build_app_config_reads_environment_and_log_level() {
    let mut map = full_env();
    map.insert("SHOPFEED_ENV", "production");
    map.insert("SHOPFEED_LOG_LEVEL", "shopfeed_context=debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "shopfeed_context=debug");
}
