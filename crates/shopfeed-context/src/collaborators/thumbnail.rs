use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use super::ThumbnailResolver;
use crate::error::ThumbnailError;

/// Like a path value, but `/` separates stored directories and stays as-is.
const MEDIA_PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Resolves thumbnails to the image cache layout
/// `<media base>/media/cache/<filter>/<path>`.
#[derive(Debug, Clone)]
pub struct CacheThumbnailResolver {
    media_base_url: Url,
}

impl CacheThumbnailResolver {
    #[must_use]
    pub fn new(media_base_url: Url) -> Self {
        Self { media_base_url }
    }
}

impl ThumbnailResolver for CacheThumbnailResolver {
    fn browser_path(&self, path: &str, filter: &str) -> Result<String, ThumbnailError> {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return Err(ThumbnailError::EmptyPath);
        }
        if filter.is_empty() {
            return Err(ThumbnailError::EmptyFilter);
        }

        let mut url = self.media_base_url.clone();
        url.set_path(&format!(
            "{}/media/cache/{}/{}",
            self.media_base_url.path().trim_end_matches('/'),
            utf8_percent_encode(filter, MEDIA_PATH),
            utf8_percent_encode(path, MEDIA_PATH)
        ));
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(raw: &str) -> CacheThumbnailResolver {
        CacheThumbnailResolver::new(Url::parse(raw).expect("valid test URL"))
    }

    #[test]
    fn browser_path_builds_cache_url() {
        let resolver = resolver("https://cdn.example.com/");
        let url = resolver
            .browser_path("ab/cd/hoodie.jpg", "sylius_shop_product_large_thumbnail")
            .unwrap();
        assert_eq!(
            url,
            "https://cdn.example.com/media/cache/sylius_shop_product_large_thumbnail/ab/cd/hoodie.jpg"
        );
    }

    #[test]
    fn browser_path_strips_leading_slash_and_encodes() {
        let resolver = resolver("https://cdn.example.com");
        let url = resolver.browser_path("/summer sale.png", "large").unwrap();
        assert_eq!(url, "https://cdn.example.com/media/cache/large/summer%20sale.png");
    }

    #[test]
    fn browser_path_rejects_empty_path() {
        let resolver = resolver("https://cdn.example.com");
        assert_eq!(
            resolver.browser_path("", "large").unwrap_err(),
            ThumbnailError::EmptyPath
        );
    }

    #[test]
    fn browser_path_rejects_empty_filter() {
        let resolver = resolver("https://cdn.example.com");
        assert_eq!(
            resolver.browser_path("a.jpg", "").unwrap_err(),
            ThumbnailError::EmptyFilter
        );
    }

    #[test]
    fn browser_path_keeps_media_base_path() {
        let resolver = resolver("https://shop.example.com/assets");
        let url = resolver.browser_path("ab/mug.jpg", "large").unwrap();
        assert_eq!(url, "https://shop.example.com/assets/media/cache/large/ab/mug.jpg");
    }
}
