use std::collections::HashMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use super::UrlGenerator;
use crate::error::RoutingError;

/// Characters left unescaped inside a path placeholder value.
const PATH_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Absolute URL generator over named path templates.
///
/// Templates use `{name}` placeholders, e.g. `/{_locale}/products/{slug}`.
/// Parameters that no placeholder consumes are appended as a query string.
/// Expanded paths are appended to the base URL's own path.
#[derive(Debug, Clone)]
pub struct TemplateRouter {
    base_url: Url,
    routes: HashMap<String, String>,
}

impl TemplateRouter {
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            routes: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_route(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.routes.insert(name.into(), template.into());
        self
    }

    fn expand(
        route: &str,
        template: &str,
        params: &[(&str, &str)],
    ) -> Result<(String, Vec<usize>), RoutingError> {
        let mut path = String::with_capacity(template.len());
        let mut used = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            path.push_str(&rest[..open]);
            let after_open = &rest[open + 1..];
            let Some(close) = after_open.find('}') else {
                // Unbalanced brace: keep the remainder literally.
                path.push_str(&rest[open..]);
                rest = "";
                break;
            };
            let name = &after_open[..close];
            let (idx, (_, value)) = params
                .iter()
                .enumerate()
                .find(|(_, (key, _))| *key == name)
                .ok_or_else(|| RoutingError::MissingParameter {
                    route: route.to_string(),
                    parameter: name.to_string(),
                })?;
            path.extend(utf8_percent_encode(value, PATH_VALUE));
            used.push(idx);
            rest = &after_open[close + 1..];
        }
        path.push_str(rest);

        Ok((path, used))
    }

    fn build(
        &self,
        host: Option<&str>,
        route: &str,
        params: &[(&str, &str)],
    ) -> Result<String, RoutingError> {
        let template = self
            .routes
            .get(route)
            .ok_or_else(|| RoutingError::RouteNotFound(route.to_string()))?;

        let (path, used) = Self::expand(route, template, params)?;

        let query = params
            .iter()
            .enumerate()
            .filter(|(idx, _)| !used.contains(idx))
            .map(|(_, (key, value))| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, PATH_VALUE),
                    utf8_percent_encode(value, PATH_VALUE)
                )
            })
            .collect::<Vec<_>>();

        let mut url = self.base_url.clone();
        if let Some(host) = host {
            url.set_host(Some(host))
                .map_err(|e| RoutingError::InvalidHost {
                    host: host.to_string(),
                    reason: e.to_string(),
                })?;
        }
        let prefix = self.base_url.path().trim_end_matches('/');
        url.set_path(&format!("{prefix}{path}"));
        if !query.is_empty() {
            url.set_query(Some(&query.join("&")));
        }
        Ok(url.into())
    }
}

impl UrlGenerator for TemplateRouter {
    fn generate(&self, route: &str, params: &[(&str, &str)]) -> Result<String, RoutingError> {
        self.build(None, route, params)
    }

    fn generate_on_host(
        &self,
        host: Option<&str>,
        route: &str,
        params: &[(&str, &str)],
    ) -> Result<String, RoutingError> {
        self.build(host, route, params)
    }
}
