//! Services the product context consumes from the surrounding platform.
//!
//! Each seam is a trait so a host application can plug in its own router,
//! image cache, price calculator and inventory checker. The default
//! implementations cover a plain storefront setup.

mod availability;
mod pricing;
mod router;
mod thumbnail;

pub use availability::OnHandAvailabilityChecker;
pub use pricing::ChannelPricingCalculator;
pub use router::TemplateRouter;
pub use thumbnail::CacheThumbnailResolver;

use shopfeed_core::{Channel, Variant};

use crate::error::{RoutingError, ThumbnailError};

/// Generates absolute URLs for named routes.
pub trait UrlGenerator: Send + Sync {
    /// # Errors
    ///
    /// Returns [`RoutingError`] if the route is unknown or a required
    /// parameter is missing.
    fn generate(&self, route: &str, params: &[(&str, &str)]) -> Result<String, RoutingError>;

    /// Same as [`UrlGenerator::generate`], but the URL is served from `host`
    /// when one is given. The default ignores the host.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError`] on the same conditions as `generate`, or
    /// [`RoutingError::InvalidHost`] if `host` is not a valid hostname.
    fn generate_on_host(
        &self,
        host: Option<&str>,
        route: &str,
        params: &[(&str, &str)],
    ) -> Result<String, RoutingError> {
        let _ = host;
        self.generate(route, params)
    }
}

/// Resolves an image path to the browser URL of a rendered thumbnail.
pub trait ThumbnailResolver: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ThumbnailError`] if the path or filter cannot be resolved.
    fn browser_path(&self, path: &str, filter: &str) -> Result<String, ThumbnailError>;
}

/// Calculates the selling price of a variant in a channel, in minor units.
pub trait PriceCalculator: Send + Sync {
    fn calculate(&self, variant: &Variant, channel: &Channel) -> Option<i64>;
}

/// Decides whether a variant can currently be sold from stock.
pub trait AvailabilityChecker: Send + Sync {
    fn is_stock_available(&self, variant: &Variant) -> bool;
}
