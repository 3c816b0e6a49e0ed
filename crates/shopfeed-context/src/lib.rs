//! Feed item contexts: turn catalog products into Google Shopping feed items.

pub mod collaborators;
pub mod error;
pub mod mapper;
mod raw;

pub use collaborators::{
    AvailabilityChecker, CacheThumbnailResolver, ChannelPricingCalculator,
    OnHandAvailabilityChecker, PriceCalculator, TemplateRouter, ThumbnailResolver, UrlGenerator,
};
pub use error::{ContextError, RoutingError, ThumbnailError};
pub use mapper::{ItemContext, ProductItemMapper, LARGE_THUMBNAIL_FILTER, PRODUCT_SHOW_ROUTE};
