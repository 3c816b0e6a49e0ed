//! Mapping from a catalog [`Product`] to Google Shopping [`FeedItem`]s.
//!
//! One feed item is produced per variant. Copy (title, description, link)
//! comes from the product translation for the requested locale, prices from
//! the variant's channel pricing, and brand/GTIN/MPN/size/color from the
//! variant when it sets them, falling back to the product.

use std::sync::Arc;

use serde_json::Value;
use shopfeed_core::{
    AppConfig, Availability, Channel, FeedItem, Locale, Price, Product, ProductTranslation,
    Variant,
};

use crate::collaborators::{
    AvailabilityChecker, CacheThumbnailResolver, ChannelPricingCalculator,
    OnHandAvailabilityChecker, PriceCalculator, TemplateRouter, ThumbnailResolver, UrlGenerator,
};
use crate::error::ContextError;
use crate::raw::decode_product;

/// Route name of the shop product page.
pub const PRODUCT_SHOW_ROUTE: &str = "sylius_shop_product_show";

/// Rendering profile used for feed image links.
pub const LARGE_THUMBNAIL_FILTER: &str = "sylius_shop_product_large_thumbnail";

/// Turns one catalog object into feed items for a channel and locale.
pub trait ItemContext {
    /// # Errors
    ///
    /// Returns [`ContextError`] if the payload has the wrong shape or a
    /// collaborator fails.
    fn context_list(
        &self,
        payload: &Value,
        channel: &Channel,
        locale: &Locale,
    ) -> Result<Vec<FeedItem>, ContextError>;
}

/// Maps catalog products to Google Shopping feed items, one per variant.
///
/// Links are generated through the product show route on the channel's
/// hostname, images through the configured thumbnail filter.
pub struct ProductItemMapper {
    router: Arc<dyn UrlGenerator>,
    thumbnails: Arc<dyn ThumbnailResolver>,
    price_calculator: Arc<dyn PriceCalculator>,
    availability: Arc<dyn AvailabilityChecker>,
    thumbnail_filter: String,
}

impl ProductItemMapper {
    #[must_use]
    pub fn new(
        router: Arc<dyn UrlGenerator>,
        thumbnails: Arc<dyn ThumbnailResolver>,
        price_calculator: Arc<dyn PriceCalculator>,
        availability: Arc<dyn AvailabilityChecker>,
    ) -> Self {
        Self {
            router,
            thumbnails,
            price_calculator,
            availability,
            thumbnail_filter: LARGE_THUMBNAIL_FILTER.to_string(),
        }
    }

    /// Builds a mapper wired to the default collaborators for `config`.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let router = TemplateRouter::new(config.base_url.clone())
            .with_route(PRODUCT_SHOW_ROUTE, config.product_route.clone());
        Self::new(
            Arc::new(router),
            Arc::new(CacheThumbnailResolver::new(config.media_base_url.clone())),
            Arc::new(ChannelPricingCalculator),
            Arc::new(OnHandAvailabilityChecker),
        )
        .with_thumbnail_filter(config.thumbnail_filter.clone())
    }

    #[must_use]
    pub fn with_thumbnail_filter(mut self, filter: impl Into<String>) -> Self {
        self.thumbnail_filter = filter.into();
        self
    }

    /// The injected price calculator. Feed prices are read from channel
    /// pricing directly; the calculator is exposed for hosts that need it.
    #[must_use]
    pub fn price_calculator(&self) -> &dyn PriceCalculator {
        self.price_calculator.as_ref()
    }

    /// Maps `product` to one feed item per variant, in variant order.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Routing`] or [`ContextError::Thumbnail`] when
    /// the router or thumbnail resolver fails. Missing translations, images,
    /// pricing, currency and attributes leave the matching fields unset.
    pub fn map_to_feed_items(
        &self,
        product: &Product,
        channel: &Channel,
        locale: &Locale,
    ) -> Result<Vec<FeedItem>, ContextError> {
        let translation = locale
            .code
            .as_deref()
            .and_then(|code| product.translation(code));
        if translation.is_none() {
            tracing::debug!(
                product = %product.code,
                locale = ?locale.code,
                "no translation for locale; title, description and link left unset"
            );
        }

        let image_link = self.image_link(product)?;
        let link = match translation {
            Some(translation) => self.link(channel, locale, translation)?,
            None => None,
        };
        let condition = product.condition.unwrap_or_default();

        let mut items = Vec::with_capacity(product.variants.len());
        for variant in &product.variants {
            let availability =
                Availability::from_stock(self.availability.is_stock_available(variant));
            let (price, sale_price) = prices(product, variant, channel);

            items.push(FeedItem {
                id: variant.code.clone(),
                item_group_id: product.code.clone(),
                title: translation.and_then(|t| t.name.clone()),
                description: translation.and_then(|t| t.description.clone()),
                link: link.clone(),
                image_link: image_link.clone(),
                availability,
                price,
                sale_price,
                condition,
                brand: prefer_variant(variant.brand.as_ref(), product.brand.as_ref()),
                gtin: prefer_variant(variant.gtin.as_ref(), product.gtin.as_ref()),
                mpn: prefer_variant(variant.mpn.as_ref(), product.mpn.as_ref()),
                size: prefer_variant(variant.size.as_ref(), product.size.as_ref()),
                color: prefer_variant(variant.color.as_ref(), product.color.as_ref()),
            });
        }

        tracing::debug!(
            product = %product.code,
            channel = %channel.code,
            items = items.len(),
            "mapped product to feed items"
        );

        Ok(items)
    }

    /// Decodes an untyped product payload and maps it.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::TypeMismatch`] if `payload` is not a product,
    /// [`ContextError::InvariantViolation`] if one of its variants is not a
    /// variant, and otherwise whatever [`Self::map_to_feed_items`] returns.
    pub fn map_raw(
        &self,
        payload: &Value,
        channel: &Channel,
        locale: &Locale,
    ) -> Result<Vec<FeedItem>, ContextError> {
        let product = decode_product(payload)?;
        self.map_to_feed_items(&product, channel, locale)
    }

    fn image_link(&self, product: &Product) -> Result<Option<String>, ContextError> {
        let Some(image) = product.primary_image() else {
            tracing::debug!(product = %product.code, "product has no images");
            return Ok(None);
        };

        let url = self
            .thumbnails
            .browser_path(&image.path, &self.thumbnail_filter)?;
        Ok(Some(url))
    }

    fn link(
        &self,
        channel: &Channel,
        locale: &Locale,
        translation: &ProductTranslation,
    ) -> Result<Option<String>, ContextError> {
        let (Some(slug), Some(locale_code)) = (&translation.slug, &locale.code) else {
            return Ok(None);
        };

        let url = self.router.generate_on_host(
            channel.hostname.as_deref(),
            PRODUCT_SHOW_ROUTE,
            &[("slug", slug.as_str()), ("_locale", locale_code.as_str())],
        )?;
        Ok(Some(url))
    }
}

impl ItemContext for ProductItemMapper {
    fn context_list(
        &self,
        payload: &Value,
        channel: &Channel,
        locale: &Locale,
    ) -> Result<Vec<FeedItem>, ContextError> {
        self.map_raw(payload, channel, locale)
    }
}

/// Returns `(price, sale_price)`. While a discount is active the original
/// price is the regular price and the current price is the sale price.
fn prices(
    product: &Product,
    variant: &Variant,
    channel: &Channel,
) -> (Option<Price>, Option<Price>) {
    let Some(pricing) = variant.channel_pricing_for(channel) else {
        tracing::debug!(
            product = %product.code,
            variant = %variant.code,
            channel = %channel.code,
            "variant has no pricing for channel"
        );
        return (None, None);
    };

    let Some(current) = pricing.price else {
        return (None, None);
    };

    match pricing.original_price {
        None => (create_price(current, channel), None),
        Some(original) => (
            create_price(original, channel),
            create_price(current, channel),
        ),
    }
}

fn create_price(amount: i64, channel: &Channel) -> Option<Price> {
    let Some(currency) = channel.base_currency.as_deref() else {
        tracing::debug!(channel = %channel.code, "channel has no base currency; price left unset");
        return None;
    };
    Some(Price::new(amount, currency))
}

fn prefer_variant(variant: Option<&String>, product: Option<&String>) -> Option<String> {
    variant.or(product).cloned()
}

#[cfg(test)]
#[path = "mapper_test.rs"]
mod tests;
