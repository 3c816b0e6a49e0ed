//! Catalog entities as exported by the commerce platform.
//!
//! These are read-only inputs to feed generation. Attribute "capabilities"
//! (brand, GTIN, MPN, size, color, condition) are plain optional fields: a
//! platform that does not track an attribute simply leaves it `None`.

use serde::{Deserialize, Serialize};

use crate::channels::Channel;
use crate::feed::Condition;

/// Image type tag the storefront uses for the primary product picture.
pub const MAIN_IMAGE_TYPE: &str = "main";

/// A catalog product together with its variants, translations and images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Stable product code, e.g. `"BLUE_HOODIE"`.
    pub code: String,
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub translations: Vec<ProductTranslation>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub condition: Option<Condition>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub gtin: Option<String>,
    #[serde(default)]
    pub mpn: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Product {
    /// Returns the first translation whose locale equals `locale_code`, in
    /// insertion order.
    #[must_use]
    pub fn translation(&self, locale_code: &str) -> Option<&ProductTranslation> {
        self.translations.iter().find(|t| t.locale == locale_code)
    }

    /// Returns the images tagged with `kind`, preserving their order.
    pub fn images_by_type<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a ProductImage> {
        self.images
            .iter()
            .filter(move |image| image.kind.as_deref() == Some(kind))
    }

    /// Returns the image that represents the product: the first `"main"`
    /// image, or the first image of any type when no main image exists.
    #[must_use]
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images_by_type(MAIN_IMAGE_TYPE)
            .next()
            .or_else(|| self.images.first())
    }
}

/// A purchasable SKU of a [`Product`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    /// Stable variant code; becomes the feed item id.
    pub code: String,
    /// One pricing record per channel the variant is sold in.
    #[serde(default)]
    pub channel_pricings: Vec<ChannelPricing>,
    /// Whether stock is tracked for this variant. Untracked variants are
    /// always considered available.
    #[serde(default)]
    pub tracked: bool,
    #[serde(default)]
    pub on_hand: i64,
    #[serde(default)]
    pub on_hold: i64,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub gtin: Option<String>,
    #[serde(default)]
    pub mpn: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Variant {
    /// Returns the pricing record scoped to `channel`, if the variant has one.
    #[must_use]
    pub fn channel_pricing_for(&self, channel: &Channel) -> Option<&ChannelPricing> {
        self.channel_pricings
            .iter()
            .find(|pricing| pricing.channel_code == channel.code)
    }
}

/// Locale-specific copy for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductTranslation {
    /// Locale code, e.g. `"en_US"`.
    pub locale: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    /// Path relative to the media root, e.g. `"a1/b2/hoodie.jpg"`.
    pub path: String,
    /// Optional type tag (`"main"`, `"thumbnail"`, ...).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Price record for a variant in one channel. Amounts are integer minor
/// currency units (cents).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelPricing {
    pub channel_code: String,
    /// Current selling price.
    #[serde(default)]
    pub price: Option<i64>,
    /// Pre-discount price; present only while a promotion is active.
    #[serde(default)]
    pub original_price: Option<i64>,
}
