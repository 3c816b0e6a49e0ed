use shopfeed_core::{Channel, Variant};

use super::PriceCalculator;

/// Reads the current price straight from the variant's channel pricing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelPricingCalculator;

impl PriceCalculator for ChannelPricingCalculator {
    fn calculate(&self, variant: &Variant, channel: &Channel) -> Option<i64> {
        variant
            .channel_pricing_for(channel)
            .and_then(|pricing| pricing.price)
    }
}
