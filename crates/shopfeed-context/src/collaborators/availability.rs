use shopfeed_core::Variant;

use super::AvailabilityChecker;

/// Stock check over the variant's own inventory counters: untracked variants
/// are always available, tracked ones need at least one unit not on hold.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnHandAvailabilityChecker;

impl AvailabilityChecker for OnHandAvailabilityChecker {
    fn is_stock_available(&self, variant: &Variant) -> bool {
        !variant.tracked || variant.on_hand.saturating_sub(variant.on_hold) >= 1
    }
}
