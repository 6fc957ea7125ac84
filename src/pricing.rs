//! Pricing

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};

/// Bulk pricing tier, unlocked once a line reaches the threshold quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WholesaleTier<'a> {
    /// Unit price once the tier applies
    pub price: Money<'a, Currency>,

    /// Minimum quantity for the tier to apply
    pub threshold: u32,
}

impl<'a> WholesaleTier<'a> {
    /// Create a new wholesale tier.
    #[must_use]
    pub fn new(price: Money<'a, Currency>, threshold: u32) -> Self {
        Self { price, threshold }
    }

    /// Whether the tier applies to the given quantity.
    #[must_use]
    pub fn applies_to(&self, quantity: u32) -> bool {
        quantity >= self.threshold
    }
}

/// Unit price for a quantity, taking the wholesale tier when it applies.
#[must_use]
pub fn unit_price<'a>(
    base: Money<'a, Currency>,
    tier: Option<&WholesaleTier<'a>>,
    quantity: u32,
) -> Money<'a, Currency> {
    match tier {
        Some(tier) if tier.applies_to(quantity) => tier.price,
        _ => base,
    }
}

/// Returns the reference price only when it is strictly greater than the current price.
#[must_use]
pub fn compare_at<'a>(
    old_price: Option<Money<'a, Currency>>,
    price: Money<'a, Currency>,
) -> Option<Money<'a, Currency>> {
    old_price.filter(|old| old.to_minor_units() > price.to_minor_units())
}

/// Whole-number discount of `price` against `old_price`, rounded half away from zero.
///
/// Returns `None` unless the old price beats the current price.
#[must_use]
pub fn discount_percentage(
    price: &Money<'_, Currency>,
    old_price: &Money<'_, Currency>,
) -> Option<u32> {
    let old = old_price.to_minor_units();
    let current = price.to_minor_units();

    if old <= current || old <= 0 {
        return None;
    }

    let saved = Decimal::from(old.checked_sub(current)?);

    saved
        .checked_mul(Decimal::ONE_HUNDRED)?
        .checked_div(Decimal::from(old))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
}

/// Format a price as a fixed two-decimal amount followed by its ISO code, e.g. `1000.00 KES`.
#[must_use]
pub fn format_price(price: &Money<'_, Currency>) -> String {
    let currency = price.currency();
    let amount = Decimal::new(price.to_minor_units(), currency.exponent)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    format!("{amount:.2} {}", currency.iso_alpha_code)
}
