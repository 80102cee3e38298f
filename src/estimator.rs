//! Flat-price cost estimator.

use serde::Serialize;

/// Price per item, in cents ($10.00).
pub const PRICE_PER_ITEM_CENTS: u64 = 1_000;

/// Quantity shown before the visitor enters anything.
pub const DEFAULT_QUANTITY: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Estimate {
    pub quantity: u64,
    pub unit_price_cents: u64,
    pub total_cents: u64,
    /// en-US currency rendering of `total_cents`, e.g. `$50.00`.
    pub formatted: String,
}

impl Estimate {
    /// `None` when the total does not fit in a `u64` of cents.
    pub fn for_quantity(quantity: u64) -> Option<Self> {
        let total_cents = quantity.checked_mul(PRICE_PER_ITEM_CENTS)?;
        Some(Self {
            quantity,
            unit_price_cents: PRICE_PER_ITEM_CENTS,
            total_cents,
            formatted: format_usd(total_cents),
        })
    }
}

/// Formats cents as US dollars with thousands separators: `$1,234.50`.
pub fn format_usd(cents: u64) -> String {
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}.{:02}", cents % 100)
}
