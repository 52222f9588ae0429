//! Expiry-driven discount strategy for near-expiry batches.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::status::ExpiryLevel;

/// Discount tier of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscountTier {
    /// Expires within the critical window: liquidate
    Critical,
    /// Expires within the warning window: moderate markdown
    Warning,
    /// Full price
    Standard,
}

impl DiscountTier {
    /// Tier for a backend batch status ("Critical", "Warning", "Good", ...).
    pub fn from_status(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "critical" => DiscountTier::Critical,
            "warning" => DiscountTier::Warning,
            _ => DiscountTier::Standard,
        }
    }

    /// Markdown in percent.
    pub fn percent(self) -> u32 {
        match self {
            DiscountTier::Critical => 50,
            DiscountTier::Warning => 25,
            DiscountTier::Standard => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DiscountTier::Critical => "Aggressive Liquidation",
            DiscountTier::Warning => "Moderate Discount",
            DiscountTier::Standard => "Standard Price",
        }
    }
}

impl From<ExpiryLevel> for DiscountTier {
    fn from(level: ExpiryLevel) -> Self {
        match level {
            ExpiryLevel::Critical => DiscountTier::Critical,
            ExpiryLevel::Warning => DiscountTier::Warning,
            _ => DiscountTier::Standard,
        }
    }
}

/// Suggested price for a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountStrategy {
    pub tier: DiscountTier,
    pub pct: u32,
    pub price: Decimal,
    pub label: String,
}

/// Suggested selling price for a batch status and list price.
pub fn discount_strategy(status: &str, price: Decimal) -> DiscountStrategy {
    strategy_for_tier(DiscountTier::from_status(status), price)
}

/// Suggested selling price for a tier and list price, rounded to cents.
pub fn strategy_for_tier(tier: DiscountTier, price: Decimal) -> DiscountStrategy {
    let pct = tier.percent();
    let keep = Decimal::from(100 - pct) / Decimal::ONE_HUNDRED;
    let discounted = (price * keep).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    DiscountStrategy {
        tier,
        pct,
        price: discounted,
        label: tier.label().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_tiers() {
        let price = Decimal::new(1999, 2);

        let critical = discount_strategy("Critical", price);
        assert_eq!(critical.pct, 50);
        assert_eq!(critical.price, Decimal::new(1000, 2));
        assert_eq!(critical.label, "Aggressive Liquidation");

        let warning = discount_strategy("warning", price);
        assert_eq!(warning.pct, 25);
        assert_eq!(warning.price, Decimal::new(1499, 2));

        let good = discount_strategy("Good", price);
        assert_eq!(good.pct, 0);
        assert_eq!(good.price, price);
        assert_eq!(good.label, "Standard Price");
    }

    #[test]
    fn test_tier_from_expiry_level() {
        assert_eq!(DiscountTier::from(ExpiryLevel::Critical), DiscountTier::Critical);
        assert_eq!(DiscountTier::from(ExpiryLevel::Expired), DiscountTier::Standard);
    }
}
