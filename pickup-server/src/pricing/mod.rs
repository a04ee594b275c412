//! Pricing Engine
//!
//! Pure server-side price computation. Client-submitted totals are display
//! hints only; everything persisted comes from here. Integer minor units
//! throughout; no floating point, no rounding drift.

use shared::models::{PricingConfig, Quote};

use crate::utils::{AppError, AppResult};

/// Compute the price breakdown for a bag count under a pricing config
///
/// - `subtotal = max(bag_count * per_bag_cents, min_order_cents)`
/// - `fee = pickup_fee_cents`, waived when the free-pickup threshold is set
///   and the subtotal reaches it
/// - `total = subtotal + fee`
///
/// Fails with `Invalid` for a non-positive bag count.
pub fn compute_total(bag_count: i64, config: &PricingConfig) -> AppResult<Quote> {
    if bag_count < 1 {
        return Err(AppError::invalid("Bag count must be at least 1"));
    }

    let subtotal_cents = (bag_count * config.per_bag_cents).max(config.min_order_cents);
    let fee_cents = if config.free_pickup_threshold_cents > 0
        && subtotal_cents >= config.free_pickup_threshold_cents
    {
        0
    } else {
        config.pickup_fee_cents
    };

    Ok(Quote {
        subtotal_cents,
        fee_cents,
        total_cents: subtotal_cents + fee_cents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(per_bag: i64, fee: i64, min: i64, threshold: i64) -> PricingConfig {
        PricingConfig {
            per_bag_cents: per_bag,
            pickup_fee_cents: fee,
            min_order_cents: min,
            free_pickup_threshold_cents: threshold,
            ..PricingConfig::default()
        }
    }

    #[test]
    fn one_bag_with_fee() {
        let quote = compute_total(1, &config(2500, 300, 0, 0)).unwrap();
        assert_eq!(quote.subtotal_cents, 2500);
        assert_eq!(quote.fee_cents, 300);
        assert_eq!(quote.total_cents, 2800);
    }

    #[test]
    fn threshold_waives_fee() {
        let quote = compute_total(3, &config(2500, 300, 0, 5000)).unwrap();
        assert_eq!(quote.subtotal_cents, 7500);
        assert_eq!(quote.fee_cents, 0);
        assert_eq!(quote.total_cents, 7500);
    }

    #[test]
    fn below_threshold_keeps_fee() {
        let quote = compute_total(1, &config(2500, 300, 0, 5000)).unwrap();
        assert_eq!(quote.fee_cents, 300);
        assert_eq!(quote.total_cents, 2800);
    }

    #[test]
    fn minimum_order_floors_subtotal() {
        let quote = compute_total(1, &config(1000, 300, 2000, 0)).unwrap();
        assert_eq!(quote.subtotal_cents, 2000);
        assert_eq!(quote.total_cents, 2300);
    }

    #[test]
    fn zero_bags_rejected() {
        assert!(compute_total(0, &config(2500, 300, 0, 0)).is_err());
        assert!(compute_total(-3, &config(2500, 300, 0, 0)).is_err());
    }

    #[test]
    fn total_is_subtotal_plus_fee() {
        for bags in 1..=20 {
            for threshold in [0, 3000, 10_000] {
                let quote = compute_total(bags, &config(2500, 300, 1000, threshold)).unwrap();
                assert_eq!(quote.total_cents, quote.subtotal_cents + quote.fee_cents);
                assert!(quote.subtotal_cents >= 1000);
                assert!(quote.fee_cents == 0 || quote.fee_cents == 300);
            }
        }
    }
}
