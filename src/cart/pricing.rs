use serde::Serialize;

use super::CartError;
use crate::config::PricingConfig;

/// A coupon that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coupon {
    pub code: String,
    pub discount: u64,
}

/// Looks `code` up in the coupon table. Codes match exactly.
pub fn apply_coupon(code: &str, pricing: &PricingConfig) -> Result<Coupon, CartError> {
    pricing
        .coupons
        .get(code)
        .map(|&discount| Coupon {
            code: code.to_string(),
            discount,
        })
        .ok_or_else(|| CartError::InvalidCoupon(code.to_string()))
}

/// Order summary shown beside the cart and at checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PricingSummary {
    pub subtotal: u64,
    pub discount: u64,
    pub shipping: u64,
    pub tax: u64,
    pub total: u64,
}

impl PricingSummary {
    pub fn compute(subtotal: u64, coupon: Option<&Coupon>, pricing: &PricingConfig) -> Self {
        let discount = coupon.map_or(0, |c| c.discount.min(subtotal));
        let shipping = if subtotal > pricing.free_shipping_threshold {
            0
        } else {
            pricing.shipping_fee
        };
        let taxable = subtotal - discount;
        let tax = (taxable as f64 * pricing.tax_rate).round() as u64;
        Self {
            subtotal,
            discount,
            shipping,
            tax,
            total: taxable + shipping + tax,
        }
    }

    pub fn ships_free(&self) -> bool {
        self.shipping == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_shipping_above_threshold_with_gst() {
        let pricing = PricingConfig::default();
        let summary = PricingSummary::compute(26997, None, &pricing);
        assert_eq!(summary.shipping, 0);
        assert_eq!(summary.tax, 3240);
        assert_eq!(summary.total, 26997 + 3240);
        assert!(summary.ships_free());
    }

    #[test]
    fn flat_fee_at_or_below_threshold() {
        let pricing = PricingConfig::default();
        let summary = PricingSummary::compute(999, None, &pricing);
        assert_eq!(summary.shipping, 50);
        assert_eq!(summary.tax, 120);
        assert_eq!(summary.total, 999 + 50 + 120);
    }

    #[test]
    fn coupon_reduces_taxable_amount() {
        let pricing = PricingConfig::default();
        let coupon = apply_coupon("SAVE10", &pricing).unwrap();
        let summary = PricingSummary::compute(11597, Some(&coupon), &pricing);
        assert_eq!(summary.discount, 500);
        assert_eq!(summary.tax, 1332);
        assert_eq!(summary.total, 11097 + 1332);
    }

    #[test]
    fn discount_never_exceeds_subtotal() {
        let pricing = PricingConfig::default();
        let coupon = apply_coupon("SAVE10", &pricing).unwrap();
        let summary = PricingSummary::compute(300, Some(&coupon), &pricing);
        assert_eq!(summary.discount, 300);
        assert_eq!(summary.tax, 0);
        assert_eq!(summary.total, 50);
    }

    #[test]
    fn unknown_or_miscased_coupon_is_rejected() {
        let pricing = PricingConfig::default();
        assert_eq!(
            apply_coupon("save10", &pricing),
            Err(CartError::InvalidCoupon("save10".into()))
        );
        assert_eq!(
            apply_coupon("BOGUS", &pricing).unwrap_err().to_string(),
            "Invalid coupon code"
        );
    }
}
