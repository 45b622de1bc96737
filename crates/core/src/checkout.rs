//! Checkout step state machine and cart total arithmetic.
//!
//! The checkout wizard is a linear four-step flow. The current step is kept
//! in the session as a lowercase string; [`CheckoutStep::parse`] falls back
//! to [`CheckoutStep::Cart`] for anything it does not recognize, so a stale
//! or tampered session can never strand a buyer on an unknown step.
//!
//! Totals are computed with [`rust_decimal::Decimal`] throughout - no
//! floating point and no rounding policy beyond what the inputs carry.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The four stages of the checkout wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    /// Reviewing the cart; entry point and reset target.
    #[default]
    Cart,
    /// Entering the shipping address.
    Shipping,
    /// Choosing a payment method.
    Payment,
    /// Terminal: order placed, receipt shown.
    Confirmation,
}

impl CheckoutStep {
    /// Parse a session-stored step string.
    ///
    /// Unrecognized values fall back to [`CheckoutStep::Cart`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "shipping" => Self::Shipping,
            "payment" => Self::Payment,
            "confirmation" => Self::Confirmation,
            _ => Self::Cart,
        }
    }

    /// Lowercase string form, as stored in the session.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Shipping => "shipping",
            Self::Payment => "payment",
            Self::Confirmation => "confirmation",
        }
    }

    /// The step a "continue" submission advances to.
    ///
    /// `Confirmation` is terminal; advancing leaves it in place until an
    /// explicit reset.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Cart => Self::Shipping,
            Self::Shipping => Self::Payment,
            Self::Payment | Self::Confirmation => Self::Confirmation,
        }
    }

    /// The step a "back" button returns to.
    ///
    /// There is no way back out of `Confirmation`; the order is already
    /// placed at that point.
    #[must_use]
    pub const fn back(self) -> Self {
        match self {
            Self::Cart | Self::Shipping => Self::Cart,
            Self::Payment => Self::Shipping,
            Self::Confirmation => Self::Confirmation,
        }
    }
}

/// Pricing policy applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Orders at or above this subtotal ship free.
    pub free_shipping_threshold: Decimal,
    /// Flat charge applied below the threshold.
    pub flat_shipping_charge: Decimal,
    /// Tax rate applied to the subtotal (e.g. 0.18 for 18%).
    pub tax_rate: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::new(1000, 0),
            flat_shipping_charge: Decimal::new(50, 0),
            tax_rate: Decimal::new(18, 2),
        }
    }
}

/// A single cart line as seen by the totals computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    /// Unit price of the item.
    pub unit_price: Decimal,
    /// Number of units.
    pub quantity: i32,
}

/// Computed checkout totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CartTotals {
    /// Compute totals for a set of cart lines under a pricing policy.
    ///
    /// - `subtotal = Σ unit_price × quantity`
    /// - `shipping = 0` iff `subtotal >= free_shipping_threshold`, else flat
    /// - `tax = subtotal × tax_rate`
    /// - `total = subtotal + shipping + tax`
    ///
    /// An empty line set yields all-zero totals; the caller is expected to
    /// short-circuit the empty cart before reaching payment.
    #[must_use]
    pub fn compute(lines: &[CartLine], policy: &PricingPolicy) -> Self {
        let subtotal: Decimal = lines
            .iter()
            .map(|line| line.unit_price * Decimal::from(line.quantity))
            .sum();

        let shipping = if subtotal >= policy.free_shipping_threshold {
            Decimal::ZERO
        } else {
            policy.flat_shipping_charge
        };

        let tax = subtotal * policy.tax_rate;

        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// Whether there is anything to pay for.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subtotal == Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: i64, quantity: i32) -> CartLine {
        CartLine {
            unit_price: Decimal::new(price, 0),
            quantity,
        }
    }

    #[test]
    fn test_worked_example() {
        // cart = [{price: 500, qty: 1}, {price: 800, qty: 2}]
        let totals = CartTotals::compute(
            &[line(500, 1), line(800, 2)],
            &PricingPolicy::default(),
        );
        assert_eq!(totals.subtotal, Decimal::new(2100, 0));
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::new(378, 0));
        assert_eq!(totals.total, Decimal::new(2478, 0));
    }

    #[test]
    fn test_flat_shipping_below_threshold() {
        let totals = CartTotals::compute(&[line(500, 1)], &PricingPolicy::default());
        assert_eq!(totals.subtotal, Decimal::new(500, 0));
        assert_eq!(totals.shipping, Decimal::new(50, 0));
        assert_eq!(totals.tax, Decimal::new(90, 0));
        assert_eq!(totals.total, Decimal::new(640, 0));
    }

    #[test]
    fn test_free_shipping_exactly_at_threshold() {
        let totals = CartTotals::compute(&[line(1000, 1)], &PricingPolicy::default());
        assert_eq!(totals.shipping, Decimal::ZERO);
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        let carts: &[&[CartLine]] = &[
            &[],
            &[line(1, 1)],
            &[line(999, 1)],
            &[line(250, 4), line(125, 2), line(75, 3)],
            &[line(10_000, 10)],
        ];
        let policy = PricingPolicy::default();
        for lines in carts {
            let totals = CartTotals::compute(lines, &policy);
            assert_eq!(totals.total, totals.subtotal + totals.shipping + totals.tax);
            // shipping == 0 iff subtotal >= free_shipping_threshold
            assert_eq!(
                totals.shipping == Decimal::ZERO,
                totals.subtotal >= policy.free_shipping_threshold
            );
        }
    }

    #[test]
    fn test_empty_cart_is_zero() {
        let totals = CartTotals::compute(&[], &PricingPolicy::default());
        assert!(totals.is_empty());
        assert_eq!(totals.subtotal, Decimal::ZERO);
        // An empty cart still "charges" flat shipping arithmetically; the UI
        // short-circuits before this matters.
        assert_eq!(totals.shipping, Decimal::new(50, 0));
    }

    #[test]
    fn test_decimal_prices() {
        let totals = CartTotals::compute(
            &[CartLine {
                unit_price: Decimal::new(19_99, 2),
                quantity: 3,
            }],
            &PricingPolicy::default(),
        );
        assert_eq!(totals.subtotal, Decimal::new(59_97, 2));
    }

    #[test]
    fn test_step_parse_fallback() {
        assert_eq!(CheckoutStep::parse("cart"), CheckoutStep::Cart);
        assert_eq!(CheckoutStep::parse("shipping"), CheckoutStep::Shipping);
        assert_eq!(CheckoutStep::parse("payment"), CheckoutStep::Payment);
        assert_eq!(
            CheckoutStep::parse("confirmation"),
            CheckoutStep::Confirmation
        );
        // Unrecognized values fall back to Cart
        assert_eq!(CheckoutStep::parse("review"), CheckoutStep::Cart);
        assert_eq!(CheckoutStep::parse(""), CheckoutStep::Cart);
        assert_eq!(CheckoutStep::parse("PAYMENT"), CheckoutStep::Cart);
    }

    #[test]
    fn test_step_advance_order() {
        let mut step = CheckoutStep::Cart;
        step = step.next();
        assert_eq!(step, CheckoutStep::Shipping);
        step = step.next();
        assert_eq!(step, CheckoutStep::Payment);
        step = step.next();
        assert_eq!(step, CheckoutStep::Confirmation);
        // Terminal: stays put
        assert_eq!(step.next(), CheckoutStep::Confirmation);
    }

    #[test]
    fn test_step_back() {
        assert_eq!(CheckoutStep::Payment.back(), CheckoutStep::Shipping);
        assert_eq!(CheckoutStep::Shipping.back(), CheckoutStep::Cart);
        assert_eq!(CheckoutStep::Cart.back(), CheckoutStep::Cart);
        assert_eq!(CheckoutStep::Confirmation.back(), CheckoutStep::Confirmation);
    }

    #[test]
    fn test_step_roundtrip_strings() {
        for step in [
            CheckoutStep::Cart,
            CheckoutStep::Shipping,
            CheckoutStep::Payment,
            CheckoutStep::Confirmation,
        ] {
            assert_eq!(CheckoutStep::parse(step.as_str()), step);
        }
    }
}
