//! Order pricing.
//!
//! Figures are derived from the cart on every call and never cached. All
//! arithmetic is exact decimal; rounding is left to [`Money::display`].
//! Amounts past [`Decimal::MAX`] saturate there rather than overflow.
//!
//! [`Money::display`]: crate::types::Money::display

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLine};

/// Discount and tax rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRules {
    /// Subtotals strictly above this amount get the discount.
    pub discount_threshold: Decimal,
    /// Fraction of the subtotal taken off above the threshold.
    pub discount_rate: Decimal,
    /// Fraction of the discounted subtotal added as tax.
    pub tax_rate: Decimal,
}

impl PricingRules {
    /// 500.
    pub const DEFAULT_DISCOUNT_THRESHOLD: Decimal = Decimal::from_parts(500, 0, 0, false, 0);
    /// 10%.
    pub const DEFAULT_DISCOUNT_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);
    /// 5%.
    pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

    /// Price the current cart contents.
    #[must_use]
    pub fn summarize(&self, cart: &Cart) -> OrderSummary {
        let subtotal = subtotal(cart);
        let discount = self.discount(subtotal);
        let taxable = subtotal.saturating_sub(discount);
        let tax = taxable.saturating_mul(self.tax_rate);
        OrderSummary {
            subtotal,
            discount,
            tax,
            total: taxable.saturating_add(tax),
        }
    }

    #[must_use]
    pub fn discount(&self, subtotal: Decimal) -> Decimal {
        if subtotal > self.discount_threshold {
            subtotal.saturating_mul(self.discount_rate)
        } else {
            Decimal::ZERO
        }
    }
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            discount_threshold: Self::DEFAULT_DISCOUNT_THRESHOLD,
            discount_rate: Self::DEFAULT_DISCOUNT_RATE,
            tax_rate: Self::DEFAULT_TAX_RATE,
        }
    }
}

/// `Σ price × quantity` over all lines.
#[must_use]
pub fn subtotal(cart: &Cart) -> Decimal {
    cart.lines()
        .iter()
        .map(CartLine::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Derived order figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OrderSummary {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}
