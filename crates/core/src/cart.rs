//! Cart store.
//!
//! The cart holds at most one line per product and every line has a
//! quantity of at least one. All mutation goes through the methods below.
//!
//! Quantities have no upper bound. Amounts derived from them saturate at
//! [`Decimal::MAX`] instead of overflowing, so every operation is total.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{Product, ProductId};

/// Which branch [`Cart::add_or_increment`] took.
///
/// Front ends show different acknowledgements for each, so the outcome is
/// returned rather than swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    /// A new line with quantity 1 was created.
    Inserted,
    /// An existing line's quantity went up by 1.
    Incremented,
}

/// A product and how many of it are in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product: Product,
    quantity: u64,
}

impl CartLine {
    #[must_use]
    pub const fn quantity(&self) -> u64 {
        self.quantity
    }

    /// `price × quantity`, unrounded, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product
            .price
            .saturating_mul(Decimal::from(self.quantity))
    }
}

/// Selected products in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `product`.
    pub fn add_or_increment(&mut self, product: &Product) -> AddOutcome {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(1);
            AddOutcome::Incremented
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            });
            AddOutcome::Inserted
        }
    }

    /// Set a line's quantity exactly.
    ///
    /// Anything below 1 removes the line. Unknown products are ignored.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity < 1 {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self.line_mut(product_id)
            && let Ok(quantity) = u64::try_from(quantity)
        {
            line.quantity = quantity;
        }
    }

    /// Remove a line. Absent products are a no-op.
    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product.id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of quantities across all lines (the badge count).
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.lines
            .iter()
            .fold(0, |count: u64, line| count.saturating_add(line.quantity))
    }

    /// Number of distinct products.
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product.id == product_id)
    }
}
