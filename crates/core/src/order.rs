//! Simulated order placement.
//!
//! `Idle → Placed → Idle`. Placing snapshots the cart and its pricing into an
//! [`OrderConfirmation`]; completing clears the cart. Nothing is submitted
//! anywhere. Scheduling the completion is the caller's job.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::cart::{Cart, CartLine};
use crate::pricing::{OrderSummary, PricingRules};

/// Reasons an order cannot be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("Cannot place an order with an empty cart")]
    EmptyCart,
    #[error("An order is already awaiting confirmation")]
    AlreadyPlaced,
}

/// What the customer ordered, captured at placement time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub lines: Vec<CartLine>,
    pub item_count: u64,
    pub summary: OrderSummary,
    pub placed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "confirmation", rename_all = "snake_case")]
pub enum OrderState {
    #[default]
    Idle,
    Placed(OrderConfirmation),
}

#[derive(Debug, Clone, Default)]
pub struct OrderFlow {
    state: OrderState,
}

impl OrderFlow {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: OrderState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &OrderState {
        &self.state
    }

    #[must_use]
    pub const fn is_placed(&self) -> bool {
        matches!(self.state, OrderState::Placed(_))
    }

    /// Move to `Placed` with a snapshot of `cart`.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyCart` for an empty cart and
    /// `OrderError::AlreadyPlaced` if a confirmation is still showing.
    pub fn place(
        &mut self,
        cart: &Cart,
        rules: &PricingRules,
        placed_at: DateTime<Utc>,
    ) -> Result<OrderConfirmation, OrderError> {
        if self.is_placed() {
            return Err(OrderError::AlreadyPlaced);
        }
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let confirmation = OrderConfirmation {
            lines: cart.lines().to_vec(),
            item_count: cart.total_item_count(),
            summary: rules.summarize(cart),
            placed_at,
        };
        self.state = OrderState::Placed(confirmation.clone());
        Ok(confirmation)
    }

    /// Return to `Idle` and clear `cart`.
    ///
    /// Returns `false` without touching the cart when no order is placed, so
    /// a late or repeated completion is harmless.
    pub fn complete(&mut self, cart: &mut Cart) -> bool {
        if !self.is_placed() {
            return false;
        }
        self.state = OrderState::Idle;
        cart.clear();
        true
    }
}
