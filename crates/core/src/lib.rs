//! Food Menu Core - Catalog, cart, and pricing logic.
//!
//! This crate provides the state and rules shared by every food menu front end:
//! - `food-menu-session` - Catalog loading, timers, and the session handle
//! - `food-menu-cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and synchronous logic - no I/O, no
//! timers, no HTTP clients. Anything that waits (catalog fetch, notice
//! timers) lives in the session crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money, and product records
//! - [`catalog`] - Catalog document parsing and load state
//! - [`filter`] - Category and search filtering
//! - [`cart`] - Cart store with one line per product
//! - [`pricing`] - Subtotal, discount, tax, and total
//! - [`order`] - Order placement state machine
//! - [`menu`] - Event-driven store composing all of the above

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod filter;
pub mod menu;
pub mod order;
pub mod pricing;
pub mod types;

pub use cart::{AddOutcome, Cart, CartLine};
pub use catalog::{CatalogError, CatalogState};
pub use filter::{CategoryFilter, FilterState};
pub use menu::{Acknowledgement, Menu, MenuError, MenuEvent};
pub use order::{OrderConfirmation, OrderError, OrderFlow, OrderState};
pub use pricing::{OrderSummary, PricingRules};
pub use types::*;
