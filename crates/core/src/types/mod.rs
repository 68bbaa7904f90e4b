//! Core types for the food menu.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;

pub use id::*;
pub use price::{CurrencyCode, Money};
pub use product::{
    BROKEN_IMAGE_URL, DEFAULT_DESCRIPTION, DEFAULT_IMAGE_URL, MENU_CATEGORIES, Product,
};
