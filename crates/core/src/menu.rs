//! Event-driven menu store.
//!
//! [`Menu`] owns the catalog state, the filter, the cart, and the order flow.
//! Front ends translate user input into [`MenuEvent`]s and show whatever
//! [`Acknowledgement`] comes back.
//!
//! Dismissing the order confirmation ([`MenuEvent::ConfirmationDismissed`])
//! completes the order at once: the cart is cleared immediately rather than
//! when the confirmation timer runs out. A front end that only wants to hide
//! the confirmation should not send the event and let the timer finish.

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use crate::cart::{AddOutcome, Cart};
use crate::catalog::CatalogState;
use crate::filter::{CategoryFilter, FilterState};
use crate::order::{OrderConfirmation, OrderError, OrderFlow};
use crate::pricing::{OrderSummary, PricingRules};
use crate::types::{Product, ProductId};

/// User actions the menu reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    CategorySelected(CategoryFilter),
    SearchChanged(String),
    AddRequested(ProductId),
    QuantityChanged { product_id: ProductId, quantity: i64 },
    RemoveRequested(ProductId),
    CheckoutRequested,
    /// Close the order confirmation before its timer runs out, clearing the
    /// cart now.
    ConfirmationDismissed,
}

/// What the front end should acknowledge after an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Acknowledgement {
    /// Nothing to show beyond re-rendering.
    None,
    /// A new cart line was created; play the "added" animation.
    Added { product_id: ProductId },
    /// The product was already in the cart; show the quantity notice.
    AlreadyInCart { product_id: ProductId },
    /// The order was placed; show the confirmation.
    OrderPlaced { confirmation: OrderConfirmation },
    /// The confirmation closed and the cart was cleared.
    OrderCompleted,
}

/// Errors from applying an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// Products cannot be added until the catalog has loaded.
    #[error("The menu is not available")]
    CatalogUnavailable,

    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    #[error(transparent)]
    Order(#[from] OrderError),
}

/// All menu state for one session.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    catalog: CatalogState,
    filter: FilterState,
    cart: Cart,
    order: OrderFlow,
    rules: PricingRules,
}

impl Menu {
    /// Create an empty menu that is still loading its catalog.
    #[must_use]
    pub fn new(rules: PricingRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn set_catalog(&mut self, catalog: CatalogState) {
        self.catalog = catalog;
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn order(&self) -> &OrderFlow {
        &self.order
    }

    #[must_use]
    pub const fn rules(&self) -> &PricingRules {
        &self.rules
    }

    /// Products passing the current filter, or `None` while the catalog is
    /// not ready. An empty list means nothing matched.
    #[must_use]
    pub fn visible_products(&self) -> Option<Vec<Product>> {
        self.catalog
            .products()
            .map(|products| self.filter.apply(products))
    }

    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        self.rules.summarize(&self.cart)
    }

    /// Apply one event.
    ///
    /// # Errors
    ///
    /// Returns `MenuError::CatalogUnavailable` or `MenuError::UnknownProduct`
    /// when an add cannot be resolved to a product, and `MenuError::Order`
    /// when checkout is refused.
    pub fn apply(&mut self, event: MenuEvent) -> Result<Acknowledgement, MenuError> {
        match event {
            MenuEvent::CategorySelected(category) => {
                self.filter.active_category = category;
                Ok(Acknowledgement::None)
            }
            MenuEvent::SearchChanged(query) => {
                self.filter.search_query = query;
                Ok(Acknowledgement::None)
            }
            MenuEvent::AddRequested(product_id) => {
                let product = self.resolve(product_id)?.clone();
                Ok(match self.cart.add_or_increment(&product) {
                    AddOutcome::Inserted => Acknowledgement::Added { product_id },
                    AddOutcome::Incremented => Acknowledgement::AlreadyInCart { product_id },
                })
            }
            MenuEvent::QuantityChanged {
                product_id,
                quantity,
            } => {
                self.cart.set_quantity(product_id, quantity);
                Ok(Acknowledgement::None)
            }
            MenuEvent::RemoveRequested(product_id) => {
                self.cart.remove(product_id);
                Ok(Acknowledgement::None)
            }
            MenuEvent::CheckoutRequested => {
                let confirmation = self.order.place(&self.cart, &self.rules, Utc::now())?;
                Ok(Acknowledgement::OrderPlaced { confirmation })
            }
            MenuEvent::ConfirmationDismissed => Ok(if self.complete_order() {
                Acknowledgement::OrderCompleted
            } else {
                Acknowledgement::None
            }),
        }
    }

    /// Finish a placed order: back to idle with an empty cart.
    ///
    /// Returns `false` if no order was placed.
    pub fn complete_order(&mut self) -> bool {
        self.order.complete(&mut self.cart)
    }

    fn resolve(&self, product_id: ProductId) -> Result<&Product, MenuError> {
        if self.catalog.products().is_none() {
            return Err(MenuError::CatalogUnavailable);
        }
        self.catalog
            .find(product_id)
            .ok_or(MenuError::UnknownProduct(product_id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::order::OrderState;

    fn product(id: i32, name: &str, category: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: None,
            price: Decimal::from(price),
            category: category.to_string(),
            image: None,
        }
    }

    fn ready_menu() -> Menu {
        let mut menu = Menu::new(PricingRules::default());
        menu.set_catalog(CatalogState::Ready(vec![
            product(1, "Margherita", "Pizzas", 300),
            product(2, "Farmhouse", "Pizzas", 300),
            product(3, "Veg Burger", "Burgers", 150),
        ]));
        menu
    }

    #[test]
    fn test_add_twice_scenario() {
        let mut menu = ready_menu();
        let first = menu.apply(MenuEvent::AddRequested(ProductId::new(1))).unwrap();
        let second = menu.apply(MenuEvent::AddRequested(ProductId::new(1))).unwrap();

        assert_eq!(
            [first, second],
            [
                Acknowledgement::Added {
                    product_id: ProductId::new(1)
                },
                Acknowledgement::AlreadyInCart {
                    product_id: ProductId::new(1)
                },
            ]
        );
        assert_eq!(menu.cart().line_count(), 1);

        let summary = menu.summary();
        assert_eq!(summary.subtotal, Decimal::from(600));
        assert_eq!(summary.discount, Decimal::from(60));
        assert_eq!(summary.tax, Decimal::from(27));
        assert_eq!(summary.total, Decimal::from(567));
    }

    #[test]
    fn test_add_before_catalog_ready() {
        let mut menu = Menu::new(PricingRules::default());
        let err = menu
            .apply(MenuEvent::AddRequested(ProductId::new(1)))
            .unwrap_err();
        assert_eq!(err, MenuError::CatalogUnavailable);
    }

    #[test]
    fn test_add_unknown_product() {
        let mut menu = ready_menu();
        let err = menu
            .apply(MenuEvent::AddRequested(ProductId::new(42)))
            .unwrap_err();
        assert_eq!(err, MenuError::UnknownProduct(ProductId::new(42)));
        assert!(menu.cart().is_empty());
    }

    #[test]
    fn test_filter_events_drive_visible_products() {
        let mut menu = ready_menu();
        menu.apply(MenuEvent::CategorySelected(CategoryFilter::Category(
            "Pizzas".to_string(),
        )))
        .unwrap();
        menu.apply(MenuEvent::SearchChanged("farm".to_string()))
            .unwrap();

        let visible = menu.visible_products().unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible.first().unwrap().name, "Farmhouse");
    }

    #[test]
    fn test_no_match_is_distinct_from_loading() {
        let mut menu = ready_menu();
        menu.apply(MenuEvent::SearchChanged("sushi".to_string()))
            .unwrap();
        assert_eq!(menu.visible_products(), Some(Vec::new()));

        let loading = Menu::new(PricingRules::default());
        assert_eq!(loading.visible_products(), None);
    }

    #[test]
    fn test_quantity_and_remove_events() {
        let mut menu = ready_menu();
        menu.apply(MenuEvent::AddRequested(ProductId::new(3))).unwrap();
        menu.apply(MenuEvent::QuantityChanged {
            product_id: ProductId::new(3),
            quantity: 4,
        })
        .unwrap();
        assert_eq!(menu.cart().total_item_count(), 4);

        menu.apply(MenuEvent::QuantityChanged {
            product_id: ProductId::new(3),
            quantity: 0,
        })
        .unwrap();
        assert!(menu.cart().is_empty());

        menu.apply(MenuEvent::AddRequested(ProductId::new(1))).unwrap();
        menu.apply(MenuEvent::RemoveRequested(ProductId::new(1)))
            .unwrap();
        assert!(menu.cart().is_empty());
    }

    #[test]
    fn test_checkout_then_dismiss() {
        let mut menu = ready_menu();
        menu.apply(MenuEvent::AddRequested(ProductId::new(1))).unwrap();

        let ack = menu.apply(MenuEvent::CheckoutRequested).unwrap();
        assert!(matches!(ack, Acknowledgement::OrderPlaced { .. }));
        assert!(matches!(menu.order().state(), OrderState::Placed(_)));

        let ack = menu.apply(MenuEvent::ConfirmationDismissed).unwrap();
        assert_eq!(ack, Acknowledgement::OrderCompleted);
        assert!(menu.cart().is_empty());
        assert_eq!(menu.order().state(), &OrderState::Idle);

        // Dismissing again does nothing
        let ack = menu.apply(MenuEvent::ConfirmationDismissed).unwrap();
        assert_eq!(ack, Acknowledgement::None);
    }

    #[test]
    fn test_huge_quantity_event_keeps_summary_total() {
        let mut menu = Menu::new(PricingRules::default());
        let mut expensive = product(1, "Gold Leaf Pizza", "Pizzas", 0);
        expensive.price = Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0);
        menu.set_catalog(CatalogState::Ready(vec![expensive]));

        menu.apply(MenuEvent::AddRequested(ProductId::new(1))).unwrap();
        menu.apply(MenuEvent::QuantityChanged {
            product_id: ProductId::new(1),
            quantity: 10_000_000_000,
        })
        .unwrap();

        assert_eq!(menu.cart().total_item_count(), 10_000_000_000);
        assert_eq!(menu.summary().subtotal, Decimal::MAX);
    }

    #[test]
    fn test_checkout_empty_cart_is_refused() {
        let mut menu = ready_menu();
        let err = menu.apply(MenuEvent::CheckoutRequested).unwrap_err();
        assert_eq!(err, MenuError::Order(OrderError::EmptyCart));
    }
}
