//! Plain-text rendering of menu views.

use std::fmt::Write;

use food_menu_core::{Acknowledgement, CurrencyCode, Money, OrderConfirmation, Product};
use food_menu_session::MenuView;
use rust_decimal::Decimal;

fn money(amount: Decimal, currency: CurrencyCode) -> String {
    Money::new(amount, currency).display()
}

/// Product table, or the "no dishes" message for an empty result.
pub fn products(products: &[Product], currency: CurrencyCode) -> String {
    if products.is_empty() {
        return "No dishes found. Try a different search or category.\n".to_string();
    }

    let mut out = String::new();
    for product in products {
        let _ = writeln!(
            out,
            "{:>4}  {:<28} {:<12} {:>10}",
            product.id.as_i32(),
            product.name,
            product.category,
            money(product.price, currency)
        );
        let _ = writeln!(out, "      {}", product.display_description());
    }
    out
}

/// Cart lines followed by the order summary.
pub fn cart(view: &MenuView) -> String {
    if view.cart.is_empty() {
        return "Your cart is empty\n".to_string();
    }

    let currency = view.currency;
    let mut out = String::new();
    for line in &view.cart {
        let _ = writeln!(
            out,
            "{:>3} x {:<28} {:>10}",
            line.quantity(),
            line.product.name,
            money(line.line_total(), currency)
        );
    }
    let summary = &view.summary;
    let _ = writeln!(out, "Items:           {}", view.item_count);
    let _ = writeln!(out, "Subtotal:        {}", money(summary.subtotal, currency));
    let _ = writeln!(out, "Discount:       -{}", money(summary.discount, currency));
    let _ = writeln!(out, "Sales Tax:       {}", money(summary.tax, currency));
    let _ = writeln!(out, "Total:           {}", money(summary.total, currency));
    out
}

/// One-line acknowledgement for an add, if it needs one.
pub fn acknowledgement(ack: &Acknowledgement, view: &MenuView) -> Option<String> {
    match ack {
        Acknowledgement::Added { product_id } => {
            let name = view
                .cart
                .iter()
                .find(|line| line.product.id == *product_id)
                .map_or("Item", |line| line.product.name.as_str());
            Some(format!("{name}: Added to cart!"))
        }
        Acknowledgement::AlreadyInCart { .. } => {
            Some("Item already in cart! Quantity increased.".to_string())
        }
        Acknowledgement::OrderPlaced { .. }
        | Acknowledgement::OrderCompleted
        | Acknowledgement::None => None,
    }
}

/// "Order Placed!" message with what was ordered.
pub fn confirmation(confirmation: &OrderConfirmation, currency: CurrencyCode) -> String {
    let mut out = String::from("Order Placed!\n");
    for line in &confirmation.lines {
        let _ = writeln!(out, "{:>3} x {}", line.quantity(), line.product.name);
    }
    let _ = writeln!(
        out,
        "Total: {} ({} items)",
        money(confirmation.summary.total, currency),
        confirmation.item_count
    );
    out.push_str("Your order has been successfully placed. We're preparing your delicious food!\n");
    out
}
