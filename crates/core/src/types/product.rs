//! Menu products and the fixed category list.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Categories shown as filter chips, in display order.
pub const MENU_CATEGORIES: [&str; 7] = [
    "Pizzas",
    "Burgers",
    "Sandwiches",
    "Salads",
    "Juices",
    "Smoothies",
    "Ice-Creams",
];

/// Shown when a product has no description.
pub const DEFAULT_DESCRIPTION: &str = "Delicious and freshly made with premium ingredients!";

/// Used when a product has no image URL.
pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1601924582971-6c90f2f7d8a7?auto=format&fit=crop&w=300&h=200&q=80";

/// Used when a product's image fails to load.
pub const BROKEN_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1585238342028-4cb788d389ec?auto=format&fit=crop&w=300&h=200&q=80";

/// A product on the menu.
///
/// The `category` is not part of the source record; it is stamped from the
/// catalog grouping when the catalog is flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    /// Description for display, falling back to [`DEFAULT_DESCRIPTION`].
    #[must_use]
    pub fn display_description(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_DESCRIPTION)
    }

    /// Image URL for display.
    ///
    /// Pass `load_failed = true` after the primary image failed to load; the
    /// broken-image fallback is returned and the failure goes no further.
    #[must_use]
    pub fn image_url(&self, load_failed: bool) -> &str {
        if load_failed {
            return BROKEN_IMAGE_URL;
        }
        self.image
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_IMAGE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burger() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Classic Burger".to_string(),
            description: None,
            price: Decimal::from(199),
            category: "Burgers".to_string(),
            image: None,
        }
    }

    #[test]
    fn test_display_description_fallback() {
        let mut product = burger();
        assert_eq!(product.display_description(), DEFAULT_DESCRIPTION);

        product.description = Some(String::new());
        assert_eq!(product.display_description(), DEFAULT_DESCRIPTION);

        product.description = Some("Beef patty".to_string());
        assert_eq!(product.display_description(), "Beef patty");
    }

    #[test]
    fn test_image_url_fallbacks() {
        let mut product = burger();
        assert_eq!(product.image_url(false), DEFAULT_IMAGE_URL);

        product.image = Some("https://cdn.example.com/burger.jpg".to_string());
        assert_eq!(product.image_url(false), "https://cdn.example.com/burger.jpg");
        assert_eq!(product.image_url(true), BROKEN_IMAGE_URL);
    }
}
