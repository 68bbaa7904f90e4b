//! Catalog document parsing and load state.
//!
//! The catalog is a single JSON document mapping category names to product
//! records:
//!
//! ```json
//! {
//!   "Pizzas": [{ "id": 1, "name": "Margherita", "price": 299 }],
//!   "Juices": [{ "id": 9, "name": "Orange", "description": "Fresh", "price": 89.5 }]
//! }
//! ```
//!
//! Categories and products keep document order when flattened.

use std::collections::HashSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Product, ProductId};

/// Errors produced while turning a catalog document into products.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document is not valid catalog JSON.
    #[error("Invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    /// A product has a negative price.
    #[error("Product {id} in {category} has a negative price")]
    NegativePrice { id: ProductId, category: String },
}

/// A product record as it appears in the document, before categorisation.
#[derive(Debug, Clone, Deserialize)]
struct RawProduct {
    id: ProductId,
    name: String,
    #[serde(default)]
    description: Option<String>,
    price: Decimal,
    #[serde(default)]
    image: Option<String>,
}

/// Category groups in document order.
struct CatalogDocument(Vec<(String, Vec<RawProduct>)>);

impl<'de> Deserialize<'de> for CatalogDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = CatalogDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from category name to a list of products")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut groups = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((category, products)) =
                    map.next_entry::<String, Vec<RawProduct>>()?
                {
                    groups.push((category, products));
                }
                Ok(CatalogDocument(groups))
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}

/// Parse a catalog document and flatten it into one product list.
///
/// Each product is stamped with the category key it was listed under.
///
/// # Errors
///
/// Returns `CatalogError::Parse` if the JSON is malformed or does not have
/// the catalog shape, and `CatalogError::NegativePrice` if any price is
/// below zero.
pub fn parse_catalog(document: &str) -> Result<Vec<Product>, CatalogError> {
    let CatalogDocument(groups) = serde_json::from_str(document)?;

    let mut products = Vec::with_capacity(groups.iter().map(|(_, list)| list.len()).sum());
    for (category, raw_products) in groups {
        for raw in raw_products {
            if raw.price.is_sign_negative() && !raw.price.is_zero() {
                return Err(CatalogError::NegativePrice {
                    id: raw.id,
                    category,
                });
            }
            products.push(Product {
                id: raw.id,
                name: raw.name,
                description: raw.description,
                price: raw.price,
                category: category.clone(),
                image: raw.image,
            });
        }
    }
    Ok(products)
}

/// Product IDs that appear more than once in the catalog.
///
/// The cart keys lines by product ID, so duplicates would share a line.
#[must_use]
pub fn duplicate_ids(products: &[Product]) -> Vec<ProductId> {
    let mut seen = HashSet::with_capacity(products.len());
    let mut duplicates = Vec::new();
    for product in products {
        if !seen.insert(product.id) && !duplicates.contains(&product.id) {
            duplicates.push(product.id);
        }
    }
    duplicates
}

/// Load state of the catalog as seen by a front end.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum CatalogState {
    /// Fetch in progress.
    #[default]
    Loading,
    /// Fetch or parse failed; the message is shown to the user.
    Failed(String),
    /// Catalog available.
    Ready(Vec<Product>),
}

impl CatalogState {
    /// Products if the catalog is ready.
    #[must_use]
    pub fn products(&self) -> Option<&[Product]> {
        match self {
            Self::Ready(products) => Some(products),
            Self::Loading | Self::Failed(_) => None,
        }
    }

    /// Find a product by ID in a ready catalog.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products()?.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "Pizzas": [
            {"id": 1, "name": "Margherita", "description": "Tomato and basil", "price": 299},
            {"id": 2, "name": "Farmhouse", "price": 349.5, "image": "https://cdn.example.com/f.jpg"}
        ],
        "Burgers": [
            {"id": 3, "name": "Veg Burger", "description": "Crispy patty", "price": 149}
        ],
        "Ice-Creams": []
    }"#;

    #[test]
    fn test_parse_flattens_in_document_order() {
        let products = parse_catalog(DOCUMENT).unwrap();
        let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Margherita", "Farmhouse", "Veg Burger"]);
    }

    #[test]
    fn test_parse_stamps_category() {
        let products = parse_catalog(DOCUMENT).unwrap();
        assert_eq!(products[0].category, "Pizzas");
        assert_eq!(products[1].category, "Pizzas");
        assert_eq!(products[2].category, "Burgers");
    }

    #[test]
    fn test_parse_keeps_optional_fields() {
        let products = parse_catalog(DOCUMENT).unwrap();
        assert_eq!(products[1].description, None);
        assert_eq!(products[1].price, Decimal::new(3495, 1));
        assert_eq!(
            products[1].image.as_deref(),
            Some("https://cdn.example.com/f.jpg")
        );
    }

    #[test]
    fn test_parse_preserves_non_alphabetical_category_order() {
        let products = parse_catalog(
            r#"{"Salads": [{"id": 5, "name": "Greek", "price": 1}],
                "Burgers": [{"id": 6, "name": "Cheese", "price": 1}]}"#,
        )
        .unwrap();
        assert_eq!(products[0].category, "Salads");
        assert_eq!(products[1].category, "Burgers");
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let err = parse_catalog(r#"[{"id": 1}]"#).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));

        let err = parse_catalog(r#"{"Pizzas": [{"id": 1, "name": "No price"}]}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_negative_price() {
        let err =
            parse_catalog(r#"{"Juices": [{"id": 4, "name": "Lime", "price": -1}]}"#).unwrap_err();
        assert!(matches!(err, CatalogError::NegativePrice { .. }));
    }

    #[test]
    fn test_duplicate_ids_reported_once() {
        let products = parse_catalog(
            r#"{"Pizzas": [{"id": 1, "name": "A", "price": 1}],
                "Burgers": [{"id": 1, "name": "B", "price": 1}, {"id": 1, "name": "C", "price": 1}]}"#,
        )
        .unwrap();
        assert_eq!(duplicate_ids(&products), vec![ProductId::new(1)]);
    }

    #[test]
    fn test_catalog_state_find() {
        let state = CatalogState::Ready(parse_catalog(DOCUMENT).unwrap());
        assert_eq!(state.find(ProductId::new(3)).unwrap().name, "Veg Burger");
        assert!(state.find(ProductId::new(99)).is_none());
        assert!(CatalogState::Loading.find(ProductId::new(1)).is_none());
    }
}
