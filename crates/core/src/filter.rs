//! Category and search filtering over the catalog.

use serde::{Deserialize, Serialize};

use crate::types::Product;

/// Active category selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    /// Show every category.
    #[default]
    All,
    /// Show only products stamped with this category.
    Category(String),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => product.category == *category,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Category(category) => f.write_str(category),
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Ok(Self::Category(s.to_string()))
        }
    }
}

/// Current filter inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub active_category: CategoryFilter,
    pub search_query: String,
}

impl FilterState {
    /// Products visible under this filter.
    #[must_use]
    pub fn apply(&self, catalog: &[Product]) -> Vec<Product> {
        visible(catalog, &self.active_category, &self.search_query)
    }
}

/// Products matching both the category and the search query.
///
/// The query matches case-insensitively against the name and the raw
/// description. Products without a description can only match by name.
/// Catalog order is preserved.
#[must_use]
pub fn visible(catalog: &[Product], active_category: &CategoryFilter, query: &str) -> Vec<Product> {
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|product| active_category.matches(product))
        .filter(|product| needle.is_empty() || matches_query(product, &needle))
        .cloned()
        .collect()
}

fn matches_query(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::ProductId;

    fn product(id: i32, name: &str, description: Option<&str>, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: description.map(str::to_string),
            price: Decimal::from(100),
            category: category.to_string(),
            image: None,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Margherita", Some("Classic cheese pizza"), "Pizzas"),
            product(2, "Paneer Tikka Pizza", None, "Pizzas"),
            product(3, "Cheese Burger", Some("Double patty"), "Burgers"),
            product(4, "Mango Smoothie", Some("Alphonso mango"), "Smoothies"),
        ]
    }

    fn ids(products: &[Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_all_with_empty_query_returns_full_catalog_in_order() {
        let catalog = catalog();
        assert_eq!(visible(&catalog, &CategoryFilter::All, ""), catalog);
    }

    #[test]
    fn test_category_filter() {
        let filter = CategoryFilter::Category("Pizzas".to_string());
        assert_eq!(ids(&visible(&catalog(), &filter, "")), [1, 2]);
    }

    #[test]
    fn test_query_matches_name_or_description_case_insensitively() {
        assert_eq!(ids(&visible(&catalog(), &CategoryFilter::All, "CHEESE")), [1, 3]);
        assert_eq!(ids(&visible(&catalog(), &CategoryFilter::All, "alphonso")), [4]);
    }

    #[test]
    fn test_category_and_query_intersect() {
        let filter = CategoryFilter::Category("Burgers".to_string());
        assert_eq!(ids(&visible(&catalog(), &filter, "cheese")), [3]);
    }

    #[test]
    fn test_missing_description_does_not_match_fallback_text() {
        assert!(visible(&catalog(), &CategoryFilter::All, "premium ingredients").is_empty());
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(visible(&catalog(), &CategoryFilter::All, "sushi").is_empty());
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let state = FilterState {
            active_category: CategoryFilter::Category("Pizzas".to_string()),
            search_query: "pizza".to_string(),
        };
        let once = state.apply(&catalog());
        let twice = state.apply(&once);
        assert_eq!(once, twice);
        assert_eq!(once, state.apply(&catalog()));
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!("All".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!("".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "Ice-Creams".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Category("Ice-Creams".to_string()))
        );
    }
}
