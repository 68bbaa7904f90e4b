//! Menu browsing commands.
//!
//! # Usage
//!
//! ```bash
//! food-menu categories
//! food-menu list --category Burgers
//! food-menu list --search "paneer" --json
//! ```

use food_menu_core::{CategoryFilter, MENU_CATEGORIES, MenuEvent};

use super::{CommandError, open_session};
use crate::render;

/// Print the category chips, `All` first.
#[allow(clippy::print_stdout)]
pub fn categories() {
    println!("All");
    for category in MENU_CATEGORIES {
        println!("{category}");
    }
}

/// Print the products visible under a category and search query.
#[allow(clippy::print_stdout)]
pub async fn list(
    catalog: Option<&str>,
    category: CategoryFilter,
    search: String,
    json: bool,
) -> Result<(), CommandError> {
    let session = open_session(catalog).await?;
    session.dispatch(MenuEvent::CategorySelected(category))?;
    session.dispatch(MenuEvent::SearchChanged(search))?;

    let view = session.snapshot();
    let products = view.products.unwrap_or_default();

    if json {
        println!("{}", serde_json::to_string_pretty(&products)?);
    } else {
        print!("{}", render::products(&products, view.currency));
    }
    Ok(())
}
