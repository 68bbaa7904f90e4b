//! Cart and order commands.
//!
//! # Usage
//!
//! ```bash
//! # Two Margheritas and a juice
//! food-menu quote 1 1 7
//!
//! # Same cart, placed as an order
//! food-menu order 1 1 7 --wait
//! ```

use std::time::Duration;

use food_menu_core::{Acknowledgement, MenuEvent, ProductId};
use food_menu_session::MenuSession;

use super::{CommandError, open_session};
use crate::render;

/// Build a cart from `ids` and print it with its summary.
#[allow(clippy::print_stdout)]
pub async fn quote(catalog: Option<&str>, ids: &[ProductId], json: bool) -> Result<(), CommandError> {
    let session = open_session(catalog).await?;
    fill_cart(&session, ids, !json)?;

    let view = session.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render::cart(&view));
    }
    Ok(())
}

/// Build a cart from `ids`, place the order, and optionally wait for the
/// confirmation to close.
#[allow(clippy::print_stdout)]
pub async fn order(catalog: Option<&str>, ids: &[ProductId], wait: bool) -> Result<(), CommandError> {
    let session = open_session(catalog).await?;
    fill_cart(&session, ids, true)?;

    if let Acknowledgement::OrderPlaced { confirmation } =
        session.dispatch(MenuEvent::CheckoutRequested)?
    {
        print!("{}", render::confirmation(&confirmation, session.currency()));
    }

    if wait {
        tokio::time::sleep(session.delays().confirmation + Duration::from_millis(50)).await;
        let view = session.snapshot();
        println!(
            "Cart cleared ({} items). Continue shopping!",
            view.item_count
        );
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn fill_cart(session: &MenuSession, ids: &[ProductId], announce: bool) -> Result<(), CommandError> {
    for &id in ids {
        let ack = session.dispatch(MenuEvent::AddRequested(id))?;
        if announce && let Some(line) = render::acknowledgement(&ack, &session.snapshot()) {
            println!("{line}");
        }
    }
    Ok(())
}
