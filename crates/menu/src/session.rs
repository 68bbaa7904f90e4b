//! Menu session shared by a front end.
//!
//! A [`MenuSession`] is a cheaply cloneable handle to one user's menu: the
//! catalog, filter, cart, order flow, and the timers behind the transient
//! notices. Timer callbacks only hold a weak reference, so a callback that
//! fires after every handle has been dropped does nothing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use food_menu_core::{
    Acknowledgement, CartLine, CatalogState, CurrencyCode, FilterState, Menu, MenuEvent,
    OrderState, OrderSummary, Product, ProductId,
};
use serde::Serialize;
use tracing::instrument;

use crate::config::{MenuConfig, NoticeDelays};
use crate::error::Result;
use crate::loader::{CatalogLoader, LoadError};
use crate::timers::{TimerKind, TimerTicket, Timers};

/// A transient acknowledgement currently on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// "Added to cart!" for a newly inserted line.
    Added { product_id: ProductId, name: String },
    /// "Item already in cart! Quantity increased."
    AlreadyInCart { product_id: ProductId },
}

impl Notice {
    const fn timer_kind(&self) -> TimerKind {
        match self {
            Self::Added { .. } => TimerKind::AddedNotice,
            Self::AlreadyInCart { .. } => TimerKind::AlreadyInCartNotice,
        }
    }
}

/// Catalog load status without the product list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CatalogStatus {
    Loading,
    Failed { message: String },
    Ready { product_count: usize },
}

impl From<&CatalogState> for CatalogStatus {
    fn from(state: &CatalogState) -> Self {
        match state {
            CatalogState::Loading => Self::Loading,
            CatalogState::Failed(message) => Self::Failed {
                message: message.clone(),
            },
            CatalogState::Ready(products) => Self::Ready {
                product_count: products.len(),
            },
        }
    }
}

/// Everything a front end needs to render the menu.
#[derive(Debug, Clone, Serialize)]
pub struct MenuView {
    pub catalog: CatalogStatus,
    pub filter: FilterState,
    /// `None` until the catalog is ready.
    pub products: Option<Vec<Product>>,
    pub cart: Vec<CartLine>,
    pub item_count: u64,
    pub summary: OrderSummary,
    pub currency: CurrencyCode,
    pub order: OrderState,
    pub notices: Vec<Notice>,
}

struct SessionState {
    menu: Menu,
    notices: Vec<Notice>,
    timers: Timers,
}

impl SessionState {
    fn show_notice(&mut self, notice: Notice) {
        let kind = notice.timer_kind();
        self.notices.retain(|n| n.timer_kind() != kind);
        self.notices.push(notice);
    }

    fn dismiss_notice(&mut self, kind: TimerKind) {
        self.notices.retain(|n| n.timer_kind() != kind);
    }
}

/// Handle to one menu session.
#[derive(Clone)]
pub struct MenuSession {
    inner: Arc<Mutex<SessionState>>,
    loader: CatalogLoader,
    delays: NoticeDelays,
    currency: CurrencyCode,
}

impl MenuSession {
    /// Create a session whose catalog is still loading.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog loader cannot be built.
    pub fn new(config: &MenuConfig) -> Result<Self> {
        let loader = CatalogLoader::new(config.catalog_source.clone(), config.fetch_timeout)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(SessionState {
                menu: Menu::new(config.pricing),
                notices: Vec::new(),
                timers: Timers::new(),
            })),
            loader,
            delays: config.delays,
            currency: config.currency,
        })
    }

    /// Fetch the catalog and make it available.
    ///
    /// On failure the catalog state holds the error message for display, and
    /// calling `load` again is the way to retry. Returns the product count.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the catalog could not be fetched or parsed.
    #[instrument(skip(self))]
    pub async fn load(&self) -> std::result::Result<usize, LoadError> {
        self.lock().menu.set_catalog(CatalogState::Loading);

        match self.loader.load().await {
            Ok(products) => {
                let count = products.len();
                self.lock().menu.set_catalog(CatalogState::Ready(products));
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Menu unavailable");
                self.lock()
                    .menu
                    .set_catalog(CatalogState::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Apply a user event and start whatever timer its acknowledgement needs.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the menu refuses the event (unknown product,
    /// catalog not loaded, empty cart at checkout).
    #[instrument(skip(self))]
    pub fn dispatch(&self, event: MenuEvent) -> Result<Acknowledgement> {
        let mut state = self.lock();
        let ack = state.menu.apply(event)?;

        match &ack {
            Acknowledgement::Added { product_id } => {
                let name = state
                    .menu
                    .catalog()
                    .find(*product_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                state.show_notice(Notice::Added {
                    product_id: *product_id,
                    name,
                });
                self.schedule(&mut state, TimerKind::AddedNotice, self.delays.added);
            }
            Acknowledgement::AlreadyInCart { product_id } => {
                state.show_notice(Notice::AlreadyInCart {
                    product_id: *product_id,
                });
                self.schedule(
                    &mut state,
                    TimerKind::AlreadyInCartNotice,
                    self.delays.already_in_cart,
                );
            }
            Acknowledgement::OrderPlaced { confirmation } => {
                tracing::info!(
                    items = confirmation.item_count,
                    total = %confirmation.summary.total,
                    "Order placed"
                );
                self.schedule(
                    &mut state,
                    TimerKind::OrderConfirmation,
                    self.delays.confirmation,
                );
            }
            Acknowledgement::OrderCompleted => {
                state.timers.cancel(TimerKind::OrderConfirmation);
                tracing::info!("Order confirmation dismissed, cart cleared");
            }
            Acknowledgement::None => {}
        }

        Ok(ack)
    }

    /// Snapshot of the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> MenuView {
        let state = self.lock();
        let menu = &state.menu;
        MenuView {
            catalog: CatalogStatus::from(menu.catalog()),
            filter: menu.filter().clone(),
            products: menu.visible_products(),
            cart: menu.cart().lines().to_vec(),
            item_count: menu.cart().total_item_count(),
            summary: menu.summary(),
            currency: self.currency,
            order: menu.order().state().clone(),
            notices: state.notices.clone(),
        }
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    #[must_use]
    pub const fn delays(&self) -> NoticeDelays {
        self.delays
    }

    fn schedule(&self, state: &mut SessionState, kind: TimerKind, delay: Duration) {
        let session = Arc::downgrade(&self.inner);
        state
            .timers
            .schedule(kind, delay, move |ticket| on_timer(&session, ticket));
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        lock(&self.inner)
    }
}

impl std::fmt::Debug for MenuSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuSession")
            .field("source", self.loader.source())
            .field("delays", &self.delays)
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}

// A poisoned lock still holds consistent state: every mutation is a single
// call into `Menu` that cannot panic halfway.
fn lock(inner: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

fn on_timer(session: &Weak<Mutex<SessionState>>, ticket: TimerTicket) {
    let Some(inner) = session.upgrade() else {
        tracing::debug!(kind = ?ticket.kind, "Timer fired after session was dropped");
        return;
    };
    let mut state = lock(&inner);
    if !state.timers.finish(ticket) {
        return;
    }

    match ticket.kind {
        TimerKind::AddedNotice | TimerKind::AlreadyInCartNotice => {
            state.dismiss_notice(ticket.kind);
        }
        TimerKind::OrderConfirmation => {
            if state.menu.complete_order() {
                tracing::info!("Order confirmation closed, cart cleared");
            }
        }
    }
}
