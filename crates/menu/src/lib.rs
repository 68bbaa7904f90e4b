//! Food Menu Session - Catalog loading and timed acknowledgements.
//!
//! Wraps the synchronous [`food_menu_core::Menu`] store with the parts that
//! need I/O or a clock:
//!
//! - [`config`] - Environment-driven configuration
//! - [`loader`] - Catalog fetch from HTTP or a local file
//! - [`timers`] - Cancellable one-shot timers
//! - [`session`] - The [`MenuSession`] handle front ends talk to
//!
//! # Example
//!
//! ```rust,ignore
//! use food_menu_core::{MenuEvent, ProductId};
//! use food_menu_session::{MenuConfig, MenuSession};
//!
//! let session = MenuSession::new(&MenuConfig::from_env()?)?;
//! session.load().await?;
//! session.dispatch(MenuEvent::AddRequested(ProductId::new(1)))?;
//! let view = session.snapshot();
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod loader;
pub mod session;
pub mod timers;

pub use config::{CatalogSource, ConfigError, MenuConfig, NoticeDelays};
pub use error::{Result, SessionError};
pub use loader::{CatalogLoader, LoadError};
pub use session::{CatalogStatus, MenuSession, MenuView, Notice};
