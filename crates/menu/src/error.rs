//! Session error type.

use food_menu_core::MenuError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::loader::LoadError;

/// Errors surfaced by a [`MenuSession`](crate::MenuSession).
#[derive(Debug, Error)]
pub enum SessionError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The menu refused an event.
    #[error(transparent)]
    Menu(#[from] MenuError),
}

/// Result type alias for `SessionError`.
pub type Result<T> = std::result::Result<T, SessionError>;
