//! CLI subcommands.

pub mod cart;
pub mod menu;

use food_menu_session::{CatalogSource, ConfigError, LoadError, MenuConfig, MenuSession, SessionError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid catalog source {0}: {1}")]
    InvalidCatalog(String, String),

    /// Catalog could not be loaded ("Menu Unavailable").
    #[error("Menu unavailable: {0}")]
    Load(#[from] LoadError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load configuration, apply the `--catalog` override, and fetch the catalog.
pub async fn open_session(catalog: Option<&str>) -> Result<MenuSession, CommandError> {
    let mut config = MenuConfig::from_env()?;
    if let Some(source) = catalog {
        config.catalog_source = source
            .parse::<CatalogSource>()
            .map_err(|e| CommandError::InvalidCatalog(source.to_owned(), e.to_string()))?;
    }

    tracing::debug!(source = %config.catalog_source, "Opening menu session");
    let session = MenuSession::new(&config)?;
    session.load().await?;
    Ok(session)
}
