//! Catalog loader.
//!
//! Fetches the catalog document once from its configured source and turns it
//! into a flat product list. There is no retry; callers reload explicitly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use food_menu_core::catalog::{self, CatalogError};
use food_menu_core::Product;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::CatalogSource;

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    /// HTTP request failed.
    #[error("Failed to fetch menu: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("Failed to fetch menu: HTTP {0}")]
    Status(reqwest::StatusCode),

    /// Catalog file could not be read.
    #[error("Failed to read menu from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not a valid catalog.
    #[error(transparent)]
    Parse(#[from] CatalogError),
}

/// Loads the catalog from a [`CatalogSource`].
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    client: reqwest::Client,
    source: CatalogSource,
}

impl CatalogLoader {
    /// Create a loader for `source`.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Http` if the HTTP client cannot be built.
    pub fn new(source: CatalogSource, fetch_timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder().timeout(fetch_timeout).build()?;
        Ok(Self { client, source })
    }

    #[must_use]
    pub const fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Fetch and flatten the catalog.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the document cannot be fetched or parsed.
    #[instrument(skip(self), fields(source = %self.source))]
    pub async fn load(&self) -> Result<Vec<Product>, LoadError> {
        let document = match &self.source {
            CatalogSource::Http(url) => self.fetch(url).await?,
            CatalogSource::File(path) => read_file(path).await?,
        };

        let products = catalog::parse_catalog(&document)?;

        let duplicates = catalog::duplicate_ids(&products);
        if !duplicates.is_empty() {
            tracing::warn!(?duplicates, "Catalog contains duplicate product IDs");
        }

        tracing::info!(products = products.len(), "Catalog loaded");
        Ok(products)
    }

    async fn fetch(&self, url: &Url) -> Result<String, LoadError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status));
        }

        Ok(response.text().await?)
    }
}

async fn read_file(path: &Path) -> Result<String, LoadError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use tempfile::NamedTempFile;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    pub(crate) const DOCUMENT: &str = r#"{
        "Pizzas": [
            {"id": 1, "name": "Margherita", "description": "Tomato, mozzarella, basil", "price": 300},
            {"id": 2, "name": "Farmhouse", "price": 300}
        ],
        "Juices": [
            {"id": 3, "name": "Orange Juice", "description": "Freshly squeezed", "price": 89.5}
        ]
    }"#;

    /// Catalog file removed when the handle is dropped.
    pub(crate) fn temp_catalog(contents: &str) -> NamedTempFile {
        let file = tempfile::Builder::new()
            .prefix("food-menu-")
            .suffix(".json")
            .tempfile()
            .unwrap();
        std::fs::write(file.path(), contents).unwrap();
        file
    }

    /// Serve a single canned HTTP response and return its URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0_u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        Url::parse(&format!("http://{addr}/food-data.json")).unwrap()
    }

    fn loader(source: CatalogSource) -> CatalogLoader {
        CatalogLoader::new(source, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let file = temp_catalog(DOCUMENT);
        let products = loader(CatalogSource::File(file.path().to_path_buf()))
            .load()
            .await
            .unwrap();

        assert_eq!(products.len(), 3);
        assert_eq!(products.last().unwrap().category, "Juices");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("food-data.json");
        let err = loader(CatalogSource::File(path)).load().await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_load_malformed_file() {
        let file = temp_catalog("{ not json");
        let err = loader(CatalogSource::File(file.path().to_path_buf()))
            .load()
            .await
            .unwrap_err();

        assert!(matches!(err, LoadError::Parse(_)));
        assert!(err.to_string().starts_with("Invalid catalog document"));
    }

    #[tokio::test]
    async fn test_load_over_http() {
        let url = serve_once("200 OK", DOCUMENT).await;
        let products = loader(CatalogSource::Http(url)).load().await.unwrap();
        assert_eq!(products.len(), 3);
    }

    #[tokio::test]
    async fn test_load_http_error_status() {
        let url = serve_once("404 Not Found", "missing").await;
        let err = loader(CatalogSource::Http(url)).load().await.unwrap_err();
        assert!(
            matches!(err, LoadError::Status(status) if status == reqwest::StatusCode::NOT_FOUND)
        );
    }
}
