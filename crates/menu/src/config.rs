//! Menu configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `MENU_CATALOG_SOURCE` - Catalog URL or file path (default: food-data.json)
//! - `MENU_CURRENCY` - Display currency code (default: INR)
//! - `MENU_DISCOUNT_THRESHOLD` - Subtotal above which the discount applies (default: 500)
//! - `MENU_DISCOUNT_RATE` - Discount fraction (default: 0.10)
//! - `MENU_TAX_RATE` - Tax fraction applied after discount (default: 0.05)
//! - `MENU_CONFIRMATION_DELAY_MS` - Order confirmation display time (default: 4000)
//! - `MENU_ALREADY_IN_CART_DELAY_MS` - "Already in cart" notice time (default: 2000)
//! - `MENU_ADDED_DELAY_MS` - "Added" notice time (default: 1000)
//! - `MENU_FETCH_TIMEOUT_SECS` - HTTP catalog fetch timeout (default: 10)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use food_menu_core::{CurrencyCode, PricingRules};
use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_SOURCE: &str = "food-data.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the catalog document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Fetched over HTTP(S).
    Http(Url),
    /// Read from the local filesystem.
    File(PathBuf),
}

impl FromStr for CatalogSource {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            Url::parse(s).map(Self::Http)
        } else {
            Ok(Self::File(PathBuf::from(s)))
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// How long each timed acknowledgement stays up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeDelays {
    /// "Added to cart" animation.
    pub added: Duration,
    /// "Item already in cart" notice.
    pub already_in_cart: Duration,
    /// Order confirmation; the cart is cleared when it closes.
    pub confirmation: Duration,
}

impl Default for NoticeDelays {
    fn default() -> Self {
        Self {
            added: Duration::from_millis(1000),
            already_in_cart: Duration::from_millis(2000),
            confirmation: Duration::from_millis(4000),
        }
    }
}

/// Menu application configuration.
#[derive(Debug, Clone)]
pub struct MenuConfig {
    /// Catalog document location
    pub catalog_source: CatalogSource,
    /// Currency used when displaying amounts
    pub currency: CurrencyCode,
    /// Discount and tax rules
    pub pricing: PricingRules,
    /// Notice and confirmation timers
    pub delays: NoticeDelays,
    /// Timeout for HTTP catalog fetches
    pub fetch_timeout: Duration,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            catalog_source: CatalogSource::File(PathBuf::from(DEFAULT_CATALOG_SOURCE)),
            currency: CurrencyCode::default(),
            pricing: PricingRules::default(),
            delays: NoticeDelays::default(),
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

impl MenuConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed, or if
    /// a pricing value is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`MenuConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let catalog_source = parse_or(&lookup, "MENU_CATALOG_SOURCE", defaults.catalog_source)?;
        let currency = parse_or(&lookup, "MENU_CURRENCY", defaults.currency)?;

        let pricing = PricingRules {
            discount_threshold: parse_or(
                &lookup,
                "MENU_DISCOUNT_THRESHOLD",
                defaults.pricing.discount_threshold,
            )?,
            discount_rate: parse_or(&lookup, "MENU_DISCOUNT_RATE", defaults.pricing.discount_rate)?,
            tax_rate: parse_or(&lookup, "MENU_TAX_RATE", defaults.pricing.tax_rate)?,
        };
        validate_pricing(&pricing)?;

        let delays = NoticeDelays {
            added: millis_or(&lookup, "MENU_ADDED_DELAY_MS", defaults.delays.added)?,
            already_in_cart: millis_or(
                &lookup,
                "MENU_ALREADY_IN_CART_DELAY_MS",
                defaults.delays.already_in_cart,
            )?,
            confirmation: millis_or(
                &lookup,
                "MENU_CONFIRMATION_DELAY_MS",
                defaults.delays.confirmation,
            )?,
        };

        let fetch_timeout = parse_or(
            &lookup,
            "MENU_FETCH_TIMEOUT_SECS",
            defaults.fetch_timeout.as_secs(),
        )
        .map(Duration::from_secs)?;

        Ok(Self {
            catalog_source,
            currency,
            pricing,
            delays,
            fetch_timeout,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if set, otherwise use the default.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        _ => Ok(default),
    }
}

fn millis_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    parse_or(lookup, key, default_ms).map(Duration::from_millis)
}

/// Rates must be fractions and the threshold must not be negative.
fn validate_pricing(pricing: &PricingRules) -> Result<(), ConfigError> {
    let unit = Decimal::ONE;
    for (key, rate) in [
        ("MENU_DISCOUNT_RATE", pricing.discount_rate),
        ("MENU_TAX_RATE", pricing.tax_rate),
    ] {
        if rate < Decimal::ZERO || rate > unit {
            return Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("must be between 0 and 1 (got {rate})"),
            ));
        }
    }
    if pricing.discount_threshold < Decimal::ZERO {
        return Err(ConfigError::InvalidEnvVar(
            "MENU_DISCOUNT_THRESHOLD".to_string(),
            format!("must not be negative (got {})", pricing.discount_threshold),
        ));
    }
    Ok(())
}
