//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ROUTINE_DATA_PATH` - Dataset JSON file (default: embedded dataset)
//! - `ROUTINE_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)
//! - `SHOPIFY_STORE` - Shopify store domain; enables checkout
//! - `SHOPIFY_STOREFRONT_PRIVATE_TOKEN` - Storefront API private token
//!   (required when `SHOPIFY_STORE` is set, high entropy)
//! - `SHOPIFY_API_VERSION` - API version (default: 2026-01)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_API_VERSION: &str = "2026-01";
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Log output format for the CLI subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Dataset file; `None` uses the embedded dataset
    pub data_path: Option<PathBuf>,
    pub log_format: LogFormat,
    /// Shopify checkout backend, when configured
    pub commerce: Option<CommerceConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
}

/// Shopify Storefront API configuration for checkout.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct CommerceConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store: String,
    /// Shopify API version (e.g., 2026-01)
    pub api_version: String,
    /// Storefront API private access token (server-side only)
    pub storefront_private_token: SecretString,
    /// GraphQL endpoint derived from store and version
    pub endpoint: Url,
}

impl std::fmt::Debug for CommerceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommerceConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field("storefront_private_token", &"[REDACTED]")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl CommerceConfig {
    /// Build a config, validating the token and deriving the endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InsecureSecret` for a placeholder or low-entropy
    /// token, or `ConfigError::InvalidEnvVar` if the store is not a valid host.
    pub fn new(store: &str, api_version: &str, token: &str) -> Result<Self, ConfigError> {
        validate_secret_strength(token, "SHOPIFY_STOREFRONT_PRIVATE_TOKEN")?;
        let endpoint = storefront_endpoint(store, api_version)?;
        Ok(Self {
            store: store.to_string(),
            api_version: api_version.to_string(),
            storefront_private_token: SecretString::from(token.to_string()),
            endpoint,
        })
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is invalid, or if `SHOPIFY_STORE`
    /// is set without a valid private token.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`EngineConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let data_path = env.optional("ROUTINE_DATA_PATH").map(PathBuf::from);
        let log_format = env
            .optional("ROUTINE_LOG_FORMAT")
            .map(|value| value.parse::<LogFormat>())
            .transpose()
            .map_err(|e| ConfigError::InvalidEnvVar("ROUTINE_LOG_FORMAT".to_string(), e))?
            .unwrap_or_default();

        let commerce = match env.optional("SHOPIFY_STORE") {
            Some(store) => Some(CommerceConfig::new(
                &store,
                &env.or_default("SHOPIFY_API_VERSION", DEFAULT_API_VERSION),
                &env.required("SHOPIFY_STOREFRONT_PRIVATE_TOKEN")?,
            )?),
            None => None,
        };

        Ok(Self {
            data_path,
            log_format,
            commerce,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional variable. Empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

/// Storefront GraphQL endpoint for a store domain.
fn storefront_endpoint(store: &str, api_version: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(&format!("https://{store}/api/{api_version}/graphql.json"))
        .map_err(|e| ConfigError::InvalidEnvVar("SHOPIFY_STORE".to_string(), e.to_string()))?;
    if url.host_str() != Some(store) {
        return Err(ConfigError::InvalidEnvVar(
            "SHOPIFY_STORE".to_string(),
            format!("expected a bare domain, got '{store}'"),
        ));
    }
    Ok(url)
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the token issued by Shopify."
            ),
        ));
    }

    Ok(())
}
