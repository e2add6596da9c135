//! Handing the reconciled cart to a commerce backend.
//!
//! The session never talks HTTP itself. It converts its cart into
//! [`CartLineSubmission`]s and passes them to a [`CommerceBackend`]; the
//! production backend is [`StorefrontCartClient`], which creates a Shopify
//! cart through the Storefront API.
//!
//! Submission is a single attempt. Errors are returned to the caller and
//! never retried here.

mod storefront;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::Cart;
use crate::catalog::Catalog;

pub use storefront::{StorefrontCartClient, build_cart_create_body, parse_cart_create_response};

/// Errors returned by a commerce backend.
#[derive(Debug, Error)]
pub enum CommerceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// GraphQL query returned top-level errors.
    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQL(Vec<String>),

    /// Backend answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The mutation rejected its input (unknown variant, bad quantity, ...).
    #[error("User error: {0}")]
    UserError(String),

    /// Nothing to submit.
    #[error("Cart is empty")]
    EmptyCart,
}

/// One line handed to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineSubmission {
    /// Shopify variant GID when the catalog knows it, otherwise the product slug.
    pub merchandise_id: String,
    pub quantity: u32,
    /// Size the customer chose.
    pub size: String,
}

impl CartLineSubmission {
    /// Convert every cart line, looking up variant IDs in the catalog.
    #[must_use]
    pub fn from_cart(cart: &Cart, catalog: &Catalog) -> Vec<Self> {
        cart.items()
            .iter()
            .map(|item| {
                let variant_id = catalog.find_by_slug(&item.product).and_then(|product| {
                    product
                        .sizes
                        .iter()
                        .find(|option| option.size == item.size)
                        .and_then(|option| option.variant_id.clone())
                });
                Self {
                    merchandise_id: variant_id.unwrap_or_else(|| item.product.to_string()),
                    quantity: item.quantity,
                    size: item.size.clone(),
                }
            })
            .collect()
    }
}

/// What the backend created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartReceipt {
    pub cart_id: String,
    pub checkout_url: Option<String>,
    pub total_quantity: u32,
}

/// Something that can accept a finished cart.
#[async_trait]
pub trait CommerceBackend: Send + Sync {
    /// Submit all lines in one request.
    async fn submit(&self, lines: &[CartLineSubmission]) -> Result<CartReceipt, CommerceError>;
}
