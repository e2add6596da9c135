//! Shopify Storefront API cart backend.
//!
//! Submits the whole cart as a single `cartCreate` mutation and returns the
//! new cart's checkout URL.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, instrument};
use url::Url;

use super::{CartLineSubmission, CartReceipt, CommerceBackend, CommerceError};
use crate::config::CommerceConfig;

const CART_CREATE_MUTATION: &str = "\
mutation CreateCart($input: CartInput!) {
  cartCreate(input: $input) {
    cart { id checkoutUrl totalQuantity }
    userErrors { field message }
  }
}";

/// Size attribute key attached to each cart line.
pub const SIZE_ATTRIBUTE: &str = "Size";

/// Client for the Shopify Storefront cart API.
#[derive(Clone)]
pub struct StorefrontCartClient {
    inner: Arc<StorefrontCartClientInner>,
}

struct StorefrontCartClientInner {
    client: reqwest::Client,
    endpoint: Url,
    access_token: SecretString,
}

impl StorefrontCartClient {
    /// Create a new Storefront cart client.
    #[must_use]
    pub fn new(config: &CommerceConfig) -> Self {
        Self {
            inner: Arc::new(StorefrontCartClientInner {
                client: reqwest::Client::new(),
                endpoint: config.endpoint.clone(),
                access_token: config.storefront_private_token.clone(),
            }),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    async fn create_cart(&self, lines: &[CartLineSubmission]) -> Result<CartReceipt, CommerceError> {
        if lines.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let response = self
            .inner
            .client
            .post(self.inner.endpoint.clone())
            .header(
                "Shopify-Storefront-Private-Token",
                self.inner.access_token.expose_secret(),
            )
            .header("Content-Type", "application/json")
            .json(&build_cart_create_body(lines))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CommerceError::RateLimited(retry_after));
        }

        // Body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify API returned non-success status"
            );
            return Err(CommerceError::Status {
                status: status.as_u16(),
                body: response_text.chars().take(200).collect(),
            });
        }

        let receipt = parse_cart_create_response(&response_text)?;
        debug!(cart_id = %receipt.cart_id, "Created Shopify cart");
        Ok(receipt)
    }
}

#[async_trait]
impl CommerceBackend for StorefrontCartClient {
    async fn submit(&self, lines: &[CartLineSubmission]) -> Result<CartReceipt, CommerceError> {
        self.create_cart(lines).await
    }
}

/// GraphQL request body for creating a cart with `lines`.
#[must_use]
pub fn build_cart_create_body(lines: &[CartLineSubmission]) -> serde_json::Value {
    let lines: Vec<serde_json::Value> = lines
        .iter()
        .map(|line| {
            json!({
                "merchandiseId": line.merchandise_id,
                "quantity": line.quantity,
                "attributes": [{ "key": SIZE_ATTRIBUTE, "value": line.size }],
            })
        })
        .collect();

    json!({
        "query": CART_CREATE_MUTATION,
        "operationName": "CreateCart",
        "variables": { "input": { "lines": lines } },
    })
}

#[derive(Deserialize)]
struct GraphQLResponse {
    data: Option<CartCreateData>,
    #[serde(default)]
    errors: Vec<GraphQLErrorBody>,
}

#[derive(Deserialize)]
struct GraphQLErrorBody {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartCreateData {
    cart_create: Option<CartCreatePayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartCreatePayload {
    cart: Option<CreatedCart>,
    #[serde(default)]
    user_errors: Vec<UserErrorBody>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedCart {
    id: String,
    checkout_url: Option<String>,
    total_quantity: u32,
}

#[derive(Deserialize)]
struct UserErrorBody {
    #[serde(default)]
    field: Option<Vec<String>>,
    message: String,
}

/// Interpret a `cartCreate` response body.
///
/// # Errors
///
/// Returns `CommerceError::Parse` for malformed JSON, `GraphQL` for top-level
/// errors, and `UserError` when the mutation rejected its input or returned
/// no cart.
pub fn parse_cart_create_response(body: &str) -> Result<CartReceipt, CommerceError> {
    let response: GraphQLResponse = serde_json::from_str(body)?;

    if !response.errors.is_empty() {
        return Err(CommerceError::GraphQL(
            response.errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    let payload = response
        .data
        .and_then(|data| data.cart_create)
        .ok_or_else(|| CommerceError::UserError("Failed to create cart".to_string()))?;

    if !payload.user_errors.is_empty() {
        return Err(CommerceError::UserError(
            payload
                .user_errors
                .into_iter()
                .map(|e| match e.field {
                    Some(field) if !field.is_empty() => format!("{}: {}", field.join("."), e.message),
                    _ => e.message,
                })
                .collect::<Vec<_>>()
                .join("; "),
        ));
    }

    let cart = payload
        .cart
        .ok_or_else(|| CommerceError::UserError("Failed to create cart".to_string()))?;

    Ok(CartReceipt {
        cart_id: cart.id,
        checkout_url: cart.checkout_url,
        total_quantity: cart.total_quantity,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: &str, quantity: u32, size: &str) -> CartLineSubmission {
        CartLineSubmission {
            merchandise_id: id.to_string(),
            quantity,
            size: size.to_string(),
        }
    }

    #[test]
    fn test_build_cart_create_body() {
        let body = build_cart_create_body(&[line("gid://shopify/ProductVariant/1", 2, "5.1 oz")]);
        assert_eq!(body["operationName"], "CreateCart");
        assert!(body["query"].as_str().unwrap().contains("cartCreate"));
        assert_eq!(
            body["variables"]["input"]["lines"],
            json!([{
                "merchandiseId": "gid://shopify/ProductVariant/1",
                "quantity": 2,
                "attributes": [{"key": "Size", "value": "5.1 oz"}],
            }])
        );
    }

    #[test]
    fn test_parse_success() {
        let receipt = parse_cart_create_response(
            r#"{"data":{"cartCreate":{"cart":{"id":"gid://shopify/Cart/abc","checkoutUrl":"https://skin.myshopify.com/cart/c/abc","totalQuantity":3},"userErrors":[]}}}"#,
        )
        .unwrap();
        assert_eq!(receipt.cart_id, "gid://shopify/Cart/abc");
        assert_eq!(receipt.total_quantity, 3);
        assert!(receipt.checkout_url.unwrap().ends_with("/abc"));
    }

    #[test]
    fn test_parse_user_errors() {
        let err = parse_cart_create_response(
            r#"{"data":{"cartCreate":{"cart":null,"userErrors":[{"field":["input","lines","0","merchandiseId"],"message":"The merchandise does not exist."}]}}}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CommerceError::UserError(msg) if msg == "input.lines.0.merchandiseId: The merchandise does not exist."
        ));
    }

    #[test]
    fn test_parse_graphql_errors() {
        let err = parse_cart_create_response(
            r#"{"errors":[{"message":"Access denied"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CommerceError::GraphQL(msgs) if msgs == vec!["Access denied".to_string()]));
    }

    #[test]
    fn test_parse_missing_cart() {
        let err = parse_cart_create_response(r#"{"data":{"cartCreate":null}}"#).unwrap_err();
        assert!(matches!(err, CommerceError::UserError(_)));
        let err = parse_cart_create_response("not json").unwrap_err();
        assert!(matches!(err, CommerceError::Parse(_)));
    }

    #[tokio::test]
    async fn test_submit_empty_cart_fails_without_request() {
        let config = CommerceConfig::new(
            "skin.myshopify.com",
            "2026-01",
            "shpat_9f3Kx2LqP7vB4nZ8mR1tY6wC0dH5jA",
        )
        .unwrap();
        let client = StorefrontCartClient::new(&config);
        assert_eq!(
            client.endpoint().as_str(),
            "https://skin.myshopify.com/api/2026-01/graphql.json"
        );
        let err = client.submit(&[]).await.unwrap_err();
        assert!(matches!(err, CommerceError::EmptyCart));
    }
}
