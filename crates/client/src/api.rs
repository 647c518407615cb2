//! REST client for the inventory endpoints.
//!
//! Wraps `GET/POST /api/products`, `DELETE /api/products/{id}` and
//! `GET /api/categories` using [`reqwest`].

use chrono::{DateTime, Utc};
use pis_core::types::DbId;
use serde::{Deserialize, Serialize};

const FETCH_PRODUCTS_FAILED: &str = "Failed to fetch products";
const CREATE_PRODUCT_FAILED: &str = "Failed to create product";
const DELETE_PRODUCT_FAILED: &str = "Failed to delete product";
const FETCH_CATEGORIES_FAILED: &str = "Failed to fetch categories";

/// A category as listed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
}

/// One row of the product listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    /// Category names, alphabetical.
    pub categories: Vec<String>,
}

/// The row returned by a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedProduct {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i64,
}

/// A page of products with its totals, flattened from the server envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub products: Vec<ProductSummary>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// Listing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub page: i64,
    pub limit: i64,
    pub search: String,
    pub category_ids: Vec<DbId>,
}

impl ProductQuery {
    /// Query-string pairs in request order. `search` is omitted when blank
    /// and each category id becomes its own `categoryIds` pair.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search", search.to_string()));
        }
        pairs.extend(self.category_ids.iter().map(|id| ("categoryIds", id.to_string())));
        pairs
    }
}

/// Create form contents, sent as the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub quantity: Option<i64>,
    pub category_ids: Vec<DbId>,
}

#[derive(Deserialize)]
struct PageEnvelope {
    data: Vec<ProductSummary>,
    pagination: PageMeta,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageMeta {
    page: i64,
    limit: i64,
    total: i64,
    total_pages: i64,
}

/// The server's JSON error shape. `stack` is ignored.
#[derive(Deserialize)]
struct ErrorPayload {
    message: String,
    #[serde(default)]
    errors: Vec<String>,
}

/// Errors from the inventory client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        /// Individual validation messages, if the server sent any.
        errors: Vec<String>,
    },
}

impl ClientError {
    /// HTTP status of an API error, `None` for transport failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(err) => err.status().map(|s| s.as_u16()),
        }
    }
}

/// HTTP client for one inventory server.
pub struct InventoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl InventoryClient {
    /// * `base_url` - Server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] and its connection pool.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// `GET /api/products`
    pub async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage, ClientError> {
        let response = self
            .client
            .get(self.url("/api/products"))
            .query(&query.to_pairs())
            .send()
            .await?;

        let envelope: PageEnvelope = parse_response(response, FETCH_PRODUCTS_FAILED).await?;
        Ok(ProductPage {
            products: envelope.data,
            page: envelope.pagination.page,
            limit: envelope.pagination.limit,
            total: envelope.pagination.total,
            total_pages: envelope.pagination.total_pages,
        })
    }

    /// `GET /api/categories`
    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        let response = self.client.get(self.url("/api/categories")).send().await?;
        parse_response(response, FETCH_CATEGORIES_FAILED).await
    }

    /// `POST /api/products`
    pub async fn create_product(&self, form: &ProductForm) -> Result<CreatedProduct, ClientError> {
        let response = self
            .client
            .post(self.url("/api/products"))
            .json(form)
            .send()
            .await?;

        let created: CreatedProduct = parse_response(response, CREATE_PRODUCT_FAILED).await?;
        tracing::debug!(product_id = created.id, "Created product");
        Ok(created)
    }

    /// `DELETE /api/products/{id}`
    pub async fn delete_product(&self, id: DbId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/products/{id}")))
            .send()
            .await?;

        ensure_success(response, DELETE_PRODUCT_FAILED).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

// ---- private helpers ----

/// Return the response unchanged on success. Otherwise build an
/// [`ClientError::Api`] from the server's error body, falling back to
/// `fallback` when the body is not in the expected shape.
async fn ensure_success(
    response: reqwest::Response,
    fallback: &str,
) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let (message, errors) = match serde_json::from_str::<ErrorPayload>(&body) {
        Ok(payload) => (payload.message, payload.errors),
        Err(_) => (fallback.to_string(), Vec::new()),
    };
    tracing::debug!(status = status.as_u16(), %message, "API request failed");

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
        errors,
    })
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    fallback: &str,
) -> Result<T, ClientError> {
    let response = ensure_success(response, fallback).await?;
    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_skip_blank_search() {
        let query = ProductQuery {
            page: 2,
            limit: 5,
            search: "   ".into(),
            category_ids: vec![3, 1],
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("page", "2".to_string()),
                ("limit", "5".to_string()),
                ("categoryIds", "3".to_string()),
                ("categoryIds", "1".to_string()),
            ]
        );
    }

    #[test]
    fn query_pairs_trim_search() {
        let query = ProductQuery {
            page: 1,
            limit: 5,
            search: " lap ".into(),
            category_ids: Vec::new(),
        };
        assert_eq!(query.to_pairs()[2], ("search", "lap".to_string()));
    }

    #[test]
    fn form_serializes_camel_case() {
        let form = ProductForm {
            name: "Lamp".into(),
            description: "Desk lamp".into(),
            quantity: Some(2),
            category_ids: vec![1],
        };
        assert_eq!(
            serde_json::to_value(&form).unwrap(),
            serde_json::json!({
                "name": "Lamp",
                "description": "Desk lamp",
                "quantity": 2,
                "categoryIds": [1],
            })
        );
    }

    #[test]
    fn trailing_slash_is_dropped_from_base_url() {
        let client = InventoryClient::new("http://localhost:3000/");
        assert_eq!(client.url("/api/products"), "http://localhost:3000/api/products");
    }
}
