//! Product entity model and DTOs.

use pis_core::product::{ProductListQuery, ProductStatus};
use pis_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    /// Stored as SMALLINT; an unknown value fails the row decode.
    #[sqlx(try_from = "i16")]
    pub status: ProductStatus,
    pub created_at: Timestamp,
}

/// Response body for a freshly created product. Categories are not echoed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedProduct {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
}

impl From<Product> for CreatedProduct {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            quantity: product.quantity,
        }
    }
}

/// An active product with the names of its linked categories.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListItem {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub created_at: Timestamp,
    /// Linked category names, alphabetical. Empty when the product has none.
    pub categories: Vec<String>,
}

/// Filter applied to the active-product listing and its count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name.
    pub search: Option<String>,
    /// Match products linked to any of these categories.
    pub category_ids: Vec<DbId>,
}

impl From<&ProductListQuery> for ProductFilter {
    fn from(query: &ProductListQuery) -> Self {
        Self {
            search: query.search.clone(),
            category_ids: query.category_ids.clone(),
        }
    }
}
