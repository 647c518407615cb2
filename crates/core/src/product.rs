//! Product rules: lifecycle status, create payload validation and list
//! query parsing.

use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;
use crate::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::types::DbId;
use crate::validation::{check_positive_ids, dedup_ids, messages_from, parse_positive_id};

/// Client-facing message for a duplicate product name.
pub const NAME_CONFLICT_MESSAGE: &str = "Product name must be unique";

/// Name of the storage constraint that keeps product names unique.
pub const NAME_UNIQUE_CONSTRAINT: &str = "uq_products_name";

/// Client-facing message when a create references a missing category.
pub const UNKNOWN_CATEGORY_MESSAGE: &str = "One or more categories do not exist";

/// Product lifecycle status, stored as SMALLINT.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductStatus {
    Inactive = 0,
    Active = 1,
}

impl ProductStatus {
    /// Return the database status value.
    pub fn id(self) -> i16 {
        self as i16
    }
}

impl TryFrom<i16> for ProductStatus {
    type Error = CoreError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ProductStatus::Inactive),
            1 => Ok(ProductStatus::Active),
            other => Err(CoreError::Internal(format!("unknown product status {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Raw create payload as received on the wire.
///
/// Every field is optional at the type level so that a missing field is
/// reported alongside every other violation instead of failing
/// deserialization on the first one.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateProductInput {
    #[validate(
        required(message = "\"name\" is required"),
        length(
            min = 2,
            max = 150,
            message = "\"name\" length must be between 2 and 150 characters"
        )
    )]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(
        required(message = "\"quantity\" is required"),
        range(
            min = 0,
            max = 2147483647,
            message = "\"quantity\" must be a non-negative integer"
        )
    )]
    pub quantity: Option<i64>,

    #[validate(
        required(message = "\"categoryIds\" is required"),
        length(min = 1, message = "\"categoryIds\" must contain at least 1 item")
    )]
    pub category_ids: Option<Vec<DbId>>,
}

/// A validated product ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    /// Distinct, positive, in request order.
    pub category_ids: Vec<DbId>,
}

impl CreateProductInput {
    /// Normalize (trim the name) and validate the payload.
    pub fn into_new_product(mut self) -> Result<NewProduct, CoreError> {
        self.name = self.name.map(|n| n.trim().to_string());

        let mut messages = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => messages_from(&errors),
        };
        if let Some(ids) = &self.category_ids {
            check_positive_ids("categoryIds", ids, &mut messages);
        }
        if !messages.is_empty() {
            return Err(CoreError::Validation(messages));
        }

        let (Some(name), Some(quantity), Some(category_ids)) =
            (self.name, self.quantity, self.category_ids)
        else {
            return Err(CoreError::Internal(
                "validated create payload is missing a required field".into(),
            ));
        };
        let quantity = i32::try_from(quantity)
            .map_err(|_| CoreError::validation("\"quantity\" must be a non-negative integer"))?;

        Ok(NewProduct {
            name,
            description: self.description,
            quantity,
            category_ids: dedup_ids(&category_ids),
        })
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// Validated parameters for the paginated product listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListQuery {
    pub page: i64,
    pub limit: i64,
    /// Trimmed, non-empty substring to match against product names.
    pub search: Option<String>,
    /// Products linked to any of these categories qualify. Empty means no filter.
    pub category_ids: Vec<DbId>,
}

impl Default for ProductListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
            category_ids: Vec::new(),
        }
    }
}

#[derive(Validate)]
struct PageWindow {
    #[validate(range(min = 1, message = "\"page\" must be greater than or equal to 1"))]
    page: i64,
    #[validate(range(min = 1, max = 100, message = "\"limit\" must be between 1 and 100"))]
    limit: i64,
}

fn parse_number(field: &str, raw: &str, messages: &mut Vec<String>) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            messages.push(format!("\"{field}\" must be a number"));
            None
        }
    }
}

impl ProductListQuery {
    /// Build a list query from raw query-string pairs.
    ///
    /// `categoryIds` may be repeated, given in bracketed form
    /// (`categoryIds[]=`), or comma separated. Later `page`, `limit` and
    /// `search` values override earlier ones. Unknown keys are rejected.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, CoreError> {
        let mut query = ProductListQuery::default();
        let mut messages = Vec::new();

        for (key, value) in pairs {
            match key.as_str() {
                "page" => {
                    if let Some(page) = parse_number("page", value, &mut messages) {
                        query.page = page;
                    }
                }
                "limit" => {
                    if let Some(limit) = parse_number("limit", value, &mut messages) {
                        query.limit = limit;
                    }
                }
                "search" => {
                    let term = value.trim();
                    query.search = (!term.is_empty()).then(|| term.to_string());
                }
                "categoryIds" | "categoryIds[]" => {
                    for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                        match parse_positive_id("categoryIds", part) {
                            Ok(id) => query.category_ids.push(id),
                            Err(msg) => messages.push(msg),
                        }
                    }
                }
                other => messages.push(format!("\"{other}\" is not allowed")),
            }
        }

        let window = PageWindow {
            page: query.page,
            limit: query.limit,
        };
        if let Err(errors) = window.validate() {
            messages.extend(messages_from(&errors));
        }

        if !messages.is_empty() {
            return Err(CoreError::Validation(messages));
        }

        query.category_ids = dedup_ids(&query.category_ids);
        Ok(query)
    }
}
