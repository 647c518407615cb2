//! Product business rules: transactional create, paginated listing and
//! soft delete.

use pis_core::error::CoreError;
use pis_core::pagination::{self, PageInfo, Paginated};
use pis_core::product::{
    NewProduct, ProductListQuery, NAME_CONFLICT_MESSAGE, NAME_UNIQUE_CONSTRAINT,
    UNKNOWN_CATEGORY_MESSAGE,
};
use pis_core::types::DbId;
use pis_db::constraint::{is_foreign_key_violation, is_unique_violation};
use pis_db::models::product::{CreatedProduct, ProductFilter, ProductListItem};
use pis_db::repositories::{CategoryRepo, ProductRepo};
use pis_db::DbPool;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct ProductService {
    pool: DbPool,
}

impl ProductService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a product and its category links atomically.
    ///
    /// The transaction holds one pooled connection until it commits. On any
    /// error `tx` is dropped, which rolls back and returns the connection to
    /// the pool.
    pub async fn create(&self, product: &NewProduct) -> AppResult<CreatedProduct> {
        let mut tx = self.pool.begin().await?;

        let known = CategoryRepo::count_existing(&mut tx, &product.category_ids).await?;
        if known != product.category_ids.len() as i64 {
            tracing::warn!(
                category_ids = ?product.category_ids,
                "Create references unknown categories",
            );
            return Err(CoreError::validation(UNKNOWN_CATEGORY_MESSAGE).into());
        }

        let row = ProductRepo::insert(&mut tx, product)
            .await
            .map_err(|err| translate_create_error(err, &product.name))?;
        ProductRepo::link_categories(&mut tx, row.id, &product.category_ids)
            .await
            .map_err(|err| translate_create_error(err, &product.name))?;
        tx.commit()
            .await
            .map_err(|err| translate_create_error(err, &product.name))?;

        tracing::info!(
            product_id = row.id,
            category_count = product.category_ids.len(),
            "Product created",
        );
        Ok(row.into())
    }

    /// One page of active products matching the query, plus totals.
    pub async fn list(&self, query: &ProductListQuery) -> AppResult<Paginated<ProductListItem>> {
        let filter = ProductFilter::from(query);
        let offset = pagination::offset(query.page, query.limit);

        let data = ProductRepo::list_active(&self.pool, &filter, query.limit, offset).await?;
        let total = ProductRepo::count_active(&self.pool, &filter).await?;

        tracing::debug!(
            page = query.page,
            limit = query.limit,
            returned = data.len(),
            total,
            "Listed products",
        );
        Ok(Paginated {
            data,
            pagination: PageInfo::new(query.page, query.limit, total),
        })
    }

    /// Flip an active product to inactive.
    ///
    /// Missing and already-inactive products are both reported as not found.
    pub async fn soft_delete(&self, id: DbId) -> AppResult<()> {
        if !ProductRepo::soft_delete(&self.pool, id).await? {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Product",
                id,
            }));
        }

        tracing::info!(product_id = id, "Product deactivated");
        Ok(())
    }
}

/// Map storage failures during a create onto client errors where the
/// caller is at fault; anything else stays a server error.
fn translate_create_error(err: sqlx::Error, name: &str) -> AppError {
    if is_unique_violation(&err, NAME_UNIQUE_CONSTRAINT) {
        tracing::warn!(name, "Rejected duplicate product name");
        return AppError::Core(CoreError::Conflict(NAME_CONFLICT_MESSAGE.into()));
    }
    if is_foreign_key_violation(&err) {
        tracing::warn!(name, "Create referenced a missing category");
        return AppError::Core(CoreError::validation(UNKNOWN_CATEGORY_MESSAGE));
    }
    AppError::Database(err)
}
