//! Repository for the `products` and `product_categories` tables.

use pis_core::product::{NewProduct, ProductStatus};
use pis_core::types::DbId;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::models::product::{Product, ProductFilter, ProductListItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, quantity, status, created_at";

/// Listing projection: one row per product with its category names
/// aggregated (alphabetical, NULLs from the outer joins dropped).
const LIST_SELECT: &str = "\
    SELECT p.id, p.name, p.description, p.quantity, p.created_at, \
           ARRAY_REMOVE(ARRAY_AGG(c.name ORDER BY c.name), NULL) AS categories \
    FROM products p \
    LEFT JOIN product_categories pc ON pc.product_id = p.id \
    LEFT JOIN categories c ON c.id = pc.category_id";

/// Provides product persistence: create (within a transaction), filtered
/// listing, and soft delete.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new active product, returning the created row.
    ///
    /// Takes a connection so the caller can run it inside a transaction
    /// together with [`ProductRepo::link_categories`].
    pub async fn insert(conn: &mut PgConnection, input: &NewProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (name, description, quantity, status)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.quantity)
            .bind(ProductStatus::Active.id())
            .fetch_one(conn)
            .await
    }

    /// Link `product_id` to every id in `category_ids` with a single
    /// multi-row insert. Returns the number of rows written.
    pub async fn link_categories(
        conn: &mut PgConnection,
        product_id: DbId,
        category_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        if category_ids.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO product_categories (product_id, category_id) ");
        builder.push_values(category_ids, |mut row, category_id| {
            row.push_bind(product_id).push_bind(*category_id);
        });

        let result = builder.build().execute(conn).await?;
        Ok(result.rows_affected())
    }

    /// One page of active products matching `filter`, newest first.
    pub async fn list_active(
        pool: &PgPool,
        filter: &ProductFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProductListItem>, sqlx::Error> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(LIST_SELECT);
        push_active_filter(&mut builder, filter);
        builder
            .push(" GROUP BY p.id ORDER BY p.created_at DESC, p.id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        builder
            .build_query_as::<ProductListItem>()
            .fetch_all(pool)
            .await
    }

    /// Number of active products matching `filter`, ignoring pagination.
    pub async fn count_active(pool: &PgPool, filter: &ProductFilter) -> Result<i64, sqlx::Error> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(DISTINCT p.id) FROM products p");
        push_active_filter(&mut builder, filter);

        builder.build_query_scalar::<i64>().fetch_one(pool).await
    }

    /// Mark an active product inactive. Returns `true` if a row changed;
    /// a missing or already-inactive product returns `false`.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE products SET status = $2 WHERE id = $1 AND status = $3")
            .bind(id)
            .bind(ProductStatus::Inactive.id())
            .bind(ProductStatus::Active.id())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find a product by id regardless of status.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Category ids linked to a product, ascending.
    pub async fn category_ids(pool: &PgPool, product_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT category_id FROM product_categories WHERE product_id = $1 ORDER BY category_id",
        )
        .bind(product_id)
        .fetch_all(pool)
        .await
    }
}

/// Append the WHERE clause shared by the listing and its count.
///
/// Category ids get one bound placeholder each; a product qualifies when it
/// is linked to any of them.
fn push_active_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    builder
        .push(" WHERE p.status = ")
        .push_bind(ProductStatus::Active.id());

    if let Some(search) = &filter.search {
        builder
            .push(" AND p.name ILIKE ")
            .push_bind(like_pattern(search));
    }

    if !filter.category_ids.is_empty() {
        builder.push(
            " AND p.id IN (SELECT product_id FROM product_categories WHERE category_id IN (",
        );
        let mut ids = builder.separated(", ");
        for id in &filter.category_ids {
            ids.push_bind(*id);
        }
        ids.push_unseparated("))");
    }
}

/// Wrap `term` for a substring match, escaping LIKE metacharacters so they
/// match literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
