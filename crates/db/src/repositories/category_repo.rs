//! Repository for the `categories` table.

use pis_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::category::Category;

/// Read access to categories. Categories are seeded, never written here.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List every category ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name ASC")
            .fetch_all(pool)
            .await
    }

    /// Count how many of `ids` exist. `ids` must not contain duplicates.
    pub async fn count_existing(conn: &mut PgConnection, ids: &[DbId]) -> Result<i64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories WHERE id = ANY($1)")
            .bind(ids)
            .fetch_one(conn)
            .await
    }
}
