use pis_db::models::category::Category;
use pis_db::repositories::CategoryRepo;
use pis_db::DbPool;

use crate::error::AppResult;

/// Read-only access to the seeded category set.
#[derive(Clone)]
pub struct CategoryService {
    pool: DbPool,
}

impl CategoryService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Every category, alphabetical. The set is small and unpaginated.
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        Ok(CategoryRepo::list(&self.pool).await?)
    }
}
