//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or a connection borrowed from an open transaction)
//! as the first argument.

pub mod category_repo;
pub mod product_repo;

pub use category_repo::CategoryRepo;
pub use product_repo::ProductRepo;
