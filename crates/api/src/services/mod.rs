//! Service layer: business rules between the handlers and the repositories.
//!
//! Services are built once at startup around the shared connection pool and
//! live in [`AppState`](crate::state::AppState).

pub mod category;
pub mod product;

pub use category::CategoryService;
pub use product::ProductService;
