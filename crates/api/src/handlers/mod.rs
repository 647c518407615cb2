//! Request handlers.
//!
//! Handlers validate input, delegate to the services in [`AppState`] and
//! map errors via [`AppError`](crate::error::AppError).
//!
//! [`AppState`]: crate::state::AppState

pub mod category;
pub mod product;
