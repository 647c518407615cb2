//! Domain building blocks for the product inventory service.
//!
//! This crate does no network or database I/O: it holds the shared error type,
//! type aliases, environment helpers, pagination arithmetic and the request
//! validation rules used by both the repository layer and the HTTP layer.

pub mod config;
pub mod error;
pub mod pagination;
pub mod product;
pub mod types;
pub mod validation;
