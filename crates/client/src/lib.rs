//! Typed client for the product inventory HTTP API.
//!
//! [`api`] talks to the server. [`validation`] and [`listing`] hold the
//! client-side rules a front end applies before and between requests.

pub mod api;
pub mod listing;
pub mod validation;

pub use api::{ClientError, InventoryClient};
