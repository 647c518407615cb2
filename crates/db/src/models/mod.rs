//! Row models and DTOs.

pub mod category;
pub mod product;
