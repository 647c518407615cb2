//! Response-shaping and admission middleware.

pub mod admission;
pub mod error_detail;
