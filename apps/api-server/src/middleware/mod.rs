//! Middleware and request extractors.

pub mod api_key;
pub mod cors;
pub mod error;
