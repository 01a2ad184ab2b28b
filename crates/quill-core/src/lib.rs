//! # Quill Core
//!
//! The domain layer of the Quill blog service.
//! Posts, the ports infrastructure must implement, and the publish flow that ties them together.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::{PostService, SettlePolicy};
