//! Post storage.

mod connections;
mod decode;
mod memory;
mod sql_repo;

pub mod entity;

pub use connections::{DatabaseConfig, connect};
pub use decode::DecodePolicy;
pub use memory::InMemoryPostRepository;
pub use sql_repo::SqlPostRepository;
