//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! the SQL post store, an in-memory fallback store, and the rebuild webhook.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All database drivers
//! - `postgres` - PostgreSQL driver for SeaORM
//! - `sqlite` - SQLite / libSQL-compatible driver for SeaORM

pub mod database;
pub mod webhook;

pub use database::{DatabaseConfig, DecodePolicy, InMemoryPostRepository, SqlPostRepository};
pub use webhook::HttpWebhookNotifier;
