//! Application services - orchestration over the ports.

mod access;
mod post_service;

pub use access::AdminKey;
pub use post_service::{NotifyOutcome, PostService, Published, SettlePolicy};
