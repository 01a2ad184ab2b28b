//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod notifier;
mod repository;

pub use notifier::RebuildNotifier;
pub use repository::PostRepository;
