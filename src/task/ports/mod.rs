//! Port contracts for task ordering.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod notifier;
pub mod repository;

pub use notifier::{TaskChange, TaskChangeNotifier};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
#[cfg(test)]
pub use repository::MockTaskRepository;
