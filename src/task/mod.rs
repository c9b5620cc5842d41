//! Task ordering for workspace boards.
//!
//! Creating a task appends it to its (workspace, project, status) bucket;
//! bulk updates move tasks between positions and statuses after a single
//! membership check; listings come back ordered by position with assignees
//! resolved. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod tests;
