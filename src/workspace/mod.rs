//! Workspace membership and user lookup.
//!
//! Tasks are owned by workspaces, and every task operation is gated on the
//! caller holding a membership in the owning workspace. This module provides
//! the identifiers shared with the task module, the membership and user
//! directory ports, their adapters, and the [`services::MembershipGuard`]
//! that issues workspace access tokens.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
