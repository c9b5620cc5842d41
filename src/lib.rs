//! Taskboard: task ordering for a multi-tenant project board.
//!
//! This crate provides positional task creation, filtered listing and bulk
//! reordering for workspaces, gated by workspace membership.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task ordering domain, ports, adapters and service
//! - [`workspace`]: Membership guard and user lookup
//! - [`api`]: JSON handlers and the response envelope
//! - [`config`]: Database pool configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod api;
pub mod config;
pub mod task;
pub mod telemetry;
pub mod workspace;
