//! Adapter implementations for membership and user ports.

pub mod memory;
pub mod postgres;
