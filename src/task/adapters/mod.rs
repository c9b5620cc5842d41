//! Adapter implementations for task ports.

pub mod memory;
pub mod notify;
pub mod postgres;
