//! Step definitions for task placement and bulk reordering scenarios.

mod given;
pub mod world;
