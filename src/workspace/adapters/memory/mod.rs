//! In-memory membership and user adapters.

mod directory;

pub use directory::{InMemoryMembershipRepository, InMemoryUserDirectory};
