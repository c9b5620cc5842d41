//! Port contracts for membership and user lookup.

pub mod membership;
pub mod users;

pub use membership::{MembershipRepository, MembershipRepositoryError, MembershipRepositoryResult};
pub use users::{UserDirectory, UserDirectoryError, UserDirectoryResult};
