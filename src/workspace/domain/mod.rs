//! Domain model for workspace membership.

mod ids;
mod member;
mod user;

pub use ids::{ProjectId, UserId, WorkspaceId};
pub use member::Member;
pub use user::User;
