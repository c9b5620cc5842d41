//! Authorization services for workspace-scoped operations.

mod guard;

pub use guard::{AccessDenied, GuardError, MembershipGuard, WorkspaceAccess};
