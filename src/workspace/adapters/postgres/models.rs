//! Diesel row models for membership and user persistence.

use super::schema::{members, users};
use diesel::prelude::*;

/// Query result row for membership records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MemberRow {
    /// Member user identifier.
    pub user_id: uuid::Uuid,
    /// Workspace identifier.
    pub workspace_id: uuid::Uuid,
}

/// Insert model for membership records. `created_at` takes the column
/// default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = members)]
pub struct NewMemberRow {
    /// Member user identifier.
    pub user_id: uuid::Uuid,
    /// Workspace identifier.
    pub workspace_id: uuid::Uuid,
}

/// Row model for user records, used for both reads and upserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}
