//! Diesel schema for workspace membership and users.

diesel::table! {
    /// User accounts.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Email address.
        #[max_length = 255]
        email -> Varchar,
    }
}

diesel::table! {
    /// Workspace membership facts.
    members (user_id, workspace_id) {
        /// Member user identifier.
        user_id -> Uuid,
        /// Workspace the membership grants access to.
        workspace_id -> Uuid,
        /// When the membership was recorded.
        created_at -> Timestamptz,
    }
}
