//! Diesel schema for task persistence.

diesel::table! {
    /// Task records placed on workspace boards.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Owning workspace.
        workspace_id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Optional assignee.
        assigned_id -> Nullable<Uuid>,
        /// Workflow status.
        #[max_length = 50]
        status -> Varchar,
        /// Due date.
        due_date -> Timestamptz,
        /// Ordinal within the (workspace, project, status) bucket.
        position -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
