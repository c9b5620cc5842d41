//! `PostgreSQL` adapters for membership and user lookup.

mod models;
mod repository;
mod schema;

pub use repository::PostgresWorkspaceDirectory;
