//! Handler boundary for the task board's JSON API.
//!
//! Handlers expect the host to mount them (see the route table below), to
//! share a [`TaskOrderingService`](crate::task::services::TaskOrderingService)
//! as router state, and to run a session middleware that inserts the
//! authenticated [`CallerId`] as a request extension.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | `GET` | `/tasks` | [`handlers::list_tasks`] |
//! | `POST` | `/tasks` | [`handlers::create_task`] |
//! | `GET` | `/tasks/:taskId` | [`handlers::get_task`] |
//! | `PATCH` | `/tasks/:taskId` | [`handlers::update_task`] |
//! | `DELETE` | `/tasks/:taskId` | [`handlers::delete_task`] |
//! | `POST` | `/tasks/bulk-update` | [`handlers::bulk_update_tasks`] |
//!
//! Successful responses are wrapped as `{ "data": ... }`; failures as
//! `{ "error": <kind>, "message": <text> }` (see [`ApiError`]).

pub mod dto;
mod error;
pub mod handlers;

pub use error::{ApiError, ErrorKind};

use crate::workspace::domain::UserId;

/// Authenticated caller, inserted into request extensions by the host's
/// session middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerId(pub UserId);
