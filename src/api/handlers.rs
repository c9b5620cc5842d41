//! Task API handlers.
//!
//! Each handler converts every failure, including extractor rejections, into
//! the [`ApiError`] envelope.

use super::{
    ApiError, CallerId,
    dto::{
        BulkUpdateBody, CreateTaskBody, Envelope, ListTasksQuery, ListedTaskResponse,
        MessageResponse, TaskResponse, UpdateTaskBody,
    },
};
use crate::task::{domain::TaskId, ports::TaskRepository, services::TaskOrderingService};
use crate::workspace::ports::{MembershipRepository, UserDirectory};
use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use mockable::Clock;

/// Result type returned by every handler.
pub type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

fn rejected(rejection: impl std::fmt::Display) -> ApiError {
    ApiError::invalid_request(rejection.to_string())
}

/// `GET /tasks`: lists a workspace's tasks ordered by position.
///
/// # Errors
///
/// Returns 400 for a malformed query, 401 for non-members and 500 on store
/// failure.
pub async fn list_tasks<R, M, U, C>(
    State(service): State<TaskOrderingService<R, M, U, C>>,
    Extension(CallerId(caller)): Extension<CallerId>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> ApiResult<Vec<ListedTaskResponse>>
where
    R: TaskRepository,
    M: MembershipRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    let Query(query) = query.map_err(|err| rejected(err.body_text()))?;
    let filter = query.into_filter()?;
    let listed = service
        .list_tasks(caller, filter)
        .await
        .map_err(|err| ApiError::from_service(err, "Failed to get tasks"))?;
    Ok(Json(Envelope::new(
        listed.iter().map(ListedTaskResponse::from).collect(),
    )))
}

/// `POST /tasks`: creates a task at the end of its bucket.
///
/// # Errors
///
/// Returns 400 for a malformed body or blank name, 401 for non-members and
/// 500 on store failure.
pub async fn create_task<R, M, U, C>(
    State(service): State<TaskOrderingService<R, M, U, C>>,
    Extension(CallerId(caller)): Extension<CallerId>,
    body: Result<Json<CreateTaskBody>, JsonRejection>,
) -> ApiResult<TaskResponse>
where
    R: TaskRepository,
    M: MembershipRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    let Json(body) = body.map_err(|err| rejected(err.body_text()))?;
    let new_task = body.into_new_task()?;
    let task = service
        .create_task(caller, new_task)
        .await
        .map_err(|err| ApiError::from_service(err, "Failed to create task"))?;
    Ok(Json(Envelope::new(TaskResponse::from(&task))))
}

/// `GET /tasks/:taskId`: fetches one task.
///
/// # Errors
///
/// Returns 400 for a malformed id, 404 when missing, 401 for non-members and
/// 500 on store failure.
pub async fn get_task<R, M, U, C>(
    State(service): State<TaskOrderingService<R, M, U, C>>,
    Extension(CallerId(caller)): Extension<CallerId>,
    task_id: Result<Path<TaskId>, PathRejection>,
) -> ApiResult<TaskResponse>
where
    R: TaskRepository,
    M: MembershipRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    let Path(task_id) = task_id.map_err(|err| rejected(err.body_text()))?;
    let task = service
        .get_task(caller, task_id)
        .await
        .map_err(|err| ApiError::from_service(err, "Failed to get task"))?;
    Ok(Json(Envelope::new(TaskResponse::from(&task))))
}

/// `PATCH /tasks/:taskId`: applies a field patch.
///
/// # Errors
///
/// Returns 400 for a malformed request, 404 when missing, 401 for
/// non-members and 500 on store failure.
pub async fn update_task<R, M, U, C>(
    State(service): State<TaskOrderingService<R, M, U, C>>,
    Extension(CallerId(caller)): Extension<CallerId>,
    task_id: Result<Path<TaskId>, PathRejection>,
    body: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> ApiResult<TaskResponse>
where
    R: TaskRepository,
    M: MembershipRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    let Path(task_id) = task_id.map_err(|err| rejected(err.body_text()))?;
    let Json(body) = body.map_err(|err| rejected(err.body_text()))?;
    let patch = body.into_patch()?;
    let task = service
        .update_task(caller, task_id, patch)
        .await
        .map_err(|err| ApiError::from_service(err, "Failed to update task"))?;
    Ok(Json(Envelope::new(TaskResponse::from(&task))))
}

/// `DELETE /tasks/:taskId`: deletes one task without compacting positions.
///
/// # Errors
///
/// Returns 400 for a malformed id, 404 when missing, 401 for non-members and
/// 500 on store failure.
pub async fn delete_task<R, M, U, C>(
    State(service): State<TaskOrderingService<R, M, U, C>>,
    Extension(CallerId(caller)): Extension<CallerId>,
    task_id: Result<Path<TaskId>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError>
where
    R: TaskRepository,
    M: MembershipRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    let Path(task_id) = task_id.map_err(|err| rejected(err.body_text()))?;
    service
        .delete_task(caller, task_id)
        .await
        .map_err(|err| ApiError::from_service(err, "Failed to delete task"))?;
    Ok(Json(MessageResponse {
        message: "Task deleted successfully".to_owned(),
    }))
}

/// `POST /tasks/bulk-update`: applies a batch of status and position changes.
///
/// # Errors
///
/// Returns 400 for a malformed body or a batch spanning other than one
/// workspace, 401 for non-members and 500 when any entry failed.
pub async fn bulk_update_tasks<R, M, U, C>(
    State(service): State<TaskOrderingService<R, M, U, C>>,
    Extension(CallerId(caller)): Extension<CallerId>,
    body: Result<Json<BulkUpdateBody>, JsonRejection>,
) -> ApiResult<Vec<TaskResponse>>
where
    R: TaskRepository,
    M: MembershipRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    let Json(body) = body.map_err(|err| rejected(err.body_text()))?;
    let updated = service
        .bulk_update(caller, body.tasks)
        .await
        .map_err(|err| ApiError::from_service(err, "Failed to update tasks"))?;
    Ok(Json(Envelope::new(
        updated.iter().map(TaskResponse::from).collect(),
    )))
}
