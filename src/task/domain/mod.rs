//! Domain model for task ordering.
//!
//! Tasks live in buckets keyed by workspace, project and status. Each task
//! carries a numeric position used to order it within its bucket; the domain
//! owns position arithmetic and field validation while persistence concerns
//! stay behind the task ports.

mod error;
mod ids;
mod position;
mod query;
mod status;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use position::TaskPosition;
pub use query::{PositionUpdate, TaskBucket, TaskFilter, TaskPatch};
pub use status::TaskStatus;
pub use task::{MAX_TASK_NAME_CHARS, NewTask, PersistedTaskData, Task};
