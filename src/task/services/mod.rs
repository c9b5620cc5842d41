//! Application services for task ordering.

mod ordering;

pub use ordering::{TaskOrderingService, TaskServiceError, TaskServiceResult, TaskWithAssignee};
