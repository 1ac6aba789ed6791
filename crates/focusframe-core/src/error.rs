//! Core error types for focusframe-core.
//!
//! Domain errors are validation failures: synchronous, locally caused by bad
//! input or a stale precondition, never transient. Store errors come back
//! from the persistence ports consumed by the orchestration layer.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::id::{PomodoroId, ProjectId, TaskId};

/// Core error type for focusframe-core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Domain-validation errors
    #[error("Validation error: {0}")]
    Domain(#[from] DomainError),

    /// Storage-port errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Domain-validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The owning task is completed; sessions may not act on it
    #[error("Task {id} is completed and cannot be acted on")]
    TaskNotActionable { id: TaskId },

    /// The frame already has both start and end
    #[error("Frame is already finished")]
    AlreadyFinished,

    /// End precedes start
    #[error("End ({end}) precedes start ({start})")]
    StartAfterEnd {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Session length exceeds the policy length plus the error margin
    #[error("Session ran {actual} against an allowed {allowed} (margin included)")]
    DurationExceeded { actual: Duration, allowed: Duration },

    /// The candidate interval overlaps recorded sessions on the same task
    #[error("Session collides with {} recorded session(s)", sessions.len())]
    CollidingSession { sessions: Vec<PomodoroId> },

    /// No pause/resume/finish on an already-finished pomodoro
    #[error("Pomodoro {id} is finished; no further actions allowed")]
    PomodoroFinished { id: PomodoroId },

    /// Redundant completion requested
    #[error("Task {id} is already completed")]
    AlreadyCompleted { id: TaskId },

    /// Redundant reactivation requested
    #[error("Task {id} is already active")]
    AlreadyActive { id: TaskId },

    /// Another active task in the project carries the same name
    #[error("An active task named '{name}' already exists in project {project_id}")]
    NameConflict { name: String, project_id: ProjectId },

    /// Clock-skew guard: supplied timestamps must not lie in the future
    #[error("Timestamp {at} lies in the future (now: {now})")]
    TimestampInFuture {
        at: DateTime<Utc>,
        now: DateTime<Utc>,
    },
}

/// Errors returned by store-port implementations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The task was not found
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// The pomodoro was not found
    #[error("Pomodoro not found: {0}")]
    PomodoroNotFound(PomodoroId),

    /// Persistence-layer failure
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
