//! Orchestration procedures.
//!
//! Each procedure follows the same shape: load the aggregate through a
//! store port, load the read-model snapshot it validates against, invoke
//! the domain operation, persist, then hand an output DTO to the caller's
//! [`OutputPort`](crate::store::OutputPort). Validation always runs against
//! the loaded snapshot before anything is saved, so a rejected operation
//! leaves the stored state untouched.
//!
//! There is no optimistic-concurrency retry here; shielding against a
//! conflicting concurrent write is the store implementation's job.

mod pomodoro;
mod task;

pub use pomodoro::{begin_pomodoro, finish_pomodoro, pause_pomodoro, resume_pomodoro};
pub use task::{complete_task, pin_task_to_project, reactivate_task};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::frame::pomodoro::Pomodoro;
use crate::id::{PomodoroId, ProjectId, TaskId};
use crate::task::{Task, TaskStatus};

/// What the session procedures hand to the output port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroOutput {
    pub id: PomodoroId,
    pub task_id: TaskId,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl From<&Pomodoro> for PomodoroOutput {
    fn from(p: &Pomodoro) -> Self {
        Self {
            id: p.id(),
            task_id: p.task_id(),
            start: p.start(),
            end: p.end(),
        }
    }
}

/// What the task procedures hand to the output port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutput {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub status: TaskStatus,
    pub due_date: DateTime<Utc>,
    /// Successor spawned by completing a repeatable task.
    pub spawned: Option<TaskId>,
}

impl TaskOutput {
    fn from_task(task: &Task, spawned: Option<TaskId>) -> Self {
        Self {
            id: task.id,
            project_id: task.project_id,
            status: task.status,
            due_date: task.due_date,
            spawned,
        }
    }
}
