//! Port traits at the persistence and presentation boundaries.
//!
//! The engine never performs I/O; orchestration procedures load and save
//! aggregates through these contracts. Implementations own concurrency
//! control (row locks or equivalent) -- the engine's contract is only
//! "given a consistent snapshot, produce a consistent next state or fail".
//!
//! [`memory::MemoryStore`] implements all of them for tests and embedded
//! callers.

pub mod memory;

use crate::error::StoreError;
use crate::frame::pomodoro::Pomodoro;
use crate::id::{PomodoroId, ProjectId, TaskId};
use crate::task::{Task, TaskSummary};

/// Task persistence contract.
pub trait TaskStore: Send + Sync {
    /// Load a task by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] when the id does not exist.
    fn get(&self, id: TaskId) -> Result<Task, StoreError>;

    /// Persist a task; `create` selects insert over update.
    fn save(&self, task: &Task, create: bool) -> Result<(), StoreError>;
}

/// Pomodoro persistence contract.
pub trait PomodoroStore: Send + Sync {
    /// Load a pomodoro by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PomodoroNotFound`] when the id does not exist.
    fn get(&self, id: PomodoroId) -> Result<Pomodoro, StoreError>;

    /// Persist a pomodoro; `create` selects insert over update.
    fn save(&self, pomodoro: &Pomodoro, create: bool) -> Result<(), StoreError>;
}

/// Read-model query for a task's recent sessions.
///
/// The returned snapshot is the collision-check input for one validation
/// pass; a bounded window is enough, full history is not required.
pub trait SessionQuery: Send + Sync {
    fn recent_for_task(&self, task_id: TaskId) -> Result<Vec<Pomodoro>, StoreError>;
}

/// Read-model query for a project's tasks, consumed by the name-conflict
/// checks.
pub trait ProjectQuery: Send + Sync {
    fn tasks_for_project(&self, project_id: ProjectId) -> Result<Vec<TaskSummary>, StoreError>;
}

/// Output boundary: receives exactly one DTO per successful orchestration
/// run. DTOs carry identifiers, timestamps, and status enums only.
pub trait OutputPort<T> {
    fn present(&mut self, output: T);
}

/// Any closure works as an output port.
impl<T, F: FnMut(T)> OutputPort<T> for F {
    fn present(&mut self, output: T) {
        self(output)
    }
}
