//! In-memory store implementing every port trait.
//!
//! Backs the integration tests and embedded single-process callers. State
//! sits behind mutexes so the store satisfies the `Send + Sync` bounds of
//! the ports; a poisoned lock is reported as a persistence failure rather
//! than a panic.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::StoreError;
use crate::frame::pomodoro::Pomodoro;
use crate::id::{PomodoroId, ProjectId, TaskId};
use crate::store::{PomodoroStore, ProjectQuery, SessionQuery, TaskStore};
use crate::task::{Task, TaskSummary};

/// HashMap-backed implementation of all four store ports.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: Mutex<HashMap<TaskId, Task>>,
    pomodoros: Mutex<HashMap<PomodoroId, Pomodoro>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a task, bypassing the `create` bookkeeping.
    pub fn put_task(&self, task: Task) {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
            .insert(task.id, task);
    }

    /// Seed a pomodoro, bypassing the `create` bookkeeping.
    pub fn put_pomodoro(&self, pomodoro: Pomodoro) {
        self.pomodoros
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(pomodoro.id(), pomodoro);
    }

    fn lock_tasks(&self) -> Result<MutexGuard<'_, HashMap<TaskId, Task>>, StoreError> {
        self.tasks
            .lock()
            .map_err(|e| StoreError::Persistence(e.to_string()))
    }

    fn lock_pomodoros(&self) -> Result<MutexGuard<'_, HashMap<PomodoroId, Pomodoro>>, StoreError> {
        self.pomodoros
            .lock()
            .map_err(|e| StoreError::Persistence(e.to_string()))
    }
}

impl TaskStore for MemoryStore {
    fn get(&self, id: TaskId) -> Result<Task, StoreError> {
        self.lock_tasks()?
            .get(&id)
            .cloned()
            .ok_or(StoreError::TaskNotFound(id))
    }

    fn save(&self, task: &Task, create: bool) -> Result<(), StoreError> {
        let mut tasks = self.lock_tasks()?;
        if !create && !tasks.contains_key(&task.id) {
            return Err(StoreError::TaskNotFound(task.id));
        }
        tasks.insert(task.id, task.clone());
        Ok(())
    }
}

impl PomodoroStore for MemoryStore {
    fn get(&self, id: PomodoroId) -> Result<Pomodoro, StoreError> {
        self.lock_pomodoros()?
            .get(&id)
            .cloned()
            .ok_or(StoreError::PomodoroNotFound(id))
    }

    fn save(&self, pomodoro: &Pomodoro, create: bool) -> Result<(), StoreError> {
        let mut pomodoros = self.lock_pomodoros()?;
        if !create && !pomodoros.contains_key(&pomodoro.id()) {
            return Err(StoreError::PomodoroNotFound(pomodoro.id()));
        }
        pomodoros.insert(pomodoro.id(), pomodoro.clone());
        Ok(())
    }
}

impl SessionQuery for MemoryStore {
    fn recent_for_task(&self, task_id: TaskId) -> Result<Vec<Pomodoro>, StoreError> {
        let mut sessions: Vec<Pomodoro> = self
            .lock_pomodoros()?
            .values()
            .filter(|p| p.task_id() == task_id)
            .cloned()
            .collect();
        sessions.sort_by_key(|p| p.start());
        Ok(sessions)
    }
}

impl ProjectQuery for MemoryStore {
    fn tasks_for_project(&self, project_id: ProjectId) -> Result<Vec<TaskSummary>, StoreError> {
        Ok(self
            .lock_tasks()?
            .values()
            .filter(|t| t.project_id == project_id)
            .map(|t| TaskSummary {
                id: t.id,
                name: t.name.clone(),
                status: t.status,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;
    use chrono::{TimeZone, Utc};

    fn task(project_id: ProjectId) -> Task {
        Task::new(
            "Write report",
            project_id,
            Utc.with_ymd_and_hms(2024, 3, 15, 17, 0, 0).unwrap(),
        )
    }

    #[test]
    fn get_missing_task_is_not_found() {
        let store = MemoryStore::new();
        let id = TaskId::new();
        assert_eq!(TaskStore::get(&store, id), Err(StoreError::TaskNotFound(id)));
    }

    #[test]
    fn update_requires_existing_row() {
        let store = MemoryStore::new();
        let t = task(ProjectId::new());

        assert_eq!(
            TaskStore::save(&store, &t, false),
            Err(StoreError::TaskNotFound(t.id))
        );
        TaskStore::save(&store, &t, true).unwrap();
        TaskStore::save(&store, &t, false).unwrap();
        assert_eq!(TaskStore::get(&store, t.id).unwrap(), t);
    }

    #[test]
    fn session_query_scopes_to_task() {
        let store = MemoryStore::new();
        let mine = TaskId::new();
        let other = TaskId::new();
        store.put_pomodoro(Pomodoro::new(mine));
        store.put_pomodoro(Pomodoro::new(mine));
        store.put_pomodoro(Pomodoro::new(other));

        assert_eq!(store.recent_for_task(mine).unwrap().len(), 2);
        assert_eq!(store.recent_for_task(other).unwrap().len(), 1);
    }

    #[test]
    fn project_query_returns_summaries() {
        let store = MemoryStore::new();
        let project = ProjectId::new();
        let mut done = task(project);
        done.name = "Old chore".into();
        done.status = TaskStatus::Completed;
        let live = task(project);
        store.put_task(done);
        store.put_task(live.clone());
        store.put_task(task(ProjectId::new())); // other project

        let summaries = store.tasks_for_project(project).unwrap();
        assert_eq!(summaries.len(), 2);
        assert!(summaries.iter().any(|s| s.id == live.id));
    }
}
