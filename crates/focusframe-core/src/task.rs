//! Task aggregate: lifecycle, renewal, and naming rules.
//!
//! A task is either active or completed; the transition is one-way per
//! instance. Repeatable tasks (those carrying a renewal interval) are not
//! reset on completion -- completing one spawns a fresh aggregate with a
//! pushed-forward due date while the original stays completed for good.
//!
//! Task names must be unique among the *active* tasks of a project. The
//! engine does not load project members itself; pin/reactivate take the
//! sibling summaries as input, the same way session history is supplied to
//! the pomodoro checks.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::id::{ProjectId, TaskId};
use crate::policy::SessionPolicy;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task accepts sessions and lifecycle operations.
    Active,
    /// Terminal per instance; renewal spawns a new aggregate instead.
    Completed,
}

/// The slice of a task the project-membership query returns.
///
/// Enough for the name-conflict checks without loading full aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub id: TaskId,
    pub name: String,
    pub status: TaskStatus,
}

/// A unit of work that pomodoros attach to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// Project the task currently belongs to
    pub project_id: ProjectId,
    /// Task name, unique among a project's active tasks
    pub name: String,
    /// Lifecycle state
    pub status: TaskStatus,
    /// When the task is due
    pub due_date: DateTime<Utc>,
    /// Recurrence period in minutes; present marks the task repeatable
    pub renewal_every_min: Option<u64>,
    /// Task-level override of the caller's default session policy
    pub policy: Option<SessionPolicy>,
}

impl Task {
    /// Create an active task with no recurrence and no policy override.
    pub fn new(name: impl Into<String>, project_id: ProjectId, due_date: DateTime<Utc>) -> Self {
        Self {
            id: TaskId::new(),
            project_id,
            name: name.into(),
            status: TaskStatus::Active,
            due_date,
            renewal_every_min: None,
            policy: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.status == TaskStatus::Active
    }

    /// Recurrence period as a duration, when the task is repeatable.
    pub fn renewal_interval(&self) -> Option<Duration> {
        self.renewal_every_min.map(|m| Duration::minutes(m as i64))
    }

    /// Due date of the successor a completion would spawn. Defined only
    /// for repeatable tasks.
    pub fn next_due_date(&self) -> Option<DateTime<Utc>> {
        self.renewal_interval().map(|ival| self.due_date + ival)
    }

    /// Sessions and lifecycle operations require an active task.
    pub fn ensure_actionable(&self) -> Result<(), DomainError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(DomainError::TaskNotActionable { id: self.id })
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Mark the task completed.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        if self.status == TaskStatus::Completed {
            return Err(DomainError::AlreadyCompleted { id: self.id });
        }
        self.status = TaskStatus::Completed;
        Ok(())
    }

    /// Mark the task completed and, when it is repeatable, spawn its
    /// successor: a fresh identity with the due date pushed forward by the
    /// renewal interval, everything else copied.
    ///
    /// Both returned tasks must be persisted together (the original as an
    /// update, the successor as an insert) -- a partial commit loses the
    /// recurrence.
    pub fn complete_with_renewal(mut self) -> Result<(Task, Option<Task>), DomainError> {
        self.complete()?;
        let successor = self.next_due_date().map(|due_date| Task {
            id: TaskId::new(),
            status: TaskStatus::Active,
            due_date,
            ..self.clone()
        });
        Ok((self, successor))
    }

    /// Move the task to another project.
    ///
    /// `siblings` are the target project's tasks; an active one with the
    /// same name blocks the move.
    pub fn pin_to_project(
        &mut self,
        project_id: ProjectId,
        siblings: &[TaskSummary],
    ) -> Result<(), DomainError> {
        self.ensure_actionable()?;
        self.ensure_name_available(project_id, siblings)?;
        self.project_id = project_id;
        Ok(())
    }

    /// Bring a completed task back to active, subject to the same naming
    /// rule as pinning within its own project.
    pub fn reactivate(&mut self, siblings: &[TaskSummary]) -> Result<(), DomainError> {
        if self.status == TaskStatus::Active {
            return Err(DomainError::AlreadyActive { id: self.id });
        }
        self.ensure_name_available(self.project_id, siblings)?;
        self.status = TaskStatus::Active;
        Ok(())
    }

    /// Name comparison is case-insensitive; completed siblings and the
    /// task's own row never conflict.
    fn ensure_name_available(
        &self,
        project_id: ProjectId,
        siblings: &[TaskSummary],
    ) -> Result<(), DomainError> {
        let wanted = self.name.to_lowercase();
        let conflict = siblings.iter().any(|t| {
            t.id != self.id
                && t.status == TaskStatus::Active
                && t.name.to_lowercase() == wanted
        });
        if conflict {
            return Err(DomainError::NameConflict {
                name: self.name.clone(),
                project_id,
            });
        }
        Ok(())
    }
}
