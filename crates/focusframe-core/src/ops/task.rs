//! Task lifecycle procedures: complete, reactivate, pin.

use tracing::debug;

use crate::error::Result;
use crate::id::{ProjectId, TaskId};
use crate::ops::TaskOutput;
use crate::store::{OutputPort, ProjectQuery, TaskStore};

/// Complete a task, spawning its successor when it is repeatable.
///
/// A renewal writes twice -- the original as an update, the successor as
/// an insert. The store implementation must commit both atomically (e.g.
/// inside one database transaction); a partial commit loses the
/// recurrence.
pub fn complete_task(
    tasks: &dyn TaskStore,
    out: &mut impl OutputPort<TaskOutput>,
    task_id: TaskId,
) -> Result<()> {
    let task = tasks.get(task_id)?;
    let (completed, successor) = task.complete_with_renewal()?;

    tasks.save(&completed, false)?;
    if let Some(successor) = &successor {
        tasks.save(successor, true)?;
        debug!(task = %task_id, successor = %successor.id, due = %successor.due_date, "task renewed");
    } else {
        debug!(task = %task_id, "task completed");
    }
    out.present(TaskOutput::from_task(
        &completed,
        successor.map(|t| t.id),
    ));
    Ok(())
}

/// Bring a completed task back to active.
pub fn reactivate_task(
    tasks: &dyn TaskStore,
    projects: &dyn ProjectQuery,
    out: &mut impl OutputPort<TaskOutput>,
    task_id: TaskId,
) -> Result<()> {
    let mut task = tasks.get(task_id)?;
    let siblings = projects.tasks_for_project(task.project_id)?;

    task.reactivate(&siblings)?;

    tasks.save(&task, false)?;
    debug!(task = %task_id, "task reactivated");
    out.present(TaskOutput::from_task(&task, None));
    Ok(())
}

/// Move a task into another project.
pub fn pin_task_to_project(
    tasks: &dyn TaskStore,
    projects: &dyn ProjectQuery,
    out: &mut impl OutputPort<TaskOutput>,
    task_id: TaskId,
    project_id: ProjectId,
) -> Result<()> {
    let mut task = tasks.get(task_id)?;
    let siblings = projects.tasks_for_project(project_id)?;

    task.pin_to_project(project_id, &siblings)?;

    tasks.save(&task, false)?;
    debug!(task = %task_id, project = %project_id, "task pinned");
    out.present(TaskOutput::from_task(&task, None));
    Ok(())
}
