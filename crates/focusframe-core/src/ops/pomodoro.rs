//! Session procedures: begin, finish, pause, resume.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::Result;
use crate::frame::pomodoro::Pomodoro;
use crate::id::{PomodoroId, TaskId};
use crate::ops::PomodoroOutput;
use crate::policy::SessionPolicy;
use crate::store::{OutputPort, PomodoroStore, SessionQuery, TaskStore};

/// Start a new session on a task.
///
/// Creates the pomodoro, validates its start against the task state and
/// the task's recent sessions, and inserts it.
pub fn begin_pomodoro(
    tasks: &dyn TaskStore,
    pomodoros: &dyn PomodoroStore,
    sessions: &dyn SessionQuery,
    out: &mut impl OutputPort<PomodoroOutput>,
    task_id: TaskId,
    start: DateTime<Utc>,
) -> Result<()> {
    let task = tasks.get(task_id)?;
    let recent = sessions.recent_for_task(task_id)?;

    let mut pomodoro = Pomodoro::new(task_id);
    pomodoro.begin(&task, &recent, start)?;

    pomodoros.save(&pomodoro, true)?;
    debug!(pomodoro = %pomodoro.id(), task = %task_id, %start, "session began");
    out.present(PomodoroOutput::from(&pomodoro));
    Ok(())
}

/// Close a running session.
///
/// The task's own policy overrides `default_policy` when present.
pub fn finish_pomodoro(
    tasks: &dyn TaskStore,
    pomodoros: &dyn PomodoroStore,
    sessions: &dyn SessionQuery,
    out: &mut impl OutputPort<PomodoroOutput>,
    default_policy: &SessionPolicy,
    pomodoro_id: PomodoroId,
    end: DateTime<Utc>,
) -> Result<()> {
    let mut pomodoro = pomodoros.get(pomodoro_id)?;
    let task = tasks.get(pomodoro.task_id())?;
    let recent = sessions.recent_for_task(pomodoro.task_id())?;
    let policy = task.policy.as_ref().unwrap_or(default_policy);

    pomodoro.finish(policy, &task, &recent, end)?;

    pomodoros.save(&pomodoro, false)?;
    debug!(pomodoro = %pomodoro_id, %end, "session finished");
    out.present(PomodoroOutput::from(&pomodoro));
    Ok(())
}

/// Record an interruption on a running session.
pub fn pause_pomodoro(
    tasks: &dyn TaskStore,
    pomodoros: &dyn PomodoroStore,
    out: &mut impl OutputPort<PomodoroOutput>,
    pomodoro_id: PomodoroId,
    at: DateTime<Utc>,
) -> Result<()> {
    let mut pomodoro = pomodoros.get(pomodoro_id)?;
    let task = tasks.get(pomodoro.task_id())?;

    pomodoro.pause(&task, at)?;

    pomodoros.save(&pomodoro, false)?;
    debug!(pomodoro = %pomodoro_id, %at, "session paused");
    out.present(PomodoroOutput::from(&pomodoro));
    Ok(())
}

/// Close the open interruption on a session, if any.
pub fn resume_pomodoro(
    tasks: &dyn TaskStore,
    pomodoros: &dyn PomodoroStore,
    out: &mut impl OutputPort<PomodoroOutput>,
    pomodoro_id: PomodoroId,
    at: DateTime<Utc>,
) -> Result<()> {
    let mut pomodoro = pomodoros.get(pomodoro_id)?;
    let task = tasks.get(pomodoro.task_id())?;

    pomodoro.resume(&task, at)?;

    pomodoros.save(&pomodoro, false)?;
    debug!(pomodoro = %pomodoro_id, %at, "session resumed");
    out.present(PomodoroOutput::from(&pomodoro));
    Ok(())
}
