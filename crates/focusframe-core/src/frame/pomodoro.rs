//! Pomodoro sessions.
//!
//! A [`Pomodoro`] is one timed focus session tied to a task. It embeds a
//! [`TimeFrame`] for the start/end rules, owns its pauses, and layers the
//! session-specific validation on top: the owning task must be active, the
//! session must not collide with the task's recorded history, and the worked
//! time (pauses deducted) must fit the policy length plus the error margin.
//!
//! The engine never loads history itself. Callers pass the task's recent
//! sessions into `begin`/`finish`, already scoped to the same task.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::frame::pause::Pause;
use crate::frame::TimeFrame;
use crate::id::{PomodoroId, TaskId};
use crate::policy::{error_margin, SessionPolicy};
use crate::task::Task;

/// A single timed focus session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pomodoro {
    id: PomodoroId,
    task_id: TaskId,
    frame: TimeFrame,
    /// Pauses in insertion order; see [`Pomodoro::pauses`] for the sorted view.
    pauses: Vec<Pause>,
}

impl Pomodoro {
    /// Create a session referencing a task. Nothing is validated until
    /// [`Pomodoro::begin`] runs.
    pub fn new(task_id: TaskId) -> Self {
        Self {
            id: PomodoroId::new(),
            task_id,
            frame: TimeFrame::new(),
            pauses: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> PomodoroId {
        self.id
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.frame.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.frame.end
    }

    /// Both bounds set; the session is terminal.
    pub fn is_finished(&self) -> bool {
        self.frame.is_finished()
    }

    /// Pauses ordered by end ascending, unfinished pauses after all
    /// finished ones (insertion order among themselves).
    pub fn pauses(&self) -> Vec<&Pause> {
        let mut ordered: Vec<&Pause> = self.pauses.iter().collect();
        ordered.sort_by_key(|p| (p.end().is_none(), p.end()));
        ordered
    }

    /// The most recently added pause that is still open, if any.
    ///
    /// At most one open pause is a caller-enforced invariant; if it is
    /// violated the latest open one wins.
    pub fn current_pause(&self) -> Option<&Pause> {
        self.pauses.iter().rev().find(|p| !p.is_finished())
    }

    fn current_pause_mut(&mut self) -> Option<&mut Pause> {
        self.pauses.iter_mut().rev().find(|p| !p.is_finished())
    }

    /// Summed length of all finished pauses.
    pub fn total_pause_duration(&self) -> Duration {
        self.pauses
            .iter()
            .filter_map(Pause::duration)
            .fold(Duration::zero(), |acc, d| acc + d)
    }

    /// Worked time up to `end`: elapsed time minus finished pauses.
    /// Defined only once the session has begun.
    pub fn net_duration(&self, end: DateTime<Utc>) -> Option<Duration> {
        self.frame
            .start
            .map(|start| (end - start) - self.total_pause_duration())
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the session.
    ///
    /// The task must be active and the start must not collide with any
    /// finished session in `recent` (the caller supplies them scoped to
    /// this session's task).
    pub fn begin(
        &mut self,
        task: &Task,
        recent: &[Pomodoro],
        start: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        task.ensure_actionable()?;
        detect_collisions(recent, &[self.id], start, None)?;
        self.frame.begin(start)
    }

    /// Close the session.
    ///
    /// Checks run in a fixed order: task lifecycle, frame validity,
    /// duration against `policy` plus the one-minute margin, then
    /// collisions over the full interval. Only when all pass is the end
    /// recorded.
    pub fn finish(
        &mut self,
        policy: &SessionPolicy,
        task: &Task,
        recent: &[Pomodoro],
        end: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        task.ensure_actionable()?;
        if self.frame.is_finished() {
            return Err(DomainError::AlreadyFinished);
        }
        if let Some(start) = self.frame.start {
            if start > end {
                return Err(DomainError::StartAfterEnd { start, end });
            }
            let actual = (end - start) - self.total_pause_duration();
            let allowed = policy.pomodoro_length() + error_margin();
            if actual > allowed {
                return Err(DomainError::DurationExceeded { actual, allowed });
            }
            detect_collisions(recent, &[self.id], start, Some(end))?;
        }
        self.frame.finish(end)
    }

    /// Record an interruption starting at `start`.
    ///
    /// Idempotent while a pause is open: a second call records nothing.
    pub fn pause(&mut self, task: &Task, start: DateTime<Utc>) -> Result<(), DomainError> {
        task.ensure_actionable()?;
        if self.is_finished() {
            return Err(DomainError::PomodoroFinished { id: self.id });
        }
        if self.current_pause().is_some() {
            return Ok(());
        }
        let pause = Pause::begin_at(start)?;
        self.pauses.push(pause);
        Ok(())
    }

    /// Close the open pause at `end`, if one exists.
    ///
    /// A no-op when nothing is paused. An `end` before the pause's start
    /// propagates [`DomainError::StartAfterEnd`] from the pause frame.
    pub fn resume(&mut self, task: &Task, end: DateTime<Utc>) -> Result<(), DomainError> {
        task.ensure_actionable()?;
        if self.is_finished() {
            return Err(DomainError::PomodoroFinished { id: self.id });
        }
        match self.current_pause_mut() {
            Some(pause) => pause.finish(end),
            None => Ok(()),
        }
    }
}

/// Flag sessions that collide with the candidate interval
/// `[start, end?)`.
///
/// Only finished sessions count; ids in `excluded` (the session being
/// mutated) are skipped. An absent `end` is the begin-time check: any
/// finished session starting or ending after the candidate start collides,
/// so a session can never begin in the past relative to recorded history.
/// With `end` present the same rule additionally runs against the
/// candidate end.
pub fn detect_collisions(
    sessions: &[Pomodoro],
    excluded: &[PomodoroId],
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
) -> Result<(), DomainError> {
    let colliding: Vec<PomodoroId> = sessions
        .iter()
        .filter(|s| !excluded.contains(&s.id))
        .filter(|s| match (s.start(), s.end()) {
            (Some(other_start), Some(other_end)) => {
                let past_start = other_start > start || other_end > start;
                match end {
                    None => past_start,
                    Some(end) => past_start || other_start > end || other_end > end,
                }
            }
            // Open sessions never collide.
            _ => false,
        })
        .map(Pomodoro::id)
        .collect();

    if colliding.is_empty() {
        Ok(())
    } else {
        Err(DomainError::CollidingSession {
            sessions: colliding,
        })
    }
}
