//! # Focusframe Core Library
//!
//! This library provides the core business logic for Focusframe, a pomodoro
//! session tracker. It implements the time-frame domain engine: work sessions
//! and their interruptions are dated intervals attached to tasks, and every
//! mutation is validated against the task's lifecycle and the task's recorded
//! session history before it is accepted.
//!
//! ## Architecture
//!
//! - **Frames**: `TimeFrame` carries the start/end validity rules shared by
//!   sessions and pauses; `Pomodoro` adds collision detection against recent
//!   sessions and duration-with-margin enforcement
//! - **Tasks**: active/completed lifecycle, renewal-driven recurrence, and
//!   name-uniqueness checks scoped to a project
//! - **Ops**: orchestration procedures that load aggregates through store
//!   ports, invoke the domain operations, and persist the result
//!
//! The engine performs no I/O of its own. Callers supply a consistent
//! snapshot of the task and its recent sessions per operation; persistence
//! and locking live behind the `store` port traits.
//!
//! ## Key Components
//!
//! - [`Pomodoro`]: session state machine with collision checks
//! - [`Task`]: task aggregate with completion and renewal semantics
//! - [`SessionPolicy`]: configured session/break lengths
//! - [`ops`]: begin/finish/pause/resume and task lifecycle procedures

pub mod error;
pub mod frame;
pub mod id;
pub mod ops;
pub mod policy;
pub mod store;
pub mod task;

pub use error::{CoreError, DomainError, Result, StoreError};
pub use frame::pause::Pause;
pub use frame::pomodoro::{detect_collisions, Pomodoro};
pub use frame::TimeFrame;
pub use id::{PauseId, PomodoroId, ProjectId, TaskId};
pub use ops::{PomodoroOutput, TaskOutput};
pub use policy::SessionPolicy;
pub use store::{OutputPort, PomodoroStore, ProjectQuery, SessionQuery, TaskStore};
pub use task::{Task, TaskStatus, TaskSummary};
