//! Pauses: interruptions recorded inside a pomodoro.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::frame::TimeFrame;
use crate::id::PauseId;

/// One interruption inside a pomodoro.
///
/// Owned exclusively by its pomodoro; its lifetime is bound to it. A pause
/// begins when the interruption starts and finishes when work resumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pause {
    id: PauseId,
    frame: TimeFrame,
}

impl Pause {
    /// Start a new pause at the given instant.
    pub fn begin_at(start: DateTime<Utc>) -> Result<Self, DomainError> {
        let mut frame = TimeFrame::new();
        frame.begin(start)?;
        Ok(Self {
            id: PauseId::new(),
            frame,
        })
    }

    pub fn id(&self) -> PauseId {
        self.id
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.frame.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.frame.end
    }

    pub fn is_finished(&self) -> bool {
        self.frame.is_finished()
    }

    /// Length of the interruption, defined only once finished.
    pub fn duration(&self) -> Option<Duration> {
        self.frame.duration()
    }

    /// Close the pause when work resumes.
    pub fn finish(&mut self, end: DateTime<Utc>) -> Result<(), DomainError> {
        self.frame.finish(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 11, h, m, 0).unwrap()
    }

    #[test]
    fn new_pause_is_open() {
        let pause = Pause::begin_at(at(10, 0)).unwrap();
        assert_eq!(pause.start(), Some(at(10, 0)));
        assert!(pause.end().is_none());
        assert!(!pause.is_finished());
        assert!(pause.duration().is_none());
    }

    #[test]
    fn finished_pause_reports_duration() {
        let mut pause = Pause::begin_at(at(10, 0)).unwrap();
        pause.finish(at(10, 7)).unwrap();
        assert!(pause.is_finished());
        assert_eq!(pause.duration(), Some(Duration::minutes(7)));
    }

    #[test]
    fn resume_before_pause_start_rejected() {
        let mut pause = Pause::begin_at(at(10, 0)).unwrap();
        assert!(matches!(
            pause.finish(at(9, 59)),
            Err(DomainError::StartAfterEnd { .. })
        ));
    }
}
