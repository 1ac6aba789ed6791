//! Dated-interval frames.
//!
//! [`TimeFrame`] carries the start/end validity rules shared by every dated
//! interval in the engine; [`pomodoro::Pomodoro`] and [`pause::Pause`] embed
//! one and delegate to it.
//!
//! ## Lifecycle
//!
//! ```text
//! Open -> Begun -> Finished (immutable)
//! ```
//!
//! `start` is set exactly once by a begin operation and `end` exactly once
//! by a finish; once both are set the frame is finished and any further
//! finish is rejected.

pub mod pause;
pub mod pomodoro;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A start/end interval with shared validity rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFrame {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TimeFrame {
    /// A frame with neither bound set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Both bounds are set; the frame is immutable from here on.
    pub fn is_finished(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Elapsed time between the bounds, defined only once finished.
    pub fn duration(&self) -> Option<Duration> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Record the start of the frame.
    pub fn begin(&mut self, start: DateTime<Utc>) -> Result<(), DomainError> {
        reject_future(start)?;
        self.start = Some(start);
        Ok(())
    }

    /// Record the end of the frame.
    ///
    /// Fails with [`DomainError::AlreadyFinished`] when both bounds are
    /// already set and with [`DomainError::StartAfterEnd`] when the end
    /// would precede the recorded start.
    pub fn finish(&mut self, end: DateTime<Utc>) -> Result<(), DomainError> {
        if self.is_finished() {
            return Err(DomainError::AlreadyFinished);
        }
        reject_future(end)?;
        if let Some(start) = self.start {
            if start > end {
                return Err(DomainError::StartAfterEnd { start, end });
            }
        }
        self.end = Some(end);
        Ok(())
    }
}

/// Clock-skew guard shared by begin and finish.
///
/// Naive timestamps are unrepresentable here (`DateTime<Utc>` only), so the
/// timezone half of the check is carried by the type system.
fn reject_future(at: DateTime<Utc>) -> Result<(), DomainError> {
    let now = Utc::now();
    if at > now {
        return Err(DomainError::TimestampInFuture { at, now });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 11, h, m, 0).unwrap()
    }

    #[test]
    fn begin_then_finish() {
        let mut frame = TimeFrame::new();
        assert!(!frame.is_finished());

        frame.begin(at(10, 0)).unwrap();
        assert_eq!(frame.start, Some(at(10, 0)));
        assert!(!frame.is_finished());

        frame.finish(at(10, 25)).unwrap();
        assert!(frame.is_finished());
        assert_eq!(frame.duration(), Some(Duration::minutes(25)));
    }

    #[test]
    fn second_finish_always_rejected() {
        let mut frame = TimeFrame::new();
        frame.begin(at(10, 0)).unwrap();
        frame.finish(at(10, 25)).unwrap();

        assert_eq!(frame.finish(at(10, 30)), Err(DomainError::AlreadyFinished));
        // Same answer regardless of the argument.
        assert_eq!(frame.finish(at(23, 0)), Err(DomainError::AlreadyFinished));
    }

    #[test]
    fn end_before_start_rejected() {
        let mut frame = TimeFrame::new();
        frame.begin(at(10, 0)).unwrap();

        let err = frame.finish(at(9, 59)).unwrap_err();
        assert_eq!(
            err,
            DomainError::StartAfterEnd {
                start: at(10, 0),
                end: at(9, 59),
            }
        );
        assert!(frame.end.is_none());
    }

    #[test]
    fn end_equal_to_start_accepted() {
        let mut frame = TimeFrame::new();
        frame.begin(at(10, 0)).unwrap();
        frame.finish(at(10, 0)).unwrap();
        assert_eq!(frame.duration(), Some(Duration::zero()));
    }

    #[test]
    fn future_timestamps_rejected() {
        let ahead = Utc::now() + Duration::hours(1);
        let mut frame = TimeFrame::new();
        assert!(matches!(
            frame.begin(ahead),
            Err(DomainError::TimestampInFuture { .. })
        ));

        frame.begin(at(10, 0)).unwrap();
        assert!(matches!(
            frame.finish(ahead),
            Err(DomainError::TimestampInFuture { .. })
        ));
    }
}
