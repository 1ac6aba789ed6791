//! Session-length policy.
//!
//! A [`SessionPolicy`] fixes how long a pomodoro and its breaks run. Tasks
//! may carry their own policy as an override of the caller's default; the
//! engine only consults `pomodoro_length` when validating a finish, the
//! break fields exist for schedule-building callers.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance added to the configured pomodoro length before a finish is
/// rejected as over-long. Absorbs client-side stop latency.
pub fn error_margin() -> Duration {
    Duration::minutes(1)
}

/// Configured lengths of sessions and breaks, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPolicy {
    /// Maximum pomodoro length in minutes.
    pub pomodoro_min: u64,
    /// Short break length in minutes.
    pub break_min: u64,
    /// Longer break length in minutes.
    pub longer_break_min: u64,
    /// Number of pomodoros between two longer breaks.
    pub longer_break_gap: u32,
}

impl SessionPolicy {
    /// Maximum pomodoro length as a duration.
    pub fn pomodoro_length(&self) -> Duration {
        Duration::minutes(self.pomodoro_min as i64)
    }

    /// Short break length as a duration.
    pub fn break_length(&self) -> Duration {
        Duration::minutes(self.break_min as i64)
    }

    /// Longer break length as a duration.
    pub fn longer_break_length(&self) -> Duration {
        Duration::minutes(self.longer_break_min as i64)
    }

    /// Check the policy values for internal consistency.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.pomodoro_min == 0 {
            return Err(PolicyError::ZeroLength { field: "pomodoro_min" });
        }
        if self.break_min == 0 {
            return Err(PolicyError::ZeroLength { field: "break_min" });
        }
        if self.longer_break_min < self.break_min {
            return Err(PolicyError::LongerBreakShorter {
                longer_break_min: self.longer_break_min,
                break_min: self.break_min,
            });
        }
        if self.longer_break_gap == 0 {
            return Err(PolicyError::ZeroLength {
                field: "longer_break_gap",
            });
        }
        Ok(())
    }
}

impl Default for SessionPolicy {
    /// The classic 25/5 split with a quarter-hour break every four sessions.
    fn default() -> Self {
        Self {
            pomodoro_min: 25,
            break_min: 5,
            longer_break_min: 15,
            longer_break_gap: 4,
        }
    }
}

/// Error returned when a policy fails validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Policy field '{field}' must be positive")]
    ZeroLength { field: &'static str },

    #[error("Longer break ({longer_break_min}m) must not be shorter than the short break ({break_min}m)")]
    LongerBreakShorter { longer_break_min: u64, break_min: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_valid() {
        let policy = SessionPolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.pomodoro_length(), Duration::minutes(25));
    }

    #[test]
    fn zero_pomodoro_length_rejected() {
        let policy = SessionPolicy {
            pomodoro_min: 0,
            ..SessionPolicy::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(PolicyError::ZeroLength { field: "pomodoro_min" })
        ));
    }

    #[test]
    fn longer_break_must_not_undercut_short_break() {
        let policy = SessionPolicy {
            break_min: 10,
            longer_break_min: 5,
            ..SessionPolicy::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(PolicyError::LongerBreakShorter { .. })
        ));
    }

    #[test]
    fn margin_is_one_minute() {
        assert_eq!(error_margin(), Duration::seconds(60));
    }
}
