//! Countdown timer for timed exams
//!
//! The host drives the timer once per second. Time only moves through
//! [`ExamTimer::tick`], so a session replays identically under test.

use crate::models::Exam;
use serde::{Deserialize, Serialize};

/// Countdown in whole seconds
///
/// # Example
/// ```
/// use exam_client_core_rs::{Exam, ExamTimer};
///
/// let exam = Exam::new("exam456", "Geography", 1);
/// let mut timer = ExamTimer::for_exam(&exam).unwrap();
/// assert_eq!(timer.display(), "1:00");
///
/// timer.tick();
/// assert_eq!(timer.remaining_seconds(), 59);
/// assert_eq!(timer.display(), "0:59");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamTimer {
    /// Seconds left before auto-submission
    remaining_seconds: u64,
}

impl ExamTimer {
    /// Create a timer with the given number of seconds remaining
    pub fn new(remaining_seconds: u64) -> Self {
        Self { remaining_seconds }
    }

    /// Timer for an exam, or None when the exam is untimed
    pub fn for_exam(exam: &Exam) -> Option<Self> {
        exam.duration_seconds().map(Self::new)
    }

    /// Advance one second; stays at zero once expired
    pub fn tick(&mut self) {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// Remaining time as `M:SS`
    pub fn display(&self) -> String {
        format!(
            "{}:{:02}",
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untimed_exam_has_no_timer() {
        assert!(ExamTimer::for_exam(&Exam::new("e", "t", 0)).is_none());
    }

    #[test]
    fn test_tick_saturates_at_zero() {
        let mut timer = ExamTimer::new(1);
        timer.tick();
        assert!(timer.is_expired());
        timer.tick();
        assert_eq!(timer.remaining_seconds(), 0);
    }

    #[test]
    fn test_display_pads_seconds() {
        assert_eq!(ExamTimer::new(3605).display(), "60:05");
        assert_eq!(ExamTimer::new(0).display(), "0:00");
    }
}
