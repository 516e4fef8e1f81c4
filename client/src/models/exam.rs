//! Exam model
//!
//! Exam metadata as served by the backend. Only `exam_id` and `title` are
//! required; everything else is optional.

use serde::{Deserialize, Serialize};

/// Exam metadata
///
/// # Example
/// ```
/// use exam_client_core_rs::Exam;
///
/// let exam = Exam::new("exam456", "Geography", 30);
/// assert!(exam.is_timed());
/// assert_eq!(exam.duration_seconds(), Some(1800));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub exam_id: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    /// Time limit in minutes (missing, null, 0 or negative = untimed)
    #[serde(default)]
    pub duration_minutes: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
}

impl Exam {
    pub fn new(exam_id: impl Into<String>, title: impl Into<String>, duration_minutes: i64) -> Self {
        Self {
            exam_id: exam_id.into(),
            title: title.into(),
            instructions: None,
            duration_minutes: Some(duration_minutes as f64),
            creator_id: None,
            created_at: None,
            max_attempts: None,
        }
    }

    /// An exam is timed only when it has a positive duration
    pub fn is_timed(&self) -> bool {
        self.duration_seconds().is_some()
    }

    /// Time limit in seconds, or None for untimed exams
    pub fn duration_seconds(&self) -> Option<u64> {
        minutes_to_seconds(self.duration_minutes)
    }
}

/// Convert a minute count to whole seconds
///
/// Fractional minutes round to the nearest second. Durations beyond
/// `u64::MAX` seconds clamp to it.
pub(crate) fn minutes_to_seconds(minutes: Option<f64>) -> Option<u64> {
    match minutes {
        Some(m) if m.is_finite() && m > 0.0 => {
            // float-to-int `as` saturates at u64::MAX
            Some((m * 60.0).round() as u64)
        }
        _ => None,
    }
}
