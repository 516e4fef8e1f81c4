//! Exam events for the audit trail.
//!
//! Every significant change in an attempt (start, finish, errors and the final
//! completion with its score) is captured as an [`ExamEvent`]. Events are kept
//! in an [`EventLog`] in emission order and forwarded to the backend's event
//! endpoint by the host.
//!
//! # Example
//!
//! ```rust
//! use exam_client_core_rs::models::{CompletionReason, ExamEvent};
//!
//! let event = ExamEvent::ExamCompleted {
//!     score: 7,
//!     duration_seconds: Some(1800),
//!     reason: Some(CompletionReason::TimerExpired),
//! };
//!
//! assert_eq!(event.event_type(), "exam_completed");
//! assert_eq!(event.event_data().unwrap()["reason"], "timer_expired");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Why an attempt ended without the test-taker confirming submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    TimerExpired,
}

/// Exam event capturing a state change in one attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ExamEvent {
    /// Exam metadata and questions loaded
    Start,

    /// Attempt is finished (by submission or expiry)
    Finish,

    /// Something failed while loading, saving or submitting
    Error { message: String },

    /// Final submission recorded, with the backend-graded score
    ExamCompleted {
        score: u32,
        duration_seconds: Option<u64>,
        reason: Option<CompletionReason>,
    },
}

impl ExamEvent {
    /// Event type string understood by the backend
    pub fn event_type(&self) -> &'static str {
        match self {
            ExamEvent::Start => "start",
            ExamEvent::Finish => "finish",
            ExamEvent::Error { .. } => "error",
            ExamEvent::ExamCompleted { .. } => "exam_completed",
        }
    }

    /// Event payload, if the event carries one
    pub fn event_data(&self) -> Option<Value> {
        match self {
            ExamEvent::Start | ExamEvent::Finish => None,
            ExamEvent::Error { message } => Some(json!({ "message": message })),
            ExamEvent::ExamCompleted {
                score,
                duration_seconds,
                reason,
            } => {
                let mut data = json!({
                    "score": score,
                    "duration_seconds": duration_seconds,
                });
                if let Some(reason) = reason {
                    data["reason"] = json!(reason);
                }
                Some(data)
            }
        }
    }
}

/// Event log for one attempt.
///
/// This is a simple wrapper around Vec<ExamEvent> with convenience methods.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<ExamEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: ExamEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[ExamEvent] {
        &self.events
    }

    /// Get events of a specific type (`"start"`, `"exam_completed"`, ...)
    pub fn events_of_type(&self, event_type: &str) -> Vec<&ExamEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Most recent event, if any
    pub fn last(&self) -> Option<&ExamEvent> {
        self.events.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type() {
        assert_eq!(ExamEvent::Start.event_type(), "start");
        assert_eq!(ExamEvent::Finish.event_type(), "finish");
        assert_eq!(
            ExamEvent::Error {
                message: "boom".to_string()
            }
            .event_type(),
            "error"
        );
    }

    #[test]
    fn test_event_data() {
        assert_eq!(ExamEvent::Start.event_data(), None);

        let error = ExamEvent::Error {
            message: "Failed to fetch exam".to_string(),
        };
        assert_eq!(
            error.event_data(),
            Some(json!({ "message": "Failed to fetch exam" }))
        );

        // Manual submission carries no reason key
        let completed = ExamEvent::ExamCompleted {
            score: 3,
            duration_seconds: None,
            reason: None,
        };
        assert_eq!(
            completed.event_data(),
            Some(json!({ "score": 3, "duration_seconds": null }))
        );
    }

    #[test]
    fn test_event_log_basic() {
        let mut log = EventLog::new();

        assert_eq!(log.len(), 0);
        assert!(log.is_empty());

        log.log(ExamEvent::Start);
        log.log(ExamEvent::Error {
            message: "Failed to save answer".to_string(),
        });
        log.log(ExamEvent::Finish);

        assert_eq!(log.len(), 3);
        assert_eq!(log.events_of_type("error").len(), 1);
        assert_eq!(log.last(), Some(&ExamEvent::Finish));
    }
}
