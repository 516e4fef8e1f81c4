//! Assignment score reporting
//!
//! After completion the attempt's score is written back to the test-taker's
//! assignment: look it up with `GET /assignments?user_id=..&exam_id=..`, then
//! `PATCH /assignments/{assignment_id}` with `{"score": ..}`.

use super::ApiError;
use crate::models::ExamEvent;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One assignment row; only the id is read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// String or numeric id, depending on the backend
    #[serde(default)]
    pub assignment_id: Option<Value>,
}

impl Assignment {
    /// The id as it appears in a URL path, if present
    pub fn id(&self) -> Option<String> {
        match self.assignment_id.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// `GET /assignments?user_id=..&exam_id=..` body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentsEnvelope {
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl AssignmentsEnvelope {
    /// Id of the first assignment; later rows are ignored
    pub fn first_assignment_id(&self) -> Option<String> {
        self.assignments.first().and_then(Assignment::id)
    }
}

/// `PATCH /assignments/{id}` body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentScoreRequest {
    pub score: u32,
}

impl AssignmentScoreRequest {
    /// Score update for a completion event; None for any other event
    pub fn from_event(event: &ExamEvent) -> Option<Self> {
        match event {
            ExamEvent::ExamCompleted { score, .. } => Some(Self { score: *score }),
            _ => None,
        }
    }
}

pub fn parse_assignments(body: &str) -> Result<AssignmentsEnvelope, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Malformed {
        payload: "assignments",
        source,
    })
}
