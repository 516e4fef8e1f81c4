//! Backend wire format
//!
//! Request and response payloads for the exam REST API, plus endpoint URL
//! construction. Transport is the host's concern; this module only shapes
//! and parses JSON.

mod assignments;
mod endpoints;
mod launch;

pub use assignments::{parse_assignments, Assignment, AssignmentScoreRequest, AssignmentsEnvelope};
pub use endpoints::Endpoints;
pub use launch::{parse_consume_token, ConsumeTokenRequest, ConsumeTokenResponse};

use crate::models::{Exam, ExamEvent, Question, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while decoding backend payloads
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Malformed {payload} payload: {source}")]
    Malformed {
        payload: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize {payload} request: {source}")]
    Encode {
        payload: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// `GET /exams/{id}` body: either `{"exam": {...}}` or the bare exam
#[derive(Debug, Clone, PartialEq)]
pub enum ExamEnvelope {
    Wrapped { exam: Exam },
    Bare(Exam),
}

impl ExamEnvelope {
    /// Decode either shape, keeping the field-level error of the shape tried
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Object(mut map) if map.contains_key("exam") => {
                let exam = map.remove("exam").unwrap_or_default();
                serde_json::from_value(exam).map(|exam| ExamEnvelope::Wrapped { exam })
            }
            other => serde_json::from_value(other).map(ExamEnvelope::Bare),
        }
    }

    pub fn into_exam(self) -> Exam {
        match self {
            ExamEnvelope::Wrapped { exam } => exam,
            ExamEnvelope::Bare(exam) => exam,
        }
    }
}

/// `GET /questions?exam_id=..` body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionsEnvelope {
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// `GET /responses?user_id=..&exam_id=..` body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsesEnvelope {
    #[serde(default)]
    pub responses: Vec<Response>,
}

/// `GET /events?..` body; entries are kept opaque
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventsEnvelope {
    #[serde(default)]
    pub events: Vec<Value>,
}

impl EventsEnvelope {
    /// True when the backend already holds a completion event for the attempt
    pub fn is_completed(&self) -> bool {
        !self.events.is_empty()
    }
}

/// `POST /submit` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAnswerRequest {
    pub user_id: String,
    pub question_id: String,
    pub answer: String,
}

/// `POST /events` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEventRequest {
    pub user_id: String,
    pub exam_id: String,
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_data: Option<Value>,
}

impl LogEventRequest {
    pub fn from_event(user_id: &str, exam_id: &str, event: &ExamEvent) -> Self {
        Self {
            user_id: user_id.to_string(),
            exam_id: exam_id.to_string(),
            event_type: event.event_type().to_string(),
            event_data: event.event_data(),
        }
    }
}

/// Error body of a failed request
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Message to surface for a failed answer submission
///
/// Uses the backend's `error` field when the body carries one.
pub fn submit_failure_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| "Failed to submit answer".to_string())
}

pub fn parse_exam(body: &str) -> Result<Exam, ApiError> {
    serde_json::from_str::<Value>(body)
        .and_then(ExamEnvelope::from_value)
        .map(ExamEnvelope::into_exam)
        .map_err(|source| ApiError::Malformed {
            payload: "exam",
            source,
        })
}

pub fn parse_questions(body: &str) -> Result<Vec<Question>, ApiError> {
    serde_json::from_str::<QuestionsEnvelope>(body)
        .map(|e| e.questions)
        .map_err(|source| ApiError::Malformed {
            payload: "questions",
            source,
        })
}

pub fn parse_responses(body: &str) -> Result<Vec<Response>, ApiError> {
    serde_json::from_str::<ResponsesEnvelope>(body)
        .map(|e| e.responses)
        .map_err(|source| ApiError::Malformed {
            payload: "responses",
            source,
        })
}

pub fn parse_events(body: &str) -> Result<EventsEnvelope, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Malformed {
        payload: "events",
        source,
    })
}

/// Serialize a request body
pub fn to_json<T: Serialize>(payload: &'static str, request: &T) -> Result<String, ApiError> {
    serde_json::to_string(request).map_err(|source| ApiError::Encode { payload, source })
}
