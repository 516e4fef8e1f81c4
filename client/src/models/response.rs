//! Graded responses returned by the backend

use serde::{Deserialize, Serialize};

/// A stored answer and its grading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub question_id: String,

    #[serde(default)]
    pub answer: String,

    #[serde(default)]
    pub is_correct: bool,
}

/// Score an attempt: one point per correct response
pub fn score(responses: &[Response]) -> u32 {
    responses.iter().filter(|r| r.is_correct).count() as u32
}
