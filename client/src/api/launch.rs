//! Token-based launch
//!
//! The shell may start the client with a one-time exam token instead of
//! explicit ids. `POST /api/exam/consume` with `{"token": ..}` exchanges it
//! for the user and exam of the attempt.

use super::ApiError;
use crate::config::{ConfigError, LaunchParams};
use crate::models::exam::minutes_to_seconds;
use crate::models::{Exam, Question};
use serde::{Deserialize, Serialize};

/// `POST /api/exam/consume` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumeTokenRequest {
    pub token: String,
}

/// Reply to a token exchange
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumeTokenResponse {
    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(default)]
    pub exam_id: Option<String>,

    #[serde(default)]
    pub duration_minutes: Option<f64>,

    /// Present when the backend inlines the questions
    #[serde(default)]
    pub questions: Option<Vec<Question>>,
}

impl ConsumeTokenResponse {
    /// Identify the attempt; both ids must be present and non-empty
    pub fn launch_params(&self) -> Result<LaunchParams, ConfigError> {
        let pick = |value: &Option<String>, name: &'static str| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or(ConfigError::MissingParameter(name))
        };
        Ok(LaunchParams {
            user_id: pick(&self.user_id, "user_id")?,
            exam_id: pick(&self.exam_id, "exam_id")?,
        })
    }

    /// Time limit carried by the token, if it names a positive one
    pub fn duration_seconds(&self) -> Option<u64> {
        minutes_to_seconds(self.duration_minutes)
    }

    /// Let a positive token duration override the exam's own limit
    pub fn apply_duration(&self, exam: &mut Exam) {
        if self.duration_seconds().is_some() {
            exam.duration_minutes = self.duration_minutes;
        }
    }
}

pub fn parse_consume_token(body: &str) -> Result<ConsumeTokenResponse, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Malformed {
        payload: "token",
        source,
    })
}
