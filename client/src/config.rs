//! Launch parameters and session configuration
//!
//! The desktop shell hands the client a user and an exam, either as initial
//! data JSON or as URL query parameters. Together with the API base URL and
//! the ordering switches they form a [`SessionConfig`].

use crate::ordering::OrderingConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing launch parameter: {0}")]
    MissingParameter(&'static str),

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("API base URL must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),

    #[error("Malformed launch data: {0}")]
    MalformedLaunchData(String),
}

#[derive(Debug, Deserialize)]
struct InitialData {
    user: InitialUser,
    #[serde(rename = "examId")]
    exam_id: String,
}

#[derive(Debug, Deserialize)]
struct InitialUser {
    id: String,
}

/// Who is taking which exam
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchParams {
    pub user_id: String,
    pub exam_id: String,
}

impl LaunchParams {
    /// Parse the shell's initial data: `{"user": {"id": ..}, "examId": ..}`
    pub fn from_initial_data(json: &str) -> Result<Self, ConfigError> {
        let data: InitialData = serde_json::from_str(json)
            .map_err(|e| ConfigError::MalformedLaunchData(e.to_string()))?;
        Ok(Self {
            user_id: data.user.id,
            exam_id: data.exam_id,
        })
    }

    /// Parse `userId=..&examId=..` (a leading `?` is allowed)
    ///
    /// Values are form-decoded and the first occurrence of a key wins. Both
    /// parameters are required and must be non-empty.
    pub fn from_query(query: &str) -> Result<Self, ConfigError> {
        let user_id = first_query_value(query, "userId")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingParameter("userId"))?;
        let exam_id = first_query_value(query, "examId")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingParameter("examId"))?;

        Ok(Self { user_id, exam_id })
    }
}

/// First decoded value for `key` in a query string
fn first_query_value(query: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Locate the one-time exam token the shell launched the client with
///
/// Sources are tried in order: the shell's initial data (`{"token": ..}`),
/// the page query string (`token=..`), then a protocol-handler URL such as
/// `passport://start?token=..`. Empty tokens are ignored.
///
/// # Example
/// ```
/// use exam_client_core_rs::config::find_launch_token;
///
/// let token = find_launch_token(None, Some("?lang=en"), Some("passport://start?token=abc%2F1"));
/// assert_eq!(token.as_deref(), Some("abc/1"));
/// ```
pub fn find_launch_token(
    initial_data: Option<&str>,
    query: Option<&str>,
    href: Option<&str>,
) -> Option<String> {
    initial_data
        .and_then(token_from_initial_data)
        .or_else(|| query.and_then(token_from_query))
        .or_else(|| href.and_then(token_from_url))
}

pub fn token_from_initial_data(json: &str) -> Option<String> {
    let data: serde_json::Value = serde_json::from_str(json).ok()?;
    data.get("token")
        .and_then(|t| t.as_str())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

pub fn token_from_query(query: &str) -> Option<String> {
    first_query_value(query, "token").filter(|t| !t.is_empty())
}

/// Token from anywhere in a full URL: the first `?token=` or `&token=`
///
/// The raw value is percent-decoded without treating `+` as a space.
/// Invalid UTF-8 after decoding yields None.
pub fn token_from_url(href: &str) -> Option<String> {
    let start = ["?token=", "&token="]
        .iter()
        .filter_map(|marker| href.find(marker).map(|i| i + marker.len()))
        .min()?;
    let raw = href[start..].split('&').next().unwrap_or_default();
    if raw.is_empty() {
        return None;
    }
    percent_encoding::percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(|t| t.into_owned())
}

/// Everything a session needs to lay out and report an attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub user_id: String,

    pub exam_id: String,

    /// Base URL of the exam REST API
    pub api_base_url: String,

    #[serde(default)]
    pub ordering: OrderingConfig,
}

impl SessionConfig {
    pub fn new(launch: LaunchParams, api_base_url: impl Into<String>) -> Self {
        Self {
            user_id: launch.user_id,
            exam_id: launch.exam_id,
            api_base_url: api_base_url.into(),
            ordering: OrderingConfig::default(),
        }
    }

    pub fn with_ordering(mut self, ordering: OrderingConfig) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.user_id.trim().is_empty() {
            return Err(ConfigError::EmptyField { field: "user_id" });
        }
        if self.exam_id.trim().is_empty() {
            return Err(ConfigError::EmptyField { field: "exam_id" });
        }
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidBaseUrl(self.api_base_url.clone()));
        }
        Ok(())
    }
}
