//! Endpoint URL construction

/// REST endpoints relative to a base URL
///
/// # Example
/// ```
/// use exam_client_core_rs::api::Endpoints;
///
/// let api = Endpoints::new("https://api.example.com/");
/// assert_eq!(api.exam("e1"), "https://api.example.com/exams/e1");
/// assert_eq!(api.submit(), "https://api.example.com/submit");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    /// Trailing slashes on the base are dropped
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn exam(&self, exam_id: &str) -> String {
        format!("{}/exams/{}", self.base_url, exam_id)
    }

    pub fn questions(&self, exam_id: &str) -> String {
        format!("{}/questions?exam_id={}", self.base_url, exam_id)
    }

    pub fn responses(&self, user_id: &str, exam_id: &str) -> String {
        format!(
            "{}/responses?user_id={}&exam_id={}",
            self.base_url, user_id, exam_id
        )
    }

    pub fn submit(&self) -> String {
        format!("{}/submit", self.base_url)
    }

    pub fn events(&self) -> String {
        format!("{}/events", self.base_url)
    }

    /// Assignment lookup for one user and exam
    pub fn assignments(&self, user_id: &str, exam_id: &str) -> String {
        format!(
            "{}/assignments?user_id={}&exam_id={}",
            self.base_url, user_id, exam_id
        )
    }

    /// Target of the score `PATCH`
    pub fn assignment(&self, assignment_id: &str) -> String {
        format!("{}/assignments/{}", self.base_url, assignment_id)
    }

    /// Token exchange for token-launched attempts
    pub fn consume_token(&self) -> String {
        format!("{}/api/exam/consume", self.base_url)
    }

    /// Query for an existing completion event of this attempt
    pub fn completion_events(&self, user_id: &str, exam_id: &str) -> String {
        format!(
            "{}/events?user_id={}&exam_id={}&event_type=exam_completed",
            self.base_url, user_id, exam_id
        )
    }
}
