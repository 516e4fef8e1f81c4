//! Exam session state machine
//!
//! Tracks one test-taker's attempt: the derived question layout, navigation,
//! answers, the countdown, the submit confirmation step and completion.
//!
//! # Lifecycle
//!
//! ```text
//! start ──► InProgress ◄──► ConfirmingSubmit
//!               │                  │
//!          timer expiry        complete()
//!               ▼                  ▼
//!            Finished ◄────────────┘
//! ```
//!
//! The session performs no I/O. Every answer change returns the request the
//! host should send, and every event is queued for the host to forward.
//!
//! # Example
//!
//! ```rust
//! use exam_client_core_rs::{Exam, ExamSession, LaunchParams, Question, SessionConfig};
//!
//! let launch = LaunchParams::from_query("userId=user123&examId=exam456").unwrap();
//! let config = SessionConfig::new(launch, "https://api.example.com");
//! let exam = Exam::new("exam456", "Geography", 30);
//! let questions = vec![
//!     Question::short_answer("q1", "exam456", "Name a river."),
//!     Question::short_answer("q2", "exam456", "Name a lake."),
//! ];
//!
//! let mut session = ExamSession::start(config, exam, questions).unwrap();
//! let request = session.set_answer("q1", "Danube").unwrap();
//! assert_eq!(request.answer, "Danube");
//! assert_eq!(session.answered_count(), 1);
//! ```

use crate::api::{LogEventRequest, SubmitAnswerRequest};
use crate::config::{ConfigError, SessionConfig};
use crate::core::timer::ExamTimer;
use crate::models::{score, CompletionReason, EventLog, Exam, ExamEvent, Question, Response};
use crate::ordering::order_questions;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur while driving a session
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Exam {found} does not match configured exam {expected}")]
    ExamMismatch { expected: String, found: String },

    #[error("Question index {index} out of range (exam has {len} questions)")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("Exam attempt already finished")]
    AlreadyFinished,

    #[error("Submission has not been confirmed")]
    SubmitNotConfirmed,

    #[error("Exam attempt already completed")]
    AlreadyCompleted,

    #[error("Snapshot belongs to a different attempt: {0}")]
    SnapshotMismatch(String),

    #[error("Snapshot layout does not match the re-derived question order")]
    LayoutMismatch,

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Where the attempt is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Answering questions
    InProgress,

    /// Waiting for the test-taker to confirm final submission
    ConfirmingSubmit,

    /// No more answers accepted
    Finished,
}

/// Result of advancing the clock by one second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Attempt still running; `remaining_seconds` is None for untimed exams
    Running { remaining_seconds: Option<u64> },

    /// The timer reached zero on this tick; the host must auto-submit
    Expired,

    /// Attempt already finished, clock not advanced
    Idle,
}

/// One test-taker's attempt at one exam
#[derive(Debug, Clone)]
pub struct ExamSession {
    pub(crate) config: SessionConfig,
    pub(crate) exam: Exam,
    /// Questions in display order
    pub(crate) questions: Vec<Question>,
    pub(crate) current_index: usize,
    pub(crate) answers: BTreeMap<String, String>,
    pub(crate) timer: Option<ExamTimer>,
    pub(crate) elapsed_seconds: u64,
    pub(crate) phase: SessionPhase,
    pub(crate) completion_reason: Option<CompletionReason>,
    /// Set once the exam_completed event has been recorded
    pub(crate) completed: bool,
    pub(crate) event_log: EventLog,
    /// Number of events already handed to the host
    pub(crate) forwarded: usize,
}

impl ExamSession {
    /// Start an attempt
    ///
    /// Validates the config, derives the per-user layout from `questions`
    /// (server order) and records a `start` event.
    pub fn start(
        config: SessionConfig,
        exam: Exam,
        questions: Vec<Question>,
    ) -> Result<Self, SessionError> {
        let mut session = Self::assemble(config, exam, &questions)?;
        session.event_log.log(ExamEvent::Start);

        tracing::info!(
            user_id = %session.config.user_id,
            exam_id = %session.exam.exam_id,
            questions = session.questions.len(),
            timed = session.timer.is_some(),
            "exam attempt started"
        );

        Ok(session)
    }

    /// Validate inputs and lay out the exam without recording any event
    pub(crate) fn assemble(
        config: SessionConfig,
        exam: Exam,
        questions: &[Question],
    ) -> Result<Self, SessionError> {
        config.validate()?;
        if exam.exam_id != config.exam_id {
            return Err(SessionError::ExamMismatch {
                expected: config.exam_id.clone(),
                found: exam.exam_id.clone(),
            });
        }

        let ordered = order_questions(&config.user_id, &config.exam_id, questions, &config.ordering);
        let timer = ExamTimer::for_exam(&exam);

        Ok(Self {
            config,
            exam,
            questions: ordered,
            current_index: 0,
            answers: BTreeMap::new(),
            timer,
            elapsed_seconds: 0,
            phase: SessionPhase::InProgress,
            completion_reason: None,
            completed: false,
            event_log: EventLog::new(),
            forwarded: 0,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn exam(&self) -> &Exam {
        &self.exam
    }

    /// Questions in display order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn completion_reason(&self) -> Option<CompletionReason> {
        self.completion_reason
    }

    pub fn timer(&self) -> Option<&ExamTimer> {
        self.timer.as_ref()
    }

    /// Seconds left, or None for untimed exams
    pub fn remaining_seconds(&self) -> Option<u64> {
        self.timer.as_ref().map(ExamTimer::remaining_seconds)
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// None only for an exam without questions
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// Move forward, stopping at the last question
    pub fn next(&mut self) -> usize {
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
        }
        self.current_index
    }

    /// Move back, stopping at the first question
    pub fn prev(&mut self) -> usize {
        self.current_index = self.current_index.saturating_sub(1);
        self.current_index
    }

    pub fn go_to(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.questions.len() {
            return Err(SessionError::QuestionOutOfRange {
                index,
                len: self.questions.len(),
            });
        }
        self.current_index = index;
        Ok(())
    }

    // ========================================================================
    // Answers
    // ========================================================================

    /// Record an answer and return the request that saves it
    pub fn set_answer(
        &mut self,
        question_id: &str,
        value: impl Into<String>,
    ) -> Result<SubmitAnswerRequest, SessionError> {
        if self.is_finished() {
            return Err(SessionError::AlreadyFinished);
        }
        if !self.has_question(question_id) {
            return Err(SessionError::UnknownQuestion(question_id.to_string()));
        }

        let value = value.into();
        self.answers.insert(question_id.to_string(), value.clone());

        Ok(SubmitAnswerRequest {
            user_id: self.config.user_id.clone(),
            question_id: question_id.to_string(),
            answer: value,
        })
    }

    pub fn answer(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    /// An answer counts only if it is not blank
    pub fn is_answered(&self, question_id: &str) -> bool {
        self.answer(question_id)
            .map_or(false, |a| !a.trim().is_empty())
    }

    pub fn answered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.is_answered(&q.question_id))
            .count()
    }

    pub(crate) fn has_question(&self, question_id: &str) -> bool {
        self.questions.iter().any(|q| q.question_id == question_id)
    }

    // ========================================================================
    // Time
    // ========================================================================

    /// Advance the attempt clock by one second
    ///
    /// Returns [`TickOutcome::Expired`] exactly once, on the tick where the
    /// countdown reaches zero. The session is finished at that point and the
    /// host should send [`ExamSession::submission_batch`] and then call
    /// [`ExamSession::complete`].
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_finished() {
            return TickOutcome::Idle;
        }

        self.elapsed_seconds += 1;

        let Some(timer) = self.timer.as_mut() else {
            return TickOutcome::Running {
                remaining_seconds: None,
            };
        };

        timer.tick();
        if timer.is_expired() {
            tracing::warn!(
                user_id = %self.config.user_id,
                exam_id = %self.exam.exam_id,
                elapsed_seconds = self.elapsed_seconds,
                "time limit reached, auto-submitting"
            );
            self.completion_reason = Some(CompletionReason::TimerExpired);
            self.finish();
            return TickOutcome::Expired;
        }

        TickOutcome::Running {
            remaining_seconds: Some(timer.remaining_seconds()),
        }
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Ask for confirmation before final submission
    pub fn request_submit(&mut self) -> Result<(), SessionError> {
        if self.is_finished() {
            return Err(SessionError::AlreadyFinished);
        }
        self.phase = SessionPhase::ConfirmingSubmit;
        Ok(())
    }

    /// Back out of the confirmation step
    pub fn cancel_submit(&mut self) {
        if self.phase == SessionPhase::ConfirmingSubmit {
            self.phase = SessionPhase::InProgress;
        }
    }

    /// One save request per question, in display order
    ///
    /// Unanswered questions are submitted as empty strings so every question
    /// has a stored response before grading.
    pub fn submission_batch(&self) -> Vec<SubmitAnswerRequest> {
        self.questions
            .iter()
            .map(|q| SubmitAnswerRequest {
                user_id: self.config.user_id.clone(),
                question_id: q.question_id.clone(),
                answer: self.answer(&q.question_id).unwrap_or_default().to_string(),
            })
            .collect()
    }

    /// Record completion once the batch is stored and graded
    ///
    /// Allowed after confirmation or after timer expiry. Records
    /// `exam_completed` with the score from `responses`, then `finish` if the
    /// attempt was not already finished.
    pub fn complete(&mut self, responses: &[Response]) -> Result<ExamEvent, SessionError> {
        if self.completed {
            return Err(SessionError::AlreadyCompleted);
        }
        if self.phase == SessionPhase::InProgress {
            return Err(SessionError::SubmitNotConfirmed);
        }

        let event = ExamEvent::ExamCompleted {
            score: score(responses),
            duration_seconds: Some(self.elapsed_seconds),
            reason: self.completion_reason,
        };
        self.event_log.log(event.clone());
        self.completed = true;

        tracing::info!(
            user_id = %self.config.user_id,
            exam_id = %self.exam.exam_id,
            score = score(responses),
            duration_seconds = self.elapsed_seconds,
            "exam attempt completed"
        );

        self.finish();
        Ok(event)
    }

    /// Adopt the backend's record of an already completed attempt
    pub fn mark_already_completed(&mut self) {
        self.completed = true;
        self.finish();
    }

    /// Record a load, save or submit failure
    pub fn record_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(
            user_id = %self.config.user_id,
            exam_id = %self.exam.exam_id,
            error = %message,
            "exam client error"
        );
        self.event_log.log(ExamEvent::Error { message });
    }

    fn finish(&mut self) {
        if self.phase != SessionPhase::Finished {
            self.phase = SessionPhase::Finished;
            self.event_log.log(ExamEvent::Finish);
        }
    }

    // ========================================================================
    // Event forwarding
    // ========================================================================

    /// Events recorded since the last call, as backend requests
    pub fn take_pending_events(&mut self) -> Vec<LogEventRequest> {
        let pending: Vec<LogEventRequest> = self.event_log.events()[self.forwarded..]
            .iter()
            .map(|e| LogEventRequest::from_event(&self.config.user_id, &self.exam.exam_id, e))
            .collect();
        self.forwarded = self.event_log.len();
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LaunchParams;

    fn session(duration_minutes: i64, question_ids: &[&str]) -> ExamSession {
        let config = SessionConfig::new(
            LaunchParams {
                user_id: "u1".to_string(),
                exam_id: "e1".to_string(),
            },
            "http://localhost",
        );
        let questions = question_ids
            .iter()
            .map(|id| Question::short_answer(*id, "e1", "?"))
            .collect();
        ExamSession::start(config, Exam::new("e1", "Quiz", duration_minutes), questions).unwrap()
    }

    #[test]
    fn test_navigation_clamps() {
        let mut s = session(0, &["a", "b"]);
        assert_eq!(s.prev(), 0);
        assert_eq!(s.next(), 1);
        assert_eq!(s.next(), 1);
        assert_eq!(
            s.go_to(2),
            Err(SessionError::QuestionOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_empty_exam() {
        let mut s = session(0, &[]);
        assert!(s.current_question().is_none());
        assert_eq!(s.next(), 0);
        assert!(s.submission_batch().is_empty());
    }

    #[test]
    fn test_blank_answer_not_counted() {
        let mut s = session(0, &["a", "b"]);
        s.set_answer("a", "   ").unwrap();
        assert!(!s.is_answered("a"));
        assert_eq!(s.answer("a"), Some("   "));
        assert_eq!(s.answered_count(), 0);
    }

    #[test]
    fn test_untimed_tick_counts_elapsed() {
        let mut s = session(0, &["a"]);
        assert_eq!(
            s.tick(),
            TickOutcome::Running {
                remaining_seconds: None
            }
        );
        assert_eq!(s.elapsed_seconds(), 1);
    }

    #[test]
    fn test_complete_requires_confirmation() {
        let mut s = session(0, &["a"]);
        assert_eq!(s.complete(&[]), Err(SessionError::SubmitNotConfirmed));
        s.request_submit().unwrap();
        s.cancel_submit();
        assert_eq!(s.phase(), SessionPhase::InProgress);
    }
}
