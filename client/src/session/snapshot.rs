//! Snapshot - Save/Restore an Attempt Across Reloads
//!
//! A reload re-fetches the exam and questions from the backend and re-derives
//! the layout from the same seeds. The snapshot carries everything else the
//! test-taker would lose (answers, position, clock) plus a fingerprint of the
//! layout it was taken against.
//!
//! # Critical Invariants
//!
//! - **Stable layout**: a snapshot only restores onto an identical layout
//! - **Same attempt**: user and exam must match the restoring config
//! - **Referential integrity**: answers only reference questions in the exam

use crate::config::SessionConfig;
use crate::core::timer::ExamTimer;
use crate::models::{CompletionReason, Exam, Question};
use crate::ordering::order_fingerprint;
use crate::session::state::{ExamSession, SessionError, SessionPhase};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete attempt state snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub user_id: String,

    pub exam_id: String,

    /// Position in the display order
    pub current_index: usize,

    /// Answers keyed by question id (sorted for stable JSON)
    pub answers: BTreeMap<String, String>,

    /// None for untimed exams
    pub remaining_seconds: Option<u64>,

    pub elapsed_seconds: u64,

    pub finished: bool,

    pub completed: bool,

    pub completion_reason: Option<CompletionReason>,

    /// SHA256 of the layout the snapshot was taken against
    pub layout_fingerprint: String,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> Result<String, SessionError> {
        serde_json::to_string(self).map_err(|e| {
            SessionError::Serialization(format!("Snapshot serialization failed: {}", e))
        })
    }

    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        serde_json::from_str(json).map_err(|e| {
            SessionError::Serialization(format!("Snapshot deserialization failed: {}", e))
        })
    }
}

impl From<&ExamSession> for SessionSnapshot {
    fn from(session: &ExamSession) -> Self {
        SessionSnapshot {
            user_id: session.config.user_id.clone(),
            exam_id: session.exam.exam_id.clone(),
            current_index: session.current_index,
            answers: session.answers.clone(),
            remaining_seconds: session.remaining_seconds(),
            elapsed_seconds: session.elapsed_seconds,
            finished: session.is_finished(),
            completed: session.completed,
            completion_reason: session.completion_reason,
            layout_fingerprint: order_fingerprint(&session.questions),
        }
    }
}

impl ExamSession {
    /// Capture the attempt for a later reload
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from(self)
    }

    /// Rebuild an attempt from freshly fetched data and a snapshot
    ///
    /// The layout is re-derived from `questions` exactly as in
    /// [`ExamSession::start`]; no `start` event is recorded again.
    pub fn restore(
        config: SessionConfig,
        exam: Exam,
        questions: Vec<Question>,
        snapshot: SessionSnapshot,
    ) -> Result<Self, SessionError> {
        if snapshot.user_id != config.user_id {
            return Err(SessionError::SnapshotMismatch(format!(
                "user {} != {}",
                snapshot.user_id, config.user_id
            )));
        }
        if snapshot.exam_id != config.exam_id {
            return Err(SessionError::SnapshotMismatch(format!(
                "exam {} != {}",
                snapshot.exam_id, config.exam_id
            )));
        }

        let mut session = ExamSession::assemble(config, exam, &questions)?;
        validate_snapshot(&snapshot, &session)?;

        session.current_index = snapshot.current_index;
        session.answers = snapshot.answers;
        session.elapsed_seconds = snapshot.elapsed_seconds;
        session.completion_reason = snapshot.completion_reason;
        session.completed = snapshot.completed;
        if let Some(remaining) = snapshot.remaining_seconds {
            session.timer = Some(ExamTimer::new(remaining));
        }
        if snapshot.finished {
            session.phase = SessionPhase::Finished;
        }

        tracing::info!(
            user_id = %session.config.user_id,
            exam_id = %session.exam.exam_id,
            answered = session.answered_count(),
            remaining_seconds = ?session.remaining_seconds(),
            "exam attempt restored"
        );

        Ok(session)
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Check a snapshot against a freshly assembled session
fn validate_snapshot(snapshot: &SessionSnapshot, session: &ExamSession) -> Result<(), SessionError> {
    // 1. Layout must be reproduced exactly
    if order_fingerprint(&session.questions) != snapshot.layout_fingerprint {
        return Err(SessionError::LayoutMismatch);
    }

    // 2. Position must be inside the exam
    let len = session.questions.len();
    if snapshot.current_index >= len.max(1) {
        return Err(SessionError::InvalidSnapshot(format!(
            "current_index {} out of range for {} questions",
            snapshot.current_index, len
        )));
    }

    // 3. No answers for questions outside the exam
    if let Some(orphan) = snapshot.answers.keys().find(|id| !session.has_question(id)) {
        return Err(SessionError::InvalidSnapshot(format!(
            "answer for unknown question {}",
            orphan
        )));
    }

    // 4. Clock must agree with the exam's time limit
    match (session.exam.duration_seconds(), snapshot.remaining_seconds) {
        (Some(limit), Some(remaining)) if remaining > limit => {
            Err(SessionError::InvalidSnapshot(format!(
                "remaining_seconds {} exceeds time limit {}",
                remaining, limit
            )))
        }
        (Some(_), None) => Err(SessionError::InvalidSnapshot(
            "timed exam snapshot has no remaining time".to_string(),
        )),
        (None, Some(_)) => Err(SessionError::InvalidSnapshot(
            "untimed exam snapshot has remaining time".to_string(),
        )),
        _ => Ok(()),
    }
}
