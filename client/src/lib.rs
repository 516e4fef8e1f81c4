//! Exam Client Core - Rust Engine
//!
//! Deterministic layout and attempt state for an exam-taking client.
//!
//! # Architecture
//!
//! - **rng**: Seed derivation, Mulberry32 generator, seeded shuffle
//! - **ordering**: Per-user question and choice order
//! - **models**: Domain types (Exam, Question, Response, ExamEvent)
//! - **api**: Backend wire payloads and endpoint URLs
//! - **config**: Launch parameters and session configuration
//! - **core**: Countdown timer
//! - **session**: Attempt state machine and reload snapshots
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded from user and exam ids)
//! 2. Same seed source + same input → same order on every run and platform
//! 3. No I/O: the host performs every request this crate builds

// Module declarations
pub mod api;
pub mod config;
pub mod core;
pub mod models;
pub mod ordering;
pub mod rng;
pub mod session;

// Re-exports for convenience
pub use api::{
    AssignmentScoreRequest, ConsumeTokenRequest, ConsumeTokenResponse, Endpoints, LogEventRequest,
    SubmitAnswerRequest,
};
pub use config::{find_launch_token, ConfigError, LaunchParams, SessionConfig};
pub use crate::core::timer::ExamTimer;
pub use models::{
    event::{CompletionReason, EventLog, ExamEvent},
    exam::Exam,
    question::{Question, QuestionType},
    response::{score, Response},
};
pub use ordering::{order_questions, OrderingConfig};
pub use rng::{derive_seed, seeded_shuffle, seeded_shuffle_in_place, Mulberry32, SeedSource};
pub use session::{ExamSession, SessionError, SessionPhase, SessionSnapshot, TickOutcome};
