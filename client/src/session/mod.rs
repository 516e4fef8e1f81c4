//! Exam session - one attempt from load to completion
//!
//! See `state.rs` for the state machine and `snapshot.rs` for reload support.

pub mod snapshot;
pub mod state;

pub use snapshot::SessionSnapshot;
pub use state::{ExamSession, SessionError, SessionPhase, TickOutcome};
