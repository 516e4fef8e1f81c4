//! Domain models for the exam client

pub mod event;
pub mod exam;
pub mod question;
pub mod response;

// Re-exports
pub use event::{CompletionReason, EventLog, ExamEvent};
pub use exam::Exam;
pub use question::{Question, QuestionType};
pub use response::{score, Response};
