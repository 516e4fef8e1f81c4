//! Per-attempt question and choice ordering
//!
//! Question order is seeded from `user_id + exam_id`; choice order from
//! `user_id + question_id`, one seed per question so that choice positions do
//! not correlate across questions. Re-deriving the same seeds on reload
//! reproduces the same layout mid-attempt.

use crate::models::Question;
use crate::rng::{seeded_shuffle, seeded_shuffle_in_place, SeedSource};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Which parts of the layout are randomized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingConfig {
    #[serde(default = "default_true")]
    pub shuffle_questions: bool,

    #[serde(default)]
    pub shuffle_choices: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            shuffle_questions: true,
            shuffle_choices: false,
        }
    }
}

/// Seed for the question order of one attempt
pub fn question_seed(user_id: &str, exam_id: &str) -> u32 {
    SeedSource::new().with(user_id).with(exam_id).seed()
}

/// Seed for the choice order of one question
pub fn choice_seed(user_id: &str, question_id: &str) -> u32 {
    SeedSource::new().with(user_id).with(question_id).seed()
}

/// Lay out an exam for one test-taker
///
/// Returns a new list; `questions` is left untouched. Short-answer questions
/// and questions without choices keep their (empty) choice list as is.
///
/// # Example
/// ```
/// use exam_client_core_rs::models::Question;
/// use exam_client_core_rs::ordering::{order_questions, OrderingConfig};
///
/// let questions: Vec<Question> = ["A", "B", "C", "D"]
///     .iter()
///     .map(|id| Question::short_answer(*id, "exam456", "?"))
///     .collect();
///
/// let ordered = order_questions("user123", "exam456", &questions, &OrderingConfig::default());
/// let ids: Vec<&str> = ordered.iter().map(|q| q.question_id.as_str()).collect();
/// assert_eq!(ids, ["D", "B", "C", "A"]);
/// ```
pub fn order_questions(
    user_id: &str,
    exam_id: &str,
    questions: &[Question],
    config: &OrderingConfig,
) -> Vec<Question> {
    let mut ordered = if config.shuffle_questions {
        seeded_shuffle(questions, question_seed(user_id, exam_id))
    } else {
        questions.to_vec()
    };

    if config.shuffle_choices {
        for question in ordered.iter_mut() {
            if !question.is_multiple_choice() {
                continue;
            }
            let seed = choice_seed(user_id, &question.question_id);
            if let Some(choices) = question.choices.as_mut() {
                seeded_shuffle_in_place(choices, seed);
            }
        }
    }

    tracing::debug!(
        user_id,
        exam_id,
        questions = ordered.len(),
        shuffle_questions = config.shuffle_questions,
        shuffle_choices = config.shuffle_choices,
        "exam layout derived"
    );

    ordered
}

/// Shuffled copy of a single question's choices
pub fn order_choices(user_id: &str, question: &Question) -> Vec<String> {
    seeded_shuffle(question.choices(), choice_seed(user_id, &question.question_id))
}

/// SHA256 fingerprint of a layout (question ids and choice order)
///
/// Two layouts share a fingerprint only if they show the same questions and
/// choices in the same positions.
pub fn order_fingerprint(questions: &[Question]) -> String {
    let mut hasher = Sha256::new();
    for question in questions {
        hasher.update(question.question_id.as_bytes());
        hasher.update([0x1e]);
        for choice in question.choices() {
            hasher.update(choice.as_bytes());
            hasher.update([0x1f]);
        }
        hasher.update([0x1d]);
    }
    format!("{:x}", hasher.finalize())
}
