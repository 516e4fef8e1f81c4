//! Question model

use serde::{Deserialize, Serialize};

/// How a question is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    /// Pick one of `choices`
    MultipleChoice,

    /// Free text
    ShortAnswer,
}

/// A single exam question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question_id: String,

    pub exam_id: String,

    #[serde(rename = "type")]
    pub question_type: QuestionType,

    pub prompt: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Question {
    /// Create a multiple-choice question
    pub fn multiple_choice(
        question_id: impl Into<String>,
        exam_id: impl Into<String>,
        prompt: impl Into<String>,
        choices: Vec<String>,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            exam_id: exam_id.into(),
            question_type: QuestionType::MultipleChoice,
            prompt: prompt.into(),
            choices: Some(choices),
            correct_answer: None,
            points: None,
            created_at: None,
            image_url: None,
        }
    }

    /// Create a short-answer question
    pub fn short_answer(
        question_id: impl Into<String>,
        exam_id: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            exam_id: exam_id.into(),
            question_type: QuestionType::ShortAnswer,
            prompt: prompt.into(),
            choices: None,
            correct_answer: None,
            points: None,
            created_at: None,
            image_url: None,
        }
    }

    pub fn is_multiple_choice(&self) -> bool {
        self.question_type == QuestionType::MultipleChoice
    }

    /// Choices in display order (empty for short-answer questions)
    pub fn choices(&self) -> &[String] {
        self.choices.as_deref().unwrap_or(&[])
    }
}
