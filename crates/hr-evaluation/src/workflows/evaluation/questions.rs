use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{JobId, Question, QuestionId};

const MINIMUM_OPTIONS: usize = 2;

/// Validation failures for recruiter-authored questions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionValidationError {
    #[error("question required")]
    QuestionRequired,
    #[error("at least 2 options required")]
    TooFewOptions,
    #[error("correct answer must match an option")]
    CorrectAnswerMismatch,
}

/// Raw question input as submitted by a recruiter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    #[serde(default)]
    pub job_id: JobId,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: String,
}

impl NewQuestion {
    pub fn validate(&self) -> Result<QuestionDraft, QuestionValidationError> {
        QuestionDraft::validate(&self.question, &self.options, &self.correct_answer)
    }
}

/// Question content that passed validation and is ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    question: String,
    options: Vec<String>,
    correct_answer: String,
}

impl QuestionDraft {
    /// Checks run in order and the first failure wins. Blank options are dropped but
    /// duplicate values are kept.
    pub fn validate<S: AsRef<str>>(
        question: &str,
        raw_options: &[S],
        raw_correct_answer: &str,
    ) -> Result<Self, QuestionValidationError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(QuestionValidationError::QuestionRequired);
        }

        let options: Vec<String> = raw_options
            .iter()
            .map(|option| option.as_ref().trim())
            .filter(|option| !option.is_empty())
            .map(str::to_string)
            .collect();
        if options.len() < MINIMUM_OPTIONS {
            return Err(QuestionValidationError::TooFewOptions);
        }

        let correct_answer = raw_correct_answer.trim();
        if !options.iter().any(|option| option == correct_answer) {
            return Err(QuestionValidationError::CorrectAnswerMismatch);
        }

        Ok(Self {
            question: question.to_string(),
            correct_answer: correct_answer.to_string(),
            options,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    pub fn into_question(
        self,
        job_id: JobId,
        created_at: DateTime<Utc>,
        created_by: Option<String>,
    ) -> Question {
        Question {
            id: QuestionId::generate(),
            job_id,
            question: self.question,
            options: self.options,
            correct_answer: self.correct_answer,
            active: true,
            created_at,
            created_by,
        }
    }
}
