use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    AnswerSheet, ApplicantId, EvaluationOutcome, GradedAnswer, JobId, OutcomeId, Question,
};

/// Answers submitted by one applicant for one job's question bank.
///
/// Missing ids deserialize as blank and fail to resolve like any unknown id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationSubmission {
    #[serde(default)]
    pub job_id: JobId,
    #[serde(default)]
    pub applicant_id: ApplicantId,
    #[serde(default)]
    pub answers: AnswerSheet,
}

/// Stateless scorer turning an answer sheet into an outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluationScorer;

impl EvaluationScorer {
    pub fn new() -> Self {
        Self
    }

    /// One point per question whose selected option equals the correct answer.
    ///
    /// `questions` is the active set at submission time and fixes the denominator: unanswered
    /// questions score zero but still count, and answers for questions outside the set are
    /// ignored.
    pub fn score(
        &self,
        job_id: &JobId,
        applicant_id: &ApplicantId,
        questions: &[Question],
        answers: &AnswerSheet,
        submitted_at: DateTime<Utc>,
    ) -> EvaluationOutcome {
        let graded: Vec<GradedAnswer> = questions
            .iter()
            .map(|question| {
                let selected = answers.get(&question.id).cloned();
                let correct = selected.as_deref() == Some(question.correct_answer.as_str());
                GradedAnswer {
                    question_id: question.id.clone(),
                    selected,
                    correct,
                }
            })
            .collect();

        let correct = graded.iter().filter(|answer| answer.correct).count();

        EvaluationOutcome {
            id: OutcomeId::generate(),
            job_id: job_id.clone(),
            applicant_id: applicant_id.clone(),
            score: saturating_u32(correct),
            total: saturating_u32(graded.len()),
            submitted_at,
            answers: graded,
        }
    }
}

fn saturating_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
