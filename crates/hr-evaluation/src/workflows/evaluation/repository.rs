use super::domain::{
    Applicant, ApplicantId, EvaluationOutcome, Job, JobId, Question, QuestionId,
};

/// Storage for question banks. Questions are never removed, only deactivated.
pub trait QuestionRepository: Send + Sync {
    fn insert(&self, question: Question) -> Result<Question, RepositoryError>;
    /// Active questions in creation order, optionally restricted to one job.
    fn active(&self, job_id: Option<&JobId>) -> Result<Vec<Question>, RepositoryError>;
    /// Clears the active flag. Returns `NotFound` for unknown ids.
    fn deactivate(&self, id: &QuestionId) -> Result<(), RepositoryError>;
}

/// Storage for evaluation outcomes, unique per applicant.
pub trait OutcomeRepository: Send + Sync {
    /// Conditional insert: must fail with `Conflict` when the applicant already has an outcome,
    /// atomically with respect to concurrent inserts for the same applicant.
    fn insert(&self, outcome: EvaluationOutcome) -> Result<EvaluationOutcome, RepositoryError>;
    fn fetch(&self, applicant_id: &ApplicantId)
        -> Result<Option<EvaluationOutcome>, RepositoryError>;
    fn all(&self) -> Result<Vec<EvaluationOutcome>, RepositoryError>;
    fn remove(&self, applicant_id: &ApplicantId) -> Result<EvaluationOutcome, RepositoryError>;
}

/// Read-only view of the recruiting platform's job and applicant records.
pub trait ApplicantDirectory: Send + Sync {
    fn jobs(&self) -> Result<Vec<Job>, RepositoryError>;
    fn job(&self, id: &JobId) -> Result<Option<Job>, RepositoryError>;
    fn applicants(&self) -> Result<Vec<Applicant>, RepositoryError>;
    fn applicant(&self, id: &ApplicantId) -> Result<Option<Applicant>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
