//! Applicant evaluation: recruiter-authored question banks, answer scoring, and the
//! pending/completed classification that feeds the evaluation dashboards.

pub mod classification;
pub mod domain;
pub mod questions;
pub mod report;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use classification::{classify, Classification, Tier};
pub use domain::{
    AnswerSheet, Applicant, ApplicantId, ApplicantSnapshot, ApplicationStatus, CallerIdentity,
    DocumentFlags, EvaluationOutcome, GradedAnswer, Job, JobId, JobStatus, JobSummary, OutcomeId,
    Question, QuestionId,
};
pub use questions::{NewQuestion, QuestionDraft, QuestionValidationError};
pub use report::{
    ApplicantEvaluation, ApplicantFilter, DepartmentFilter, EvaluationSummary, EvaluationTab,
    JobFilter, JobStatusFilter,
};
pub use repository::{ApplicantDirectory, OutcomeRepository, QuestionRepository, RepositoryError};
pub use router::evaluation_router;
pub use scoring::{EvaluationScorer, EvaluationSubmission};
pub use service::{ApplicantOverview, EvaluationService, EvaluationServiceError, JobBoard};
pub use snapshot::{DirectorySnapshot, SnapshotError};
