use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::classification::Classification;
use super::domain::{
    ApplicantId, ApplicantSnapshot, CallerIdentity, EvaluationOutcome, Job, JobId, JobSummary,
    Question, QuestionId,
};
use super::questions::{NewQuestion, QuestionValidationError};
use super::report::{
    self, ApplicantEvaluation, ApplicantEvaluationView, ApplicantFilter, DepartmentGroup,
    EvaluationStats, JobBoardStats, JobFilter,
};
use super::repository::{
    ApplicantDirectory, OutcomeRepository, QuestionRepository, RepositoryError,
};
use super::scoring::{EvaluationScorer, EvaluationSubmission};

/// Service composing the question store, outcome store, and applicant directory.
pub struct EvaluationService<Q, O, D> {
    questions: Arc<Q>,
    outcomes: Arc<O>,
    directory: Arc<D>,
    scorer: EvaluationScorer,
}

/// Job list for the evaluation dashboard. `stats` always covers every job.
#[derive(Debug, Clone, Serialize)]
pub struct JobBoard {
    pub jobs: Vec<JobSummary>,
    pub stats: JobBoardStats,
}

/// Applicant list plus aggregates. `stats` and `departments` cover every applicant while
/// `applicants` honours the requested filter.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicantOverview {
    pub applicants: Vec<ApplicantEvaluationView>,
    pub stats: EvaluationStats,
    pub departments: Vec<String>,
}

impl<Q, O, D> EvaluationService<Q, O, D>
where
    Q: QuestionRepository + 'static,
    O: OutcomeRepository + 'static,
    D: ApplicantDirectory + 'static,
{
    pub fn new(questions: Arc<Q>, outcomes: Arc<O>, directory: Arc<D>) -> Self {
        Self {
            questions,
            outcomes,
            directory,
            scorer: EvaluationScorer::new(),
        }
    }

    /// Jobs with derived applicant counts and dashboard counters.
    pub fn job_board(&self, criteria: &JobFilter) -> Result<JobBoard, EvaluationServiceError> {
        let jobs = self.directory.jobs()?;
        let applicants = self.directory.applicants()?;
        let outcomes = self.outcomes_by_applicant()?;

        let mut counts: HashMap<&JobId, usize> = HashMap::new();
        for applicant in &applicants {
            *counts.entry(&applicant.job_id).or_default() += 1;
        }

        let summaries: Vec<JobSummary> = jobs
            .iter()
            .map(|job| JobSummary::from_job(job, counts.get(&job.id).copied().unwrap_or(0)))
            .collect();

        let pending = applicants
            .iter()
            .filter(|applicant| !outcomes.contains_key(&applicant.id))
            .count();
        let stats = JobBoardStats::compute(&summaries, pending);

        Ok(JobBoard {
            jobs: report::filter_jobs(summaries, criteria),
            stats,
        })
    }

    /// Active questions, for one job or across all jobs.
    pub fn active_questions(
        &self,
        job_id: Option<&JobId>,
    ) -> Result<Vec<Question>, EvaluationServiceError> {
        Ok(self.questions.active(job_id)?)
    }

    /// Validate and persist a new active question.
    pub fn create_question(
        &self,
        request: NewQuestion,
        caller: Option<&CallerIdentity>,
    ) -> Result<Question, EvaluationServiceError> {
        self.create_question_at(request, caller, Utc::now())
    }

    pub fn create_question_at(
        &self,
        request: NewQuestion,
        caller: Option<&CallerIdentity>,
        now: DateTime<Utc>,
    ) -> Result<Question, EvaluationServiceError> {
        let draft = request.validate()?;
        let job = self.require_job(&request.job_id)?;

        let question = draft.into_question(
            job.id,
            now,
            caller.map(|caller| caller.user_id.clone()),
        );
        let stored = self.questions.insert(question)?;

        info!(
            job_id = %stored.job_id,
            question_id = %stored.id,
            options = stored.options.len(),
            "question created"
        );
        Ok(stored)
    }

    /// Soft-delete a question. Repeated calls leave the same state.
    pub fn deactivate_question(&self, id: &QuestionId) -> Result<(), EvaluationServiceError> {
        self.questions.deactivate(id).map_err(|err| match err {
            RepositoryError::NotFound => EvaluationServiceError::NotFound {
                entity: "question",
                id: id.to_string(),
            },
            other => other.into(),
        })?;

        info!(question_id = %id, "question deactivated");
        Ok(())
    }

    /// Score and persist an applicant's answers against the job's current question bank.
    pub fn submit_evaluation(
        &self,
        submission: EvaluationSubmission,
    ) -> Result<EvaluationOutcome, EvaluationServiceError> {
        self.submit_evaluation_at(submission, Utc::now())
    }

    pub fn submit_evaluation_at(
        &self,
        submission: EvaluationSubmission,
        now: DateTime<Utc>,
    ) -> Result<EvaluationOutcome, EvaluationServiceError> {
        let EvaluationSubmission {
            job_id,
            applicant_id,
            answers,
        } = submission;

        let job = self.require_job(&job_id)?;
        let applicant = self.directory.applicant(&applicant_id)?.ok_or_else(|| {
            EvaluationServiceError::NotFound {
                entity: "applicant",
                id: applicant_id.to_string(),
            }
        })?;
        if applicant.job_id != job.id {
            return Err(EvaluationServiceError::ApplicantJobMismatch {
                applicant_id,
                job_id,
            });
        }

        if self.outcomes.fetch(&applicant_id)?.is_some() {
            warn!(applicant_id = %applicant_id, "duplicate evaluation submission rejected");
            return Err(EvaluationServiceError::Conflict);
        }

        let questions = self.questions.active(Some(&job.id))?;
        let outcome = self
            .scorer
            .score(&job.id, &applicant_id, &questions, &answers, now);

        let stored = self.outcomes.insert(outcome).map_err(|err| match err {
            RepositoryError::Conflict => {
                warn!(applicant_id = %applicant_id, "concurrent evaluation submission rejected");
                EvaluationServiceError::Conflict
            }
            other => other.into(),
        })?;

        info!(
            applicant_id = %stored.applicant_id,
            job_id = %stored.job_id,
            score = stored.score,
            total = stored.total,
            "evaluation recorded"
        );
        Ok(stored)
    }

    /// Delete an applicant's outcome so the evaluation can be taken again.
    pub fn retract_evaluation(
        &self,
        applicant_id: &ApplicantId,
    ) -> Result<EvaluationOutcome, EvaluationServiceError> {
        let removed = self.outcomes.remove(applicant_id).map_err(|err| match err {
            RepositoryError::NotFound => EvaluationServiceError::NotFound {
                entity: "evaluation",
                id: applicant_id.to_string(),
            },
            other => other.into(),
        })?;

        info!(applicant_id = %applicant_id, "evaluation retracted");
        Ok(removed)
    }

    /// Every applicant classified, most recent application first.
    pub fn evaluations(&self) -> Result<Vec<ApplicantEvaluation>, EvaluationServiceError> {
        let jobs: HashMap<JobId, Job> = self
            .directory
            .jobs()?
            .into_iter()
            .map(|job| (job.id.clone(), job))
            .collect();
        let outcomes = self.outcomes_by_applicant()?;

        let mut entries: Vec<ApplicantEvaluation> = self
            .directory
            .applicants()?
            .iter()
            .map(|applicant| {
                let snapshot = ApplicantSnapshot::resolve(applicant, jobs.get(&applicant.job_id));
                let classification = Classification::from_outcome(outcomes.get(&applicant.id));
                ApplicantEvaluation::new(snapshot, classification)
            })
            .collect();

        entries.sort_by(|left, right| right.applicant.applied_at.cmp(&left.applicant.applied_at));
        Ok(entries)
    }

    pub fn applicant_overview(
        &self,
        criteria: &ApplicantFilter,
    ) -> Result<ApplicantOverview, EvaluationServiceError> {
        let entries = self.evaluations()?;
        let summary = report::summarize(&entries);

        let applicants = report::filter(&entries, criteria)
            .into_iter()
            .map(ApplicantEvaluation::to_view)
            .collect();

        Ok(ApplicantOverview {
            applicants,
            stats: EvaluationStats::from(&summary),
            departments: summary.departments.into_iter().collect(),
        })
    }

    /// Filtered applicants partitioned by department, groups sorted by name.
    pub fn department_groups(
        &self,
        criteria: &ApplicantFilter,
    ) -> Result<Vec<DepartmentGroup>, EvaluationServiceError> {
        let entries = self.evaluations()?;
        let filtered = report::filter(&entries, criteria);

        Ok(report::group_by_department(filtered)
            .into_iter()
            .map(|(department, members)| DepartmentGroup {
                department,
                applicants: members
                    .into_iter()
                    .map(ApplicantEvaluation::to_view)
                    .collect(),
            })
            .collect())
    }

    fn require_job(&self, job_id: &JobId) -> Result<Job, EvaluationServiceError> {
        self.directory
            .job(job_id)?
            .ok_or_else(|| EvaluationServiceError::NotFound {
                entity: "job",
                id: job_id.to_string(),
            })
    }

    fn outcomes_by_applicant(
        &self,
    ) -> Result<HashMap<ApplicantId, EvaluationOutcome>, EvaluationServiceError> {
        Ok(self
            .outcomes
            .all()?
            .into_iter()
            .map(|outcome| (outcome.applicant_id.clone(), outcome))
            .collect())
    }
}

/// Error raised by the evaluation service.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationServiceError {
    #[error(transparent)]
    Validation(#[from] QuestionValidationError),
    #[error("evaluation already submitted")]
    Conflict,
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("applicant {applicant_id} did not apply for job {job_id}")]
    ApplicantJobMismatch {
        applicant_id: ApplicantId,
        job_id: JobId,
    },
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}
