use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::evaluation::domain::{
    Applicant, ApplicantId, ApplicantSnapshot, ApplicationStatus, DocumentFlags,
    EvaluationOutcome, Job, JobId, JobStatus, Question, QuestionId,
};
use crate::workflows::evaluation::questions::NewQuestion;
use crate::workflows::evaluation::report::ApplicantEvaluation;
use crate::workflows::evaluation::repository::{
    ApplicantDirectory, OutcomeRepository, QuestionRepository, RepositoryError,
};
use crate::workflows::evaluation::{Classification, EvaluationService};

pub(super) fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn job(id: &str, title: &str, department: &str, status: JobStatus) -> Job {
    Job {
        id: JobId::from(id),
        title: title.to_string(),
        department: department.to_string(),
        employment_type: "Full-time".to_string(),
        status,
    }
}

pub(super) fn jobs() -> Vec<Job> {
    vec![
        job("job-eng", "Backend Engineer", "Engineering", JobStatus::Active),
        job("job-ops", "Payroll Specialist", "Finance", JobStatus::Active),
        job("job-old", "Receptionist", "", JobStatus::Closed),
    ]
}

pub(super) fn applicant(id: &str, name: &str, job_id: &str, day: u32) -> Applicant {
    Applicant {
        id: ApplicantId::from(id),
        full_name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        job_id: JobId::from(job_id),
        job_title: None,
        department: None,
        status: ApplicationStatus::Applied,
        applied_at: at(day, 9),
        documents: DocumentFlags {
            resume: true,
            cover_letter: false,
        },
    }
}

pub(super) fn applicants() -> Vec<Applicant> {
    vec![
        applicant("app-ann", "Ann Reyes", "job-eng", 3),
        applicant("app-bo", "Bo Santos", "job-old", 5),
        applicant("app-cy", "Cy Lim", "job-ops", 4),
        applicant("app-di", "Di Cruz", "job-eng", 1),
    ]
}

pub(super) fn new_question(
    job_id: &str,
    text: &str,
    options: &[&str],
    correct: &str,
) -> NewQuestion {
    NewQuestion {
        job_id: JobId::from(job_id),
        question: text.to_string(),
        options: options.iter().map(|option| option.to_string()).collect(),
        correct_answer: correct.to_string(),
    }
}

pub(super) fn snapshot(name: &str, department: &str) -> ApplicantSnapshot {
    ApplicantSnapshot {
        id: ApplicantId(format!("app-{}", name.to_lowercase())),
        full_name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        job_id: JobId::from("job-eng"),
        job_title: "Backend Engineer".to_string(),
        department: department.to_string(),
        status: ApplicationStatus::Applied,
        applied_at: at(1, 9),
        documents: DocumentFlags::default(),
    }
}

pub(super) fn pending(name: &str, department: &str) -> ApplicantEvaluation {
    ApplicantEvaluation::new(snapshot(name, department), Classification::Pending)
}

pub(super) fn completed(
    name: &str,
    department: &str,
    score: u32,
    total: u32,
) -> ApplicantEvaluation {
    let classification = Classification::Completed {
        score,
        total,
        percentage: crate::workflows::evaluation::classification::percentage(score, total),
    };
    ApplicantEvaluation::new(snapshot(name, department), classification)
}

#[derive(Default, Clone)]
pub(super) struct MemoryQuestions {
    pub(super) questions: Arc<Mutex<Vec<Question>>>,
}

impl MemoryQuestions {
    pub(super) fn snapshot(&self) -> Vec<Question> {
        self.questions.lock().expect("question mutex poisoned").clone()
    }
}

impl QuestionRepository for MemoryQuestions {
    fn insert(&self, question: Question) -> Result<Question, RepositoryError> {
        let mut guard = self.questions.lock().expect("question mutex poisoned");
        if guard.iter().any(|existing| existing.id == question.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(question.clone());
        Ok(question)
    }

    fn active(&self, job_id: Option<&JobId>) -> Result<Vec<Question>, RepositoryError> {
        let guard = self.questions.lock().expect("question mutex poisoned");
        Ok(guard
            .iter()
            .filter(|question| question.active)
            .filter(|question| job_id.map_or(true, |job_id| &question.job_id == job_id))
            .cloned()
            .collect())
    }

    fn deactivate(&self, id: &QuestionId) -> Result<(), RepositoryError> {
        let mut guard = self.questions.lock().expect("question mutex poisoned");
        let question = guard
            .iter_mut()
            .find(|question| &question.id == id)
            .ok_or(RepositoryError::NotFound)?;
        question.active = false;
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryOutcomes {
    pub(super) outcomes: Arc<Mutex<HashMap<ApplicantId, EvaluationOutcome>>>,
}

impl OutcomeRepository for MemoryOutcomes {
    fn insert(&self, outcome: EvaluationOutcome) -> Result<EvaluationOutcome, RepositoryError> {
        let mut guard = self.outcomes.lock().expect("outcome mutex poisoned");
        if guard.contains_key(&outcome.applicant_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(outcome.applicant_id.clone(), outcome.clone());
        Ok(outcome)
    }

    fn fetch(
        &self,
        applicant_id: &ApplicantId,
    ) -> Result<Option<EvaluationOutcome>, RepositoryError> {
        let guard = self.outcomes.lock().expect("outcome mutex poisoned");
        Ok(guard.get(applicant_id).cloned())
    }

    fn all(&self) -> Result<Vec<EvaluationOutcome>, RepositoryError> {
        let guard = self.outcomes.lock().expect("outcome mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn remove(&self, applicant_id: &ApplicantId) -> Result<EvaluationOutcome, RepositoryError> {
        let mut guard = self.outcomes.lock().expect("outcome mutex poisoned");
        guard.remove(applicant_id).ok_or(RepositoryError::NotFound)
    }
}

/// Outcome store whose existence check always misses, so only the conditional insert can
/// catch a duplicate.
#[derive(Default, Clone)]
pub(super) struct RacingOutcomes {
    pub(super) inner: MemoryOutcomes,
}

impl OutcomeRepository for RacingOutcomes {
    fn insert(&self, outcome: EvaluationOutcome) -> Result<EvaluationOutcome, RepositoryError> {
        self.inner.insert(outcome)
    }

    fn fetch(
        &self,
        _applicant_id: &ApplicantId,
    ) -> Result<Option<EvaluationOutcome>, RepositoryError> {
        Ok(None)
    }

    fn all(&self) -> Result<Vec<EvaluationOutcome>, RepositoryError> {
        self.inner.all()
    }

    fn remove(&self, applicant_id: &ApplicantId) -> Result<EvaluationOutcome, RepositoryError> {
        self.inner.remove(applicant_id)
    }
}

#[derive(Clone)]
pub(super) struct MemoryDirectory {
    jobs: Vec<Job>,
    applicants: Vec<Applicant>,
}

impl MemoryDirectory {
    pub(super) fn new(jobs: Vec<Job>, applicants: Vec<Applicant>) -> Self {
        Self { jobs, applicants }
    }
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new(jobs(), applicants())
    }
}

impl ApplicantDirectory for MemoryDirectory {
    fn jobs(&self) -> Result<Vec<Job>, RepositoryError> {
        Ok(self.jobs.clone())
    }

    fn job(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        Ok(self.jobs.iter().find(|job| &job.id == id).cloned())
    }

    fn applicants(&self) -> Result<Vec<Applicant>, RepositoryError> {
        Ok(self.applicants.clone())
    }

    fn applicant(&self, id: &ApplicantId) -> Result<Option<Applicant>, RepositoryError> {
        Ok(self
            .applicants
            .iter()
            .find(|applicant| &applicant.id == id)
            .cloned())
    }
}

pub(super) struct UnavailableStore;

impl QuestionRepository for UnavailableStore {
    fn insert(&self, _question: Question) -> Result<Question, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn active(&self, _job_id: Option<&JobId>) -> Result<Vec<Question>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn deactivate(&self, _id: &QuestionId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

impl OutcomeRepository for UnavailableStore {
    fn insert(&self, _outcome: EvaluationOutcome) -> Result<EvaluationOutcome, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(
        &self,
        _applicant_id: &ApplicantId,
    ) -> Result<Option<EvaluationOutcome>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<EvaluationOutcome>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _applicant_id: &ApplicantId) -> Result<EvaluationOutcome, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) type MemoryService =
    EvaluationService<MemoryQuestions, MemoryOutcomes, MemoryDirectory>;

pub(super) fn build_service() -> (MemoryService, Arc<MemoryQuestions>, Arc<MemoryOutcomes>) {
    let questions = Arc::new(MemoryQuestions::default());
    let outcomes = Arc::new(MemoryOutcomes::default());
    let directory = Arc::new(MemoryDirectory::default());
    let service = EvaluationService::new(questions.clone(), outcomes.clone(), directory);
    (service, questions, outcomes)
}

pub(super) fn unavailable_service(
) -> EvaluationService<UnavailableStore, UnavailableStore, MemoryDirectory> {
    EvaluationService::new(
        Arc::new(UnavailableStore),
        Arc::new(UnavailableStore),
        Arc::new(MemoryDirectory::default()),
    )
}

/// Two questions for the engineering job, answers "4" and "Rust".
pub(super) fn seed_engineering_questions(service: &MemoryService) -> Vec<Question> {
    vec![
        service
            .create_question_at(
                new_question("job-eng", "2 + 2?", &["3", "4", "5"], "4"),
                None,
                at(1, 8),
            )
            .expect("first question stored"),
        service
            .create_question_at(
                new_question("job-eng", "Systems language?", &["Rust", "Bash"], "Rust"),
                None,
                at(1, 8),
            )
            .expect("second question stored"),
    ]
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
