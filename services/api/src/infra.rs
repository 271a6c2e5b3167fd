use chrono::{DateTime, TimeZone, Utc};
use hr_evaluation::workflows::evaluation::{
    Applicant, ApplicantDirectory, ApplicantId, ApplicationStatus, DirectorySnapshot,
    DocumentFlags, EvaluationOutcome, Job, JobId, JobStatus, OutcomeRepository, Question,
    QuestionId, QuestionRepository, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

fn locked<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryQuestionRepository {
    questions: Arc<Mutex<Vec<Question>>>,
}

impl QuestionRepository for InMemoryQuestionRepository {
    fn insert(&self, question: Question) -> Result<Question, RepositoryError> {
        let mut guard = locked(&self.questions)?;
        if guard.iter().any(|existing| existing.id == question.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(question.clone());
        Ok(question)
    }

    fn active(&self, job_id: Option<&JobId>) -> Result<Vec<Question>, RepositoryError> {
        let guard = locked(&self.questions)?;
        Ok(guard
            .iter()
            .filter(|question| question.active)
            .filter(|question| job_id.map_or(true, |job_id| &question.job_id == job_id))
            .cloned()
            .collect())
    }

    fn deactivate(&self, id: &QuestionId) -> Result<(), RepositoryError> {
        let mut guard = locked(&self.questions)?;
        let question = guard
            .iter_mut()
            .find(|question| &question.id == id)
            .ok_or(RepositoryError::NotFound)?;
        question.active = false;
        Ok(())
    }
}

/// Outcomes keyed by applicant; the single lock makes the existence check and insert atomic.
#[derive(Default, Clone)]
pub(crate) struct InMemoryOutcomeRepository {
    outcomes: Arc<Mutex<HashMap<ApplicantId, EvaluationOutcome>>>,
}

impl OutcomeRepository for InMemoryOutcomeRepository {
    fn insert(&self, outcome: EvaluationOutcome) -> Result<EvaluationOutcome, RepositoryError> {
        let mut guard = locked(&self.outcomes)?;
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
        Ok(locked(&self.outcomes)?.get(applicant_id).cloned())
    }

    fn all(&self) -> Result<Vec<EvaluationOutcome>, RepositoryError> {
        Ok(locked(&self.outcomes)?.values().cloned().collect())
    }

    fn remove(&self, applicant_id: &ApplicantId) -> Result<EvaluationOutcome, RepositoryError> {
        locked(&self.outcomes)?
            .remove(applicant_id)
            .ok_or(RepositoryError::NotFound)
    }
}

/// Read-only directory backed by a loaded snapshot.
#[derive(Debug, Clone)]
pub(crate) struct InMemoryDirectory {
    jobs: Vec<Job>,
    applicants: Vec<Applicant>,
}

impl From<DirectorySnapshot> for InMemoryDirectory {
    fn from(snapshot: DirectorySnapshot) -> Self {
        Self {
            jobs: snapshot.jobs,
            applicants: snapshot.applicants,
        }
    }
}

impl ApplicantDirectory for InMemoryDirectory {
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

/// Sample jobs and applicants used when no snapshot is configured.
pub(crate) fn demo_directory() -> DirectorySnapshot {
    DirectorySnapshot {
        jobs: vec![
            job(
                "job-backend",
                "Backend Engineer",
                "Engineering",
                "Full-time",
                JobStatus::Active,
            ),
            job(
                "job-payroll",
                "Payroll Specialist",
                "Finance",
                "Full-time",
                JobStatus::Active,
            ),
            job("job-front-desk", "Receptionist", "", "Part-time", JobStatus::Closed),
        ],
        applicants: vec![
            demo_applicant("app-1001", "Maria Santos", "job-backend", 2, true),
            demo_applicant("app-1002", "Jon Reyes", "job-backend", 4, false),
            demo_applicant("app-1003", "Lea Cruz", "job-payroll", 5, true),
            demo_applicant("app-1004", "Ramon Dela Paz", "job-front-desk", 7, false),
        ],
    }
}

fn job(id: &str, title: &str, department: &str, employment_type: &str, status: JobStatus) -> Job {
    Job {
        id: JobId::from(id),
        title: title.to_string(),
        department: department.to_string(),
        employment_type: employment_type.to_string(),
        status,
    }
}

fn demo_applicant(id: &str, name: &str, job_id: &str, day: u32, cover_letter: bool) -> Applicant {
    Applicant {
        id: ApplicantId::from(id),
        full_name: name.to_string(),
        email: format!("{}@applicants.example", name.to_lowercase().replace(' ', ".")),
        job_id: JobId::from(job_id),
        job_title: None,
        department: None,
        status: ApplicationStatus::Applied,
        applied_at: demo_timestamp(day),
        documents: DocumentFlags {
            resume: true,
            cover_letter,
        },
    }
}

fn demo_timestamp(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, day, 9, 30, 0)
        .single()
        .unwrap_or_default()
}
