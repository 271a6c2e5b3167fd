use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

identifier!(
    /// Identity of a job opening owned by the recruiting platform.
    JobId
);
identifier!(
    /// Identity of a multiple-choice question in a job's question bank.
    QuestionId
);
identifier!(
    /// Identity of an applicant owned by the recruiting platform.
    ApplicantId
);
identifier!(OutcomeId);

/// Lifecycle of a job opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    Active,
    Inactive,
    Closed,
}

impl JobStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Closed => "Closed",
        }
    }
}

/// Job opening as read from the recruiting platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub department: String,
    pub employment_type: String,
    pub status: JobStatus,
}

/// Job listing row for the evaluation dashboard with its derived applicant count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSummary {
    pub id: JobId,
    pub title: String,
    pub department: String,
    pub employment_type: String,
    pub status: JobStatus,
    pub applicants: usize,
}

impl JobSummary {
    pub fn from_job(job: &Job, applicants: usize) -> Self {
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            department: job.department.clone(),
            employment_type: job.employment_type.clone(),
            status: job.status,
            applicants,
        }
    }
}

/// Multiple-choice question belonging to exactly one job.
///
/// Instances are only built by the question store after validation, so `options` always holds
/// at least two trimmed, non-empty entries and `correct_answer` is one of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub job_id: JobId,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

/// Application status tracked by the recruiting pipeline, independent of evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    Screening,
    Interview,
    Offered,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Screening => "screening",
            Self::Interview => "interview",
            Self::Offered => "offered",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
        }
    }
}

/// Which supporting documents accompany an application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFlags {
    #[serde(default)]
    pub resume: bool,
    #[serde(default)]
    pub cover_letter: bool,
}

/// Applicant record as provided by the recruiting platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: ApplicantId,
    pub full_name: String,
    pub email: String,
    pub job_id: JobId,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    #[serde(default)]
    pub documents: DocumentFlags,
}

const UNKNOWN_APPLICANT: &str = "Unknown";
const UNKNOWN_POSITION: &str = "Unknown Position";

/// Applicant resolved against its job so dashboards see a title and department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicantSnapshot {
    pub id: ApplicantId,
    pub full_name: String,
    pub email: String,
    pub job_id: JobId,
    pub job_title: String,
    pub department: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub documents: DocumentFlags,
}

impl ApplicantSnapshot {
    /// Applicant-level overrides win over job data; blanks fall back to placeholders.
    pub fn resolve(applicant: &Applicant, job: Option<&Job>) -> Self {
        let full_name = non_blank(Some(&applicant.full_name))
            .unwrap_or(UNKNOWN_APPLICANT)
            .to_string();
        let job_title = non_blank(applicant.job_title.as_deref())
            .or_else(|| job.and_then(|job| non_blank(Some(&job.title))))
            .unwrap_or(UNKNOWN_POSITION)
            .to_string();
        let department = non_blank(applicant.department.as_deref())
            .or_else(|| job.and_then(|job| non_blank(Some(&job.department))))
            .unwrap_or_default()
            .to_string();

        Self {
            id: applicant.id.clone(),
            full_name,
            email: applicant.email.clone(),
            job_id: applicant.job_id.clone(),
            job_title,
            department,
            status: applicant.status,
            applied_at: applicant.applied_at,
            documents: applicant.documents,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Selected option per question for one applicant's submission.
pub type AnswerSheet = BTreeMap<QuestionId, String>;

/// Audit entry for a single scored question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedAnswer {
    pub question_id: QuestionId,
    pub selected: Option<String>,
    pub correct: bool,
}

/// Immutable scored result of an applicant's answer submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub id: OutcomeId,
    pub job_id: JobId,
    pub applicant_id: ApplicantId,
    pub score: u32,
    pub total: u32,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub answers: Vec<GradedAnswer>,
}

/// Verified caller supplied by the upstream session layer. Recorded for audit only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub user_id: String,
    #[serde(default)]
    pub role: Option<String>,
}
