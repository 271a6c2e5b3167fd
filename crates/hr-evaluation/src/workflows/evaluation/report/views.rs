use chrono::{DateTime, Utc};
use serde::Serialize;

use super::super::classification::{Classification, Tier};
use super::super::domain::{
    ApplicantId, ApplicantSnapshot, ApplicationStatus, DocumentFlags, JobId,
};
use super::summary::EvaluationSummary;

/// Resolved applicant paired with its derived evaluation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicantEvaluation {
    pub applicant: ApplicantSnapshot,
    pub classification: Classification,
}

impl ApplicantEvaluation {
    pub fn new(applicant: ApplicantSnapshot, classification: Classification) -> Self {
        Self {
            applicant,
            classification,
        }
    }

    /// Grouping key: the department, or the unassigned bucket when blank.
    pub fn department_key(&self) -> &str {
        let department = self.applicant.department.trim();
        if department.is_empty() {
            super::UNASSIGNED_DEPARTMENT
        } else {
            department
        }
    }

    pub fn to_view(&self) -> ApplicantEvaluationView {
        let applicant = &self.applicant;
        ApplicantEvaluationView {
            id: applicant.id.clone(),
            full_name: applicant.full_name.clone(),
            email: applicant.email.clone(),
            job_id: applicant.job_id.clone(),
            job_title: applicant.job_title.clone(),
            department: applicant.department.clone(),
            application_status: applicant.status,
            applied_at: applicant.applied_at,
            documents: applicant.documents,
            evaluation: self.classification,
            tier: self.classification.tier(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicantEvaluationView {
    pub id: ApplicantId,
    pub full_name: String,
    pub email: String,
    pub job_id: JobId,
    pub job_title: String,
    pub department: String,
    pub application_status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub documents: DocumentFlags,
    pub evaluation: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
}

/// Dashboard counters for the applicant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EvaluationStats {
    pub total: usize,
    pub pending_evaluation: usize,
    pub completed_evaluation: usize,
}

impl From<&EvaluationSummary> for EvaluationStats {
    fn from(summary: &EvaluationSummary) -> Self {
        Self {
            total: summary.total,
            pending_evaluation: summary.pending_count,
            completed_evaluation: summary.completed_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentGroup {
    pub department: String,
    pub applicants: Vec<ApplicantEvaluationView>,
}
