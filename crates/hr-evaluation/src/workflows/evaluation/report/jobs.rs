use serde::Serialize;

use super::super::domain::{JobStatus, JobSummary};

/// Counters shown above the job list of the evaluation dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JobBoardStats {
    pub total_jobs: usize,
    pub total_applicants: usize,
    pub active_jobs: usize,
    pub pending_evaluations: usize,
}

impl JobBoardStats {
    pub fn compute(jobs: &[JobSummary], pending_evaluations: usize) -> Self {
        Self {
            total_jobs: jobs.len(),
            total_applicants: jobs.iter().map(|job| job.applicants).sum(),
            active_jobs: jobs
                .iter()
                .filter(|job| job.status == JobStatus::Active)
                .count(),
            pending_evaluations,
        }
    }
}

/// `"all"` or an exact status label such as `"Active"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum JobStatusFilter {
    #[default]
    All,
    Exact(String),
}

impl JobStatusFilter {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Exact(raw.to_string())
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub search: String,
    pub status: JobStatusFilter,
}

impl JobFilter {
    pub fn matches(&self, job: &JobSummary) -> bool {
        let status_ok = match &self.status {
            JobStatusFilter::All => true,
            JobStatusFilter::Exact(label) => job.status.label() == label.as_str(),
        };

        let query = self.search.trim().to_lowercase();
        let search_ok = query.is_empty()
            || [&job.title, &job.department, &job.employment_type]
                .into_iter()
                .any(|field| field.to_lowercase().contains(&query));

        status_ok && search_ok
    }
}

pub fn filter_jobs(jobs: Vec<JobSummary>, criteria: &JobFilter) -> Vec<JobSummary> {
    jobs.into_iter().filter(|job| criteria.matches(job)).collect()
}
