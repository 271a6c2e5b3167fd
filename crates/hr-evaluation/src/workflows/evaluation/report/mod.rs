mod filter;
mod jobs;
mod summary;
pub mod views;

pub use filter::{filter, ApplicantFilter, DepartmentFilter, EvaluationTab};
pub use jobs::{filter_jobs, JobBoardStats, JobFilter, JobStatusFilter};
pub use summary::{group_by_department, summarize, EvaluationSummary, UNASSIGNED_DEPARTMENT};
pub use views::{ApplicantEvaluation, ApplicantEvaluationView, DepartmentGroup, EvaluationStats};
