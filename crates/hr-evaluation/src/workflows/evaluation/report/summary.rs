use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::views::ApplicantEvaluation;

pub const UNASSIGNED_DEPARTMENT: &str = "Unassigned";

/// Headline counts over a collection of classified applicants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EvaluationSummary {
    pub total: usize,
    pub pending_count: usize,
    pub completed_count: usize,
    /// Non-empty department names, sorted.
    pub departments: BTreeSet<String>,
}

pub fn summarize(entries: &[ApplicantEvaluation]) -> EvaluationSummary {
    entries
        .iter()
        .fold(EvaluationSummary::default(), |mut summary, entry| {
            summary.total += 1;
            if entry.classification.is_completed() {
                summary.completed_count += 1;
            } else {
                summary.pending_count += 1;
            }

            let department = entry.applicant.department.trim();
            if !department.is_empty() {
                summary.departments.insert(department.to_string());
            }
            summary
        })
}

/// Partition by department; input order is kept inside each group.
pub fn group_by_department<'a, I>(entries: I) -> BTreeMap<String, Vec<&'a ApplicantEvaluation>>
where
    I: IntoIterator<Item = &'a ApplicantEvaluation>,
{
    let mut groups: BTreeMap<String, Vec<&'a ApplicantEvaluation>> = BTreeMap::new();
    for entry in entries {
        groups
            .entry(entry.department_key().to_string())
            .or_default()
            .push(entry);
    }
    groups
}
