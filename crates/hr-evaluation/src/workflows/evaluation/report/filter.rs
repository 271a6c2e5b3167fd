use serde::{Deserialize, Serialize};

use super::views::ApplicantEvaluation;

/// Dashboard tab restricting the evaluation state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationTab {
    #[default]
    All,
    Pending,
    Completed,
}

impl EvaluationTab {
    fn admits(self, entry: &ApplicantEvaluation) -> bool {
        match self {
            Self::All => true,
            Self::Pending => entry.classification.is_pending(),
            Self::Completed => entry.classification.is_completed(),
        }
    }
}

/// `"all"` (any case) or a blank value disables the filter; anything else must match a
/// department exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DepartmentFilter {
    #[default]
    All,
    Exact(String),
}

impl DepartmentFilter {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Exact(raw.to_string())
        }
    }

    fn admits(&self, entry: &ApplicantEvaluation) -> bool {
        match self {
            Self::All => true,
            Self::Exact(department) => entry.department_key() == department.as_str(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicantFilter {
    pub search: String,
    pub department: DepartmentFilter,
    pub tab: EvaluationTab,
}

impl ApplicantFilter {
    pub fn matches(&self, entry: &ApplicantEvaluation) -> bool {
        self.tab.admits(entry)
            && self.department.admits(entry)
            && matches_search(entry, &self.search)
    }
}

fn matches_search(entry: &ApplicantEvaluation, search: &str) -> bool {
    let query = search.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    let applicant = &entry.applicant;
    [
        &applicant.full_name,
        &applicant.email,
        &applicant.job_title,
        &applicant.department,
    ]
    .into_iter()
    .any(|field| field.to_lowercase().contains(&query))
}

/// Tab, then department, then free-text search; all must pass.
pub fn filter<'a>(
    entries: &'a [ApplicantEvaluation],
    criteria: &ApplicantFilter,
) -> Vec<&'a ApplicantEvaluation> {
    entries
        .iter()
        .filter(|entry| criteria.matches(entry))
        .collect()
}
