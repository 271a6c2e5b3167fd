use serde::Serialize;

use super::domain::{Applicant, EvaluationOutcome};

const HIGH_TIER_MIN: u32 = 70;
const MEDIUM_TIER_MIN: u32 = 50;

/// Evaluation state of an applicant, derived on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Classification {
    Pending,
    Completed {
        score: u32,
        total: u32,
        percentage: u32,
    },
}

impl Classification {
    pub fn from_outcome(outcome: Option<&EvaluationOutcome>) -> Self {
        match outcome {
            Some(outcome) => Self::Completed {
                score: outcome.score,
                total: outcome.total,
                percentage: percentage(outcome.score, outcome.total),
            },
            None => Self::Pending,
        }
    }

    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub fn tier(&self) -> Option<Tier> {
        match self {
            Self::Pending => None,
            Self::Completed { percentage, .. } => Some(Tier::for_percentage(*percentage)),
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed { .. } => "completed",
        }
    }
}

/// Presentation bucket for a completed evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    pub const fn for_percentage(percentage: u32) -> Self {
        if percentage >= HIGH_TIER_MIN {
            Self::High
        } else if percentage >= MEDIUM_TIER_MIN {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Classify an applicant. The applicant record itself does not influence the state.
pub fn classify(_applicant: &Applicant, outcome: Option<&EvaluationOutcome>) -> Classification {
    Classification::from_outcome(outcome)
}

/// Rounded half up; zero when nothing was scored.
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (score, total) = (u64::from(score), u64::from(total));
    ((200 * score + total) / (2 * total)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(3, 5), 60);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(5, 5), 100);
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(Tier::for_percentage(70), Tier::High);
        assert_eq!(Tier::for_percentage(69), Tier::Medium);
        assert_eq!(Tier::for_percentage(50), Tier::Medium);
        assert_eq!(Tier::for_percentage(49), Tier::Low);
        assert_eq!(Tier::for_percentage(0), Tier::Low);
    }
}
