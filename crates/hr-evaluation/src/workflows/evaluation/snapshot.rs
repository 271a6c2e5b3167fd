use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{Applicant, Job};

/// Job and applicant records exported from the recruiting platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySnapshot {
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub applicants: Vec<Applicant>,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read directory snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse directory snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate job id {0} in directory snapshot")]
    DuplicateJob(String),
    #[error("duplicate applicant id {0} in directory snapshot")]
    DuplicateApplicant(String),
}

impl DirectorySnapshot {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Applicants may reference jobs missing from the snapshot; they resolve with placeholders.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_reader(reader)?;

        let mut jobs = HashSet::new();
        for job in &snapshot.jobs {
            if !jobs.insert(&job.id) {
                return Err(SnapshotError::DuplicateJob(job.id.to_string()));
            }
        }

        let mut applicants = HashSet::new();
        for applicant in &snapshot.applicants {
            if !applicants.insert(&applicant.id) {
                return Err(SnapshotError::DuplicateApplicant(applicant.id.to_string()));
            }
        }

        Ok(snapshot)
    }
}
