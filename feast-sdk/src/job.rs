//! # Batch Jobs
//!
//! A batch retrieval runs asynchronously on Feast Serving. Submitting it only returns a
//! [`JobHandle`] describing the job at submission time; polling it and downloading its results
//! happen out of band.
use crate::proto::feast::serving::{Job, JobStatus, JobType};
use std::fmt;

/// A snapshot of a batch retrieval job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    id: String,
    job_type: JobType,
    status: JobStatus,
    error: Option<String>,
    file_uris: Vec<String>,
}

impl JobHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn job_type(&self) -> JobType {
        self.job_type
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// The error reported by Serving, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Locations of the result files, only populated once the job is done.
    pub fn file_uris(&self) -> &[String] {
        &self.file_uris
    }

    pub fn is_done(&self) -> bool {
        self.status == JobStatus::Done
    }
}

impl From<Job> for JobHandle {
    fn from(job: Job) -> Self {
        Self {
            job_type: job.r#type(),
            status: job.status(),
            error: Some(job.error).filter(|e| !e.is_empty()),
            id: job.id,
            file_uris: job.file_uris,
        }
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.status.as_str_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_from_job() {
        let job = Job {
            id: "job-1".to_string(),
            r#type: JobType::Download as i32,
            status: JobStatus::Pending as i32,
            error: String::new(),
            file_uris: vec![],
        };

        let handle = JobHandle::from(job);

        assert_eq!(handle.id(), "job-1");
        assert_eq!(handle.job_type(), JobType::Download);
        assert_eq!(handle.status(), JobStatus::Pending);
        assert_eq!(handle.error(), None);
        assert!(!handle.is_done());
        assert_eq!(handle.to_string(), "job-1 (JOB_STATUS_PENDING)");
    }

    #[test]
    fn test_unknown_status_falls_back_to_invalid() {
        let job = Job {
            status: 42,
            error: "boom".to_string(),
            ..Default::default()
        };

        let handle = JobHandle::from(job);

        assert_eq!(handle.status(), JobStatus::Invalid);
        assert_eq!(handle.error(), Some("boom"));
    }
}
