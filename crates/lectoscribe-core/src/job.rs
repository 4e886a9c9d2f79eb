//! Transcription job state.
//!
//! One job exists per submitted artifact. The state is a single tagged
//! union — a transcript and an error message cannot coexist, and neither
//! can appear while the job is still in flight.

use serde::Serialize;

use crate::error::{ClientError, Result};

/// Course modules the dashboard offers by default. Free-form ids are
/// accepted too; the server owns the real list.
pub const KNOWN_MODULES: &[(&str, &str)] = &[
    ("ml", "Machine Learning"),
    ("java", "Java"),
    ("mobile", "Mobile Development"),
    ("dl", "Deep Learning"),
];

/// Where the current job stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobState {
    /// No submission yet (or the artifact was replaced/cleared).
    Idle,
    /// Guards passed; the request is being prepared.
    Submitting,
    /// The request is on the wire; awaiting the server's verdict.
    Processing,
    /// The server produced a transcript.
    Completed { transcript: String },
    /// The job ended without a transcript. `message` is what the user
    /// sees, verbatim from the server when it supplied one.
    Failed { message: String },
}

impl JobState {
    /// Whether a submission is currently in flight.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, JobState::Submitting | JobState::Processing)
    }

    /// Whether the job reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed { .. } | JobState::Failed { .. })
    }

    /// The transcript, if the job completed.
    pub fn transcript(&self) -> Option<&str> {
        match self {
            JobState::Completed { transcript } => Some(transcript),
            _ => None,
        }
    }

    /// The failure message, if the job failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            JobState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// The course tag a submission is filed under. Both fields are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CourseMetadata {
    pub module_id: String,
    pub course_name: String,
}

impl CourseMetadata {
    pub fn new(module_id: impl Into<String>, course_name: impl Into<String>) -> Self {
        CourseMetadata {
            module_id: module_id.into(),
            course_name: course_name.into(),
        }
    }

    /// The submit guard: reject locally before any I/O when a required
    /// field is missing.
    pub fn validate(&self) -> Result<()> {
        if self.module_id.trim().is_empty() || self.course_name.trim().is_empty() {
            return Err(ClientError::Validation(
                "Please fill in all required fields".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_and_error_are_exclusive() {
        let done = JobState::Completed {
            transcript: "hello".into(),
        };
        assert_eq!(done.transcript(), Some("hello"));
        assert_eq!(done.error_message(), None);
        assert!(done.is_terminal());

        let failed = JobState::Failed {
            message: "bad audio".into(),
        };
        assert_eq!(failed.transcript(), None);
        assert_eq!(failed.error_message(), Some("bad audio"));
        assert!(failed.is_terminal());
    }

    #[test]
    fn test_in_flight_states_carry_no_outcome() {
        for state in [JobState::Idle, JobState::Submitting, JobState::Processing] {
            assert_eq!(state.transcript(), None);
            assert_eq!(state.error_message(), None);
            assert!(!state.is_terminal());
        }
        assert!(JobState::Submitting.is_in_flight());
        assert!(JobState::Processing.is_in_flight());
        assert!(!JobState::Idle.is_in_flight());
    }

    #[test]
    fn test_metadata_guard_requires_both_fields() {
        assert!(CourseMetadata::new("ml", "Intro to ML").validate().is_ok());
        assert!(matches!(
            CourseMetadata::new("", "Intro to ML").validate(),
            Err(ClientError::Validation(_))
        ));
        assert!(matches!(
            CourseMetadata::new("ml", "   ").validate(),
            Err(ClientError::Validation(_))
        ));
    }
}
