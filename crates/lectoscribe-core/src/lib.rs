//! Core library for lectoscribe: capture or upload lecture audio, submit
//! it to the course-transcription service, and track the job until a
//! transcript (or a failure) comes back.

pub mod artifact;
pub mod auth;
pub mod backend;
pub mod capture;
pub mod error;
pub mod history;
pub mod job;
pub mod notify;
pub mod session;
pub mod settings;
pub mod verbose;
pub mod workspace;

pub use artifact::{ArtifactId, ArtifactOrigin, AudioArtifact};
pub use backend::{DEFAULT_TIMEOUT_SECS, HttpBackend, TranscribeRequest, TranscriptionBackend};
pub use capture::{
    AudioDeviceInfo, MicrophoneInput, MicrophoneStream, RecordingSession, SystemMicrophone,
    list_input_devices,
};
pub use error::ClientError;
pub use history::{UploadHistory, UploadRecord};
pub use job::{CourseMetadata, JobState, KNOWN_MODULES};
pub use notify::{Notifier, NullNotifier};
pub use session::{SessionGate, StoredSessionGate, TOKEN_ENV_VAR, UserProfile};
pub use settings::{BACKEND_URL_ENV_VAR, Settings};
pub use verbose::set_verbose;
pub use workspace::TranscriptionWorkspace;
