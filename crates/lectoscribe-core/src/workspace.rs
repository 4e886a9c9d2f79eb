//! The instructor's capture-and-transcribe workspace.
//!
//! Owns the one current [`AudioArtifact`], the active recording session
//! (if any), and the transcription job state. All the lifecycle
//! invariants live here:
//!
//! - installing a new artifact (upload or recording) atomically replaces
//!   the previous one and resets the job to `Idle`;
//! - at most one recording session is active; starting twice is a no-op;
//! - a submission remembers the artifact id it was made with, and a late
//!   outcome is discarded once that artifact has been replaced.
//!
//! The lock is never held across an await: submission snapshots what it
//! needs, performs the network call lock-free, then re-checks identity
//! before applying the outcome.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::artifact::{ArtifactId, AudioArtifact};
use crate::backend::{TranscribeRequest, TranscriptionBackend};
use crate::capture::{MicrophoneInput, RecordingSession};
use crate::error::{ClientError, Result};
use crate::job::{CourseMetadata, JobState};
use crate::notify::Notifier;
use crate::session::{SessionGate, UserProfile};

struct Inner {
    artifact: Option<AudioArtifact>,
    recording: Option<RecordingSession>,
    job: JobState,
    /// Artifact id the in-flight or last-finished job was submitted with.
    submitted: Option<ArtifactId>,
    metadata: CourseMetadata,
}

pub struct TranscriptionWorkspace {
    inner: Mutex<Inner>,
    microphone: Arc<dyn MicrophoneInput>,
    backend: Arc<dyn TranscriptionBackend>,
    gate: Arc<dyn SessionGate>,
    notifier: Arc<dyn Notifier>,
    device_name: Option<String>,
}

impl TranscriptionWorkspace {
    pub fn new(
        microphone: Arc<dyn MicrophoneInput>,
        backend: Arc<dyn TranscriptionBackend>,
        gate: Arc<dyn SessionGate>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        TranscriptionWorkspace {
            inner: Mutex::new(Inner {
                artifact: None,
                recording: None,
                job: JobState::Idle,
                submitted: None,
                metadata: CourseMetadata::default(),
            }),
            microphone,
            backend,
            gate,
            notifier,
            device_name: None,
        }
    }

    /// Capture from a specific input device instead of the default.
    pub fn with_device(mut self, device_name: impl Into<String>) -> Self {
        self.device_name = Some(device_name.into());
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Stage a user-picked file as the current artifact.
    pub fn select_file(&self, name: impl Into<String>, bytes: Vec<u8>) -> AudioArtifact {
        let artifact = AudioArtifact::from_file(name, bytes);
        if artifact.outside_advisory_envelope() {
            crate::verbose!(
                "'{}' ({} bytes) is outside the advertised upload envelope; \
                 sending anyway, the server validates for real",
                artifact.name,
                artifact.size_bytes
            );
        }
        self.install(artifact.clone());
        artifact
    }

    /// Begin a live recording. A no-op when one is already active.
    ///
    /// # Errors
    /// [`ClientError::PermissionDenied`] when the microphone cannot be
    /// opened. The current artifact and job are left untouched.
    pub fn start_recording(&self) -> Result<()> {
        {
            let inner = self.lock();
            if inner.recording.is_some() {
                crate::verbose!("already recording, ignoring start");
                return Ok(());
            }
        }
        // The device open can block briefly; done outside the lock so
        // state reads stay responsive.
        let session =
            RecordingSession::begin(self.microphone.as_ref(), self.device_name.as_deref())?;

        let mut inner = self.lock();
        if inner.recording.is_some() {
            // Lost the race against a concurrent start; keep the first.
            drop(inner);
            return Ok(());
        }
        inner.recording = Some(session);
        Ok(())
    }

    /// Stop the active recording and install the captured artifact.
    ///
    /// Returns `None` when no recording was active.
    pub fn stop_recording(&self) -> Result<Option<AudioArtifact>> {
        let session = self.lock().recording.take();
        let Some(session) = session else {
            return Ok(None);
        };
        let artifact = session.finish()?;
        self.install(artifact.clone());
        Ok(Some(artifact))
    }

    /// Discard the current artifact and reset the job display state.
    pub fn clear_artifact(&self) {
        let mut inner = self.lock();
        inner.artifact = None;
        inner.job = JobState::Idle;
        inner.submitted = None;
    }

    pub fn set_metadata(&self, metadata: CourseMetadata) {
        self.lock().metadata = metadata;
    }

    pub fn metadata(&self) -> CourseMetadata {
        self.lock().metadata.clone()
    }

    pub fn current_artifact(&self) -> Option<AudioArtifact> {
        self.lock().artifact.clone()
    }

    pub fn is_recording(&self) -> bool {
        self.lock().recording.is_some()
    }

    /// Seconds captured so far; 0 when not recording.
    pub fn elapsed_seconds(&self) -> u64 {
        self.lock()
            .recording
            .as_ref()
            .map(|session| session.elapsed_seconds())
            .unwrap_or(0)
    }

    pub fn job_state(&self) -> JobState {
        self.lock().job.clone()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.gate.current_user()
    }

    /// Submit the current artifact for transcription.
    ///
    /// The guard (artifact present, metadata complete, credential
    /// available) rejects synchronously without touching the network.
    /// On success the transcript is stored and returned; on failure the
    /// job lands in `Failed` with a user-facing message. Either outcome
    /// is dropped if the artifact was replaced while the request was in
    /// flight.
    pub async fn submit(&self) -> Result<String> {
        let (request, artifact_id) = {
            let mut inner = self.lock();

            if inner.job.is_in_flight() {
                crate::verbose!("submission already in progress, ignoring");
                return Err(ClientError::Validation(
                    "A submission is already in progress".into(),
                ));
            }

            let artifact = match &inner.artifact {
                Some(artifact) => artifact.clone(),
                None => {
                    let err = ClientError::Validation(
                        "Please choose or record an audio file first".into(),
                    );
                    self.fail_job(&mut inner, &err);
                    return Err(err);
                }
            };

            if let Err(err) = inner.metadata.validate() {
                self.fail_job(&mut inner, &err);
                return Err(err);
            }

            let Some(credential) = self.gate.current_credential() else {
                let err = ClientError::Unauthenticated;
                self.fail_job(&mut inner, &err);
                return Err(err);
            };

            inner.job = JobState::Submitting;
            inner.submitted = Some(artifact.id);

            (
                TranscribeRequest {
                    filename: artifact.name.clone(),
                    mime_type: artifact.mime_type().to_string(),
                    audio_data: artifact.payload.clone(),
                    credential,
                },
                artifact.id,
            )
        };

        {
            let mut inner = self.lock();
            if inner.submitted == Some(artifact_id) {
                inner.job = JobState::Processing;
            }
        }

        let outcome = self.backend.transcribe(request).await;

        let mut inner = self.lock();
        let still_current = inner.submitted == Some(artifact_id)
            && inner.artifact.as_ref().map(|a| a.id) == Some(artifact_id);
        if !still_current {
            crate::verbose!("discarding stale transcription outcome for a replaced artifact");
            return outcome;
        }

        match outcome {
            Ok(transcript) => {
                inner.job = JobState::Completed {
                    transcript: transcript.clone(),
                };
                drop(inner);
                self.notifier.success("Transcription completed successfully");
                Ok(transcript)
            }
            Err(err) => {
                let message = err.to_string();
                inner.job = JobState::Failed {
                    message: message.clone(),
                };
                drop(inner);
                self.notifier.error(&message);
                Err(err)
            }
        }
    }

    /// Install a new current artifact: replaces any prior one and resets
    /// the job, which is what makes a later in-flight outcome stale.
    fn install(&self, artifact: AudioArtifact) {
        let mut inner = self.lock();
        inner.artifact = Some(artifact);
        inner.job = JobState::Idle;
        inner.submitted = None;
    }

    fn fail_job(&self, inner: &mut Inner, err: &ClientError) {
        let message = err.to_string();
        inner.job = JobState::Failed {
            message: message.clone(),
        };
        self.notifier.error(&message);
    }
}
