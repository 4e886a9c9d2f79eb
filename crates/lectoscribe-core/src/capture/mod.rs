//! Live microphone capture.
//!
//! A [`RecordingSession`] exists only while audio is being captured: it
//! owns the device stream handle, the fragment sink the device appends
//! into, and the one-second elapsed ticker. Finishing the session tears
//! all three down and materializes the captured audio as a WAV
//! [`AudioArtifact`].

mod device;
mod encode;
mod microphone;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;

pub use device::{AudioDeviceInfo, SystemMicrophone, list_input_devices};
pub use encode::encode_wav;
pub use microphone::{FragmentSink, MicrophoneInput, MicrophoneStream};

use crate::artifact::AudioArtifact;
use crate::error::Result;

/// An active microphone capture. At most one exists at a time.
pub struct RecordingSession {
    sink: FragmentSink,
    stream: Option<Box<dyn MicrophoneStream>>,
    elapsed: Arc<AtomicU64>,
    ticker: JoinHandle<()>,
}

impl std::fmt::Debug for RecordingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingSession")
            .field("elapsed", &self.elapsed)
            .field("recording", &self.stream.is_some())
            .finish_non_exhaustive()
    }
}

impl RecordingSession {
    /// Request microphone access and begin capturing.
    ///
    /// Must be called within a tokio runtime (the elapsed ticker is a
    /// spawned task).
    ///
    /// # Errors
    /// [`crate::ClientError::PermissionDenied`] when the device cannot be
    /// opened; nothing is left running in that case.
    pub fn begin(microphone: &dyn MicrophoneInput, device_name: Option<&str>) -> Result<Self> {
        let sink: FragmentSink = FragmentSink::default();
        let stream = microphone.open(device_name, sink.clone())?;

        let elapsed = Arc::new(AtomicU64::new(0));
        let ticker = tokio::spawn({
            let elapsed = elapsed.clone();
            async move {
                let mut tick = tokio::time::interval(Duration::from_secs(1));
                // The first tick of a tokio interval fires immediately.
                tick.tick().await;
                loop {
                    tick.tick().await;
                    elapsed.fetch_add(1, Ordering::Relaxed);
                }
            }
        });

        Ok(RecordingSession {
            sink,
            stream: Some(stream),
            elapsed,
            ticker,
        })
    }

    /// Seconds since capture started.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.load(Ordering::Relaxed)
    }

    /// Stop capturing and materialize the artifact.
    ///
    /// Releases the device, cancels the ticker, and concatenates the
    /// captured fragments into one WAV payload. A session that captured
    /// nothing still yields a (header-only) artifact; whether that is
    /// acceptable audio is the server's call at submit time.
    pub fn finish(mut self) -> Result<AudioArtifact> {
        self.ticker.abort();

        let (sample_rate, channels) = match self.stream.take() {
            Some(stream) => {
                let format = (stream.sample_rate(), stream.channels());
                stream.stop();
                format
            }
            None => (16_000, 1),
        };

        let fragments = std::mem::take(
            &mut *self
                .sink
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        );
        crate::verbose!(
            "recording stopped: {} fragments, {}s elapsed",
            fragments.len(),
            self.elapsed_seconds()
        );

        let bytes = encode_wav(&fragments, sample_rate, channels)?;
        Ok(AudioArtifact::from_recording(bytes, Utc::now()))
    }
}

impl Drop for RecordingSession {
    fn drop(&mut self) {
        // An abandoned session must not leak the ticker or hold the
        // device open.
        self.ticker.abort();
        if let Some(stream) = self.stream.take() {
            stream.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ArtifactOrigin;
    use std::sync::atomic::AtomicBool;

    /// Scripted microphone: delivers its fragments on open, records stops.
    struct FakeMicrophone {
        fragments: Vec<Vec<f32>>,
        stopped: Arc<AtomicBool>,
    }

    impl FakeMicrophone {
        fn new(fragments: Vec<Vec<f32>>) -> Self {
            FakeMicrophone {
                fragments,
                stopped: Arc::new(AtomicBool::new(false)),
            }
        }
    }

    struct FakeStream {
        stopped: Arc<AtomicBool>,
    }

    impl MicrophoneStream for FakeStream {
        fn sample_rate(&self) -> u32 {
            16_000
        }
        fn channels(&self) -> u16 {
            1
        }
        fn stop(self: Box<Self>) {
            self.stopped.store(true, Ordering::SeqCst);
        }
    }

    impl MicrophoneInput for FakeMicrophone {
        fn open(
            &self,
            _device_name: Option<&str>,
            sink: FragmentSink,
        ) -> Result<Box<dyn MicrophoneStream>> {
            sink.lock()
                .unwrap()
                .extend(self.fragments.iter().cloned());
            Ok(Box::new(FakeStream {
                stopped: self.stopped.clone(),
            }))
        }
    }

    /// Microphone that always refuses access.
    struct DeniedMicrophone;

    impl MicrophoneInput for DeniedMicrophone {
        fn open(
            &self,
            _device_name: Option<&str>,
            _sink: FragmentSink,
        ) -> Result<Box<dyn MicrophoneStream>> {
            Err(crate::ClientError::PermissionDenied(
                "access refused".into(),
            ))
        }
    }

    #[tokio::test]
    async fn test_finish_materializes_recording_artifact() {
        let mic = FakeMicrophone::new(vec![vec![0.1; 32], vec![0.2; 32]]);
        let session = RecordingSession::begin(&mic, None).unwrap();
        let artifact = session.finish().unwrap();

        assert_eq!(artifact.origin, ArtifactOrigin::Recording);
        assert!(artifact.name.starts_with("Recording_"));
        assert!(artifact.name.ends_with(".wav"));
        assert!(artifact.size_bytes > 44);
        assert!(mic.stopped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_finish_releases_device_even_with_no_fragments() {
        let mic = FakeMicrophone::new(Vec::new());
        let session = RecordingSession::begin(&mic, None).unwrap();
        let artifact = session.finish().unwrap();

        assert!(mic.stopped.load(Ordering::SeqCst));
        // Header-only WAV, still a valid artifact.
        assert_eq!(artifact.size_bytes, 44);
    }

    #[tokio::test]
    async fn test_dropped_session_releases_device() {
        let mic = FakeMicrophone::new(Vec::new());
        let session = RecordingSession::begin(&mic, None).unwrap();
        drop(session);
        assert!(mic.stopped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_denied_access_is_an_error() {
        let err = RecordingSession::begin(&DeniedMicrophone, None).unwrap_err();
        assert!(matches!(err, crate::ClientError::PermissionDenied(_)));
    }
}
