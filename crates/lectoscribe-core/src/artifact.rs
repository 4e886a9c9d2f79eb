//! The audio artifact: the single payload currently staged for
//! transcription, regardless of how it was obtained.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Formats the dashboard advertises for uploads. Advisory only; the server
/// performs the real validation.
pub const ADVISORY_FORMATS: &[&str] = &["mp3", "wav", "m4a"];

/// Upload size the dashboard advertises (500 MB). Advisory only.
pub const ADVISORY_MAX_BYTES: u64 = 500 * 1024 * 1024;

/// How the current artifact was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactOrigin {
    /// A file the user picked.
    UploadedFile,
    /// A clip captured from the microphone.
    Recording,
}

/// Process-wide unique identity for an artifact.
///
/// Two artifacts never share an id, which is what makes the stale-result
/// check in the workspace reliable: a job remembers the id it was
/// submitted with and a late response is dropped unless that id is still
/// current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ArtifactId(u64);

static NEXT_ARTIFACT_ID: AtomicU64 = AtomicU64::new(1);

impl ArtifactId {
    fn next() -> Self {
        ArtifactId(NEXT_ARTIFACT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// One staged audio payload plus the metadata the UI shows for it.
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    pub id: ArtifactId,
    /// User-visible name: the source filename, or a generated timestamped
    /// name for recordings.
    pub name: String,
    pub size_bytes: u64,
    /// Raw audio bytes, opaque to this crate. Shared so an in-flight
    /// upload keeps its body alive even after the artifact is replaced.
    pub payload: Arc<Vec<u8>>,
    pub origin: ArtifactOrigin,
}

impl AudioArtifact {
    /// Stage a user-picked file.
    pub fn from_file(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size_bytes = bytes.len() as u64;
        AudioArtifact {
            id: ArtifactId::next(),
            name: name.into(),
            size_bytes,
            payload: Arc::new(bytes),
            origin: ArtifactOrigin::UploadedFile,
        }
    }

    /// Stage a finished recording, naming it after the capture time.
    pub fn from_recording(bytes: Vec<u8>, captured_at: DateTime<Utc>) -> Self {
        let size_bytes = bytes.len() as u64;
        AudioArtifact {
            id: ArtifactId::next(),
            name: recording_name(captured_at),
            size_bytes,
            payload: Arc::new(bytes),
            origin: ArtifactOrigin::Recording,
        }
    }

    /// MIME type for the multipart upload, guessed from the extension.
    pub fn mime_type(&self) -> &'static str {
        match self
            .name
            .rsplit('.')
            .next()
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("wav") => "audio/wav",
            Some("mp3") => "audio/mpeg",
            Some("m4a") => "audio/mp4",
            Some("ogg") | Some("opus") => "audio/ogg",
            Some("flac") => "audio/flac",
            Some("webm") => "audio/webm",
            Some("aac") => "audio/aac",
            _ => "application/octet-stream",
        }
    }

    /// Whether the artifact sits outside the advertised upload envelope.
    /// Informational only; nothing is rejected on this basis.
    pub fn outside_advisory_envelope(&self) -> bool {
        if self.size_bytes > ADVISORY_MAX_BYTES {
            return true;
        }
        let ext = self
            .name
            .rsplit('.')
            .next()
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        !ADVISORY_FORMATS.contains(&ext.as_str())
    }
}

/// Generated name for a recording: `Recording_` plus the ISO-8601 capture
/// time with `:` replaced by `-` (so it stays a valid filename), plus
/// `.wav`.
pub fn recording_name(captured_at: DateTime<Utc>) -> String {
    let stamp = captured_at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace(':', "-");
    format!("Recording_{stamp}.wav")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_recording_name_format() {
        let at = Utc.with_ymd_and_hms(2025, 5, 3, 10, 12, 42).unwrap();
        let name = recording_name(at);
        assert_eq!(name, "Recording_2025-05-03T10-12-42.000Z.wav");
        assert!(!name.contains(':'));
    }

    #[test]
    fn test_artifact_ids_are_unique() {
        let a = AudioArtifact::from_file("a.wav", vec![0]);
        let b = AudioArtifact::from_file("a.wav", vec![0]);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_mime_type_from_extension() {
        let wav = AudioArtifact::from_file("lecture.WAV", vec![]);
        assert_eq!(wav.mime_type(), "audio/wav");
        let mp3 = AudioArtifact::from_file("lecture.mp3", vec![]);
        assert_eq!(mp3.mime_type(), "audio/mpeg");
        let unknown = AudioArtifact::from_file("lecture", vec![]);
        assert_eq!(unknown.mime_type(), "application/octet-stream");
    }

    #[test]
    fn test_advisory_envelope() {
        let ok = AudioArtifact::from_file("lecture.mp3", vec![0; 16]);
        assert!(!ok.outside_advisory_envelope());
        let odd_format = AudioArtifact::from_file("lecture.flac", vec![0; 16]);
        assert!(odd_format.outside_advisory_envelope());
    }
}
