//! Transport to the transcription service.
//!
//! One endpoint: `POST {base}/stt/transcribe` with a multipart body
//! carrying the audio in a single `audio_file` part and the credential in
//! a bearer header. Success bodies carry a `transcription` string; failure
//! bodies carry a human-readable `detail` used verbatim.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::{ClientError, Result};

/// Request timeout for uploads. Lecture files are large; a hung
/// connection should fail eventually rather than never.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Shared HTTP client (connection pooling across requests).
pub(crate) fn http_client() -> &'static reqwest::Client {
    &HTTP_CLIENT
}

/// Validate a backend base URL and strip any trailing slash.
pub(crate) fn normalize_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Transport(
            "backend URL not configured".into(),
        ));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ClientError::Transport(format!(
            "invalid backend URL '{trimmed}': must start with http:// or https://"
        )));
    }
    let after_scheme = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .unwrap_or("");
    if after_scheme.is_empty() || after_scheme.starts_with('/') {
        return Err(ClientError::Transport(format!(
            "invalid backend URL '{trimmed}': missing host"
        )));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Everything the transport needs for one submission.
#[derive(Debug, Clone)]
pub struct TranscribeRequest {
    pub filename: String,
    pub mime_type: String,
    /// Shared with the artifact; cloned into the request body on send.
    pub audio_data: Arc<Vec<u8>>,
    /// Bearer credential from the session gate.
    pub credential: String,
}

/// The transcription service, seen from the client.
#[async_trait]
pub trait TranscriptionBackend: Send + Sync {
    /// Submit one artifact and wait for its transcript.
    async fn transcribe(&self, request: TranscribeRequest) -> Result<String>;
}

/// reqwest-backed transport.
pub struct HttpBackend {
    endpoint: String,
}

impl HttpBackend {
    /// Build a transport for the given backend base URL.
    ///
    /// # Errors
    /// [`ClientError::Transport`] when the URL is empty or malformed.
    pub fn new(base_url: &str) -> Result<Self> {
        let base = normalize_base_url(base_url)?;
        Ok(HttpBackend {
            endpoint: format!("{base}/stt/transcribe"),
        })
    }
}

#[async_trait]
impl TranscriptionBackend for HttpBackend {
    async fn transcribe(&self, request: TranscribeRequest) -> Result<String> {
        let part = reqwest::multipart::Part::bytes(request.audio_data.as_ref().clone())
            .file_name(request.filename.clone())
            .mime_str(&request.mime_type)
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("audio_file", part);

        crate::verbose!(
            "uploading '{}' ({} bytes) to {}",
            request.filename,
            request.audio_data.len(),
            self.endpoint
        );

        let response = http_client()
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", request.credential))
            .multipart(form)
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        interpret_response(status, &body)
    }
}

#[derive(Deserialize)]
struct TranscribeResponse {
    transcription: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    detail: String,
}

/// Map a non-2xx status/body pair onto the error taxonomy: structured
/// `detail` bodies become [`ClientError::Server`], anything else is a
/// transport failure.
pub(crate) fn failure_from_response(status: u16, body: &str) -> ClientError {
    match serde_json::from_str::<ApiError>(body) {
        Ok(err) => ClientError::Server(err.detail),
        Err(_) => ClientError::Transport(format!("server returned status {status}")),
    }
}

/// Map a raw status/body pair onto the error taxonomy.
pub(crate) fn interpret_response(status: u16, body: &str) -> Result<String> {
    if (200..300).contains(&status) {
        let parsed: TranscribeResponse = serde_json::from_str(body)
            .map_err(|_| ClientError::InvalidResponse("response body is not JSON".into()))?;
        parsed.transcription.ok_or_else(|| {
            ClientError::InvalidResponse("response is missing the transcription field".into())
        })
    } else {
        Err(failure_from_response(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_with_transcript() {
        let out = interpret_response(200, r#"{"transcription":"hello"}"#).unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    fn test_success_missing_field_is_invalid_response() {
        let err = interpret_response(200, r#"{"status":"ok"}"#).unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[test]
    fn test_success_non_json_is_invalid_response() {
        let err = interpret_response(200, "<html>proxy page</html>").unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[test]
    fn test_failure_detail_is_used_verbatim() {
        let err = interpret_response(400, r#"{"detail":"bad audio"}"#).unwrap_err();
        match err {
            ClientError::Server(detail) => assert_eq!(detail, "bad audio"),
            other => panic!("expected Server error, got {other:?}"),
        }
    }

    #[test]
    fn test_failure_without_structured_body_is_transport() {
        let err = interpret_response(502, "Bad Gateway").unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn test_base_url_normalization() {
        assert_eq!(
            normalize_base_url("http://localhost:8000/").unwrap(),
            "http://localhost:8000"
        );
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("localhost:8000").is_err());
        assert!(normalize_base_url("http:///stt").is_err());
    }
}
