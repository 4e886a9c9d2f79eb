//! Login against the service's auth endpoint.
//!
//! `POST {base}/auth/login` with JSON credentials returns `{"token": …}`.
//! Failures carry the same `detail` shape as the transcription endpoint
//! ("Pleas check your Credentials" and friends come back verbatim).

use serde::{Deserialize, Serialize};

use crate::backend::{failure_from_response, http_client, normalize_base_url};
use crate::error::{ClientError, Result};

#[derive(Serialize)]
struct LoginPayload<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

/// Exchange credentials for a bearer token.
pub async fn login(base_url: &str, email: &str, password: &str) -> Result<String> {
    let base = normalize_base_url(base_url)?;
    let endpoint = format!("{base}/auth/login");

    let response = http_client()
        .post(&endpoint)
        .json(&LoginPayload { email, password })
        .send()
        .await?;

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    interpret_login_response(status, &body)
}

fn interpret_login_response(status: u16, body: &str) -> Result<String> {
    if (200..300).contains(&status) {
        let parsed: LoginResponse = serde_json::from_str(body)
            .map_err(|_| ClientError::InvalidResponse("login response is not JSON".into()))?;
        parsed
            .token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ClientError::InvalidResponse("login response is missing the token".into())
            })
    } else {
        Err(failure_from_response(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_token_extracted() {
        let token = interpret_login_response(200, r#"{"token":"jwt-abc"}"#).unwrap();
        assert_eq!(token, "jwt-abc");
    }

    #[test]
    fn test_login_detail_surfaced_verbatim() {
        let err =
            interpret_login_response(400, r#"{"detail":"Pleas check your Credentials"}"#)
                .unwrap_err();
        match err {
            ClientError::Server(detail) => {
                assert_eq!(detail, "Pleas check your Credentials");
            }
            other => panic!("expected Server error, got {other:?}"),
        }
    }

    #[test]
    fn test_login_missing_token_is_invalid_response() {
        let err = interpret_login_response(200, r#"{}"#).unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }
}
