//! The session gate: the boundary to the external auth provider.
//!
//! The gate supplies the bearer credential at submit time and nothing
//! else. Login, logout, and token refresh all belong to the auth
//! collaborator; this side only observes its current state.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Environment override for the bearer credential.
pub const TOKEN_ENV_VAR: &str = "LECTOSCRIBE_TOKEN";

/// The signed-in user, as shown in the dashboard header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub display_name: String,
    pub role: String,
}

/// Read-only view of the current session.
pub trait SessionGate: Send + Sync {
    /// The bearer credential, or `None` when unauthenticated. A `None`
    /// here must short-circuit submission before any network I/O.
    fn current_credential(&self) -> Option<String>;

    /// The signed-in user, when known.
    fn current_user(&self) -> Option<UserProfile>;
}

/// Gate backed by the environment and the persisted settings, in that
/// order.
pub struct StoredSessionGate {
    settings: Settings,
}

impl StoredSessionGate {
    pub fn new(settings: Settings) -> Self {
        StoredSessionGate { settings }
    }
}

impl SessionGate for StoredSessionGate {
    fn current_credential(&self) -> Option<String> {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.is_empty() {
                return Some(token);
            }
        }
        self.settings
            .auth_token
            .clone()
            .filter(|token| !token.is_empty())
    }

    fn current_user(&self) -> Option<UserProfile> {
        self.settings.profile.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_reads_stored_token() {
        let mut settings = Settings::default();
        settings.auth_token = Some("stored-token".into());
        let gate = StoredSessionGate::new(settings);
        assert_eq!(gate.current_credential().as_deref(), Some("stored-token"));
    }

    #[test]
    fn test_empty_token_counts_as_unauthenticated() {
        let mut settings = Settings::default();
        settings.auth_token = Some(String::new());
        let gate = StoredSessionGate::new(settings);
        assert_eq!(gate.current_credential(), None);
    }
}
