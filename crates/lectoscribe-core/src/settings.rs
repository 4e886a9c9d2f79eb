//! Persisted client settings.
//!
//! Stored as JSON under the platform config dir. `load()` never fails:
//! a missing or unreadable file falls back to defaults (with a verbose
//! note), so first runs and corrupted files behave the same way.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::session::UserProfile;

/// Environment override for the backend base URL.
pub const BACKEND_URL_ENV_VAR: &str = "LECTOSCRIBE_BACKEND_URL";

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the transcription service.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Bearer token from the last login, if any.
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Who the token belongs to, for display purposes.
    #[serde(default)]
    pub profile: Option<UserProfile>,

    /// Microphone device name (None = system default).
    #[serde(default)]
    pub microphone_device: Option<String>,

    /// Module preselected for submissions.
    #[serde(default)]
    pub default_module: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            backend_url: default_backend_url(),
            auth_token: None,
            profile: None,
            microphone_device: None,
            default_module: None,
        }
    }
}

impl Settings {
    /// Path of the settings file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lectoscribe")
            .join("settings.json")
    }

    /// Load settings, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load() -> Self {
        let path = Self::config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(err) => {
                    crate::verbose!(
                        "ignoring malformed settings at {}: {err}",
                        path.display()
                    );
                    Settings::default()
                }
            },
            Err(_) => Settings::default(),
        }
    }

    /// Persist settings to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Effective backend URL: the environment override wins over the
    /// stored value.
    pub fn effective_backend_url(&self) -> String {
        std::env::var(BACKEND_URL_ENV_VAR).unwrap_or_else(|_| self.backend_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.backend_url, "http://localhost:8000");
        assert!(settings.auth_token.is_none());
        assert!(settings.microphone_device.is_none());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"auth_token":"abc"}"#).unwrap();
        assert_eq!(settings.backend_url, "http://localhost:8000");
        assert_eq!(settings.auth_token.as_deref(), Some("abc"));
    }
}
