//! Local journal of completed uploads.
//!
//! The dashboard shows a "recent uploads" card; the CLI keeps the same
//! record locally, appended after each successful transcription. Stored
//! as JSON under the platform data dir, newest first.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How many records `recent()` returns by default.
pub const DEFAULT_RECENT: usize = 10;

/// One completed upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRecord {
    pub course_name: String,
    pub module_id: String,
    pub artifact_name: String,
    pub uploaded_at: DateTime<Utc>,
    /// Length of the transcript, as a rough signal of how much came back.
    pub transcript_chars: usize,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UploadHistory {
    records: Vec<UploadRecord>,
}

impl UploadHistory {
    /// Path of the history file.
    pub fn data_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lectoscribe")
            .join("history.json")
    }

    /// Load the journal; missing or unreadable files yield an empty one.
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::data_path()) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => UploadHistory::default(),
        }
    }

    /// Prepend a record and persist.
    pub fn record(&mut self, record: UploadRecord) -> Result<()> {
        self.records.insert(0, record);
        self.save()
    }

    /// The most recent records, newest first.
    pub fn recent(&self, limit: usize) -> &[UploadRecord] {
        &self.records[..self.records.len().min(limit)]
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn save(&self) -> Result<()> {
        let path = Self::data_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize history")?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_is_newest_first_and_bounded() {
        let mut history = UploadHistory::default();
        for i in 0..3 {
            history.records.insert(
                0,
                UploadRecord {
                    course_name: format!("Course {i}"),
                    module_id: "ml".into(),
                    artifact_name: "a.wav".into(),
                    uploaded_at: Utc::now(),
                    transcript_chars: 10,
                },
            );
        }
        let recent = history.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].course_name, "Course 2");
    }
}
