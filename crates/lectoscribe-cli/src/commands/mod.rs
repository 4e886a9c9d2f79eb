//! Command implementations plus the plumbing they share.

pub mod config;
pub mod devices;
pub mod history;
pub mod login;
pub mod record;
pub mod upload;

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use lectoscribe_core::{
    CourseMetadata, HttpBackend, KNOWN_MODULES, Settings, StoredSessionGate, SystemMicrophone,
    TranscriptionWorkspace, UploadHistory, UploadRecord,
};

use crate::ui::{self, ConsoleNotifier};

/// Wire a workspace from the persisted settings.
pub(crate) fn build_workspace(
    settings: &Settings,
    device: Option<String>,
) -> Result<TranscriptionWorkspace> {
    let backend = HttpBackend::new(&settings.effective_backend_url())?;
    let gate = StoredSessionGate::new(settings.clone());

    let mut workspace = TranscriptionWorkspace::new(
        Arc::new(SystemMicrophone),
        Arc::new(backend),
        Arc::new(gate),
        Arc::new(ConsoleNotifier),
    );
    if let Some(device) = device.or_else(|| settings.microphone_device.clone()) {
        workspace = workspace.with_device(device);
    }
    Ok(workspace)
}

/// Resolve course metadata from flags, settings, or interactive prompts.
pub(crate) fn resolve_metadata(
    module: Option<String>,
    course: Option<String>,
    settings: &Settings,
) -> Result<CourseMetadata> {
    let module_id = match module.or_else(|| settings.default_module.clone()) {
        Some(module_id) => module_id,
        None => {
            let labels: Vec<String> = KNOWN_MODULES
                .iter()
                .map(|(id, name)| format!("{name} ({id})"))
                .collect();
            let picked = ui::select("Module", &labels)?;
            KNOWN_MODULES[picked].0.to_string()
        }
    };

    let course_name = match course {
        Some(course_name) => course_name,
        None => ui::input("Course name", None)?,
    };

    Ok(CourseMetadata::new(module_id, course_name))
}

/// Submit the staged artifact, record it in the journal, and print the
/// transcript.
pub(crate) async fn submit_and_render(
    workspace: &TranscriptionWorkspace,
    metadata: &CourseMetadata,
) -> Result<()> {
    ui::info("Submitting for transcription...");
    let transcript = workspace.submit().await?;

    if let Some(artifact) = workspace.current_artifact() {
        let mut journal = UploadHistory::load();
        if let Err(err) = journal.record(UploadRecord {
            course_name: metadata.course_name.clone(),
            module_id: metadata.module_id.clone(),
            artifact_name: artifact.name.clone(),
            uploaded_at: Utc::now(),
            transcript_chars: transcript.chars().count(),
        }) {
            lectoscribe_core::verbose!("could not record upload history: {err:#}");
        }
    }

    ui::header("Transcript");
    println!("{transcript}");
    Ok(())
}
