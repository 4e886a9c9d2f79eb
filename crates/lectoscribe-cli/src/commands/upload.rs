//! Transcribe an existing audio file.

use anyhow::{Context, Result};
use lectoscribe_core::Settings;

use super::{build_workspace, resolve_metadata, submit_and_render};
use crate::app;
use crate::args::UploadArgs;
use crate::ui;

pub async fn run(args: UploadArgs) -> Result<()> {
    let settings = Settings::load();
    let workspace = build_workspace(&settings, None)?;

    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let name = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .context("File has no usable name")?
        .to_string();

    let metadata = resolve_metadata(args.module, args.course, &settings)?;
    workspace.set_metadata(metadata.clone());

    let artifact = workspace.select_file(name, bytes);
    ui::info(&format!(
        "Staged {} ({})",
        artifact.name,
        app::format_size(artifact.size_bytes)
    ));
    if artifact.outside_advisory_envelope() {
        ui::info("Note: outside the advertised MP3/WAV/M4A ≤500MB envelope; the server has the final say.");
    }

    submit_and_render(&workspace, &metadata).await
}
