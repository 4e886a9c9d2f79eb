//! Record a lecture from the microphone and transcribe it.

use anyhow::{Context, Result};
use lectoscribe_core::Settings;

use super::{build_workspace, resolve_metadata, submit_and_render};
use crate::app;
use crate::args::RecordArgs;
use crate::ui;

pub async fn run(args: RecordArgs) -> Result<()> {
    let settings = Settings::load();
    let workspace = build_workspace(&settings, args.device)?;

    if let Some(user) = workspace.current_user() {
        ui::info(&format!(
            "Signed in as {} ({})",
            user.display_name, user.role
        ));
    }

    let metadata = resolve_metadata(args.module, args.course, &settings)?;
    workspace.set_metadata(metadata.clone());

    workspace
        .start_recording()
        .context("Could not start recording")?;

    app::wait_for_enter_while(|| workspace.elapsed_seconds())?;

    let artifact = workspace
        .stop_recording()?
        .context("No active recording to stop")?;
    ui::info(&format!(
        "Captured {} ({})",
        artifact.name,
        app::format_size(artifact.size_bytes)
    ));

    submit_and_render(&workspace, &metadata).await
}
