//! Show recent uploads.

use anyhow::Result;
use lectoscribe_core::UploadHistory;
use lectoscribe_core::history::DEFAULT_RECENT;

use crate::ui;

pub fn run() -> Result<()> {
    let journal = UploadHistory::load();
    if journal.is_empty() {
        ui::info("No uploads yet.");
        return Ok(());
    }

    ui::header("Recent uploads");
    for record in journal.recent(DEFAULT_RECENT) {
        println!(
            "  {}  [{}]  {}  ({})",
            record.uploaded_at.format("%Y-%m-%d %H:%M"),
            record.module_id,
            record.course_name,
            record.artifact_name,
        );
    }
    Ok(())
}
